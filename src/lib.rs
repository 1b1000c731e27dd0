pub mod catalog;
pub mod config;
pub mod credentials;
pub mod data_models;
pub mod downloader;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod search;
pub mod selector;
