use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::credentials::{CredentialSource, lookup_first, standard_sources};

pub const DEFAULT_API_URL: &str = "https://api.pexels.com/v1";
pub const DEFAULT_IMAGES_DIR: &str = "assets/images";
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub images_dir: PathBuf,
    pub per_page: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Settings from the same `.env` layering as the API key, resolved
    /// against the current directory.
    pub fn from_env() -> Config {
        let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_sources(&standard_sources(&base))
    }

    pub fn from_sources(sources: &[CredentialSource]) -> Config {
        Config {
            api_base_url: get_or_default(sources, "PEXELS_API_URL", DEFAULT_API_URL),
            images_dir: PathBuf::from(get_or_default(sources, "IMAGES_DIR", DEFAULT_IMAGES_DIR)),
            per_page: parse_or_default(sources, "PEXELS_PER_PAGE", DEFAULT_PER_PAGE),
            request_timeout: Duration::from_secs(parse_or_default(
                sources,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            per_page: DEFAULT_PER_PAGE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn get_or_default(sources: &[CredentialSource], key: &str, default: &str) -> String {
    lookup_first(sources, key).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T: FromStr + Copy + std::fmt::Display>(
    sources: &[CredentialSource],
    key: &str,
    default: T,
) -> T {
    match lookup_first(sources, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring {key}={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}
