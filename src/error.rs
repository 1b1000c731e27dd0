use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("PEXELS_API_KEY is not set")]
    MissingCredential,

    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    #[error("remote error: {status} {message}")]
    Remote { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no candidate found for role {role}")]
    NoCandidateFound { role: String },

    #[error("image kept but metadata write failed for {}: {source}", .path.display())]
    PartialWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Remediation text shown next to the error, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            HarvestError::MissingCredential => Some(
                "add PEXELS_API_KEY=your_key_here to a .env file in this directory \
                 or export it in the environment (keys: https://www.pexels.com/api/)",
            ),
            HarvestError::Remote { status: 401 | 403, .. } => {
                Some("the API key was rejected, check PEXELS_API_KEY")
            }
            _ => None,
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, HarvestError::MissingCredential)
    }
}
