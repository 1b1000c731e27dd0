//! API key resolution.
//!
//! The key is looked up in an ordered list of sources and the first source
//! that defines it wins. Files are parsed in place; nothing is written to the
//! process environment.

use once_cell::sync::OnceCell;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "PEXELS_API_KEY";

/// How many directories above the base the shared `.env` lives.
pub const ANCESTOR_DEPTH: usize = 4;

static CREDENTIAL: OnceCell<Option<Credential>> = OnceCell::new();

#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Credential(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub enum CredentialSource {
    EnvFile(PathBuf),
    Environment,
}

impl CredentialSource {
    pub fn lookup(&self, key: &str) -> Option<String> {
        let value = match self {
            CredentialSource::EnvFile(path) => read_env_file(path, key),
            CredentialSource::Environment => env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

fn read_env_file(path: &Path, key: &str) -> Option<String> {
    let iter = dotenvy::from_path_iter(path).ok()?;
    let mut found = None;
    for item in iter {
        match item {
            Ok((k, v)) if k == key => found = Some(v),
            Ok(_) => {}
            Err(e) => {
                log::warn!("skipping malformed line in {}: {e}", path.display());
            }
        }
    }
    found
}

/// Local `.env`, then the shared `.env` [`ANCESTOR_DEPTH`] levels up, then
/// the process environment.
pub fn standard_sources(base_dir: &Path) -> Vec<CredentialSource> {
    let mut ancestor = base_dir.to_path_buf();
    for _ in 0..ANCESTOR_DEPTH {
        ancestor.push("..");
    }
    vec![
        CredentialSource::EnvFile(base_dir.join(".env")),
        CredentialSource::EnvFile(ancestor.join(".env")),
        CredentialSource::Environment,
    ]
}

/// First value any source defines for `key`.
pub fn lookup_first(sources: &[CredentialSource], key: &str) -> Option<String> {
    sources.iter().find_map(|source| source.lookup(key))
}

#[derive(Debug, Clone)]
pub struct CredentialLoader {
    key: String,
    sources: Vec<CredentialSource>,
}

impl CredentialLoader {
    pub fn new(key: impl Into<String>, sources: Vec<CredentialSource>) -> Self {
        CredentialLoader {
            key: key.into(),
            sources,
        }
    }

    pub fn standard(base_dir: &Path) -> Self {
        Self::new(API_KEY_VAR, standard_sources(base_dir))
    }

    pub fn sources(&self) -> &[CredentialSource] {
        &self.sources
    }

    pub fn resolve(&self) -> Option<Credential> {
        for source in &self.sources {
            if let Some(value) = source.lookup(&self.key) {
                log::debug!("{} resolved from {:?}", self.key, source);
                return Some(Credential::new(value));
            }
        }
        None
    }
}

/// The credential for this process, resolved on first use against the
/// current directory and cached afterwards.
pub fn credential() -> Option<&'static Credential> {
    CREDENTIAL
        .get_or_init(|| {
            let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let resolved = CredentialLoader::standard(&base).resolve();
            if resolved.is_none() {
                log::warn!("{API_KEY_VAR} not found in .env files or environment");
            }
            resolved
        })
        .as_ref()
}
