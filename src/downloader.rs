use std::ffi::OsString;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::data_models::DownloadResult;
use crate::error::{HarvestError, Result};

pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(config: &Config) -> Result<Downloader> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Downloader { client })
    }

    /// Fetches `source_url` into `destination`.
    ///
    /// The destination only exists afterwards if the result is a success: the
    /// body goes to a `.part` sibling that is renamed into place once the
    /// write has finished cleanly, and any earlier file at the destination is
    /// removed when the download fails.
    pub async fn download(&self, source_url: &str, destination: &Path) -> DownloadResult {
        let outcome = self.fetch_to(source_url, destination).await;
        if let Err(e) = &outcome {
            log::debug!("download of {source_url} failed: {e}");
            discard(destination).await;
        }
        DownloadResult {
            target: destination.to_path_buf(),
            outcome,
        }
    }

    async fn fetch_to(&self, source_url: &str, destination: &Path) -> Result<u64> {
        let mut res = self.client.get(source_url).send().await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(HarvestError::Remote {
                status: status.as_u16(),
                message: format!(
                    "failed to download image: {}",
                    status.canonical_reason().unwrap_or("unexpected status")
                ),
            });
        }

        let partial = partial_path(destination);
        let mut file = fs::File::create(&partial).await?;

        let mut written: u64 = 0;
        let streamed = async {
            while let Some(chunk) = res.chunk().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok::<(), HarvestError>(())
        }
        .await;
        drop(file);

        if let Err(e) = streamed {
            discard(&partial).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&partial, destination).await {
            discard(&partial).await;
            return Err(e.into());
        }
        Ok(written)
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name: OsString = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("could not remove {}: {e}", path.display());
        }
    }
}
