use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::data_models::AssetMetadata;
use crate::error::{HarvestError, Result};

pub const SIDECAR_SUFFIX: &str = ".json";

/// `hero.jpg` -> `hero.jpg.json`
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    let mut name: OsString = image_path.as_os_str().to_owned();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Writes the sidecar next to `image_path`, replacing any previous one.
pub async fn write_metadata(asset: &AssetMetadata, image_path: &Path) -> Result<PathBuf> {
    let path = sidecar_path(image_path);
    let json = serde_json::to_string_pretty(asset)?;
    fs::write(&path, json)
        .await
        .map_err(|source| HarvestError::PartialWriteFailure {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

pub async fn read_metadata(image_path: &Path) -> Result<AssetMetadata> {
    let raw = fs::read_to_string(sidecar_path(image_path)).await?;
    Ok(serde_json::from_str(&raw)?)
}
