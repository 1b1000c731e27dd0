use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;

use crate::data_models::{AssetMetadata, ImageCandidate, Role, RoleSet, SearchQuery};
use crate::downloader::Downloader;
use crate::error::{HarvestError, Result};
use crate::metadata::write_metadata;
use crate::search::SearchClient;
use crate::selector::{KeywordHeuristic, select_best, validate};

#[derive(Debug)]
pub struct RoleSuccess {
    pub path: PathBuf,
    /// `None` when the image was kept but its sidecar could not be written.
    pub metadata_path: Option<PathBuf>,
    pub candidate_id: u64,
    pub query: String,
    pub meets_requirements: bool,
}

#[derive(Debug)]
pub struct RoleOutcome {
    pub role: String,
    pub result: Result<RoleSuccess>,
}

impl RoleOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub page: String,
    pub outcomes: Vec<RoleOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded() == 0
    }
}

/// Runs roles one after another: search, select, download, write metadata.
pub struct Pipeline {
    search: SearchClient,
    downloader: Downloader,
    images_dir: PathBuf,
    per_page: u32,
}

impl Pipeline {
    pub fn new(
        search: SearchClient,
        downloader: Downloader,
        images_dir: impl Into<PathBuf>,
        per_page: u32,
    ) -> Pipeline {
        Pipeline {
            search,
            downloader,
            images_dir: images_dir.into(),
            per_page,
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Fails only if the images directory cannot be prepared; role failures
    /// are reported in the returned outcomes.
    pub async fn run(&self, role_set: &RoleSet) -> anyhow::Result<RunReport> {
        self.ensure_images_dir().await?;
        log::info!(
            "fetching images for {} ({} roles)",
            role_set.label,
            role_set.roles.len()
        );

        let mut outcomes = Vec::with_capacity(role_set.roles.len());
        for role in &role_set.roles {
            let result = self.run_role(role, &role_set.label).await;
            match &result {
                Ok(success) => {
                    log::info!("{}: saved {}", role.name, success.path.display())
                }
                Err(e) => log::error!("{}: {:#}", role.name, e),
            }
            outcomes.push(RoleOutcome {
                role: role.name.clone(),
                result,
            });
        }

        Ok(RunReport {
            page: role_set.label.clone(),
            outcomes,
        })
    }

    async fn ensure_images_dir(&self) -> anyhow::Result<()> {
        if !fs::try_exists(&self.images_dir).await.unwrap_or(false) {
            fs::create_dir_all(&self.images_dir).await.with_context(|| {
                format!("failed to create images directory {}", self.images_dir.display())
            })?;
        }
        Ok(())
    }

    async fn run_role(&self, role: &Role, page: &str) -> Result<RoleSuccess> {
        let (candidate, query) = self.resolve_candidate(role).await?;

        let meets_requirements = role
            .requirements
            .as_ref()
            .is_none_or(|req| validate(&candidate, req));
        if !meets_requirements {
            log::warn!(
                "{}: photo {} ({}x{}) does not meet size requirements, using it anyway",
                role.name,
                candidate.id,
                candidate.width,
                candidate.height
            );
        }

        let url = candidate
            .url(role.variant)
            .ok_or_else(|| HarvestError::NoCandidateFound {
                role: role.name.clone(),
            })?
            .to_string();
        let filename = role.filename();
        let target = self.images_dir.join(&filename);

        log::info!(
            "{}: downloading {url} by {} ({}x{})",
            role.name,
            candidate.attribution.photographer,
            candidate.width,
            candidate.height
        );
        let path = self.downloader.download(&url, &target).await.into_result()?;

        let asset = AssetMetadata::new(filename, url, &candidate, &role.name, page, &query);
        let metadata_path = match write_metadata(&asset, &path).await {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("{}: {:#}", role.name, e);
                None
            }
        };

        Ok(RoleSuccess {
            path,
            metadata_path,
            candidate_id: candidate.id,
            query,
            meets_requirements,
        })
    }

    /// Tries the role's queries in order and stops at the first one that
    /// yields a usable candidate.
    async fn resolve_candidate(&self, role: &Role) -> Result<(ImageCandidate, String)> {
        let heuristic = KeywordHeuristic::new(&role.keywords);
        let mut last_error = None;

        for query in &role.queries {
            log::info!("{}: searching {query:?}", role.name);
            let search_query = SearchQuery::new(query.as_str()).per_page(self.per_page);
            let page = match self.search.search(&search_query).await {
                Ok(page) => page,
                Err(e) if e.is_missing_credential() => return Err(e),
                Err(e) => {
                    log::warn!("{}: query {query:?} failed: {e}", role.name);
                    last_error = Some(e);
                    continue;
                }
            };

            let chosen = select_best(
                &page.candidates,
                &heuristic,
                role.requirements.as_ref(),
                role.policy,
            );
            if let Some(candidate) = chosen {
                log::info!(
                    "{}: found {}",
                    role.name,
                    candidate.description.as_deref().unwrap_or("untitled photo")
                );
                return Ok((candidate.clone(), query.clone()));
            }
            log::debug!("{}: no usable result for {query:?}", role.name);
        }

        Err(last_error.unwrap_or_else(|| HarvestError::NoCandidateFound {
            role: role.name.clone(),
        }))
    }
}
