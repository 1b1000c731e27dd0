use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::config::Config;
use crate::credentials::Credential;
use crate::data_models::{Attribution, ImageCandidate, ImageSources, SearchPage, SearchQuery};
use crate::error::{HarvestError, Result};

/// Keyword search against the Pexels photo catalog.
///
/// No retries and no rate limiting; callers keep the call volume low.
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
}

impl SearchClient {
    pub fn new(credential: Option<Credential>, config: &Config) -> Result<SearchClient> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(SearchClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    /// Client against an arbitrary base URL with default settings.
    pub fn with_base_url(base_url: &str, credential: Option<Credential>) -> Result<SearchClient> {
        let config = Config {
            api_base_url: base_url.to_string(),
            ..Config::default()
        };
        Self::new(credential, &config)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(HarvestError::MissingCredential)?;
        query.validate()?;

        let url = format!("{}/search", self.base_url);
        log::debug!(
            "searching {url} query={:?} per_page={} page={}",
            query.text,
            query.per_page,
            query.page
        );

        let per_page = query.per_page.to_string();
        let page = query.page.to_string();
        let res = self
            .client
            .get(&url)
            .query(&[
                ("query", query.text.as_str()),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
            ])
            .header(AUTHORIZATION, credential.expose())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(remote_error(status, body));
        }

        let body = res.text().await?;
        let parsed: PexelsSearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_page(query))
    }
}

fn remote_error(status: StatusCode, body: String) -> HarvestError {
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("unknown status").to_string(),
        text => text.to_string(),
    };
    HarvestError::Remote {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Deserialize)]
struct PexelsSearchResponse {
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    per_page: Option<u32>,
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    photographer_url: String,
    #[serde(default)]
    src: ImageSources,
}

impl PexelsSearchResponse {
    fn into_page(self, query: &SearchQuery) -> SearchPage {
        SearchPage {
            total_results: self.total_results,
            page: self.page.unwrap_or(query.page),
            per_page: self.per_page.unwrap_or(query.per_page),
            candidates: self.photos.into_iter().map(ImageCandidate::from).collect(),
        }
    }
}

impl From<PexelsPhoto> for ImageCandidate {
    fn from(photo: PexelsPhoto) -> Self {
        ImageCandidate {
            id: photo.id,
            sources: photo.src,
            description: photo.alt.filter(|a| !a.is_empty()),
            attribution: Attribution {
                photographer: photo.photographer,
                photographer_url: photo.photographer_url,
            },
            width: photo.width,
            height: photo.height,
        }
    }
}
