use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};

/// Pexels caps `per_page` at this value.
pub const MAX_PER_PAGE: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub per_page: u32,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            per_page: crate::config::DEFAULT_PER_PAGE,
            page: 1,
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Rejects queries the remote API would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(HarvestError::InvalidQuery("query text is empty".into()));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(HarvestError::InvalidQuery(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if self.page == 0 {
            return Err(HarvestError::InvalidQuery("page starts at 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeVariant {
    Tiny,
    Small,
    Medium,
    Large,
    Large2x,
    Original,
}

/// URL per size variant. Missing variants deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSources {
    pub tiny: String,
    pub small: String,
    pub medium: String,
    pub large: String,
    pub large2x: String,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub photographer: String,
    pub photographer_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub id: u64,
    pub sources: ImageSources,
    pub description: Option<String>,
    pub attribution: Attribution,
    pub width: u32,
    pub height: u32,
}

impl ImageCandidate {
    /// URL for `variant`, falling back to the large rendition.
    pub fn url(&self, variant: SizeVariant) -> Option<&str> {
        let s = &self.sources;
        let wanted = match variant {
            SizeVariant::Tiny => &s.tiny,
            SizeVariant::Small => &s.small,
            SizeVariant::Medium => &s.medium,
            SizeVariant::Large => &s.large,
            SizeVariant::Large2x => &s.large2x,
            SizeVariant::Original => &s.original,
        };
        [wanted, &s.large]
            .into_iter()
            .find(|url| !url.is_empty())
            .map(String::as_str)
    }

    pub fn alt_text(&self, context: &str) -> String {
        if let Some(alt) = self.description.as_deref().filter(|a| !a.trim().is_empty()) {
            return alt.to_string();
        }
        let photographer = &self.attribution.photographer;
        if context.is_empty() {
            format!("Construction safety photo by {photographer}")
        } else {
            format!("{context} - Photo by {photographer}")
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub total_results: u64,
    pub page: u32,
    pub per_page: u32,
    pub candidates: Vec<ImageCandidate>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub fn value(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| format!("aspect ratio must look like W:H, got {s:?}"))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
        if width == 0 || height == 0 {
            return Err(format!("aspect ratio sides must be non-zero: {s:?}"));
        }
        Ok(AspectRatio { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub min_dimensions: Option<Dimensions>,
    pub aspect_ratio: Option<AspectRatio>,
}

impl Requirements {
    pub fn new(width: u32, height: u32, ratio: AspectRatio) -> Self {
        Requirements {
            min_dimensions: Some(Dimensions { width, height }),
            aspect_ratio: Some(ratio),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Mismatches are logged; selection is unaffected.
    #[default]
    Advisory,
    /// Candidates failing validation are never selected.
    Reject,
}

/// A named image slot on a page.
#[derive(Debug, Clone)]
pub struct Role {
    pub name: String,
    pub queries: Vec<String>,
    pub keywords: Vec<String>,
    pub requirements: Option<Requirements>,
    pub variant: SizeVariant,
    pub policy: ValidationPolicy,
}

impl Role {
    pub fn new<I, S>(name: impl Into<String>, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Role {
            name: name.into(),
            queries: queries.into_iter().map(Into::into).collect(),
            keywords: Vec::new(),
            requirements: None,
            variant: SizeVariant::Original,
            policy: ValidationPolicy::Advisory,
        }
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn variant(mut self, variant: SizeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn filename(&self) -> String {
        format!("{}.jpg", self.name)
    }
}

/// Roles filled together for one page, in declaration order.
#[derive(Debug, Clone)]
pub struct RoleSet {
    pub label: String,
    pub roles: Vec<Role>,
}

impl RoleSet {
    pub fn new(label: impl Into<String>, roles: Vec<Role>) -> Self {
        RoleSet {
            label: label.into(),
            roles,
        }
    }
}

#[derive(Debug)]
pub struct DownloadResult {
    pub target: PathBuf,
    pub outcome: Result<u64>,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn into_result(self) -> Result<PathBuf> {
        self.outcome.map(|_| self.target)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    pub filename: String,
    pub url: String,
    pub photographer: String,
    pub photographer_url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub role: String,
    pub page_type: String,
    pub source_id: u64,
    pub query: String,
    pub downloaded_at: DateTime<Utc>,
}

impl AssetMetadata {
    pub fn new(
        filename: String,
        url: String,
        candidate: &ImageCandidate,
        role: &str,
        page_type: &str,
        query: &str,
    ) -> AssetMetadata {
        AssetMetadata {
            filename,
            url,
            photographer: candidate.attribution.photographer.clone(),
            photographer_url: candidate.attribution.photographer_url.clone(),
            alt: candidate.alt_text(query),
            width: candidate.width,
            height: candidate.height,
            role: role.to_string(),
            page_type: page_type.to_string(),
            source_id: candidate.id,
            query: query.to_string(),
            downloaded_at: Utc::now(),
        }
    }
}
