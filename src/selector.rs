use crate::data_models::{ImageCandidate, Requirements, ValidationPolicy};

/// Share of the target width/height a candidate must reach.
const MIN_DIMENSION_FACTOR: f64 = 0.8;
/// Allowed relative deviation from the target aspect ratio.
const MAX_RATIO_DEVIATION: f64 = 0.2;

/// Case-insensitive substring match over a candidate's description.
#[derive(Debug, Clone, Default)]
pub struct KeywordHeuristic {
    keywords: Vec<String>,
}

impl KeywordHeuristic {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        KeywordHeuristic {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, candidate: &ImageCandidate) -> bool {
        let Some(description) = candidate.description.as_deref() else {
            return false;
        };
        let description = description.to_lowercase();
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }
}

/// Picks the first candidate the heuristic accepts, else the first candidate.
///
/// With [`ValidationPolicy::Reject`] only candidates passing [`validate`] are
/// considered, so the result can be `None` for a non-empty input.
pub fn select_best<'a>(
    candidates: &'a [ImageCandidate],
    heuristic: &KeywordHeuristic,
    requirements: Option<&Requirements>,
    policy: ValidationPolicy,
) -> Option<&'a ImageCandidate> {
    let eligible = |c: &&ImageCandidate| match (policy, requirements) {
        (ValidationPolicy::Reject, Some(req)) => validate(c, req),
        _ => true,
    };

    candidates
        .iter()
        .filter(eligible)
        .find(|c| heuristic.matches(c))
        .or_else(|| candidates.iter().find(eligible))
}

/// Minimum size is 80% of the target; the ratio may deviate by 20%.
pub fn validate(candidate: &ImageCandidate, requirements: &Requirements) -> bool {
    if let Some(dims) = requirements.min_dimensions {
        let min_width = dims.width as f64 * MIN_DIMENSION_FACTOR;
        let min_height = dims.height as f64 * MIN_DIMENSION_FACTOR;
        if (candidate.width as f64) < min_width || (candidate.height as f64) < min_height {
            return false;
        }
    }

    if let Some(ratio) = requirements.aspect_ratio {
        if candidate.height == 0 {
            return false;
        }
        let actual = candidate.width as f64 / candidate.height as f64;
        let target = ratio.value();
        if (actual - target).abs() / target > MAX_RATIO_DEVIATION {
            return false;
        }
    }

    true
}
