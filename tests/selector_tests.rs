use photo_harvest::data_models::*;
use photo_harvest::selector::*;

mod test_helpers {
    use super::*;

    pub fn candidate(id: u64, alt: Option<&str>, width: u32, height: u32) -> ImageCandidate {
        ImageCandidate {
            id,
            sources: ImageSources {
                large: format!("https://images.example/{id}/large.jpeg"),
                original: format!("https://images.example/{id}/original.jpeg"),
                ..ImageSources::default()
            },
            description: alt.map(str::to_string),
            attribution: Attribution {
                photographer: "Jane Doe".into(),
                photographer_url: "https://www.pexels.com/@jane".into(),
            },
            width,
            height,
        }
    }

    pub fn hero() -> Requirements {
        Requirements::new(1920, 600, AspectRatio { width: 16, height: 5 })
    }
}

use test_helpers::*;

#[cfg(test)]
mod keyword_heuristic {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let h = KeywordHeuristic::new(["Federal", "building"]);
        assert!(h.matches(&candidate(1, Some("A FEDERAL courthouse"), 10, 10)));
        assert!(h.matches(&candidate(2, Some("Tall Building at dusk"), 10, 10)));
    }

    #[test]
    fn test_no_description_never_matches() {
        let h = KeywordHeuristic::new(["building"]);
        assert!(!h.matches(&candidate(1, None, 10, 10)));
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        let h = KeywordHeuristic::new(Vec::<String>::new());
        assert!(!h.matches(&candidate(1, Some("construction"), 10, 10)));
    }
}

#[cfg(test)]
mod select_best_tests {
    use super::*;

    #[test]
    fn test_first_keyword_hit_wins() {
        let h = KeywordHeuristic::new(["construction"]);
        let candidates = vec![
            candidate(1, Some("a cat"), 100, 100),
            candidate(2, Some("construction crane"), 100, 100),
            candidate(3, Some("construction site"), 100, 100),
        ];
        let chosen = select_best(&candidates, &h, None, ValidationPolicy::Advisory).unwrap();
        assert_eq!(chosen.id, 2);
    }

    #[test]
    fn test_falls_back_to_first_candidate() {
        let h = KeywordHeuristic::new(["federal"]);
        let candidates = vec![
            candidate(7, Some("a beach"), 100, 100),
            candidate(8, None, 100, 100),
        ];
        let chosen = select_best(&candidates, &h, None, ValidationPolicy::Advisory).unwrap();
        assert_eq!(chosen.id, 7);
    }

    #[test]
    fn test_empty_input_yields_none() {
        let h = KeywordHeuristic::new(["federal"]);
        assert!(select_best(&[], &h, None, ValidationPolicy::Advisory).is_none());
    }

    #[test]
    fn test_advisory_ignores_failed_validation() {
        let h = KeywordHeuristic::new(["construction"]);
        let candidates = vec![candidate(1, Some("construction"), 100, 100)];
        let req = hero();
        let chosen = select_best(&candidates, &h, Some(&req), ValidationPolicy::Advisory);
        assert_eq!(chosen.map(|c| c.id), Some(1));
    }

    #[test]
    fn test_reject_skips_invalid_candidates() {
        let h = KeywordHeuristic::new(["construction"]);
        let candidates = vec![
            candidate(1, Some("construction"), 100, 100),
            candidate(2, Some("a field"), 1920, 600),
            candidate(3, Some("construction crew"), 3200, 1000),
        ];
        let req = hero();
        let chosen = select_best(&candidates, &h, Some(&req), ValidationPolicy::Reject).unwrap();
        assert_eq!(chosen.id, 3);
    }

    #[test]
    fn test_reject_with_no_valid_candidate_yields_none() {
        let h = KeywordHeuristic::new(["construction"]);
        let candidates = vec![candidate(1, Some("construction"), 100, 100)];
        let req = hero();
        assert!(select_best(&candidates, &h, Some(&req), ValidationPolicy::Reject).is_none());
    }
}

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[test]
    fn test_exact_target_dimensions_pass() {
        assert!(validate(&candidate(1, None, 1920, 600), &hero()));
    }

    #[test]
    fn test_half_width_with_matching_ratio_fails() {
        assert!(!validate(&candidate(1, None, 960, 300), &hero()));
    }

    #[test]
    fn test_eighty_percent_boundary_passes() {
        let req = Requirements {
            min_dimensions: Some(Dimensions {
                width: 1000,
                height: 500,
            }),
            aspect_ratio: None,
        };
        assert!(validate(&candidate(1, None, 800, 400), &req));
        assert!(!validate(&candidate(1, None, 799, 400), &req));
    }

    #[test]
    fn test_ratio_outside_tolerance_fails() {
        // 3:2 target, square photo deviates by a third
        let req = Requirements {
            min_dimensions: None,
            aspect_ratio: Some(AspectRatio { width: 3, height: 2 }),
        };
        assert!(!validate(&candidate(1, None, 2000, 2000), &req));
        assert!(validate(&candidate(1, None, 1800, 1100), &req));
    }

    #[test]
    fn test_no_requirements_always_pass() {
        assert!(validate(&candidate(1, None, 1, 1), &Requirements::default()));
    }

    #[test]
    fn test_aspect_ratio_parse() {
        let r: AspectRatio = "16:5".parse().unwrap();
        assert_eq!(r, AspectRatio { width: 16, height: 5 });
        assert_eq!(r.to_string(), "16:5");
        assert!("16x5".parse::<AspectRatio>().is_err());
        assert!("0:5".parse::<AspectRatio>().is_err());
    }
}

#[cfg(test)]
mod candidate_helpers {
    use super::*;

    #[test]
    fn test_url_falls_back_to_large() {
        let c = candidate(5, None, 10, 10);
        assert_eq!(
            c.url(SizeVariant::Original),
            Some("https://images.example/5/original.jpeg")
        );
        assert_eq!(
            c.url(SizeVariant::Tiny),
            Some("https://images.example/5/large.jpeg")
        );
    }

    #[test]
    fn test_alt_text_prefers_description() {
        let c = candidate(1, Some("Workers on scaffolding"), 10, 10);
        assert_eq!(c.alt_text("hero"), "Workers on scaffolding");
    }

    #[test]
    fn test_alt_text_generated_from_context() {
        let c = candidate(1, None, 10, 10);
        assert_eq!(c.alt_text("safety meeting"), "safety meeting - Photo by Jane Doe");
        assert_eq!(c.alt_text(""), "Construction safety photo by Jane Doe");
    }
}
