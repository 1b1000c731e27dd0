//! Curated role sets for the site's pages.

use crate::data_models::{AspectRatio, Requirements, Role, RoleSet, SizeVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSet {
    Homepage,
    SshoServices,
    SafetyRepresentatives,
    Services,
}

impl PageSet {
    pub const ALL: [PageSet; 4] = [
        PageSet::Homepage,
        PageSet::SshoServices,
        PageSet::SafetyRepresentatives,
        PageSet::Services,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PageSet::Homepage => "homepage",
            PageSet::SshoServices => "ssho-services",
            PageSet::SafetyRepresentatives => "safety-representatives",
            PageSet::Services => "services",
        }
    }

    pub fn from_label(label: &str) -> Option<PageSet> {
        PageSet::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn role_set(&self) -> RoleSet {
        match self {
            PageSet::Homepage => page_roles(
                self.label(),
                &[
                    "construction safety inspection professional",
                    "construction safety inspection",
                ],
                &["construction workers safety equipment", "construction workers safety"],
                &["safety professional hard hat", "construction worker PPE"],
            ),
            PageSet::SshoServices => page_roles(
                self.label(),
                &[
                    "military construction site federal project",
                    "military construction site",
                ],
                &["construction safety officer inspection", "construction safety officer"],
                &["federal construction project", "safety inspector construction"],
            ),
            PageSet::SafetyRepresentatives => page_roles(
                self.label(),
                &[
                    "construction safety meeting toolbox talk",
                    "construction safety inspection",
                ],
                &["construction worker safety training", "construction safety training"],
                &["safety meeting construction", "toolbox talk construction"],
            ),
            PageSet::Services => RoleSet::new(
                self.label(),
                vec![
                    Role::new(
                        "service-federal",
                        [
                            "US federal building construction",
                            "government building construction USA",
                            "federal construction project building",
                        ],
                    )
                    .keywords(["building", "construction", "federal", "government"])
                    .variant(SizeVariant::Large),
                    Role::new(
                        "service-training",
                        [
                            "OSHA construction training",
                            "construction safety training hard hat",
                            "construction worker safety training",
                            "construction safety meeting training",
                        ],
                    )
                    .keywords(["training", "construction", "safety", "hard hat"])
                    .variant(SizeVariant::Large),
                ],
            ),
        }
    }
}

fn hero_requirements() -> Requirements {
    Requirements::new(1920, 600, AspectRatio { width: 16, height: 5 })
}

fn service_requirements() -> Requirements {
    Requirements::new(1200, 800, AspectRatio { width: 3, height: 2 })
}

fn page_roles(label: &str, hero: &[&str], first: &[&str], second: &[&str]) -> RoleSet {
    let keywords = ["construction", "safety", "worker", "inspection"];
    RoleSet::new(
        label,
        vec![
            Role::new(format!("{label}-hero"), hero.iter().copied())
                .keywords(keywords)
                .requirements(hero_requirements()),
            Role::new(format!("{label}-service-1"), first.iter().copied())
                .keywords(keywords)
                .requirements(service_requirements()),
            Role::new(format!("{label}-service-2"), second.iter().copied())
                .keywords(keywords)
                .requirements(service_requirements()),
        ],
    )
}
