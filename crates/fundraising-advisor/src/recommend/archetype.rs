use super::eligibility::{categorical_exclusion, log_exclusion};
use super::{by_confidence_desc, AlgorithmKind, Attribution, Recommender, ScoredStrategy};
use crate::answers::AnswerSet;
use crate::catalog::{ids, StrategyCatalog};
use crate::domain::{MaturityStage, SizeClass};
use crate::profile::NgoProfile;

const MIN_MATCH: f64 = 0.5;
const FULL_MATCH_SCORE: f64 = 85.0;

/// One declared trait of an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArchetypeCriterion {
    Size(&'static [SizeClass]),
    Maturity(&'static [MaturityStage]),
    RegistrationType(&'static [&'static str]),
    /// Whether the organization runs a website.
    DigitalPresence(bool),
    /// Overlap with the primary beneficiary groups.
    Focus(&'static [&'static str]),
    CsrCompliance(bool),
    FcraCompliance(bool),
    Scope(&'static [&'static str]),
    Volunteers(bool),
    Location(&'static [&'static str]),
    Beneficiaries(&'static [&'static str]),
}

impl ArchetypeCriterion {
    pub fn is_satisfied(&self, answers: &AnswerSet, profile: &NgoProfile) -> bool {
        match *self {
            Self::Size(sizes) => sizes.contains(&profile.size),
            Self::Maturity(stages) => stages.contains(&profile.maturity),
            Self::RegistrationType(types) => profile
                .registration_type
                .as_deref()
                .is_some_and(|registration| types.contains(&registration)),
            Self::DigitalPresence(expected) => answers.is_yes("ngoWebsite") == expected,
            Self::Focus(groups) | Self::Beneficiaries(groups) => {
                answers.contains_any("ngoPrimaryBeneficiaries", groups)
            }
            Self::CsrCompliance(expected) => profile.has_compliance("csr1") == expected,
            Self::FcraCompliance(expected) => profile.has_compliance("fcra") == expected,
            Self::Scope(scopes) => answers
                .text("ngoScope")
                .is_some_and(|scope| scopes.contains(&scope)),
            Self::Volunteers(expected) => answers.is_yes("ngoVolunteers") == expected,
            Self::Location(locations) => answers.contains_any("ngoLocation", locations),
        }
    }
}

/// A named cluster of organization traits and the strategies that suit it.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub criteria: &'static [ArchetypeCriterion],
    pub strategies: &'static [&'static str],
    pub confidence: f64,
}

impl Archetype {
    /// Share of declared criteria satisfied; 0 when none are declared.
    pub fn match_fraction(&self, answers: &AnswerSet, profile: &NgoProfile) -> f64 {
        if self.criteria.is_empty() {
            return 0.0;
        }
        let satisfied = self
            .criteria
            .iter()
            .filter(|criterion| criterion.is_satisfied(answers, profile))
            .count();
        satisfied as f64 / self.criteria.len() as f64
    }
}

pub const STANDARD_ARCHETYPES: [Archetype; 7] = [
    Archetype {
        name: "Digital-First Small NGO",
        criteria: &[
            ArchetypeCriterion::Size(&[SizeClass::Small]),
            ArchetypeCriterion::DigitalPresence(true),
            ArchetypeCriterion::Focus(&["education", "environment", "health"]),
        ],
        strategies: &[ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING],
        confidence: 0.85,
    },
    Archetype {
        name: "Traditional Educational Institution",
        criteria: &[
            ArchetypeCriterion::RegistrationType(&["educational"]),
            ArchetypeCriterion::Maturity(&[MaturityStage::Established, MaturityStage::Mature]),
        ],
        strategies: &[ids::ENDOWMENT_FUNDS, ids::HNI_GIVING, ids::EVENT_BASED],
        confidence: 0.9,
    },
    Archetype {
        name: "Corporate-Funded NGO",
        criteria: &[
            ArchetypeCriterion::CsrCompliance(true),
            ArchetypeCriterion::Size(&[SizeClass::Medium, SizeClass::Large]),
        ],
        strategies: &[ids::CSR, ids::EMPLOYEE_GIVING, ids::MATCHING_DONATIONS],
        confidence: 0.85,
    },
    Archetype {
        name: "International Development NGO",
        criteria: &[
            ArchetypeCriterion::FcraCompliance(true),
            ArchetypeCriterion::Scope(&["national", "international"]),
        ],
        strategies: &[ids::FOREIGN_GRANTS, ids::FOREIGN_RFPS, ids::GRANTS],
        confidence: 0.9,
    },
    Archetype {
        name: "Community-Based Organization",
        criteria: &[
            ArchetypeCriterion::Size(&[SizeClass::Small, SizeClass::Medium]),
            ArchetypeCriterion::Scope(&["local", "regional"]),
            ArchetypeCriterion::Volunteers(true),
        ],
        strategies: &[ids::P2P, ids::EVENT_BASED, ids::DOOR_TO_DOOR],
        confidence: 0.8,
    },
    Archetype {
        name: "Healthcare Provider",
        criteria: &[
            ArchetypeCriterion::RegistrationType(&["hospital"]),
            ArchetypeCriterion::Beneficiaries(&["health"]),
        ],
        strategies: &[ids::GRANTS, ids::HNI_GIVING, ids::CSR],
        confidence: 0.85,
    },
    Archetype {
        name: "Rural Development NGO",
        criteria: &[
            ArchetypeCriterion::Location(&["rural", "tier3"]),
            ArchetypeCriterion::Beneficiaries(&["rural", "farmers", "women"]),
        ],
        strategies: &[ids::GOVERNMENT_GRANTS, ids::GRANTS, ids::DOOR_TO_DOOR],
        confidence: 0.75,
    },
];

/// Collaborative-style matching against known organization archetypes.
pub struct ArchetypeRecommender<'a> {
    catalog: &'a StrategyCatalog,
    archetypes: &'a [Archetype],
}

impl<'a> ArchetypeRecommender<'a> {
    pub fn new(catalog: &'a StrategyCatalog) -> Self {
        Self {
            catalog,
            archetypes: &STANDARD_ARCHETYPES,
        }
    }

    pub fn with_archetypes(mut self, archetypes: &'a [Archetype]) -> Self {
        self.archetypes = archetypes;
        self
    }

    fn apply_archetype(
        &self,
        archetype: &Archetype,
        fraction: f64,
        profile: &NgoProfile,
        matched: &mut Vec<ScoredStrategy>,
    ) {
        let confidence = archetype.confidence * fraction;
        let score = (FULL_MATCH_SCORE * fraction).round() as u8;
        let match_percentage = (fraction * 100.0).round() as u8;
        let attribution = Attribution::Archetype {
            name: archetype.name.to_string(),
            match_percentage,
        };

        for id in archetype.strategies {
            let Some(strategy) = self.catalog.get(id) else {
                tracing::warn!(
                    archetype = archetype.name,
                    strategy = *id,
                    "archetype names unknown strategy"
                );
                continue;
            };
            if let Some(exclusion) = categorical_exclusion(profile, strategy) {
                log_exclusion(AlgorithmKind::Collaborative.label(), strategy, exclusion);
                continue;
            }

            match matched.iter_mut().find(|existing| existing.strategy_id == *id) {
                Some(existing) => {
                    if confidence > existing.confidence {
                        existing.confidence = confidence;
                        existing.attribution = attribution.clone();
                    }
                }
                None => matched.push(ScoredStrategy {
                    strategy_id: strategy.id.clone(),
                    score,
                    confidence,
                    algorithm: AlgorithmKind::Collaborative,
                    attribution: attribution.clone(),
                }),
            }
        }
    }
}

impl Recommender for ArchetypeRecommender<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Collaborative
    }

    fn recommend(&self, answers: &AnswerSet, profile: &NgoProfile) -> Vec<ScoredStrategy> {
        let mut matched = Vec::new();

        for archetype in self.archetypes {
            let fraction = archetype.match_fraction(answers, profile);
            if fraction < MIN_MATCH {
                continue;
            }
            tracing::debug!(archetype = archetype.name, fraction, "archetype matched");
            self.apply_archetype(archetype, fraction, profile, &mut matched);
        }

        matched.sort_by(by_confidence_desc);
        tracing::debug!(
            algorithm = "collaborative",
            candidates = matched.len(),
            "algorithm finished"
        );
        matched
    }
}
