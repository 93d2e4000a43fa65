//! Recommendation algorithms.
//!
//! Three independent recommenders (criteria scoring, explicit rules and
//! archetype matching) share one contract and are merged by the ensemble.

mod archetype;
mod eligibility;
mod ensemble;
mod rules;
mod scoring;

#[cfg(test)]
mod tests;

pub use archetype::{Archetype, ArchetypeCriterion, ArchetypeRecommender, STANDARD_ARCHETYPES};
pub use eligibility::{categorical_exclusion, profile_exclusion, Exclusion};
pub use ensemble::{combine, EnsembleRecommender};
pub use rules::{
    RecommendationRule, RuleContext, RuleRecommender, DEFAULT_MAJOR_GIFT_BUDGET, FILL_RULE,
    STANDARD_RULES,
};
pub use scoring::ScoringRecommender;

use crate::answers::AnswerSet;
use crate::catalog::StrategyId;
use crate::profile::NgoProfile;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on any confidence the engine reports.
pub const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Scoring,
    Rule,
    Collaborative,
    Combined,
}

impl AlgorithmKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scoring => "scoring",
            Self::Rule => "rule",
            Self::Collaborative => "collaborative",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Algorithm selection for a recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    Scoring,
    Rule,
    Collaborative,
    #[default]
    Combined,
}

impl RecommendationMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scoring => "scoring",
            Self::Rule => "rule",
            Self::Collaborative => "collaborative",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recommendation mode `{0}` (expected scoring, rule, collaborative or combined)")]
pub struct ParseModeError(pub String);

impl FromStr for RecommendationMode {
    type Err = ParseModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "scoring" => Ok(Self::Scoring),
            "rule" | "rules" => Ok(Self::Rule),
            "collaborative" | "archetype" => Ok(Self::Collaborative),
            "combined" | "ensemble" => Ok(Self::Combined),
            _ => Err(ParseModeError(raw.to_string())),
        }
    }
}

/// Agreement across algorithms behind an ensemble result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusSummary {
    pub algorithm_count: usize,
    pub algorithms: Vec<AlgorithmKind>,
    pub average_confidence: f64,
    pub original_scores: Vec<u8>,
}

/// Why an algorithm produced a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribution {
    Criteria,
    Rule { rule: String },
    Archetype { name: String, match_percentage: u8 },
    Consensus(ConsensusSummary),
}

/// One strategy as ranked by one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStrategy {
    pub strategy_id: StrategyId,
    /// 0-100.
    pub score: u8,
    /// 0.0-1.0.
    pub confidence: f64,
    pub algorithm: AlgorithmKind,
    pub attribution: Attribution,
}

impl ScoredStrategy {
    pub fn consensus(&self) -> Option<&ConsensusSummary> {
        match &self.attribution {
            Attribution::Consensus(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Uniform contract of every recommendation algorithm.
pub trait Recommender {
    fn kind(&self) -> AlgorithmKind;

    /// Ranked candidates; an empty list when nothing is eligible.
    fn recommend(&self, answers: &AnswerSet, profile: &NgoProfile) -> Vec<ScoredStrategy>;
}

pub(crate) fn by_score_desc(left: &ScoredStrategy, right: &ScoredStrategy) -> Ordering {
    right.score.cmp(&left.score)
}

pub(crate) fn by_confidence_desc(left: &ScoredStrategy, right: &ScoredStrategy) -> Ordering {
    right.confidence.total_cmp(&left.confidence)
}

pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
