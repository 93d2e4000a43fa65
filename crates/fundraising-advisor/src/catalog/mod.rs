//! Strategy catalog: the fixed set of fundraising strategies every
//! recommender ranks, with their 1-5 criterion ratings and suitability.

mod standard;

use crate::domain::{MaturityStage, SizeClass};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Read;
use thiserror::Error;

pub use crate::domain::DonorCategory;
pub use standard::ids;

/// Rating assumed when a strategy omits a criterion.
pub const NEUTRAL_RATING: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(pub String);

impl StrategyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StrategyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StrategyId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StrategyId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for StrategyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    MacroTrends,
    TargetAudience,
    FundingScale,
    FundingTimeline,
    ImplementationFeasibility,
    ResourceRequirements,
    NetworkLeverage,
    ExecutionRisk,
    ScalabilityPotential,
    DonorEngagement,
    MissionAlignment,
    ComplianceRequirements,
}

impl Criterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MacroTrends => "Macro trends",
            Self::TargetAudience => "Target audience",
            Self::FundingScale => "Funding scale",
            Self::FundingTimeline => "Funding timeline",
            Self::ImplementationFeasibility => "Implementation feasibility",
            Self::ResourceRequirements => "Resource requirements",
            Self::NetworkLeverage => "Network leverage",
            Self::ExecutionRisk => "Execution risk",
            Self::ScalabilityPotential => "Scalability potential",
            Self::DonorEngagement => "Donor engagement",
            Self::MissionAlignment => "Mission alignment",
            Self::ComplianceRequirements => "Compliance requirements",
        }
    }
}

/// Criterion ratings of a strategy. Absent criteria are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringCriteria(BTreeMap<Criterion, u8>);

impl ScoringCriteria {
    pub fn from_pairs(pairs: &[(Criterion, u8)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn rating(&self, criterion: Criterion) -> Option<u8> {
        self.0.get(&criterion).copied()
    }

    pub fn rating_or_neutral(&self, criterion: Criterion) -> u8 {
        self.rating(criterion).unwrap_or(NEUTRAL_RATING)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, u8)> + '_ {
        self.0.iter().map(|(criterion, rating)| (*criterion, *rating))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Organization profiles a strategy is designed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suitability {
    #[serde(rename = "ngoMaturity")]
    pub maturity: Vec<MaturityStage>,
    #[serde(rename = "ngoSize")]
    pub sizes: Vec<SizeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<Vec<String>>,
    /// Qualitative capability requirements (1-5) shown alongside the strategy.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requirements: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: StrategyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub donor_category: DonorCategory,
    #[serde(default)]
    pub similar_strategies: Vec<StrategyId>,
    pub suitable_for: Suitability,
    pub scoring_criteria: ScoringCriteria,
}

impl Strategy {
    pub fn rating(&self, criterion: Criterion) -> Option<u8> {
        self.scoring_criteria.rating(criterion)
    }

    pub fn rating_or_neutral(&self, criterion: Criterion) -> u8 {
        self.scoring_criteria.rating_or_neutral(criterion)
    }

    pub fn suits_maturity(&self, maturity: MaturityStage) -> bool {
        self.suitable_for.maturity.contains(&maturity)
    }

    pub fn suits_size(&self, size: SizeClass) -> bool {
        self.suitable_for.sizes.contains(&size)
    }

    pub fn suits(&self, maturity: MaturityStage, size: SizeClass) -> bool {
        self.suits_maturity(maturity) && self.suits_size(size)
    }

    pub fn lists_as_similar(&self, other: &str) -> bool {
        self.similar_strategies.iter().any(|id| id == other)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog contains no strategies")]
    Empty,
    #[error("duplicate strategy id `{0}`")]
    DuplicateId(StrategyId),
    #[error("strategy `{strategy}` rates {criterion:?} as {rating}; ratings must be between 1 and 5")]
    RatingOutOfRange {
        strategy: StrategyId,
        criterion: Criterion,
        rating: u8,
    },
    #[error("strategy `{strategy}` lists unknown similar strategy `{similar}`")]
    UnknownSimilar {
        strategy: StrategyId,
        similar: StrategyId,
    },
}

/// Ordered, read-only collection of strategies. Iteration order is the
/// catalog order and drives every tie-break downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyCatalog {
    strategies: Vec<Strategy>,
}

impl StrategyCatalog {
    /// Built-in catalog of sixteen strategies.
    pub fn standard() -> Self {
        Self {
            strategies: standard::strategies(),
        }
    }

    pub fn from_strategies(strategies: Vec<Strategy>) -> Result<Self, CatalogError> {
        let catalog = Self { strategies };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of strategies.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let strategies: Vec<Strategy> = serde_json::from_str(raw)?;
        Self::from_strategies(strategies)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.strategies)?)
    }

    pub fn get(&self, id: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|strategy| strategy.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Catalog position of a strategy, used for deterministic ordering.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.strategies.iter().position(|strategy| strategy.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.strategies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for strategy in &self.strategies {
            if !seen.insert(strategy.id.as_str()) {
                return Err(CatalogError::DuplicateId(strategy.id.clone()));
            }
            if let Some((criterion, rating)) = strategy
                .scoring_criteria
                .iter()
                .find(|(_, rating)| !(1..=5).contains(rating))
            {
                return Err(CatalogError::RatingOutOfRange {
                    strategy: strategy.id.clone(),
                    criterion,
                    rating,
                });
            }
        }

        for strategy in &self.strategies {
            if let Some(similar) = strategy
                .similar_strategies
                .iter()
                .find(|similar| !seen.contains(similar.as_str()))
            {
                return Err(CatalogError::UnknownSimilar {
                    strategy: strategy.id.clone(),
                    similar: similar.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a StrategyCatalog {
    type Item = &'a Strategy;
    type IntoIter = std::slice::Iter<'a, Strategy>;

    fn into_iter(self) -> Self::IntoIter {
        self.strategies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_passes_validation() {
        let catalog = StrategyCatalog::standard();
        assert_eq!(catalog.len(), 16);
        catalog.validate().expect("standard catalog is valid");
    }

    #[test]
    fn endowment_omits_audience_and_mission_ratings() {
        let catalog = StrategyCatalog::standard();
        let endowment = catalog.get(ids::ENDOWMENT_FUNDS).expect("endowment present");

        assert_eq!(endowment.rating(Criterion::TargetAudience), None);
        assert_eq!(endowment.rating_or_neutral(Criterion::MissionAlignment), NEUTRAL_RATING);
        assert_eq!(endowment.rating(Criterion::FundingScale), Some(5));
        assert_eq!(
            endowment.suitable_for.registration_type.as_deref(),
            Some(&["educational".to_string()][..])
        );
    }

    #[test]
    fn json_round_trip_preserves_catalog() {
        let catalog = StrategyCatalog::standard();
        let raw = catalog.to_json_pretty().expect("serialize catalog");
        assert!(raw.contains("\"donorCategory\": \"foundation_foreign\""));
        assert!(raw.contains("\"ngoMaturity\""));

        let reloaded = StrategyCatalog::from_json_str(&raw).expect("reload catalog");
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        let mut strategies = StrategyCatalog::standard().strategies().to_vec();
        strategies[0].scoring_criteria = ScoringCriteria::from_pairs(&[(Criterion::FundingScale, 9)]);

        match StrategyCatalog::from_strategies(strategies) {
            Err(CatalogError::RatingOutOfRange { criterion, rating, .. }) => {
                assert_eq!(criterion, Criterion::FundingScale);
                assert_eq!(rating, 9);
            }
            other => panic!("expected RatingOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids_and_dangling_similar_links() {
        let mut strategies = StrategyCatalog::standard().strategies().to_vec();
        strategies.push(strategies[0].clone());
        match StrategyCatalog::from_strategies(strategies) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, ids::P2P),
            other => panic!("expected DuplicateId, got {other:?}"),
        }

        let mut strategies = StrategyCatalog::standard().strategies().to_vec();
        strategies[0].similar_strategies.push(StrategyId::new("telethon"));
        match StrategyCatalog::from_strategies(strategies) {
            Err(CatalogError::UnknownSimilar { similar, .. }) => assert_eq!(similar, "telethon"),
            other => panic!("expected UnknownSimilar, got {other:?}"),
        }

        match StrategyCatalog::from_json_str("[]") {
            Err(CatalogError::Empty) => {}
            other => panic!("expected Empty, got {other:?}"),
        }
    }
}
