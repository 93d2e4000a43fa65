//! Pairwise strategy similarity and shared-capability synergies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Criterion, DonorCategory, Strategy, StrategyCatalog};

/// Default cut-off for [`find_similar`].
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

const SAME_CATEGORY: f64 = 0.5;
const LISTED_AS_SIMILAR: f64 = 0.5;
const RESOURCE_WEIGHT: f64 = 0.3;
const NETWORK_WEIGHT: f64 = 0.2;

/// Closeness of two 1-5 ratings, 1.0 when equal and 0.0 four tiers apart.
fn closeness(left: u8, right: u8) -> f64 {
    1.0 - f64::from(left.abs_diff(right)) / 4.0
}

/// Symmetric similarity in `[0, 1]`.
pub fn similarity(left: &Strategy, right: &Strategy) -> f64 {
    let mut score = 0.0;
    if left.donor_category == right.donor_category {
        score += SAME_CATEGORY;
    }
    if left.lists_as_similar(right.id.as_str()) || right.lists_as_similar(left.id.as_str()) {
        score += LISTED_AS_SIMILAR;
    }

    let rating = |strategy: &Strategy, criterion| strategy.rating_or_neutral(criterion);
    score += closeness(
        rating(left, Criterion::ResourceRequirements),
        rating(right, Criterion::ResourceRequirements),
    ) * RESOURCE_WEIGHT;
    score += closeness(
        rating(left, Criterion::NetworkLeverage),
        rating(right, Criterion::NetworkLeverage),
    ) * NETWORK_WEIGHT;

    score.min(1.0)
}

/// Similarity between two catalog ids; 0 when either is unknown.
pub fn similarity_by_id(catalog: &StrategyCatalog, left: &str, right: &str) -> f64 {
    match (catalog.get(left), catalog.get(right)) {
        (Some(left), Some(right)) => similarity(left, right),
        _ => 0.0,
    }
}

fn shares_rating(left: &Strategy, right: &Strategy, criterion: Criterion) -> bool {
    left.rating(criterion) == right.rating(criterion)
}

fn is_event_led(strategy: &Strategy) -> bool {
    strategy.id.as_str().to_ascii_lowercase().contains("event")
}

fn is_digital_led(strategy: &Strategy) -> bool {
    strategy.id.as_str().to_ascii_lowercase().contains("digital")
}

/// Operational overlaps worth exploiting when running both strategies.
pub fn synergies(primary: &Strategy, secondary: &Strategy) -> Vec<String> {
    let mut synergies = Vec::new();

    if shares_rating(primary, secondary, Criterion::ResourceRequirements) {
        synergies.push("Can share resources and infrastructure");
    }
    if shares_rating(primary, secondary, Criterion::NetworkLeverage) {
        synergies.push("Can leverage same network connections");
    }
    if is_digital_led(primary) && is_digital_led(secondary) {
        synergies.push("Can share digital infrastructure and capabilities");
    }
    if is_event_led(primary) && is_event_led(secondary) {
        synergies.push("Can combine event planning and execution resources");
    }
    if shares_rating(primary, secondary, Criterion::ComplianceRequirements) {
        synergies.push("Share compliance and regulatory requirements");
    }
    if primary.donor_category == secondary.donor_category {
        synergies.push("Can leverage same donor relationships and networks");
    }

    synergies.into_iter().map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarStrategy<'a> {
    pub strategy: &'a Strategy,
    pub score: f64,
}

/// Other strategies at or above `threshold`, most similar first; empty for unknown ids.
pub fn find_similar<'a>(
    catalog: &'a StrategyCatalog,
    strategy_id: &str,
    threshold: f64,
) -> Vec<SimilarStrategy<'a>> {
    let Some(anchor) = catalog.get(strategy_id) else {
        return Vec::new();
    };

    let mut similar: Vec<SimilarStrategy<'a>> = catalog
        .iter()
        .filter(|candidate| candidate.id != anchor.id)
        .map(|candidate| SimilarStrategy {
            strategy: candidate,
            score: similarity(anchor, candidate),
        })
        .filter(|candidate| candidate.score >= threshold)
        .collect();
    similar.sort_by(|left, right| right.score.total_cmp(&left.score));
    similar
}

/// Catalog strategies per donor category; every category is present, possibly empty.
pub fn group_by_donor_category(catalog: &StrategyCatalog) -> BTreeMap<DonorCategory, Vec<&Strategy>> {
    let mut groups: BTreeMap<DonorCategory, Vec<&Strategy>> = DonorCategory::ordered()
        .into_iter()
        .map(|category| (category, Vec::new()))
        .collect();
    for strategy in catalog {
        groups
            .entry(strategy.donor_category)
            .or_default()
            .push(strategy);
    }
    groups
}
