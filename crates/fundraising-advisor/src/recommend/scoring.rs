use super::eligibility::{log_exclusion, profile_exclusion};
use super::{by_score_desc, AlgorithmKind, Attribution, Recommender, ScoredStrategy, MAX_CONFIDENCE};
use crate::answers::AnswerSet;
use crate::catalog::{ids, Criterion, DonorCategory, Strategy, StrategyCatalog};
use crate::domain::RiskTolerance;
use crate::profile::{NetworkStrengths, NgoProfile};

const BONUS_CAP: u32 = 15;
const FULL_RISK_ALIGNMENT: u32 = 15;
const PARTIAL_RISK_ALIGNMENT: u32 = 7;

const VOLUNTEER_LEANING: [&str; 3] = [ids::P2P, ids::DOOR_TO_DOOR, ids::EVENT_BASED];

/// Criteria-weighted scorer over every eligible catalog strategy.
pub struct ScoringRecommender<'a> {
    catalog: &'a StrategyCatalog,
}

impl<'a> ScoringRecommender<'a> {
    pub fn new(catalog: &'a StrategyCatalog) -> Self {
        Self { catalog }
    }
}

fn capped_bonus(value: u8) -> u32 {
    (u32::from(value) * 3).min(BONUS_CAP)
}

fn network_for(category: DonorCategory, networks: &NetworkStrengths) -> Option<u8> {
    match category {
        DonorCategory::Individual => Some(networks.individual),
        DonorCategory::Corporate => Some(networks.corporate),
        DonorCategory::FoundationDomestic | DonorCategory::FoundationForeign => {
            Some(networks.foundation)
        }
        _ => None,
    }
}

/// Intrinsic appeal (up to 40) plus context bonuses (up to 60).
pub(crate) fn score_strategy(answers: &AnswerSet, profile: &NgoProfile, strategy: &Strategy) -> u8 {
    let rating = |criterion| u32::from(strategy.rating_or_neutral(criterion));
    let id = strategy.id.as_str();

    let mut score = rating(Criterion::MacroTrends) * 3
        + rating(Criterion::FundingScale) * 3
        + rating(Criterion::FundingTimeline) * 2;

    if ids::is_digital(id) {
        score += capped_bonus(profile.digital_capacity);
    }
    if VOLUNTEER_LEANING.contains(&id) {
        score += capped_bonus(profile.volunteer_capacity);
    }
    if let Some(network) = network_for(strategy.donor_category, &profile.networks) {
        score += capped_bonus(network);
    }

    let tolerance = RiskTolerance::from_answer(answers.text("ngoRiskTolerance"));
    let execution_risk = strategy.rating_or_neutral(Criterion::ExecutionRisk);
    if tolerance.fully_aligned(execution_risk) {
        score += FULL_RISK_ALIGNMENT;
    } else if tolerance.adjacent(execution_risk) {
        score += PARTIAL_RISK_ALIGNMENT;
    }

    score.min(100) as u8
}

pub(crate) fn confidence_for(score: u8) -> f64 {
    (f64::from(score) / 100.0 + 0.3).min(MAX_CONFIDENCE)
}

impl Recommender for ScoringRecommender<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Scoring
    }

    fn recommend(&self, answers: &AnswerSet, profile: &NgoProfile) -> Vec<ScoredStrategy> {
        let mut results: Vec<ScoredStrategy> = self
            .catalog
            .iter()
            .filter(|strategy| match profile_exclusion(profile, strategy) {
                Some(exclusion) => {
                    log_exclusion(self.kind().label(), strategy, exclusion);
                    false
                }
                None => true,
            })
            .map(|strategy| {
                let score = score_strategy(answers, profile, strategy);
                ScoredStrategy {
                    strategy_id: strategy.id.clone(),
                    score,
                    confidence: confidence_for(score),
                    algorithm: AlgorithmKind::Scoring,
                    attribution: Attribution::Criteria,
                }
            })
            .collect();

        results.sort_by(by_score_desc);
        tracing::debug!(algorithm = "scoring", candidates = results.len(), "algorithm finished");
        results
    }
}
