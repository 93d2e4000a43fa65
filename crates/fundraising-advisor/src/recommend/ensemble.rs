use super::{
    by_confidence_desc, by_score_desc, clamp_score, AlgorithmKind, ArchetypeRecommender,
    Attribution, ConsensusSummary, Recommender, RuleRecommender, ScoredStrategy,
    ScoringRecommender, MAX_CONFIDENCE,
};
use crate::answers::AnswerSet;
use crate::catalog::{StrategyCatalog, StrategyId};
use crate::profile::NgoProfile;

/// Runs every member recommender and merges their candidates.
pub struct EnsembleRecommender<'a> {
    members: Vec<Box<dyn Recommender + 'a>>,
}

impl<'a> EnsembleRecommender<'a> {
    pub fn new(members: Vec<Box<dyn Recommender + 'a>>) -> Self {
        Self { members }
    }

    /// Scoring, rule and archetype recommenders over one catalog.
    pub fn standard(catalog: &'a StrategyCatalog, major_gift_budget: i64) -> Self {
        Self::new(vec![
            Box::new(ScoringRecommender::new(catalog)),
            Box::new(RuleRecommender::new(catalog).with_major_gift_budget(major_gift_budget)),
            Box::new(ArchetypeRecommender::new(catalog)),
        ])
    }

    pub fn members(&self) -> impl Iterator<Item = AlgorithmKind> + '_ {
        self.members.iter().map(|member| member.kind())
    }
}

impl Recommender for EnsembleRecommender<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Combined
    }

    fn recommend(&self, answers: &AnswerSet, profile: &NgoProfile) -> Vec<ScoredStrategy> {
        let candidates: Vec<ScoredStrategy> = self
            .members
            .iter()
            .flat_map(|member| {
                let results = member.recommend(answers, profile);
                tracing::debug!(
                    algorithm = member.kind().label(),
                    candidates = results.len(),
                    "ensemble member finished"
                );
                results
            })
            .collect();

        let combined = combine(candidates);
        tracing::debug!(algorithm = "combined", candidates = combined.len(), "algorithm finished");
        combined
    }
}

struct Votes {
    strategy_id: StrategyId,
    algorithms: Vec<AlgorithmKind>,
    scores: Vec<u8>,
    confidences: Vec<f64>,
}

impl Votes {
    fn distinct_algorithms(&self) -> Vec<AlgorithmKind> {
        let mut distinct = Vec::new();
        for algorithm in &self.algorithms {
            if !distinct.contains(algorithm) {
                distinct.push(*algorithm);
            }
        }
        distinct
    }

    fn into_consensus(self) -> ScoredStrategy {
        let total_confidence: f64 = self.confidences.iter().sum();
        let raw_score = if total_confidence > 0.0 {
            self.scores
                .iter()
                .zip(&self.confidences)
                .map(|(score, confidence)| f64::from(*score) * confidence)
                .sum::<f64>()
                / total_confidence
        } else {
            self.scores.iter().map(|score| f64::from(*score)).sum::<f64>()
                / self.scores.len() as f64
        };

        let algorithms = self.distinct_algorithms();
        let average_confidence = total_confidence / self.confidences.len() as f64;
        let agreement = 0.7 + algorithms.len() as f64 / 10.0;

        ScoredStrategy {
            strategy_id: self.strategy_id,
            score: clamp_score(raw_score),
            confidence: (average_confidence * agreement).clamp(0.0, MAX_CONFIDENCE),
            algorithm: AlgorithmKind::Combined,
            attribution: Attribution::Consensus(ConsensusSummary {
                algorithm_count: algorithms.len(),
                algorithms,
                average_confidence,
                original_scores: self.scores,
            }),
        }
    }
}

/// Merges per-algorithm candidates into one consensus entry per strategy.
///
/// Scores are confidence-weighted averages; confidence grows with the number
/// of distinct agreeing algorithms. Ordered by score, then confidence, then
/// first appearance.
pub fn combine(candidates: Vec<ScoredStrategy>) -> Vec<ScoredStrategy> {
    let mut votes: Vec<Votes> = Vec::new();

    for candidate in candidates {
        let position = votes
            .iter()
            .position(|entry| entry.strategy_id == candidate.strategy_id);
        let entry = match position {
            Some(index) => &mut votes[index],
            None => {
                votes.push(Votes {
                    strategy_id: candidate.strategy_id.clone(),
                    algorithms: Vec::new(),
                    scores: Vec::new(),
                    confidences: Vec::new(),
                });
                let last = votes.len() - 1;
                &mut votes[last]
            }
        };
        entry.algorithms.push(candidate.algorithm);
        entry.scores.push(candidate.score);
        entry.confidences.push(candidate.confidence);
    }

    let mut combined: Vec<ScoredStrategy> = votes.into_iter().map(Votes::into_consensus).collect();
    combined.sort_by(|left, right| by_score_desc(left, right).then_with(|| by_confidence_desc(left, right)));
    combined
}
