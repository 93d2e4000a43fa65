use super::common::*;
use crate::catalog::{ids, StrategyId};
use crate::recommend::{
    combine, AlgorithmKind, Attribution, EnsembleRecommender, Recommender, ScoredStrategy,
};
use approx::assert_relative_eq;

fn candidate(id: &str, algorithm: AlgorithmKind, score: u8, confidence: f64) -> ScoredStrategy {
    ScoredStrategy {
        strategy_id: StrategyId::new(id),
        score,
        confidence,
        algorithm,
        attribution: Attribution::Criteria,
    }
}

#[test]
fn startup_consensus_is_dominated_by_digital_channels() {
    let catalog = catalog();
    let answers = startup_answers();
    let profile = profile_for(&answers);

    let results = EnsembleRecommender::standard(&catalog, 10_000_000).recommend(&answers, &profile);

    assert_eq!(
        ids_of(&results),
        vec![ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING]
    );
    let scores: Vec<u8> = results.iter().map(|result| result.score).collect();
    assert_eq!(scores, vec![70, 68, 64]);
    for result in &results {
        assert_eq!(result.algorithm, AlgorithmKind::Combined);
        match result.consensus() {
            Some(summary) => {
                assert_eq!(summary.algorithm_count, 3);
                assert_eq!(
                    summary.algorithms,
                    vec![
                        AlgorithmKind::Scoring,
                        AlgorithmKind::Rule,
                        AlgorithmKind::Collaborative
                    ]
                );
                assert_eq!(summary.original_scores.len(), 3);
            }
            None => panic!("expected consensus for {}", result.strategy_id),
        }
    }
    assert!(find(&results, ids::CSR).is_none());
    assert!(find(&results, ids::GRANTS).is_none());
}

#[test]
fn combine_weights_scores_by_confidence() {
    let combined = combine(vec![
        candidate("x", AlgorithmKind::Scoring, 80, 0.9),
        candidate("y", AlgorithmKind::Rule, 90, 0.6),
        candidate("x", AlgorithmKind::Rule, 90, 0.85),
        candidate("x", AlgorithmKind::Collaborative, 60, 0.5),
    ]);

    assert_eq!(ids_of(&combined), vec!["y", "x"]);

    let y = &combined[0];
    assert_eq!(y.score, 90);
    assert_relative_eq!(y.confidence, 0.6 * 0.8, epsilon = 1e-9);

    let x = &combined[1];
    assert_eq!(x.score, 79);
    assert_relative_eq!(x.confidence, 0.75, epsilon = 1e-9);
    match x.consensus() {
        Some(summary) => {
            assert_relative_eq!(summary.average_confidence, 0.75, epsilon = 1e-9);
            assert_eq!(summary.original_scores, vec![80, 90, 60]);
        }
        None => panic!("expected consensus summary"),
    }
}

#[test]
fn repeated_algorithm_counts_once_toward_agreement() {
    let combined = combine(vec![
        candidate("x", AlgorithmKind::Rule, 90, 0.8),
        candidate("x", AlgorithmKind::Rule, 70, 0.6),
    ]);

    let summary = combined[0].consensus().cloned();
    assert_eq!(summary.as_ref().map(|summary| summary.algorithm_count), Some(1));
    assert_relative_eq!(combined[0].confidence, 0.7 * 0.8, epsilon = 1e-9);
}

#[test]
fn zero_confidence_falls_back_to_plain_mean() {
    let combined = combine(vec![
        candidate("x", AlgorithmKind::Scoring, 40, 0.0),
        candidate("x", AlgorithmKind::Rule, 60, 0.0),
    ]);

    assert_eq!(combined[0].score, 50);
    assert_relative_eq!(combined[0].confidence, 0.0);
}

#[test]
fn confidence_is_capped() {
    let combined = combine(vec![
        candidate("x", AlgorithmKind::Scoring, 90, 1.0),
        candidate("x", AlgorithmKind::Rule, 90, 1.0),
        candidate("x", AlgorithmKind::Collaborative, 90, 1.0),
    ]);

    assert_relative_eq!(combined[0].confidence, 0.95);
}

#[test]
fn equal_scores_order_by_confidence_then_first_appearance() {
    let combined = combine(vec![
        candidate("low", AlgorithmKind::Scoring, 70, 0.5),
        candidate("first", AlgorithmKind::Scoring, 70, 0.9),
        candidate("second", AlgorithmKind::Scoring, 70, 0.9),
    ]);

    assert_eq!(ids_of(&combined), vec!["first", "second", "low"]);
}

#[test]
fn empty_inputs_combine_to_nothing() {
    assert!(combine(Vec::new()).is_empty());
}

#[test]
fn endowment_reaches_consensus_only_for_educational_registration() {
    let catalog = catalog();
    let ensemble = EnsembleRecommender::standard(&catalog, 10_000_000);

    let educational = educational_answers();
    let results = ensemble.recommend(&educational, &profile_for(&educational));
    match find(&results, ids::ENDOWMENT_FUNDS) {
        Some(endowment) => assert!(endowment.score > 0),
        None => panic!("expected endowment in {:?}", ids_of(&results)),
    }

    let trust = educational_answers().with("ngoRegistrationType", "trust");
    let results = ensemble.recommend(&trust, &profile_for(&trust));
    assert!(find(&results, ids::ENDOWMENT_FUNDS).is_none());
}

#[test]
fn ensemble_is_deterministic_and_bounded() {
    let catalog = catalog();
    let ensemble = EnsembleRecommender::standard(&catalog, 10_000_000);

    for answers in [startup_answers(), established_csr_answers(), educational_answers()] {
        let profile = profile_for(&answers);
        let first = ensemble.recommend(&answers, &profile);
        let second = ensemble.recommend(&answers, &profile);

        assert_eq!(first, second);
        assert_bounded(&first);
        assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}

#[test]
fn standard_ensemble_runs_three_members() {
    let catalog = catalog();
    let members: Vec<AlgorithmKind> = EnsembleRecommender::standard(&catalog, 1).members().collect();

    assert_eq!(
        members,
        vec![
            AlgorithmKind::Scoring,
            AlgorithmKind::Rule,
            AlgorithmKind::Collaborative
        ]
    );
}
