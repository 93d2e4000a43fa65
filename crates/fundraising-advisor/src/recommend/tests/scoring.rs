use super::common::*;
use crate::catalog::ids;
use crate::recommend::{AlgorithmKind, Attribution, Recommender, ScoringRecommender};
use approx::assert_relative_eq;

#[test]
fn startup_keeps_only_digital_channels_ranked_by_score() {
    let catalog = catalog();
    let answers = startup_answers();
    let profile = profile_for(&answers);

    let results = ScoringRecommender::new(&catalog).recommend(&answers, &profile);

    assert_eq!(
        ids_of(&results),
        vec![ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING]
    );
    let scores: Vec<u8> = results.iter().map(|result| result.score).collect();
    assert_eq!(scores, vec![58, 53, 39]);
    assert_relative_eq!(results[0].confidence, 0.88, epsilon = 1e-9);
    assert!(results
        .iter()
        .all(|result| result.algorithm == AlgorithmKind::Scoring
            && result.attribution == Attribution::Criteria));
}

#[test]
fn csr_requires_csr_one_registration() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);

    let registered = established_csr_answers();
    let results = recommender.recommend(&registered, &profile_for(&registered));
    assert!(find(&results, ids::CSR).is_some());

    let unregistered = registered.with("ngoComplianceStatus", ["pan", "12a", "80g"]);
    let results = recommender.recommend(&unregistered, &profile_for(&unregistered));
    assert!(find(&results, ids::CSR).is_none());
}

#[test]
fn foreign_grant_strategies_require_fcra() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);

    let domestic = established_csr_answers();
    let results = recommender.recommend(&domestic, &profile_for(&domestic));
    assert!(find(&results, ids::FOREIGN_GRANTS).is_none());
    assert!(find(&results, ids::FOREIGN_RFPS).is_none());

    let cleared = domestic.with("ngoComplianceStatus", ["pan", "12a", "80g", "csr1", "fcra"]);
    let results = recommender.recommend(&cleared, &profile_for(&cleared));
    assert!(find(&results, ids::FOREIGN_GRANTS).is_some());
    assert!(find(&results, ids::FOREIGN_RFPS).is_some());
}

#[test]
fn endowment_is_scored_only_for_educational_registration() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);

    let educational = educational_answers();
    let results = recommender.recommend(&educational, &profile_for(&educational));
    match find(&results, ids::ENDOWMENT_FUNDS) {
        Some(endowment) => assert_eq!(endowment.score, 33),
        other => panic!("expected endowment funds, got {other:?}"),
    }

    let society = educational_answers().with("ngoRegistrationType", "society");
    let results = recommender.recommend(&society, &profile_for(&society));
    assert!(find(&results, ids::ENDOWMENT_FUNDS).is_none());
}

#[test]
fn digital_capacity_never_lowers_digital_fundraising_score() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);
    let channels = [
        "ngoDonationPage",
        "ngoEmailMarketing",
        "ngoOnlinePlatforms",
        "ngoDigitalBudget",
        "ngoOnlineCampaigns",
    ];

    let mut answers = startup_answers();
    let mut previous = 0;
    for channel in channels {
        answers.insert(channel, "yes");
        let results = recommender.recommend(&answers, &profile_for(&answers));
        let score = find(&results, ids::DIGITAL_FUNDRAISING)
            .map(|result| result.score)
            .unwrap_or_default();
        assert!(score >= previous, "{channel} lowered score {previous} -> {score}");
        previous = score;
    }
    assert_eq!(previous, 67);
}

#[test]
fn risk_tolerance_rewards_matching_execution_risk() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);

    let averse = startup_answers().with("ngoRiskTolerance", "riskaverse");
    let results = recommender.recommend(&averse, &profile_for(&averse));
    assert_eq!(find(&results, ids::CROWDFUNDING).map(|result| result.score), Some(47));
    assert_eq!(find(&results, ids::P2P).map(|result| result.score), Some(45));

    let unspecified = startup_answers().with("ngoRiskTolerance", "depends");
    let results = recommender.recommend(&unspecified, &profile_for(&unspecified));
    assert_eq!(find(&results, ids::P2P).map(|result| result.score), Some(38));
}

#[test]
fn scores_and_confidences_stay_bounded() {
    let catalog = catalog();
    let recommender = ScoringRecommender::new(&catalog);

    for answers in [startup_answers(), established_csr_answers(), educational_answers()] {
        let results = recommender.recommend(&answers, &profile_for(&answers));
        assert_bounded(&results);
        assert!(results.iter().all(|result| result.confidence <= 0.95));
    }
}
