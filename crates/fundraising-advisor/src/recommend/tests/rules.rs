use super::common::*;
use crate::answers::AnswerSet;
use crate::catalog::ids;
use crate::recommend::{
    AlgorithmKind, Attribution, RecommendationRule, Recommender, RuleContext, RuleRecommender,
    FILL_RULE, STANDARD_RULES,
};

fn rule_name(result: &crate::recommend::ScoredStrategy) -> &str {
    match &result.attribution {
        Attribution::Rule { rule } => rule.as_str(),
        other => panic!("expected rule attribution, got {other:?}"),
    }
}

#[test]
fn startup_rule_recommends_digital_channels() {
    let catalog = catalog();
    let answers = startup_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    assert_eq!(
        ids_of(&results),
        vec![ids::P2P, ids::DIGITAL_FUNDRAISING, ids::CROWDFUNDING]
    );
    for result in &results {
        assert_eq!(result.score, 90);
        assert_eq!(result.algorithm, AlgorithmKind::Rule);
        assert_eq!(rule_name(result), "startup_small");
    }
}

#[test]
fn established_csr_registration_yields_csr_at_rule_confidence() {
    let catalog = catalog();
    let answers = established_csr_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    match find(&results, ids::CSR) {
        Some(csr) => {
            assert_eq!(csr.confidence, 0.85);
            assert_eq!(rule_name(csr), "established_csr_registered");
        }
        None => panic!("expected csr in {:?}", ids_of(&results)),
    }
    assert_eq!(
        ids_of(&results),
        vec![ids::CSR, ids::EMPLOYEE_GIVING, ids::HNI_GIVING, ids::GRANTS, ids::P2P]
    );
}

#[test]
fn duplicate_matches_keep_highest_confidence() {
    let catalog = catalog();
    let answers = established_csr_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    let hni = find(&results, ids::HNI_GIVING).map(|result| (result.confidence, rule_name(result)));
    assert_eq!(hni, Some((0.85, "established_csr_registered")));
    assert_eq!(
        results
            .iter()
            .filter(|result| result.strategy_id == ids::HNI_GIVING)
            .count(),
        1
    );
}

#[test]
fn short_lists_are_filled_up_to_five() {
    let catalog = catalog();
    let answers = established_csr_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    assert_eq!(results.len(), 5);
    let filler = results.last().map(|result| (result.score, result.confidence, rule_name(result)));
    assert_eq!(filler, Some((70, 0.6, FILL_RULE)));
}

#[test]
fn educational_registration_unlocks_endowment() {
    let catalog = catalog();
    let answers = educational_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    match find(&results, ids::ENDOWMENT_FUNDS) {
        Some(endowment) => {
            assert_eq!(endowment.score, 90);
            assert_eq!(endowment.confidence, 0.9);
        }
        None => panic!("expected endowment in {:?}", ids_of(&results)),
    }
    assert!(find(&results, ids::CSR).is_none());
}

#[test]
fn registration_gates_apply_to_rule_matches_and_fillers() {
    let catalog = catalog();
    let answers = educational_answers().with("ngoRegistrationType", "trust");
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog).recommend(&answers, &profile);

    for gated in [ids::ENDOWMENT_FUNDS, ids::CSR, ids::FOREIGN_GRANTS, ids::FOREIGN_RFPS] {
        assert!(find(&results, gated).is_none(), "{gated} should be gated");
    }
}

#[test]
fn high_budget_threshold_is_configurable() {
    let catalog = catalog();
    let answers = educational_answers().with("ngoRegistrationType", "trust");
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog)
        .with_major_gift_budget(50_000_000)
        .recommend(&answers, &profile);

    assert!(results
        .iter()
        .all(|result| rule_name(result) != "high_budget"));
    assert!(results.iter().all(|result| rule_name(result) == FILL_RULE));
}

#[test]
fn government_relations_rule_reads_the_answer() {
    let answers = AnswerSet::new().with("ngoGovernmentRelations", "yes");
    let profile = profile_for(&answers);
    let context = RuleContext {
        answers: &answers,
        profile: &profile,
        major_gift_budget: 10_000_000,
    };

    let matched: Vec<&str> = STANDARD_RULES
        .iter()
        .filter(|rule| rule.matches(&context))
        .map(|rule| rule.name)
        .collect();
    assert_eq!(matched, vec!["government_relations"]);
}

#[test]
fn unknown_strategy_ids_in_custom_rules_are_skipped() {
    fn always(_: &RuleContext<'_>) -> bool {
        true
    }
    let rules = [RecommendationRule {
        name: "custom",
        description: "references a retired strategy",
        condition: always,
        strategies: &["retiredStrategy", ids::P2P],
        confidence: 0.7,
    }];
    let catalog = catalog();
    let answers = startup_answers();
    let profile = profile_for(&answers);

    let results = RuleRecommender::new(&catalog)
        .with_rules(&rules)
        .recommend(&answers, &profile);

    assert_eq!(
        ids_of(&results),
        vec![ids::P2P, ids::CROWDFUNDING, ids::DIGITAL_FUNDRAISING]
    );
    assert_eq!(rule_name(&results[0]), "custom");
}
