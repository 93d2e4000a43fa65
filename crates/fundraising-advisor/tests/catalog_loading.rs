use fundraising_advisor::catalog::{ids, CatalogError, StrategyCatalog};
use fundraising_advisor::answers::AnswerSetError;
use fundraising_advisor::{AnswerSet, RecommendationEngine, RecommendationMode};

fn startup() -> AnswerSet {
    AnswerSet::new()
        .with("ngoYear", 2025)
        .with("ngoBudget", "50000")
        .with("ngoStaff", "2")
        .with("ngoWebsite", "yes")
}

#[test]
fn reloaded_standard_catalog_ranks_identically() {
    let standard = StrategyCatalog::standard();
    let raw = standard.to_json_pretty().expect("catalog serializes");
    let reloaded = StrategyCatalog::from_reader(raw.as_bytes()).expect("catalog reloads");

    let builtin = RecommendationEngine::standard();
    let loaded = RecommendationEngine::standard().with_catalog(reloaded);

    let answers = startup();
    assert_eq!(
        builtin.recommend_for_year(&answers, RecommendationMode::Combined, 2026),
        loaded.recommend_for_year(&answers, RecommendationMode::Combined, 2026)
    );
}

#[test]
fn custom_catalog_restricts_candidates() {
    let mut strategies: Vec<_> = StrategyCatalog::standard()
        .strategies()
        .iter()
        .filter(|strategy| strategy.id == ids::P2P || strategy.id == ids::CROWDFUNDING)
        .cloned()
        .collect();

    match StrategyCatalog::from_strategies(strategies.clone()) {
        Err(CatalogError::UnknownSimilar { similar, .. }) => {
            assert_eq!(similar, ids::DIGITAL_FUNDRAISING)
        }
        other => panic!("expected UnknownSimilar, got {other:?}"),
    }

    for strategy in &mut strategies {
        strategy.similar_strategies.clear();
    }
    let catalog = StrategyCatalog::from_strategies(strategies).expect("trimmed catalog is valid");
    let engine = RecommendationEngine::standard().with_catalog(catalog);

    let report = engine.recommend_for_year(&startup(), RecommendationMode::Scoring, 2026);
    assert!(!report.is_empty());
    assert!(report
        .records
        .iter()
        .all(|record| record.id == ids::P2P || record.id == ids::CROWDFUNDING));
}

#[test]
fn malformed_inputs_are_boundary_errors() {
    match StrategyCatalog::from_json_str("{\"id\": \"p2p\"}") {
        Err(CatalogError::Json(_)) => {}
        other => panic!("expected Json error, got {other:?}"),
    }

    match AnswerSet::from_json_str("[1, 2, 3]") {
        Err(AnswerSetError::NotAnObject) => {}
        other => panic!("expected NotAnObject, got {other:?}"),
    }
}
