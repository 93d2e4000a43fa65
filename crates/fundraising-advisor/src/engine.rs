//! Facade tying profile derivation, the recommenders and report assembly
//! to one catalog and one [`EngineConfig`].

use chrono::Datelike;

use crate::answers::AnswerSet;
use crate::assessment::{assess_catalog, AssessmentInputs, StrategyAssessment};
use crate::catalog::StrategyCatalog;
use crate::config::EngineConfig;
use crate::profile::{NgoProfile, ProfileDeriver};
use crate::recommend::{
    ArchetypeRecommender, EnsembleRecommender, RecommendationMode, Recommender, RuleRecommender,
    ScoredStrategy, ScoringRecommender,
};
use crate::report::RecommendationReport;
use crate::similarity::{find_similar, SimilarStrategy};

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: StrategyCatalog,
    config: EngineConfig,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl RecommendationEngine {
    /// Built-in catalog with default settings.
    pub fn standard() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn new(config: EngineConfig) -> Self {
        Self {
            catalog: StrategyCatalog::standard(),
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: StrategyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.config.top_n = top_n.max(1);
        self
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Configured year, else the current local calendar year.
    pub fn reference_year(&self) -> i32 {
        self.config
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn profile(&self, answers: &AnswerSet, reference_year: i32) -> NgoProfile {
        ProfileDeriver::new(self.config.budget_conversion_rate).derive(answers, reference_year)
    }

    /// Full ranked candidate list of one algorithm.
    pub fn run(
        &self,
        answers: &AnswerSet,
        profile: &NgoProfile,
        mode: RecommendationMode,
    ) -> Vec<ScoredStrategy> {
        let catalog = &self.catalog;
        let budget = self.config.major_gift_budget;
        match mode {
            RecommendationMode::Scoring => ScoringRecommender::new(catalog).recommend(answers, profile),
            RecommendationMode::Rule => RuleRecommender::new(catalog)
                .with_major_gift_budget(budget)
                .recommend(answers, profile),
            RecommendationMode::Collaborative => {
                ArchetypeRecommender::new(catalog).recommend(answers, profile)
            }
            RecommendationMode::Combined => {
                EnsembleRecommender::standard(catalog, budget).recommend(answers, profile)
            }
        }
    }

    pub fn recommend(&self, answers: &AnswerSet, mode: RecommendationMode) -> RecommendationReport {
        self.recommend_for_year(answers, mode, self.reference_year())
    }

    /// Top `top_n` recommendations with presentation annotations.
    pub fn recommend_for_year(
        &self,
        answers: &AnswerSet,
        mode: RecommendationMode,
        reference_year: i32,
    ) -> RecommendationReport {
        let profile = self.profile(answers, reference_year);
        let ranked = self.run(answers, &profile, mode);
        RecommendationReport::build(
            &self.catalog,
            answers,
            &profile,
            mode,
            &ranked,
            self.config.top_n,
        )
    }

    /// Detailed assessment of every catalog strategy, best first.
    pub fn assess(&self, answers: &AnswerSet, reference_year: i32) -> Vec<StrategyAssessment> {
        let profile = self.profile(answers, reference_year);
        assess_catalog(&AssessmentInputs::new(answers, &profile), &self.catalog)
    }

    pub fn similar(&self, strategy_id: &str, threshold: f64) -> Vec<SimilarStrategy<'_>> {
        find_similar(&self.catalog, strategy_id, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids;
    use crate::domain::SizeClass;

    fn startup_answers() -> AnswerSet {
        AnswerSet::new()
            .with("ngoYear", 2025)
            .with("ngoBudget", "50000")
            .with("ngoStaff", "2")
            .with("ngoRegistrationType", "trust")
            .with("ngoComplianceStatus", ["pan"])
            .with("ngoWebsite", "yes")
            .with("ngoSocialMedia", "yes")
    }

    fn report_ids(report: &RecommendationReport) -> Vec<&str> {
        report.records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn combined_report_matches_ensemble_ranking() {
        let engine = RecommendationEngine::standard();
        let report = engine.recommend_for_year(&startup_answers(), RecommendationMode::Combined, 2026);

        assert_eq!(
            report_ids(&report),
            vec![ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING]
        );
        let scores: Vec<u8> = report.records.iter().map(|record| record.score).collect();
        assert_eq!(scores, vec![70, 68, 64]);
    }

    #[test]
    fn every_mode_produces_bounded_records() {
        let engine = RecommendationEngine::standard();
        let answers = AnswerSet::new()
            .with("ngoYear", "1995")
            .with("ngoBudget", "600000000")
            .with("ngoStaff", "120")
            .with("ngoComplianceStatus", ["pan", "12a", "80g", "csr1", "fcra"]);

        for mode in [
            RecommendationMode::Scoring,
            RecommendationMode::Rule,
            RecommendationMode::Collaborative,
            RecommendationMode::Combined,
        ] {
            let report = engine.recommend_for_year(&answers, mode, 2026);
            assert!(report.records.len() <= 5, "{mode} returned too many records");
            for record in &report.records {
                assert!(record.score <= 100);
                assert!((0.0..=1.0).contains(&record.confidence));
            }
        }
    }

    #[test]
    fn empty_answers_never_fail() {
        let engine = RecommendationEngine::standard();
        let answers = AnswerSet::new();
        for mode in [RecommendationMode::Scoring, RecommendationMode::Combined] {
            let report = engine.recommend_for_year(&answers, mode, 2026);
            assert!(report.records.len() <= 5);
        }
        assert_eq!(engine.assess(&answers, 2026).len(), engine.catalog().len());
    }

    #[test]
    fn top_n_and_conversion_rate_come_from_config() {
        let engine = RecommendationEngine::new(EngineConfig {
            top_n: 2,
            budget_conversion_rate: 1.0,
            ..EngineConfig::default()
        });
        let answers = startup_answers();

        let report = engine.recommend_for_year(&answers, RecommendationMode::Scoring, 2026);
        assert_eq!(report.records.len(), 2);

        let profile = engine.profile(&answers, 2026);
        assert_eq!(profile.size, SizeClass::Small);
        assert_eq!(profile.budget_usd, 50_000.0);
    }

    #[test]
    fn configured_reference_year_is_used() {
        let engine = RecommendationEngine::new(EngineConfig {
            reference_year: Some(2030),
            ..EngineConfig::default()
        });
        assert_eq!(engine.reference_year(), 2030);
        assert_eq!(engine.profile(&startup_answers(), engine.reference_year()).age_years, 5);
    }

    #[test]
    fn similar_delegates_to_the_catalog() {
        let engine = RecommendationEngine::standard();
        let similar = engine.similar(ids::P2P, 0.99);
        let found: Vec<&str> = similar.iter().map(|entry| entry.strategy.id.as_str()).collect();
        assert_eq!(found, vec![ids::CROWDFUNDING, ids::DIGITAL_FUNDRAISING]);
    }
}
