use std::io;

use serde::Serialize;

use super::descriptors::{describe, highlights};
use super::views::{ConfidenceLevel, CsvRow, ProfileSummary, RecommendationRecord, SimilarityDetails};
use crate::answers::AnswerSet;
use crate::assessment::{assess_strategy, AssessmentInputs};
use crate::catalog::{Strategy, StrategyCatalog};
use crate::profile::NgoProfile;
use crate::recommend::{RecommendationMode, ScoredStrategy};
use crate::similarity::{similarity, synergies};

/// Presentation-ready top recommendations for one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub mode: RecommendationMode,
    pub mode_label: &'static str,
    pub profile: ProfileSummary,
    pub records: Vec<RecommendationRecord>,
}

impl RecommendationReport {
    /// Annotates the first `limit` ranked strategies. Ids missing from the
    /// catalog are skipped.
    pub fn build(
        catalog: &StrategyCatalog,
        answers: &AnswerSet,
        profile: &NgoProfile,
        mode: RecommendationMode,
        ranked: &[ScoredStrategy],
        limit: usize,
    ) -> Self {
        let selected: Vec<(&ScoredStrategy, &Strategy)> = ranked
            .iter()
            .filter_map(|entry| match catalog.get(entry.strategy_id.as_str()) {
                Some(strategy) => Some((entry, strategy)),
                None => {
                    tracing::warn!(strategy = %entry.strategy_id, "ranked strategy not in catalog");
                    None
                }
            })
            .take(limit)
            .collect();

        let inputs = AssessmentInputs::new(answers, profile);
        let records = match selected.first() {
            Some((_, primary)) => selected
                .iter()
                .enumerate()
                .map(|(index, (entry, strategy))| {
                    record(index + 1, entry, strategy, primary, &inputs)
                })
                .collect(),
            None => Vec::new(),
        };

        tracing::info!(
            mode = mode.label(),
            ranked = ranked.len(),
            records = selected.len(),
            "recommendation report built"
        );

        Self {
            mode,
            mode_label: mode.label(),
            profile: ProfileSummary::from(profile),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top(&self) -> Option<&RecommendationRecord> {
        self.records.first()
    }

    pub fn csv_rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records.iter().map(CsvRow::from)
    }

    /// Writes one header row and one row per record.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.csv_rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn record(
    rank: usize,
    entry: &ScoredStrategy,
    strategy: &Strategy,
    primary: &Strategy,
    inputs: &AssessmentInputs<'_>,
) -> RecommendationRecord {
    let assessment = assess_strategy(inputs, strategy);
    let confidence_level = ConfidenceLevel::from_confidence(entry.confidence);
    let similarity = if rank == 1 {
        SimilarityDetails {
            primary_strategy: primary.name.clone(),
            similarity_score: 1.0,
            synergies: Vec::new(),
        }
    } else {
        SimilarityDetails {
            primary_strategy: primary.name.clone(),
            similarity_score: similarity(primary, strategy),
            synergies: synergies(primary, strategy),
        }
    };

    RecommendationRecord {
        rank,
        id: strategy.id.clone(),
        name: strategy.name.clone(),
        description: strategy.description.clone(),
        donor_category: strategy.donor_category,
        donor_category_label: strategy.donor_category.label(),
        score: entry.score,
        confidence: entry.confidence,
        confidence_level,
        confidence_label: confidence_level.label(),
        algorithm: entry.algorithm,
        attribution: entry.attribution.clone(),
        criteria: strategy.scoring_criteria.clone(),
        risk: assessment.risk,
        compliance: assessment.compliance,
        foreign_funding: assessment.foreign_funding,
        foreign_insights: assessment.foreign_insights,
        similarity,
        descriptors: describe(strategy),
        highlights: highlights(strategy, inputs.profile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ids, StrategyId};
    use crate::profile::ProfileDeriver;
    use crate::recommend::{AlgorithmKind, Attribution, Recommender, ScoringRecommender};
    use approx::assert_relative_eq;

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

    fn scoring_report(limit: usize) -> RecommendationReport {
        let catalog = StrategyCatalog::standard();
        let answers = startup_answers();
        let profile = ProfileDeriver::default().derive(&answers, 2026);
        let ranked = ScoringRecommender::new(&catalog).recommend(&answers, &profile);
        RecommendationReport::build(
            &catalog,
            &answers,
            &profile,
            RecommendationMode::Scoring,
            &ranked,
            limit,
        )
    }

    #[test]
    fn records_keep_ranking_and_relate_to_the_top_strategy() {
        let report = scoring_report(5);

        let ids: Vec<&str> = report.records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec![ids::DIGITAL_FUNDRAISING, ids::P2P, ids::CROWDFUNDING]);
        assert_eq!(report.profile.maturity_label, "Startup");
        assert_eq!(report.mode_label, "scoring");

        let Some(top) = report.top() else {
            panic!("expected a top record");
        };
        assert_eq!(top.rank, 1);
        assert_eq!(top.score, 58);
        assert_eq!(top.confidence_level, ConfidenceLevel::VeryHigh);
        assert_relative_eq!(top.similarity.similarity_score, 1.0);
        assert!(top.similarity.synergies.is_empty());
        assert_eq!(top.descriptors.timeline_context, "Quick Win");

        let runner_up = &report.records[1];
        assert_eq!(runner_up.rank, 2);
        assert_eq!(runner_up.similarity.primary_strategy, "Digital Fundraising");
        assert!(runner_up
            .similarity
            .synergies
            .contains(&"Can share resources and infrastructure".to_string()));
        assert!(!runner_up
            .similarity
            .synergies
            .contains(&"Can share digital infrastructure and capabilities".to_string()));
        assert!(runner_up.foreign_funding.is_none());
    }

    #[test]
    fn limit_applies_before_annotation() {
        let report = scoring_report(2);
        assert_eq!(report.records.len(), 2);

        let empty = scoring_report(0);
        assert!(empty.is_empty());
        assert!(empty.top().is_none());
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let catalog = StrategyCatalog::standard();
        let answers = startup_answers();
        let profile = ProfileDeriver::default().derive(&answers, 2026);
        let ranked = vec![
            ScoredStrategy {
                strategy_id: StrategyId::new("telethon"),
                score: 99,
                confidence: 0.9,
                algorithm: AlgorithmKind::Rule,
                attribution: Attribution::Rule {
                    rule: "custom".to_string(),
                },
            },
            ScoredStrategy {
                strategy_id: StrategyId::new(ids::P2P),
                score: 60,
                confidence: 0.6,
                algorithm: AlgorithmKind::Rule,
                attribution: Attribution::Rule {
                    rule: "custom".to_string(),
                },
            },
        ];

        let report = RecommendationReport::build(
            &catalog,
            &answers,
            &profile,
            RecommendationMode::Rule,
            &ranked,
            5,
        );

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].id, ids::P2P);
        assert_eq!(report.records[0].rank, 1);
        assert_eq!(report.records[0].confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let report = scoring_report(3);
        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).expect("write csv");
        let text = String::from_utf8(buffer).expect("utf8 csv");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("rank,id,name,donor_category,score,confidence"));
        assert!(lines[1].starts_with("1,digitalFundraising,Digital Fundraising,"));
    }

    #[test]
    fn json_uses_snake_case_fields() {
        let report = scoring_report(1);
        let raw = report.to_json_pretty().expect("serialize report");
        assert!(raw.contains("\"confidence_label\": \"Very High\""));
        assert!(raw.contains("\"timeline_context\": \"Quick Win\""));
        assert!(raw.contains("\"kind\": \"criteria\""));
    }
}
