use crate::answers::AnswerSet;
use crate::catalog::StrategyCatalog;
use crate::profile::{NgoProfile, ProfileDeriver};
use crate::recommend::ScoredStrategy;

pub(super) const REFERENCE_YEAR: i32 = 2026;

pub(super) fn catalog() -> StrategyCatalog {
    StrategyCatalog::standard()
}

pub(super) fn profile_for(answers: &AnswerSet) -> NgoProfile {
    ProfileDeriver::default().derive(answers, REFERENCE_YEAR)
}

/// One-year-old, two-person trust with a website and social media.
pub(super) fn startup_answers() -> AnswerSet {
    AnswerSet::new()
        .with("ngoYear", REFERENCE_YEAR - 1)
        .with("ngoBudget", "50000")
        .with("ngoStaff", "2")
        .with("ngoRegistrationType", "trust")
        .with("ngoComplianceStatus", ["pan"])
        .with("ngoWebsite", "yes")
        .with("ngoSocialMedia", "yes")
}

/// Established, large, CSR-1 registered organization.
pub(super) fn established_csr_answers() -> AnswerSet {
    AnswerSet::new()
        .with("ngoYear", "1995")
        .with("ngoBudget", "600000000")
        .with("ngoStaff", "120")
        .with("ngoRegistrationType", "society")
        .with("ngoComplianceStatus", ["pan", "12a", "80g", "csr1"])
        .with("ngoCorporateRelations", "yes")
        .with("ngoCorporatePartnersCount", "4to10")
        .with("ngoCSRExperience", "yes")
}

/// Established, medium-sized educational institution.
pub(super) fn educational_answers() -> AnswerSet {
    AnswerSet::new()
        .with("ngoYear", "1990")
        .with("ngoBudget", "30000000")
        .with("ngoStaff", "40")
        .with("ngoRegistrationType", "educational")
        .with("ngoComplianceStatus", ["pan", "12a", "80g"])
}

pub(super) fn ids_of(results: &[ScoredStrategy]) -> Vec<&str> {
    results.iter().map(|result| result.strategy_id.as_str()).collect()
}

pub(super) fn find<'a>(results: &'a [ScoredStrategy], id: &str) -> Option<&'a ScoredStrategy> {
    results.iter().find(|result| result.strategy_id == id)
}

pub(super) fn assert_bounded(results: &[ScoredStrategy]) {
    for result in results {
        assert!(result.score <= 100, "{} scored {}", result.strategy_id, result.score);
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "{} has confidence {}",
            result.strategy_id,
            result.confidence
        );
    }
}
