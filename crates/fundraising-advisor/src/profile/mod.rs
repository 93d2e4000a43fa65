//! Organization profile derived from questionnaire answers.
//!
//! Everything here is a pure function of the answers and the reference
//! year: missing or malformed answers read as zero and never fail.

mod capacity;
pub mod compliance;
pub mod foreign;
pub mod location;
pub mod mission;
pub mod risk;

pub use crate::domain::{LocationTier, MaturityStage, RiskTolerance, SizeClass};
pub use compliance::ComplianceReadiness;
pub use foreign::{ForeignAccessLevel, ForeignFundingCapability};
pub use mission::MissionAlignment;
pub use risk::{RiskLevel, RiskProfile};

use crate::answers::AnswerSet;
use serde::Serialize;

/// Local-currency units per US dollar applied before size thresholds.
pub const DEFAULT_BUDGET_CONVERSION_RATE: f64 = 75.0;

const SMALL_BUDGET_USD: f64 = 500_000.0;
const MEDIUM_BUDGET_USD: f64 = 5_000_000.0;
const SMALL_STAFF: i64 = 10;
const MEDIUM_STAFF: i64 = 50;

/// Relationship strength per donor channel, 0-6 each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStrengths {
    pub corporate: u8,
    pub individual: u8,
    pub foundation: u8,
}

/// Derived features shared by every recommender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NgoProfile {
    pub reference_year: i32,
    pub age_years: i64,
    pub maturity: MaturityStage,
    pub size: SizeClass,
    /// Annual budget in local currency, as answered.
    pub budget: i64,
    pub budget_usd: f64,
    pub staff: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<String>,
    /// 0-8.
    pub digital_capacity: u8,
    /// Raw 0-10 scale.
    pub volunteer_capacity: u8,
    /// Raw 0-10 scale.
    pub event_capacity: u8,
    pub networks: NetworkStrengths,
    /// Raw 0-12 scale.
    pub fundraising_capacity: u8,
    pub compliance_status: Vec<String>,
    pub compliance_in_process: Vec<String>,
    pub foreign_funding: ForeignFundingCapability,
}

impl NgoProfile {
    pub fn has_compliance(&self, registration: &str) -> bool {
        self.compliance_status.iter().any(|held| held == registration)
    }

    pub fn is_in_process(&self, registration: &str) -> bool {
        self.compliance_in_process
            .iter()
            .any(|filed| filed == registration)
    }

    pub fn is_educational(&self) -> bool {
        self.registration_type.as_deref() == Some("educational")
    }

    /// Volunteer capacity on the 0-5 composite scale.
    pub fn normalized_volunteer_capacity(&self) -> f64 {
        (f64::from(self.volunteer_capacity) / 2.0).min(5.0)
    }

    pub fn normalized_event_capacity(&self) -> f64 {
        (f64::from(self.event_capacity) / 2.0).min(5.0)
    }

    pub fn normalized_fundraising_capacity(&self) -> f64 {
        (f64::from(self.fundraising_capacity) / 2.4).min(5.0)
    }
}

/// Turns an answer set into an [`NgoProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDeriver {
    budget_conversion_rate: f64,
}

impl Default for ProfileDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET_CONVERSION_RATE)
    }
}

impl ProfileDeriver {
    /// Non-positive or non-finite rates fall back to the default.
    pub fn new(budget_conversion_rate: f64) -> Self {
        let sanitized = if budget_conversion_rate.is_finite() && budget_conversion_rate > 0.0 {
            budget_conversion_rate
        } else {
            DEFAULT_BUDGET_CONVERSION_RATE
        };

        Self {
            budget_conversion_rate: sanitized,
        }
    }

    pub fn budget_conversion_rate(&self) -> f64 {
        self.budget_conversion_rate
    }

    pub fn to_usd(&self, budget: i64) -> f64 {
        budget as f64 / self.budget_conversion_rate
    }

    pub fn size_class(&self, budget: i64, staff: i64) -> SizeClass {
        let budget_usd = self.to_usd(budget);
        if budget_usd < SMALL_BUDGET_USD && staff < SMALL_STAFF {
            SizeClass::Small
        } else if budget_usd < MEDIUM_BUDGET_USD && staff < MEDIUM_STAFF {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    pub fn derive(&self, answers: &AnswerSet, reference_year: i32) -> NgoProfile {
        let age_years = i64::from(reference_year) - answers.integer("ngoYear");
        let budget = answers.integer("ngoBudget");
        let staff = answers.integer("ngoStaff");

        let profile = NgoProfile {
            reference_year,
            age_years,
            maturity: MaturityStage::from_age(age_years),
            size: self.size_class(budget, staff),
            budget,
            budget_usd: self.to_usd(budget),
            staff,
            registration_type: answers
                .text("ngoRegistrationType")
                .map(|value| value.trim().to_string()),
            digital_capacity: capacity::digital(answers),
            volunteer_capacity: capacity::volunteer(answers),
            event_capacity: capacity::event(answers),
            networks: NetworkStrengths {
                corporate: capacity::corporate_network(answers),
                individual: capacity::individual_network(answers),
                foundation: capacity::foundation_network(answers),
            },
            fundraising_capacity: capacity::fundraising(answers),
            compliance_status: owned_list(answers, "ngoComplianceStatus"),
            compliance_in_process: owned_list(answers, "ngoComplianceInProcess"),
            foreign_funding: ForeignFundingCapability::evaluate(answers),
        };

        tracing::debug!(
            maturity = profile.maturity.key(),
            size = profile.size.key(),
            digital = profile.digital_capacity,
            "derived organization profile"
        );

        profile
    }
}

fn owned_list(answers: &AnswerSet, key: &str) -> Vec<String> {
    answers
        .list(key)
        .into_iter()
        .map(|item| item.trim().to_string())
        .collect()
}
