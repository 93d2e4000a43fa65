use serde::Serialize;

use super::NgoProfile;
use crate::answers::AnswerSet;
use crate::catalog::{ids, Strategy};

const MAX_READINESS: u8 = 10;
const LEGACY_RELATIONSHIP_YEARS: i64 = 5;
/// Raw event capacity at which events start supporting CSR paperwork.
const EVENT_CAPABILITY_THRESHOLD: u8 = 4;

/// Per-strategy regulatory readiness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReadiness {
    pub score: u8,
    /// False when a hard prerequisite of the strategy is missing; the score is then 0.
    pub prerequisite_met: bool,
    pub has_essentials: bool,
    pub ready_for_csr: bool,
    pub ready_for_fcra: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_status: Option<String>,
    pub has_event_capability: bool,
}

/// Hard requirement a strategy cannot be pursued without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prerequisite {
    CsrRegistration,
    EducationalRegistration,
    LongDonorRelationships,
    OffersProduct,
}

impl Prerequisite {
    fn is_met(self, answers: &AnswerSet, profile: &NgoProfile) -> bool {
        match self {
            Self::CsrRegistration => profile.has_compliance("csr1"),
            Self::EducationalRegistration => profile.is_educational(),
            Self::LongDonorRelationships => {
                answers.integer("ngoDonorRelationshipYears") >= LEGACY_RELATIONSHIP_YEARS
            }
            Self::OffersProduct => answers.is_truthy("ngoHasProduct"),
        }
    }
}

/// How a strategy weighs registrations beyond the PAN/12A/80G base.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Emphasis {
    Gated {
        prerequisite: Prerequisite,
        bonus: u8,
        event_bonus: bool,
    },
    /// Extra points per held registration.
    Registrations(&'static [(&'static str, u8)]),
}

const STANDARD_EMPHASIS: Emphasis = Emphasis::Registrations(&[("80g", 2), ("12a", 2)]);

const EMPHASIS_BY_STRATEGY: &[(&str, Emphasis)] = &[
    (
        ids::CSR,
        Emphasis::Gated {
            prerequisite: Prerequisite::CsrRegistration,
            bonus: 5,
            event_bonus: true,
        },
    ),
    (
        ids::EMPLOYEE_GIVING,
        Emphasis::Gated {
            prerequisite: Prerequisite::CsrRegistration,
            bonus: 5,
            event_bonus: true,
        },
    ),
    (
        ids::ENDOWMENT_FUNDS,
        Emphasis::Gated {
            prerequisite: Prerequisite::EducationalRegistration,
            bonus: 5,
            event_bonus: false,
        },
    ),
    (
        ids::LEGACY_GIVING,
        Emphasis::Gated {
            prerequisite: Prerequisite::LongDonorRelationships,
            bonus: 4,
            event_bonus: false,
        },
    ),
    (
        ids::CROWDFUNDING,
        Emphasis::Gated {
            prerequisite: Prerequisite::OffersProduct,
            bonus: 3,
            event_bonus: false,
        },
    ),
    (ids::GRANTS, Emphasis::Registrations(&[("fcra", 3), ("80g", 2)])),
    (ids::HNI_GIVING, Emphasis::Registrations(&[("80g", 3), ("12a", 2)])),
    (
        ids::DIGITAL_FUNDRAISING,
        Emphasis::Registrations(&[("80g", 3), ("12a", 2)]),
    ),
];

const BASE_REGISTRATIONS: [(&str, u8); 3] = [("pan", 1), ("12a", 2), ("80g", 2)];

fn emphasis_for(strategy_id: &str) -> Emphasis {
    EMPHASIS_BY_STRATEGY
        .iter()
        .find(|(id, _)| *id == strategy_id)
        .map(|(_, emphasis)| *emphasis)
        .unwrap_or(STANDARD_EMPHASIS)
}

fn registration_points(profile: &NgoProfile, table: &[(&str, u8)]) -> u8 {
    table
        .iter()
        .filter(|(registration, _)| profile.has_compliance(registration))
        .map(|(_, points)| *points)
        .sum()
}

/// Readiness of the organization's registrations for one strategy.
pub fn readiness(answers: &AnswerSet, profile: &NgoProfile, strategy: &Strategy) -> ComplianceReadiness {
    let has_event_capability = profile.event_capacity >= EVENT_CAPABILITY_THRESHOLD;
    let audit_status = answers.text("ngoAuditStatus").map(str::to_string);
    let in_hand_or_filed =
        |item: &str| profile.has_compliance(item) || profile.is_in_process(item);

    let mut readiness = ComplianceReadiness {
        score: 0,
        prerequisite_met: true,
        has_essentials: profile.has_compliance("pan")
            && in_hand_or_filed("12a")
            && in_hand_or_filed("80g"),
        ready_for_csr: profile.has_compliance("csr1"),
        ready_for_fcra: in_hand_or_filed("fcra"),
        audit_status,
        has_event_capability,
    };

    let mut score = registration_points(profile, &BASE_REGISTRATIONS);

    match emphasis_for(strategy.id.as_str()) {
        Emphasis::Gated {
            prerequisite,
            bonus,
            event_bonus,
        } => {
            if !prerequisite.is_met(answers, profile) {
                readiness.prerequisite_met = false;
                return readiness;
            }
            score += bonus;
            if event_bonus && has_event_capability {
                score += 2;
            }
        }
        Emphasis::Registrations(table) => score += registration_points(profile, table),
    }

    if profile.has_compliance("darpan") {
        score += 1;
    }
    if profile.has_compliance("itr") && profile.has_compliance("form10b") {
        score += 2;
    }
    if answers.is("ngoAuditStatus", "current") {
        score += 2;
    }
    if answers.is_yes("ngoComplianceTeam") || answers.is("ngoComplianceTeam", "outsourced") {
        score += 1;
    }

    readiness.score = score.min(MAX_READINESS);
    readiness
}
