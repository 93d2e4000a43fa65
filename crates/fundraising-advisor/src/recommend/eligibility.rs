use serde::Serialize;

use crate::catalog::{ids, Strategy};
use crate::profile::NgoProfile;

/// Reason a strategy is kept out of an algorithm's candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    RequiresEducationalRegistration,
    RequiresCsrRegistration,
    RequiresFcraRegistration,
    MaturityMismatch,
    SizeMismatch,
}

impl Exclusion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RequiresEducationalRegistration => "requires educational registration",
            Self::RequiresCsrRegistration => "requires CSR-1 registration",
            Self::RequiresFcraRegistration => "requires FCRA registration",
            Self::MaturityMismatch => "not suited to organization maturity",
            Self::SizeMismatch => "not suited to organization size",
        }
    }
}

/// Registration gates. Order-independent: at most one applies per strategy.
const CATEGORICAL_GATES: &[(&str, Exclusion)] = &[
    (ids::ENDOWMENT_FUNDS, Exclusion::RequiresEducationalRegistration),
    (ids::CSR, Exclusion::RequiresCsrRegistration),
    (ids::FOREIGN_GRANTS, Exclusion::RequiresFcraRegistration),
    (ids::FOREIGN_RFPS, Exclusion::RequiresFcraRegistration),
];

fn gate_satisfied(gate: Exclusion, profile: &NgoProfile) -> bool {
    match gate {
        Exclusion::RequiresEducationalRegistration => profile.is_educational(),
        Exclusion::RequiresCsrRegistration => profile.has_compliance("csr1"),
        Exclusion::RequiresFcraRegistration => profile.has_compliance("fcra"),
        Exclusion::MaturityMismatch | Exclusion::SizeMismatch => true,
    }
}

/// Hard registration gate shared by every algorithm.
pub fn categorical_exclusion(profile: &NgoProfile, strategy: &Strategy) -> Option<Exclusion> {
    CATEGORICAL_GATES
        .iter()
        .filter(|(id, _)| strategy.id == *id)
        .map(|(_, gate)| *gate)
        .find(|gate| !gate_satisfied(*gate, profile))
}

/// Registration gate plus maturity and size suitability.
pub fn profile_exclusion(profile: &NgoProfile, strategy: &Strategy) -> Option<Exclusion> {
    if let Some(exclusion) = categorical_exclusion(profile, strategy) {
        return Some(exclusion);
    }
    if !strategy.suits_maturity(profile.maturity) {
        return Some(Exclusion::MaturityMismatch);
    }
    if !strategy.suits_size(profile.size) {
        return Some(Exclusion::SizeMismatch);
    }
    None
}

pub(super) fn log_exclusion(algorithm: &str, strategy: &Strategy, exclusion: Exclusion) {
    tracing::debug!(
        algorithm,
        strategy = strategy.id.as_str(),
        reason = exclusion.label(),
        "strategy excluded"
    );
}
