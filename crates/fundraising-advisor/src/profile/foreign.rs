use serde::Serialize;

use crate::answers::AnswerSet;

const MAX_FOREIGN_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForeignAccessLevel {
    FullAccess,
    LimitedAccess,
    RestrictedAccess,
    DomesticOnly,
}

impl ForeignAccessLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::FullAccess
        } else if score >= 6.0 {
            Self::LimitedAccess
        } else if score >= 4.0 {
            Self::RestrictedAccess
        } else {
            Self::DomesticOnly
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullAccess => "Full Access",
            Self::LimitedAccess => "Limited Access",
            Self::RestrictedAccess => "Restricted Access",
            Self::DomesticOnly => "Domestic Only",
        }
    }
}

/// Ability to receive foreign contributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignFundingCapability {
    pub score: f64,
    pub access_level: ForeignAccessLevel,
    pub has_fcra: bool,
    /// FCRA registration held and confirmed currently valid.
    pub has_valid_fcra: bool,
    pub has_501c: bool,
    pub processing_fcra: bool,
    pub processing_501c: bool,
}

impl ForeignFundingCapability {
    pub fn evaluate(answers: &AnswerSet) -> Self {
        let has_fcra = answers.contains("ngoComplianceStatus", "fcra");
        let has_501c = answers.contains("ngoComplianceStatus", "501c");

        let mut score = match (has_fcra, has_501c) {
            (true, true) => 5.0,
            (true, false) => 3.0,
            _ => 0.0,
        };

        score += match answers.text("ngoForeignFundingIntent").map(str::trim) {
            Some("yes") => 2.0,
            Some("future") => 1.0,
            _ => 0.0,
        };

        if let Some(readiness) = answers.rating_mean("ngoForeignComplianceReadiness") {
            score += (readiness / 2.0).min(3.0);
        }

        Self {
            score: score.min(MAX_FOREIGN_SCORE),
            access_level: ForeignAccessLevel::from_score(score),
            has_fcra,
            has_valid_fcra: has_fcra && answers.is_yes("ngoFCRAValidity"),
            has_501c,
            processing_fcra: answers.contains("ngoComplianceInProcess", "fcra"),
            processing_501c: answers.contains("ngoComplianceInProcess", "501c"),
        }
    }
}
