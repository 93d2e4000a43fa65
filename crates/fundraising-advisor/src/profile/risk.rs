use serde::Serialize;

use super::NgoProfile;
use crate::answers::AnswerSet;
use crate::catalog::{ids, Criterion, Strategy};
use crate::domain::{MaturityStage, RiskTolerance, SizeClass};

const MAX_RISK_SCORE: i32 = 20;
const TOLERANCE_MATCH_POINTS: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Optimal,
    Acceptable,
    Cautious,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        if score >= 15 {
            Self::Optimal
        } else if score >= 10 {
            Self::Acceptable
        } else {
            Self::Cautious
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Acceptable => "Acceptable",
            Self::Cautious => "Cautious",
        }
    }
}

/// How well a strategy's execution risk suits the organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProfile {
    pub score: u8,
    pub level: RiskLevel,
    pub insights: Vec<String>,
    pub maturity_aligned: bool,
}

/// Strategy-specific capability check: +3 when satisfied, -2 otherwise.
type CapabilityCheck = fn(&AnswerSet, &NgoProfile) -> bool;

fn grant_readiness(answers: &AnswerSet, _profile: &NgoProfile) -> bool {
    answers.is_yes("ngoGrantWriting") && answers.is_yes("ngoComplianceSystem")
}

fn corporate_readiness(answers: &AnswerSet, profile: &NgoProfile) -> bool {
    answers.is_yes("ngoCSRExperience") && profile.networks.corporate >= 3
}

const CAPABILITY_CHECKS: &[(&str, CapabilityCheck)] = &[
    (ids::GRANTS, grant_readiness),
    (ids::CSR, corporate_readiness),
    (ids::EMPLOYEE_GIVING, corporate_readiness),
];

fn maturity_adjustment(strategy: &Strategy, maturity: MaturityStage) -> i32 {
    let feasibility = strategy.rating_or_neutral(Criterion::ImplementationFeasibility);
    match maturity {
        MaturityStage::Startup => {
            let mut adjustment = 0;
            if feasibility <= 2 {
                adjustment -= 3;
            }
            if ids::is_digital(strategy.id.as_str()) {
                adjustment += 3;
            }
            adjustment
        }
        MaturityStage::Growth => {
            if strategy.rating_or_neutral(Criterion::ScalabilityPotential) >= 4 {
                2
            } else {
                0
            }
        }
        MaturityStage::Mature => i32::from(feasibility <= 2),
        MaturityStage::Established => 2,
    }
}

fn size_adjustment(strategy: &Strategy, size: SizeClass) -> i32 {
    let resources = strategy.rating_or_neutral(Criterion::ResourceRequirements);
    match size {
        SizeClass::Small if resources >= 4 => -2,
        SizeClass::Small => 0,
        SizeClass::Medium => i32::from(resources >= 3),
        SizeClass::Large => 2,
    }
}

fn capability_adjustment(answers: &AnswerSet, profile: &NgoProfile, strategy: &Strategy) -> i32 {
    match CAPABILITY_CHECKS
        .iter()
        .find(|(id, _)| strategy.id == *id)
    {
        Some((_, check)) if check(answers, profile) => 3,
        Some(_) => -2,
        None => 1,
    }
}

/// Risk fit of one strategy given the organization's tolerance, stage and size.
pub fn assess(answers: &AnswerSet, profile: &NgoProfile, strategy: &Strategy) -> RiskProfile {
    let tolerance = RiskTolerance::from_answer(answers.text("ngoRiskTolerance"));
    let execution_risk = strategy.rating_or_neutral(Criterion::ExecutionRisk);

    let mut score = 0;
    if tolerance.fully_aligned(execution_risk) {
        score += TOLERANCE_MATCH_POINTS;
    }
    score += maturity_adjustment(strategy, profile.maturity);
    score += size_adjustment(strategy, profile.size);
    score += capability_adjustment(answers, profile, strategy);

    let mut insights = Vec::new();
    if execution_risk <= 2 {
        insights.push("Low execution risk, good fit for risk-averse organizations".to_string());
    } else if execution_risk >= 4 {
        insights.push("Higher execution risk, requires strong risk management".to_string());
    }

    let clamped = score.clamp(0, MAX_RISK_SCORE);
    RiskProfile {
        score: clamped as u8,
        level: RiskLevel::from_score(clamped),
        insights,
        maturity_aligned: strategy.suits_maturity(profile.maturity),
    }
}
