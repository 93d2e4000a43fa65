use serde::Serialize;

use crate::answers::AnswerSet;
use crate::catalog::{ids, Strategy};

const MAX_ALIGNMENT: f64 = 5.0;

const MISSION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        ids::CSR,
        &["impact", "sustainable", "development", "community", "social", "responsibility"],
    ),
    (
        ids::GRANTS,
        &["research", "project", "program", "impact", "outcomes", "evaluation"],
    ),
    (
        ids::P2P,
        &["community", "grassroots", "people", "social", "change", "support"],
    ),
    (
        ids::CROWDFUNDING,
        &["project", "creative", "innovative", "community", "impact"],
    ),
    (
        ids::HNI_GIVING,
        &["legacy", "impact", "transformation", "leadership", "vision"],
    ),
    (
        ids::ENDOWMENT_FUNDS,
        &[
            "education",
            "academic",
            "learning",
            "school",
            "college",
            "university",
            "research",
            "sustainability",
        ],
    ),
];

/// Causes donors connect with instantly on the street or online.
const INSTANT_CONNECT_CAUSES: [&str; 6] = [
    "children",
    "animals",
    "education",
    "health",
    "environment",
    "disaster",
];
const INSTANT_CONNECT_STRATEGIES: [&str; 4] = [
    ids::P2P,
    ids::CROWDFUNDING,
    ids::DIGITAL_FUNDRAISING,
    ids::DOOR_TO_DOOR,
];
const RELATABLE_CAUSES: [&str; 4] = ["children", "education", "health", "environment"];
const MAJOR_PLATFORMS: [&str; 4] = ["benevity", "caf", "yourcause", "globalgiving"];

/// Mission fit of one strategy, from three independent readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionAlignment {
    /// 0-5 from mission length, beneficiary breadth and cause type.
    pub profile_score: u8,
    /// 0-5 share of the strategy's keywords found in the mission text.
    pub keyword_score: f64,
    /// 0-5 from beneficiary spread.
    pub beneficiary_score: f64,
}

impl MissionAlignment {
    pub fn evaluate(answers: &AnswerSet, strategy: &Strategy) -> Self {
        Self {
            profile_score: profile_alignment(answers, strategy),
            keyword_score: keyword_alignment(answers.text_or_empty("ngoMission"), strategy.id.as_str()),
            beneficiary_score: beneficiary_alignment(answers, strategy),
        }
    }
}

fn primary_beneficiaries(answers: &AnswerSet) -> Vec<&str> {
    answers.list("ngoPrimaryBeneficiaries")
}

/// Profile-driven mission fit, 0-5. Endowments score 0 outside educational registrations.
pub fn profile_alignment(answers: &AnswerSet, strategy: &Strategy) -> u8 {
    let id = strategy.id.as_str();
    let primary = primary_beneficiaries(answers);
    let mut score = 0u8;

    if id == ids::CSR || id == ids::GRANTS {
        if answers.text_or_empty("ngoMission").chars().count() > 200 {
            score += 2;
        }
        let breadth = answers.list_len("ngoPrimaryBeneficiaries")
            + answers.list_len("ngoSecondaryBeneficiaries");
        if breadth >= 4 {
            score += 2;
        }
    }

    if INSTANT_CONNECT_STRATEGIES.contains(&id)
        && primary.iter().any(|cause| INSTANT_CONNECT_CAUSES.contains(cause))
    {
        score += 3;
    }

    if id == ids::ENDOWMENT_FUNDS {
        score = if answers.is("ngoRegistrationType", "educational") {
            score + 5
        } else {
            0
        };
    }

    score.min(MAX_ALIGNMENT as u8)
}

/// Keyword overlap between mission text and the strategy's vocabulary, 0-5.
/// Strategies without a vocabulary score 0.
pub fn keyword_alignment(mission: &str, strategy_id: &str) -> f64 {
    let Some((_, keywords)) = MISSION_KEYWORDS.iter().find(|(id, _)| *id == strategy_id) else {
        return 0.0;
    };
    if mission.trim().is_empty() {
        return 0.0;
    }

    let text = mission.to_lowercase();
    let matches = keywords.iter().filter(|word| text.contains(*word)).count();
    (matches as f64 / keywords.len() as f64 * MAX_ALIGNMENT).min(MAX_ALIGNMENT)
}

/// Beneficiary spread alignment, 0-5.
pub fn beneficiary_alignment(answers: &AnswerSet, strategy: &Strategy) -> f64 {
    let id = strategy.id.as_str();
    let primary = primary_beneficiaries(answers);
    let primary_count = answers.list_len("ngoPrimaryBeneficiaries");
    let indirect_count = answers.list_len("ngoIndirectBeneficiaries");
    let mut score = 0.0;

    if [ids::GRANTS, ids::CSR, ids::ENDOWMENT_FUNDS].contains(&id) {
        let total = primary_count
            + answers.list_len("ngoSecondaryBeneficiaries")
            + indirect_count;
        score += (total as f64 / 2.0).min(3.0);
    }

    if (id == ids::P2P || id == ids::CROWDFUNDING)
        && primary.iter().any(|cause| RELATABLE_CAUSES.contains(cause))
    {
        score += 2.0;
    }

    if id == ids::HNI_GIVING || id == ids::LEGACY_GIVING {
        if indirect_count >= 2 {
            score += 2.0;
        }
        if primary_count >= 2 {
            score += 1.0;
        }
    }

    f64::min(score, MAX_ALIGNMENT)
}

/// Bonus for listing on major giving platforms, 2.5 each up to 10.
pub fn platform_bonus(answers: &AnswerSet) -> f64 {
    let listed = answers
        .list("ngoOnlinePlatformsUsed")
        .into_iter()
        .filter(|platform| MAJOR_PLATFORMS.contains(platform))
        .count();
    (listed as f64 * 2.5).min(10.0)
}
