//! Detailed per-strategy fit assessment.
//!
//! Unlike the recommenders, the assessment scores every catalog strategy
//! (eligible or not) and explains the result with risk, compliance, location,
//! mission and foreign-funding detail.

use serde::Serialize;

use crate::answers::AnswerSet;
use crate::catalog::{ids, Criterion, DonorCategory, Strategy, StrategyCatalog, StrategyId};
use crate::domain::{MaturityStage, SizeClass};
use crate::profile::{
    compliance, location, mission, risk, ComplianceReadiness, ForeignFundingCapability,
    MissionAlignment, NgoProfile, RiskProfile,
};

const NETWORK_CAP: f64 = 5.0;
const STAGE_CAP: f64 = 15.0;
const RESOURCE_CAP: f64 = 25.0;
const CAPACITY_BOOST_CAP: f64 = 2.0;

/// Organization context shared by every strategy assessment.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentInputs<'a> {
    pub answers: &'a AnswerSet,
    pub profile: &'a NgoProfile,
}

impl<'a> AssessmentInputs<'a> {
    pub fn new(answers: &'a AnswerSet, profile: &'a NgoProfile) -> Self {
        Self { answers, profile }
    }

    fn rating_of(&self, key: &str) -> i64 {
        self.answers.integer(key)
    }
}

/// Component points behind an assessment score, before mission and foreign adjustments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// 0-5 network alignment weighted by network dependency.
    pub network: f64,
    /// 0-15 maturity-stage alignment.
    pub stage: f64,
    /// 0-25 resource and implementation fit.
    pub resources: f64,
    pub location: i32,
    /// 0-20 funding profile.
    pub funding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyAssessment {
    pub strategy_id: StrategyId,
    /// 0-100.
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    /// Risk profile with location, compliance and registration advice merged in.
    pub risk: RiskProfile,
    pub compliance: ComplianceReadiness,
    pub mission: MissionAlignment,
    pub platform_bonus: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_funding: Option<ForeignFundingCapability>,
    pub foreign_insights: Vec<String>,
}

fn rating(strategy: &Strategy, criterion: Criterion) -> f64 {
    f64::from(strategy.rating_or_neutral(criterion))
}

/// Network strength relevant to the strategy (0-5), scaled by how much the
/// strategy leans on networks. Event and fundraising boosts add to the base
/// network, each capped at 2, before the 5 cap applies.
fn network_alignment(inputs: &AssessmentInputs<'_>, strategy: &Strategy) -> f64 {
    let answers = inputs.answers;
    let profile = inputs.profile;
    let yes = |key: &str| if answers.is_yes(key) { 1.0 } else { 0.0 };
    let fundraising_boost = profile
        .normalized_fundraising_capacity()
        .min(CAPACITY_BOOST_CAP);

    let raw = match strategy.id.as_str() {
        ids::DIGITAL_FUNDRAISING | ids::P2P => {
            let digital_ready = if profile.digital_capacity >= 4 { 1.0 } else { 0.0 };
            2.0 * yes("ngoSocialMedia") + 2.0 * yes("ngoDonorDatabase") + digital_ready
        }
        ids::CSR => {
            f64::from(profile.networks.corporate) * 1.2 + yes("ngoCSRExperience") + fundraising_boost
        }
        ids::EMPLOYEE_GIVING | ids::CHECKOUT_CHARITY => {
            f64::from(profile.networks.corporate) * 1.2 + yes("ngoCSRExperience")
        }
        ids::GRANTS => {
            f64::from(profile.networks.foundation) * 1.2 + yes("ngoGrantWriting") + fundraising_boost
        }
        ids::ENDOWMENT_FUNDS => {
            f64::from(profile.networks.foundation) * 1.2 + yes("ngoGrantWriting")
        }
        ids::HNI_GIVING | ids::LEGACY_GIVING => {
            let relationship = match inputs.rating_of("ngoDonorRelationship") {
                rating if rating >= 4 => 5.0,
                3 => 3.0,
                _ => 1.0,
            };
            if strategy.id == ids::HNI_GIVING {
                relationship + fundraising_boost
            } else {
                relationship
            }
        }
        ids::EVENT_BASED => {
            f64::from(profile.networks.individual)
                + profile.normalized_event_capacity().min(CAPACITY_BOOST_CAP)
        }
        _ => f64::from(profile.networks.individual),
    };

    let dependency = 6.0 - rating(strategy, Criterion::NetworkLeverage);
    raw.min(NETWORK_CAP) * dependency / 5.0
}

fn stage_alignment(inputs: &AssessmentInputs<'_>, strategy: &Strategy, network: f64) -> f64 {
    let id = strategy.id.as_str();
    let maturity = inputs.profile.maturity;
    let mut bonus = 0.0;

    if strategy.suits_maturity(maturity) {
        bonus += 5.0;
    }

    match maturity {
        MaturityStage::Startup => {
            if ids::is_digital(id) {
                bonus += 5.0;
            }
            if rating(strategy, Criterion::NetworkLeverage) <= 2.0 {
                bonus += 3.0;
            }
            if rating(strategy, Criterion::ImplementationFeasibility) >= 4.0 {
                bonus += 2.0;
            }
        }
        MaturityStage::Growth => {
            if [ids::CSR, ids::HNI_GIVING, ids::CHECKOUT_CHARITY].contains(&id) {
                bonus += 4.0;
            }
            if rating(strategy, Criterion::ScalabilityPotential) >= 4.0 {
                bonus += 4.0;
            }
        }
        MaturityStage::Mature => {
            if [ids::GRANTS, ids::CSR, ids::EVENT_BASED].contains(&id) {
                bonus += 4.0;
            }
            if rating(strategy, Criterion::NetworkLeverage) >= 4.0 && network >= 4.0 {
                bonus += 3.0;
            }
        }
        MaturityStage::Established => {
            if [ids::ENDOWMENT_FUNDS, ids::LEGACY_GIVING, ids::GRANTS].contains(&id) {
                bonus += 5.0;
            }
            if rating(strategy, Criterion::FundingScale) >= 4.0 {
                bonus += 3.0;
            }
        }
    }

    f64::min(bonus, STAGE_CAP)
}

fn has_specialized_resources(inputs: &AssessmentInputs<'_>, strategy: &Strategy) -> bool {
    match strategy.id.as_str() {
        ids::GRANTS => inputs.answers.is_yes("ngoGrantWriting"),
        ids::CSR => inputs.answers.is_yes("ngoCSRExperience"),
        ids::DIGITAL_FUNDRAISING => inputs.profile.digital_capacity >= 6,
        _ => false,
    }
}

/// Resource and implementation fit; 0 when the strategy does not suit the size class.
fn resource_fit(inputs: &AssessmentInputs<'_>, strategy: &Strategy) -> f64 {
    let profile = inputs.profile;
    if !strategy.suits_size(profile.size) {
        return 0.0;
    }

    let requirements = rating(strategy, Criterion::ResourceRequirements);
    let weight = match profile.size {
        SizeClass::Small => 2.0,
        SizeClass::Medium => 1.5,
        SizeClass::Large => 1.2,
    };

    let mut score = 5.0 + ((5.0 - requirements) * weight).min(7.0);
    if has_specialized_resources(inputs, strategy) {
        score += 3.0;
    }
    if profile.staff >= 10 && requirements >= 3.0 {
        score += 2.0;
    }
    if profile.staff < 5 && requirements <= 2.0 {
        score += 2.0;
    }
    if profile.budget_usd >= 500_000.0 && requirements >= 3.0 {
        score += 3.0;
    }
    if profile.budget_usd < 100_000.0 && requirements <= 2.0 {
        score += 3.0;
    }
    if profile.normalized_volunteer_capacity() >= 4.0 && requirements <= 3.0 {
        score += 3.0;
    }

    score.min(RESOURCE_CAP)
}

fn funding_profile(strategy: &Strategy) -> f64 {
    let mut score = (rating(strategy, Criterion::FundingScale) * 1.6).min(8.0)
        + (rating(strategy, Criterion::FundingTimeline) * 1.2).min(6.0);
    if rating(strategy, Criterion::ScalabilityPotential) >= 4.0 {
        score += 6.0;
    }
    score
}

/// Foreign-foundation gating and bonuses, then the stated-intent multiplier.
fn apply_foreign_funding(
    score: f64,
    inputs: &AssessmentInputs<'_>,
    strategy: &Strategy,
) -> f64 {
    let capability = &inputs.profile.foreign_funding;
    let mut score = match strategy.donor_category {
        DonorCategory::FoundationForeign if !capability.has_valid_fcra => 0.0,
        DonorCategory::FoundationForeign if capability.has_501c => score + 10.0,
        DonorCategory::FoundationRestricted if !capability.has_valid_fcra => 0.0,
        DonorCategory::FoundationDomestic if inputs.profile.has_compliance("80g") => score + 5.0,
        _ => score,
    };

    if strategy.donor_category.requires_foreign_contribution_clearance() {
        score *= match inputs.answers.text("ngoForeignFundingIntent").map(str::trim) {
            Some("yes") => 1.2,
            Some("future") => 0.8,
            Some("no") => 0.5,
            _ => 1.0,
        };
    }
    score
}

fn registration_insights(
    strategy: &Strategy,
    readiness: &ComplianceReadiness,
) -> impl Iterator<Item = &'static str> {
    let compliance_heavy = rating(strategy, Criterion::ComplianceRequirements) <= 2.0;
    [
        (readiness.score < 5, "Compliance readiness needs improvement"),
        (
            compliance_heavy && !readiness.has_essentials,
            "Missing essential compliance requirements",
        ),
        (
            strategy.id == ids::CSR && !readiness.ready_for_csr,
            "CSR-1 registration required for CSR funding",
        ),
        (
            strategy.id == ids::GRANTS && !readiness.ready_for_fcra,
            "FCRA registration recommended for international grants",
        ),
    ]
    .into_iter()
    .filter_map(|(applies, insight)| applies.then_some(insight))
}

fn foreign_insights(capability: &ForeignFundingCapability, strategy: &Strategy) -> Vec<String> {
    if !strategy.donor_category.requires_foreign_contribution_clearance() {
        return Vec::new();
    }

    let mut insights = vec![format!(
        "Foreign Funding Access Level: {}",
        capability.access_level.label()
    )];
    if !capability.has_valid_fcra && capability.processing_fcra {
        insights.push("Complete FCRA registration process to enable this strategy".to_string());
    }
    if strategy.donor_category == DonorCategory::FoundationForeign
        && capability.has_valid_fcra
        && !capability.has_501c
    {
        insights.push("Consider 501(c) registration to maximize foreign funding access".to_string());
    }
    insights
}

/// Composite fit of one strategy for the organization.
pub fn assess_strategy(inputs: &AssessmentInputs<'_>, strategy: &Strategy) -> StrategyAssessment {
    let answers = inputs.answers;
    let profile = inputs.profile;
    let id = strategy.id.as_str();

    let compliance = compliance::readiness(answers, profile, strategy);
    let risk = risk::assess(answers, profile, strategy);
    let mission = MissionAlignment::evaluate(answers, strategy);

    let network = network_alignment(inputs, strategy);
    let stage = stage_alignment(inputs, strategy, network);
    let resources = resource_fit(inputs, strategy);
    let location_impact = location::impact(answers, id);
    let funding = funding_profile(strategy);

    let startup_weight = if profile.maturity == MaturityStage::Startup {
        1.5
    } else {
        1.0
    };

    let mut score = (network * 4.0).min(20.0)
        + (stage * 1.67).min(25.0)
        + resources
        + f64::from(location_impact)
        + funding
        + f64::from(risk.score)
        + ((6.0 - rating(strategy, Criterion::ComplianceRequirements)) * 1.2).min(5.0)
        + (rating(strategy, Criterion::MacroTrends) * startup_weight).min(5.0)
        + f64::from(compliance.score);

    if rating(strategy, Criterion::ComplianceRequirements) <= 2.0 && compliance.score < 5 {
        score *= 0.8;
    }

    let mission_profile = f64::from(mission.profile_score);
    score += (mission_profile * 3.0).min(15.0);
    score = (score * 0.95 + mission_profile * 5.0).round().min(100.0);

    let platform_bonus = mission::platform_bonus(answers);
    if id == ids::DIGITAL_FUNDRAISING {
        score += platform_bonus;
    }
    score += mission.keyword_score * 3.0 + mission.beneficiary_score * 2.0;

    let score = apply_foreign_funding(score, inputs, strategy);

    let mut insights = location::insights(answers, id, location_impact);
    insights.extend(risk.insights.iter().cloned());
    insights.extend(registration_insights(strategy, &compliance).map(str::to_string));

    let foreign_funding = strategy
        .donor_category
        .is_foundation()
        .then(|| profile.foreign_funding.clone());

    StrategyAssessment {
        strategy_id: strategy.id.clone(),
        score: crate::recommend::clamp_score(score),
        breakdown: ScoreBreakdown {
            network,
            stage,
            resources,
            location: location_impact,
            funding,
        },
        risk: RiskProfile { insights, ..risk },
        compliance,
        mission,
        platform_bonus,
        foreign_funding,
        foreign_insights: foreign_insights(&profile.foreign_funding, strategy),
    }
}

/// Assessments for every catalog strategy, highest score first; ties keep catalog order.
pub fn assess_catalog(inputs: &AssessmentInputs<'_>, catalog: &StrategyCatalog) -> Vec<StrategyAssessment> {
    let mut assessments: Vec<StrategyAssessment> = catalog
        .iter()
        .map(|strategy| assess_strategy(inputs, strategy))
        .collect();
    assessments.sort_by(|left, right| right.score.cmp(&left.score));
    assessments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileDeriver, RiskLevel};
    use approx::assert_relative_eq;

    fn assess(answers: &AnswerSet, id: &str) -> StrategyAssessment {
        let catalog = StrategyCatalog::standard();
        let profile = ProfileDeriver::default().derive(answers, 2026);
        let inputs = AssessmentInputs::new(answers, &profile);
        match catalog.get(id) {
            Some(strategy) => assess_strategy(&inputs, strategy),
            None => panic!("missing strategy {id}"),
        }
    }

    fn established_foundation_answers() -> AnswerSet {
        AnswerSet::new()
            .with("ngoYear", "2000")
            .with("ngoBudget", "150000000")
            .with("ngoStaff", "30")
            .with("ngoComplianceStatus", ["pan", "12a", "80g", "fcra"])
            .with("ngoFCRAValidity", "yes")
            .with("ngoForeignFundingIntent", "yes")
    }

    #[test]
    fn event_boost_adds_to_the_network_within_the_cap() {
        let catalog = StrategyCatalog::standard();
        let Some(event) = catalog.get(ids::EVENT_BASED) else {
            panic!("missing strategy {}", ids::EVENT_BASED);
        };
        let dependency = (6.0 - rating(event, Criterion::NetworkLeverage)) / 5.0;
        let event_ready = AnswerSet::new()
            .with("ngoEventExperience", "yes")
            .with("ngoEventCount", "over10")
            .with("ngoEventVenues", "yes")
            .with("ngoVirtualEvents", "yes")
            .with("ngoEventBudget", "yes");
        let alignment = |answers: &AnswerSet| {
            let profile = ProfileDeriver::default().derive(answers, 2026);
            network_alignment(&AssessmentInputs::new(answers, &profile), event)
        };

        assert_relative_eq!(alignment(&event_ready), 2.0 * dependency, epsilon = 1e-9);

        let with_donors = event_ready
            .with("ngoDonorDatabase", "yes")
            .with("ngoDonorCount", "100to500");
        assert_relative_eq!(alignment(&with_donors), 4.0 * dependency, epsilon = 1e-9);

        let deep_donors = with_donors
            .with("ngoDonorCount", "over1000")
            .with("ngoDonorStewardship", "yes");
        assert_relative_eq!(alignment(&deep_donors), 5.0 * dependency, epsilon = 1e-9);
    }

    #[test]
    fn foreign_grants_are_zeroed_without_valid_fcra() {
        let answers = established_foundation_answers().with("ngoFCRAValidity", "no");
        let assessment = assess(&answers, ids::FOREIGN_GRANTS);

        assert_eq!(assessment.score, 0);
        assert!(assessment.foreign_funding.is_some());
        assert_eq!(
            assessment.foreign_insights,
            vec!["Foreign Funding Access Level: Restricted Access".to_string()]
        );
    }

    #[test]
    fn valid_fcra_without_501c_suggests_registration() {
        let assessment = assess(&established_foundation_answers(), ids::FOREIGN_GRANTS);

        assert!(assessment.score > 0);
        assert_eq!(
            assessment.foreign_insights,
            vec![
                "Foreign Funding Access Level: Restricted Access".to_string(),
                "Consider 501(c) registration to maximize foreign funding access".to_string(),
            ]
        );
    }

    #[test]
    fn processing_fcra_is_called_out() {
        let answers = AnswerSet::new()
            .with("ngoYear", "2000")
            .with("ngoComplianceInProcess", ["fcra"]);
        let assessment = assess(&answers, ids::FOREIGN_RFPS);

        assert_eq!(assessment.score, 0);
        assert!(assessment
            .foreign_insights
            .contains(&"Complete FCRA registration process to enable this strategy".to_string()));
    }

    #[test]
    fn foreign_intent_scales_foreign_strategies_only() {
        let eager = assess(&established_foundation_answers(), ids::FOREIGN_GRANTS).score;
        let reluctant = assess(
            &established_foundation_answers().with("ngoForeignFundingIntent", "no"),
            ids::FOREIGN_GRANTS,
        )
        .score;
        assert!(eager > reluctant);

        let domestic_eager = assess(&established_foundation_answers(), ids::GRANTS).score;
        let domestic_reluctant = assess(
            &established_foundation_answers().with("ngoForeignFundingIntent", "no"),
            ids::GRANTS,
        )
        .score;
        assert_eq!(domestic_eager, domestic_reluctant);
    }

    #[test]
    fn csr_without_registration_explains_the_gap() {
        let assessment = assess(&established_foundation_answers(), ids::CSR);

        assert_eq!(assessment.compliance.score, 0);
        assert!(assessment
            .risk
            .insights
            .contains(&"CSR-1 registration required for CSR funding".to_string()));
        assert!(assessment
            .risk
            .insights
            .contains(&"Compliance readiness needs improvement".to_string()));
        assert!(assessment.foreign_funding.is_none());
    }

    #[test]
    fn location_insights_lead_the_risk_insights() {
        let answers = established_foundation_answers().with("ngoLocation", ["tier1"]);
        let assessment = assess(&answers, ids::CSR);

        assert_eq!(
            assessment.risk.insights.first().map(String::as_str),
            Some("Strong alignment with your location profile (Tier 1 city)")
        );
        assert_eq!(assessment.breakdown.location, 15);
    }

    #[test]
    fn platform_bonus_applies_to_digital_fundraising() {
        let base = AnswerSet::new().with("ngoYear", "2024");
        let listed = base
            .clone()
            .with("ngoOnlinePlatformsUsed", ["benevity", "globalgiving"]);

        let without = assess(&base, ids::DIGITAL_FUNDRAISING);
        let with = assess(&listed, ids::DIGITAL_FUNDRAISING);
        assert_eq!(with.platform_bonus, 5.0);
        assert_eq!(with.score, without.score + 5);

        let p2p = assess(&listed, ids::P2P);
        assert_eq!(p2p.score, assess(&base, ids::P2P).score);
    }

    #[test]
    fn empty_answers_still_produce_bounded_assessments() {
        let catalog = StrategyCatalog::standard();
        let answers = AnswerSet::new();
        let profile = ProfileDeriver::default().derive(&answers, 2026);
        let inputs = AssessmentInputs::new(&answers, &profile);

        let assessments = assess_catalog(&inputs, &catalog);
        assert_eq!(assessments.len(), catalog.len());
        assert!(assessments
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert!(assessments.iter().all(|assessment| assessment.score <= 100));
        assert!(assessments
            .iter()
            .all(|assessment| assessment.risk.level != RiskLevel::Optimal || assessment.risk.score >= 15));
    }
}
