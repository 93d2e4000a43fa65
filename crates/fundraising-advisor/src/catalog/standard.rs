use super::{Criterion, ScoringCriteria, Strategy, StrategyId, Suitability};
use crate::domain::{DonorCategory, MaturityStage, SizeClass};
use std::collections::BTreeMap;

use Criterion::*;
use MaturityStage::{Established, Growth, Mature, Startup};
use SizeClass::{Large, Medium, Small};

/// Identifiers of the built-in strategies.
pub mod ids {
    pub const P2P: &str = "p2p";
    pub const CROWDFUNDING: &str = "crowdfunding";
    pub const DIGITAL_FUNDRAISING: &str = "digitalFundraising";
    pub const DOOR_TO_DOOR: &str = "doorToDoor";
    pub const HNI_GIVING: &str = "hniGiving";
    pub const CHECKOUT_CHARITY: &str = "checkoutCharity";
    pub const EVENT_BASED: &str = "eventBased";
    pub const CSR: &str = "csr";
    pub const GRANTS: &str = "grants";
    pub const FOREIGN_GRANTS: &str = "foreignGrants";
    pub const FOREIGN_RFPS: &str = "foreignRFPs";
    pub const MATCHING_DONATIONS: &str = "matchingDonations";
    pub const EMPLOYEE_GIVING: &str = "employeeGiving";
    pub const LEGACY_GIVING: &str = "legacyGiving";
    pub const ENDOWMENT_FUNDS: &str = "endowmentFunds";
    pub const GOVERNMENT_GRANTS: &str = "governmentGrants";

    /// Strategies that run primarily on online channels.
    pub const DIGITAL: [&str; 3] = [DIGITAL_FUNDRAISING, P2P, CROWDFUNDING];

    pub fn is_digital(id: &str) -> bool {
        DIGITAL.contains(&id)
    }
}

const ALL_STAGES: &[MaturityStage] = &[Startup, Growth, Mature, Established];
const GROWING: &[MaturityStage] = &[Growth, Mature, Established];
const OLDER: &[MaturityStage] = &[Mature, Established];
const ALL_SIZES: &[SizeClass] = &[Small, Medium, Large];
const MID_LARGE: &[SizeClass] = &[Medium, Large];

/// Ratings in fixed order: macro trends, target audience, funding scale,
/// funding timeline, feasibility, resources, network, execution risk,
/// scalability, engagement, mission, compliance.
fn full_ratings(values: [u8; 12]) -> ScoringCriteria {
    let order = [
        MacroTrends,
        TargetAudience,
        FundingScale,
        FundingTimeline,
        ImplementationFeasibility,
        ResourceRequirements,
        NetworkLeverage,
        ExecutionRisk,
        ScalabilityPotential,
        DonorEngagement,
        MissionAlignment,
        ComplianceRequirements,
    ];
    let pairs: Vec<(Criterion, u8)> = order.into_iter().zip(values).collect();
    ScoringCriteria::from_pairs(&pairs)
}

fn requirements(entries: &[(&str, u8)]) -> BTreeMap<String, u8> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

struct Draft {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: DonorCategory,
    similar: &'static [&'static str],
    maturity: &'static [MaturityStage],
    sizes: &'static [SizeClass],
}

impl Draft {
    fn build(self, criteria: ScoringCriteria, needs: &[(&str, u8)]) -> Strategy {
        Strategy {
            id: StrategyId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            donor_category: self.category,
            similar_strategies: self.similar.iter().map(|id| StrategyId::new(*id)).collect(),
            suitable_for: Suitability {
                maturity: self.maturity.to_vec(),
                sizes: self.sizes.to_vec(),
                registration_type: None,
                requirements: requirements(needs),
            },
            scoring_criteria: criteria,
        }
    }
}

pub(super) fn strategies() -> Vec<Strategy> {
    vec![
        Draft {
            id: ids::P2P,
            name: "Peer-to-Peer (P2P) Fundraising",
            description: "Individuals raise money on behalf of an NGO, leveraging their personal networks.",
            category: DonorCategory::Individual,
            similar: &[ids::CROWDFUNDING, ids::DIGITAL_FUNDRAISING],
            maturity: ALL_STAGES,
            sizes: ALL_SIZES,
        }
        .build(
            full_ratings([5, 5, 3, 4, 4, 3, 4, 3, 5, 5, 4, 4]),
            &[("volunteerBase", 2), ("digitalCapacity", 2), ("cause", 2), ("staff", 4)],
        ),
        Draft {
            id: ids::CROWDFUNDING,
            name: "Reward-based Crowdfunding",
            description: "Donors contribute for a tangible item or service in return for their support.",
            category: DonorCategory::Individual,
            similar: &[ids::P2P, ids::DIGITAL_FUNDRAISING],
            maturity: &[Startup, Growth],
            sizes: &[Small, Medium],
        }
        .build(
            full_ratings([4, 4, 2, 4, 2, 2, 3, 2, 2, 3, 3, 4]),
            &[
                ("tangibleProduct", 1),
                ("digitalCapacity", 2),
                ("creativityCapacity", 2),
                ("productionCapability", 2),
            ],
        ),
        Draft {
            id: ids::DIGITAL_FUNDRAISING,
            name: "Digital Fundraising",
            description: "Online methods to raise money through platforms, email, and social media.",
            category: DonorCategory::Individual,
            similar: &[ids::P2P, ids::CROWDFUNDING],
            maturity: ALL_STAGES,
            sizes: ALL_SIZES,
        }
        .build(
            full_ratings([5, 5, 4, 5, 3, 3, 3, 3, 5, 4, 4, 4]),
            &[
                ("onlinePresence", 1),
                ("digitalCapacity", 1),
                ("platformDiversity", 1),
                ("contentCreation", 1),
                ("techSavvy", 2),
                ("relatableCause", 2),
            ],
        ),
        Draft {
            id: ids::DOOR_TO_DOOR,
            name: "Door-to-Door Fundraising (F2F)",
            description: "Fundraisers solicit donations by visiting homes or approaching people in public spaces.",
            category: DonorCategory::Individual,
            similar: &[ids::EVENT_BASED],
            maturity: &[Growth, Mature],
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([2, 3, 2, 3, 3, 2, 2, 3, 3, 4, 3, 3]),
            &[
                ("relatableCause", 2),
                ("localPresence", 1),
                ("volunteerBase", 1),
                ("trainingCapacity", 2),
                ("instantConnection", 2),
            ],
        ),
        Draft {
            id: ids::HNI_GIVING,
            name: "HNI/UHNI Giving",
            description: "Targeting wealthy individuals for significant donations.",
            category: DonorCategory::Individual,
            similar: &[ids::LEGACY_GIVING],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([4, 2, 5, 2, 2, 2, 1, 3, 4, 5, 4, 3]),
            &[
                ("provenImpact", 1),
                ("resonatingCause", 2),
                ("reputation", 1),
                ("networkAccess", 1),
            ],
        ),
        Draft {
            id: ids::CHECKOUT_CHARITY,
            name: "Check-out Charity Partnerships",
            description: "Businesses ask customers for small donations at checkout.",
            category: DonorCategory::Corporate,
            similar: &[ids::EMPLOYEE_GIVING, ids::MATCHING_DONATIONS],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 4, 3, 3, 2, 3, 1, 3, 4, 2, 3, 4]),
            &[
                ("recognizableCause", 1),
                ("brandName", 2),
                ("corporateRelationships", 1),
                ("marketingCapacity", 2),
            ],
        ),
        Draft {
            id: ids::EVENT_BASED,
            name: "Event-based Fundraising",
            description: "Hosting events for donations such as galas, concerts, sports events, or auctions.",
            category: DonorCategory::Individual,
            similar: &[ids::DOOR_TO_DOOR],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 4, 3, 3, 3, 2, 4, 3, 3, 5, 4, 3]),
            &[
                ("supporterBase", 1),
                ("publicVisibility", 2),
                ("eventManagementCapacity", 1),
                ("volunteerBase", 2),
            ],
        ),
        Draft {
            id: ids::CSR,
            name: "Corporate Social Responsibility (CSR)",
            description: "Corporations donate profits to NGOs as part of their CSR initiatives.",
            category: DonorCategory::Corporate,
            similar: &[ids::EMPLOYEE_GIVING, ids::MATCHING_DONATIONS],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([4, 3, 4, 2, 2, 2, 5, 3, 4, 4, 4, 1]),
            &[
                ("establishedNGO", 1),
                ("clearImpactMetrics", 1),
                ("corporateAlignedSector", 1),
                ("transparency", 1),
                ("eventCapacity", 2),
                ("csrCompliance", 1),
            ],
        ),
        Draft {
            id: ids::GRANTS,
            name: "Domestic Foundation Grants",
            description: "Non-repayable funds for specific projects from domestic foundations.",
            category: DonorCategory::FoundationDomestic,
            similar: &[ids::ENDOWMENT_FUNDS, ids::GOVERNMENT_GRANTS],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 3, 4, 2, 3, 2, 4, 3, 4, 3, 5, 2]),
            &[
                ("establishedTrackRecord", 1),
                ("specificProjects", 1),
                ("grantWritingCapacity", 1),
                ("complianceCapacity", 1),
            ],
        ),
        Draft {
            id: ids::FOREIGN_GRANTS,
            name: "International Foundation Grants",
            description: "Grants from international foundations requiring FCRA compliance.",
            category: DonorCategory::FoundationForeign,
            similar: &[ids::GRANTS, ids::FOREIGN_RFPS],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([4, 3, 5, 1, 2, 1, 5, 2, 5, 3, 5, 1]),
            &[
                ("establishedTrackRecord", 1),
                ("specificProjects", 1),
                ("grantWritingCapacity", 1),
                ("complianceCapacity", 1),
                ("fcraNecessary", 1),
                ("internationalStandards", 1),
            ],
        ),
        Draft {
            id: ids::FOREIGN_RFPS,
            name: "International RFPs & Limited Pool Grants",
            description: "Competitive international RFPs and restricted pool grant opportunities.",
            category: DonorCategory::FoundationRestricted,
            similar: &[ids::FOREIGN_GRANTS, ids::GRANTS],
            maturity: OLDER,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 2, 4, 1, 1, 1, 5, 1, 4, 3, 5, 1]),
            &[
                ("establishedTrackRecord", 1),
                ("specificProjects", 1),
                ("grantWritingCapacity", 1),
                ("complianceCapacity", 1),
                ("fcraOnly", 1),
                ("competitiveBidding", 1),
            ],
        ),
        Draft {
            id: ids::MATCHING_DONATIONS,
            name: "Matching Donations",
            description: "Corporation or major donor matches individual donations during campaigns.",
            category: DonorCategory::Corporate,
            similar: &[ids::EMPLOYEE_GIVING, ids::CSR],
            maturity: GROWING,
            sizes: ALL_SIZES,
        }
        .build(
            full_ratings([4, 4, 3, 3, 3, 3, 4, 3, 4, 5, 4, 3]),
            &[
                ("corporatePartnerships", 1),
                ("digitalPresence", 2),
                ("donorBase", 2),
                ("campaignCapacity", 2),
            ],
        ),
        Draft {
            id: ids::EMPLOYEE_GIVING,
            name: "Employee Giving",
            description: "Employees donate a portion of their salary, and the company transfers to an NGO.",
            category: DonorCategory::Corporate,
            similar: &[ids::MATCHING_DONATIONS, ids::CSR],
            maturity: GROWING,
            sizes: ALL_SIZES,
        }
        .build(
            full_ratings([3, 3, 2, 3, 3, 4, 2, 4, 3, 3, 3, 4]),
            &[
                ("corporateVolunteering", 2),
                ("corporatePartnerships", 1),
                ("relatedCause", 2),
                ("marketingCapacity", 3),
            ],
        ),
        Draft {
            id: ids::LEGACY_GIVING,
            name: "Legacy Giving",
            description: "Donors commit funds or assets after their death through wills and trusts.",
            category: DonorCategory::Individual,
            similar: &[ids::HNI_GIVING, ids::ENDOWMENT_FUNDS],
            maturity: OLDER,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 2, 5, 1, 3, 3, 3, 3, 3, 5, 5, 2]),
            &[
                ("reputation", 1),
                ("longTermVision", 1),
                ("donorEngagement", 1),
                ("legalKnowledge", 2),
                ("donorRelationshipYears", 5),
            ],
        ),
        endowment_funds(),
        Draft {
            id: ids::GOVERNMENT_GRANTS,
            name: "Government Grants/Schemes",
            description: "Funding from government entities for specific public service initiatives.",
            category: DonorCategory::Government,
            similar: &[ids::GRANTS],
            maturity: GROWING,
            sizes: MID_LARGE,
        }
        .build(
            full_ratings([3, 2, 4, 1, 1, 1, 5, 2, 3, 2, 5, 1]),
            &[
                ("establishedTrackRecord", 1),
                ("governmentRelations", 1),
                ("complianceCapacity", 1),
                ("publicServiceAlignment", 1),
            ],
        ),
    ]
}

/// Endowments carry no audience or mission rating and are limited to
/// registered educational institutions.
fn endowment_funds() -> Strategy {
    let mut strategy = Draft {
        id: ids::ENDOWMENT_FUNDS,
        name: "Educational Endowment Funds",
        description: "Build a permanent financial foundation through endowment funds (for educational institutions only)",
        category: DonorCategory::Educational,
        similar: &[ids::GRANTS, ids::LEGACY_GIVING],
        maturity: &[Established, Mature],
        sizes: MID_LARGE,
    }
    .build(
        ScoringCriteria::from_pairs(&[
            (FundingScale, 5),
            (FundingTimeline, 1),
            (NetworkLeverage, 4),
            (ResourceRequirements, 5),
            (ComplianceRequirements, 5),
            (ImplementationFeasibility, 2),
            (ScalabilityPotential, 5),
            (DonorEngagement, 4),
            (MacroTrends, 3),
            (ExecutionRisk, 4),
        ]),
        &[],
    );
    strategy.suitable_for.registration_type = Some(vec!["educational".to_string()]);
    strategy
}
