use serde::{Deserialize, Serialize};
use std::fmt;

/// Organizational age bracket derived from the founding year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityStage {
    Startup,
    Growth,
    Mature,
    Established,
}

impl MaturityStage {
    pub const fn ordered() -> [Self; 4] {
        [Self::Startup, Self::Growth, Self::Mature, Self::Established]
    }

    /// Bracket an organization by its age in whole years.
    pub fn from_age(age_years: i64) -> Self {
        if age_years < 3 {
            Self::Startup
        } else if age_years < 7 {
            Self::Growth
        } else if age_years < 15 {
            Self::Mature
        } else {
            Self::Established
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Growth => "Growth",
            Self::Mature => "Mature",
            Self::Established => "Established",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Growth => "growth",
            Self::Mature => "mature",
            Self::Established => "established",
        }
    }
}

/// Size bracket derived from annual budget and headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const fn ordered() -> [Self; 3] {
        [Self::Small, Self::Medium, Self::Large]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Funding-source classification of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorCategory {
    Individual,
    Corporate,
    FoundationDomestic,
    FoundationForeign,
    FoundationRestricted,
    Government,
    Educational,
}

impl DonorCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Individual,
            Self::Corporate,
            Self::FoundationDomestic,
            Self::FoundationForeign,
            Self::FoundationRestricted,
            Self::Government,
            Self::Educational,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual Donors",
            Self::Corporate => "Corporate Partners",
            Self::FoundationDomestic => "Domestic Foundations",
            Self::FoundationForeign => "Foreign Foundations",
            Self::FoundationRestricted => "Restricted-Pool Foundations",
            Self::Government => "Government",
            Self::Educational => "Educational Endowments",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Corporate => "corporate",
            Self::FoundationDomestic => "foundation_domestic",
            Self::FoundationForeign => "foundation_foreign",
            Self::FoundationRestricted => "foundation_restricted",
            Self::Government => "government",
            Self::Educational => "educational",
        }
    }

    pub const fn is_foundation(self) -> bool {
        matches!(
            self,
            Self::FoundationDomestic | Self::FoundationForeign | Self::FoundationRestricted
        )
    }

    /// Foreign and restricted-pool foundations only fund FCRA-registered organizations.
    pub const fn requires_foreign_contribution_clearance(self) -> bool {
        matches!(self, Self::FoundationForeign | Self::FoundationRestricted)
    }
}

impl fmt::Display for DonorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Stated appetite for execution risk, read from `ngoRiskTolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    RiskAverse,
    Moderate,
    RiskSeeking,
    /// Any other answer ("depends", legacy yes/no values); never aligns.
    Unspecified,
}

impl RiskTolerance {
    /// Missing answers default to a moderate appetite.
    pub fn from_answer(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("moderate") => Self::Moderate,
            Some("riskaverse") => Self::RiskAverse,
            Some("riskseeking") => Self::RiskSeeking,
            Some(_) => Self::Unspecified,
        }
    }

    /// Tolerance and execution-risk rating line up exactly.
    pub fn fully_aligned(self, execution_risk: u8) -> bool {
        match self {
            Self::RiskAverse => execution_risk <= 2,
            Self::Moderate => execution_risk == 3,
            Self::RiskSeeking => execution_risk >= 4,
            Self::Unspecified => false,
        }
    }

    /// Execution risk sits one tier away from the stated tolerance.
    pub fn adjacent(self, execution_risk: u8) -> bool {
        match self {
            Self::RiskAverse => execution_risk == 3,
            Self::Moderate => execution_risk == 2 || execution_risk == 4,
            Self::RiskSeeking => execution_risk == 3,
            Self::Unspecified => false,
        }
    }
}

/// City tier of an operating location, read from the `ngoLocation` multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTier {
    Tier1,
    Tier2,
    Tier3,
    Rural,
}

impl LocationTier {
    pub fn from_answer(raw: &str) -> Option<Self> {
        match raw.trim() {
            "tier1" => Some(Self::Tier1),
            "tier2" => Some(Self::Tier2),
            "tier3" => Some(Self::Tier3),
            "rural" => Some(Self::Rural),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1 city",
            Self::Tier2 => "Tier 2 city",
            Self::Tier3 => "Tier 3 city",
            Self::Rural => "Rural Area",
        }
    }

    pub const fn is_urban_core(self) -> bool {
        matches!(self, Self::Tier1 | Self::Tier2)
    }
}
