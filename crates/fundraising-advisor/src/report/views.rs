use serde::Serialize;

use crate::catalog::{DonorCategory, ScoringCriteria, StrategyId};
use crate::domain::{MaturityStage, SizeClass};
use crate::profile::{ComplianceReadiness, ForeignFundingCapability, NgoProfile, RiskProfile};
use crate::recommend::{AlgorithmKind, Attribution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.85 {
            Self::VeryHigh
        } else if confidence >= 0.7 {
            Self::High
        } else if confidence >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Presentation labels for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptors {
    pub timeline_context: &'static str,
    pub implementation_phase: &'static str,
    pub trend: &'static str,
    pub funding_range: &'static str,
    pub scalability: &'static str,
    pub engagement: &'static str,
}

/// Relation of a record to the top-ranked strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityDetails {
    pub primary_strategy: String,
    pub similarity_score: f64,
    pub synergies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub reference_year: i32,
    pub age_years: i64,
    pub maturity: MaturityStage,
    pub maturity_label: &'static str,
    pub size: SizeClass,
    pub size_label: &'static str,
    pub budget: i64,
    pub budget_usd: f64,
    pub staff: i64,
    pub digital_capacity: u8,
    pub compliance_status: Vec<String>,
    pub foreign_access_label: &'static str,
}

impl From<&NgoProfile> for ProfileSummary {
    fn from(profile: &NgoProfile) -> Self {
        Self {
            reference_year: profile.reference_year,
            age_years: profile.age_years,
            maturity: profile.maturity,
            maturity_label: profile.maturity.label(),
            size: profile.size,
            size_label: profile.size.label(),
            budget: profile.budget,
            budget_usd: profile.budget_usd,
            staff: profile.staff,
            digital_capacity: profile.digital_capacity,
            compliance_status: profile.compliance_status.clone(),
            foreign_access_label: profile.foreign_funding.access_level.label(),
        }
    }
}

/// One ranked recommendation with everything needed to present it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRecord {
    pub rank: usize,
    pub id: StrategyId,
    pub name: String,
    pub description: String,
    pub donor_category: DonorCategory,
    pub donor_category_label: &'static str,
    pub score: u8,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub confidence_label: &'static str,
    pub algorithm: AlgorithmKind,
    pub attribution: Attribution,
    pub criteria: ScoringCriteria,
    pub risk: RiskProfile,
    pub compliance: ComplianceReadiness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_funding: Option<ForeignFundingCapability>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub foreign_insights: Vec<String>,
    pub similarity: SimilarityDetails,
    pub descriptors: Descriptors,
    pub highlights: Vec<String>,
}

/// Flat CSV projection of a [`RecommendationRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow<'a> {
    pub rank: usize,
    pub id: &'a str,
    pub name: &'a str,
    pub donor_category: &'static str,
    pub score: u8,
    pub confidence: f64,
    pub confidence_level: &'static str,
    pub algorithm: &'static str,
    pub risk_level: &'static str,
    pub risk_score: u8,
    pub compliance_score: u8,
    pub similarity_score: f64,
    pub timeline: &'static str,
    pub implementation_phase: &'static str,
    pub insights: String,
}

impl<'a> From<&'a RecommendationRecord> for CsvRow<'a> {
    fn from(record: &'a RecommendationRecord) -> Self {
        Self {
            rank: record.rank,
            id: record.id.as_str(),
            name: &record.name,
            donor_category: record.donor_category_label,
            score: record.score,
            confidence: record.confidence,
            confidence_level: record.confidence_label,
            algorithm: record.algorithm.label(),
            risk_level: record.risk.level.label(),
            risk_score: record.risk.score,
            compliance_score: record.compliance.score,
            similarity_score: record.similarity.similarity_score,
            timeline: record.descriptors.timeline_context,
            implementation_phase: record.descriptors.implementation_phase,
            insights: record.risk.insights.join("; "),
        }
    }
}
