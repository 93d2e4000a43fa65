mod descriptors;
mod summary;
pub mod views;

pub use descriptors::{describe, highlights};
pub use summary::RecommendationReport;
pub use views::{
    ConfidenceLevel, CsvRow, Descriptors, ProfileSummary, RecommendationRecord, SimilarityDetails,
};
