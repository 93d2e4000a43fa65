//! Multi-algorithm fundraising strategy recommendations for nonprofit
//! organizations.
//!
//! Answers from an organization questionnaire are turned into an
//! [`profile::NgoProfile`], ranked against a [`catalog::StrategyCatalog`] by
//! criteria scoring, explicit rules, archetype matching or their ensemble,
//! and assembled into a [`report::RecommendationReport`].

pub mod answers;
pub mod assessment;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod profile;
pub mod recommend;
pub mod report;
pub mod similarity;
pub mod telemetry;

pub use answers::AnswerSet;
pub use catalog::{Strategy, StrategyCatalog, StrategyId};
pub use engine::RecommendationEngine;
pub use profile::NgoProfile;
pub use recommend::{RecommendationMode, ScoredStrategy};
pub use report::RecommendationReport;
