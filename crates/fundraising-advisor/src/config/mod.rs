use std::env;
use std::fmt;

use crate::profile::DEFAULT_BUDGET_CONVERSION_RATE;
use crate::recommend::{ParseModeError, RecommendationMode, DEFAULT_MAJOR_GIFT_BUDGET};

/// Number of records in a report unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Tunables of the recommendation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Local-currency units per US dollar.
    pub budget_conversion_rate: f64,
    /// Raw local-currency budget above which the high-budget rule fires.
    pub major_gift_budget: i64,
    pub top_n: usize,
    /// Fixed "current year"; the local calendar year when unset.
    pub reference_year: Option<i32>,
    pub default_mode: RecommendationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget_conversion_rate: DEFAULT_BUDGET_CONVERSION_RATE,
            major_gift_budget: DEFAULT_MAJOR_GIFT_BUDGET,
            top_n: DEFAULT_TOP_N,
            reference_year: None,
            default_mode: RecommendationMode::default(),
        }
    }
}

impl EngineConfig {
    /// Reads `ADVISOR_*` variables, keeping defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("ADVISOR_BUDGET_CONVERSION_RATE") {
            config.budget_conversion_rate = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate > 0.0)
                .ok_or(ConfigError::InvalidConversionRate { value: raw })?;
        }
        if let Ok(raw) = env::var("ADVISOR_MAJOR_GIFT_BUDGET") {
            config.major_gift_budget = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|budget| *budget >= 0)
                .ok_or(ConfigError::InvalidMajorGiftBudget { value: raw })?;
        }
        if let Ok(raw) = env::var("ADVISOR_TOP_N") {
            config.top_n = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|top| *top >= 1)
                .ok_or(ConfigError::InvalidTopN { value: raw })?;
        }
        if let Ok(raw) = env::var("ADVISOR_REFERENCE_YEAR") {
            let year = raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidReferenceYear { value: raw })?;
            config.reference_year = Some(year);
        }
        if let Ok(raw) = env::var("ADVISOR_DEFAULT_MODE") {
            config.default_mode = raw
                .parse()
                .map_err(|source| ConfigError::InvalidMode { source })?;
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidConversionRate { value: String },
    InvalidMajorGiftBudget { value: String },
    InvalidTopN { value: String },
    InvalidReferenceYear { value: String },
    InvalidMode { source: ParseModeError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConversionRate { value } => write!(
                f,
                "ADVISOR_BUDGET_CONVERSION_RATE must be a positive number, got '{value}'"
            ),
            ConfigError::InvalidMajorGiftBudget { value } => write!(
                f,
                "ADVISOR_MAJOR_GIFT_BUDGET must be a non-negative integer, got '{value}'"
            ),
            ConfigError::InvalidTopN { value } => {
                write!(f, "ADVISOR_TOP_N must be an integer of at least 1, got '{value}'")
            }
            ConfigError::InvalidReferenceYear { value } => {
                write!(f, "ADVISOR_REFERENCE_YEAR must be a year, got '{value}'")
            }
            ConfigError::InvalidMode { source } => {
                write!(f, "ADVISOR_DEFAULT_MODE is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidMode { source } => Some(source),
            _ => None,
        }
    }
}
