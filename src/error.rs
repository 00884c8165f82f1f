//! Error types for caller-input failures.
//!
//! Data-quality problems in entity records are never errors here: they are
//! reported as [`ValidationError`](crate::validation::ValidationError) values.
//! The enums below cover rule construction, phase specs, suggestion
//! application, export, and configuration.

use thiserror::Error;

/// A phase spec could not be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseSpecError {
    #[error("phase spec is empty")]
    Empty,

    #[error("invalid phase '{0}'")]
    InvalidToken(String),

    #[error("phase range {start}-{end} is reversed")]
    ReversedRange { start: i64, end: i64 },

    #[error(
        "phase range {start}-{end} spans more than {max} phases",
        max = crate::models::MAX_PHASE_SPAN
    )]
    RangeTooLarge { start: i64, end: i64 },
}

/// A rule could not be constructed from the given inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("unknown rule type: {0}")]
    UnknownType(String),

    #[error("co-run rule needs at least 2 distinct tasks, got {0}")]
    TooFewTasks(usize),

    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("parameter '{name}' must be at least 1, got {value}")]
    NonPositive { name: &'static str, value: i64 },

    #[error("unknown group type '{0}' (expected 'client' or 'worker')")]
    UnknownGroupType(String),

    #[error("unknown pattern template '{0}'")]
    UnknownTemplate(String),

    #[error("invalid allowed phases: {0}")]
    Phases(#[from] PhaseSpecError),

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("additionalParams is not a JSON object: {0}")]
    AdditionalParams(String),

    #[error("a rule with id '{0}' already exists")]
    DuplicateId(String),

    #[error("could not interpret rule description: {0}")]
    Uninterpretable(String),
}

impl From<regex::Error> for RuleError {
    fn from(err: regex::Error) -> Self {
        RuleError::Pattern(err.to_string())
    }
}

/// A suggestion could not be applied to an entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    #[error("{entity} has no field '{field}'")]
    UnknownField { entity: &'static str, field: String },

    #[error("value for {entity}.{field} has the wrong shape")]
    WrongShape { entity: &'static str, field: String },
}

/// The export document could not be produced or read.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    File(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown priority profile '{0}'")]
    UnknownProfile(String),
}
