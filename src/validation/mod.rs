//! Multi-entity validation.
//!
//! Checks the integrity of uploaded clients, workers and tasks before rules
//! are authored or configuration is exported. Detects:
//! - Missing required fields
//! - Duplicate IDs
//! - Malformed phase lists
//! - Out-of-range numeric values
//! - Broken `AttributesJSON`
//! - Unknown task references
//! - Required skills no worker holds
//! - `MaxConcurrent` above the qualified-worker count
//! - Workers whose load cap exceeds their availability (warning only)
//!
//! Every check runs on every call, in the order above, and appends its
//! findings in input order, so identical inputs give identical summaries.
//! Bad data values never panic or return `Err`; they become findings.

mod checks;

pub(crate) use checks::qualified_worker_count;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::models::EntityType;
use crate::models::{Client, Task, Worker};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity.
    Error,
    /// Reported but does not affect validity.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Categories of validation findings.
///
/// Variants carrying data record the specific cause, so downstream
/// consumers (e.g. correction heuristics) need not parse messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValidationErrorKind {
    /// A required field is empty.
    MissingField,
    /// An ID repeats an earlier record's ID.
    DuplicateId,
    /// A phase list is not a numeric list.
    MalformedList,
    /// A numeric field lies outside its allowed range.
    OutOfRange,
    /// `AttributesJSON` does not parse.
    InvalidJson,
    /// A requested task ID does not exist.
    UnknownReference { task_id: String },
    /// No worker holds a skill a task requires.
    UncoveredSkill { skill: String },
    /// Fewer qualified workers than `MaxConcurrent`.
    ConcurrencyShortfall { max_concurrent: i64, qualified: usize },
    /// `MaxLoadPerPhase` exceeds the number of available slots.
    Overload { max_load: i64, available: usize },
}

/// A single validation finding.
///
/// Serializes as `entityType`, `entityId`, `field`, `message`, `severity`
/// plus a `kind` object (`{"code": ...}` with any cause data). Consumers
/// that only know the first five keys can ignore `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Collection the offending record belongs to.
    pub entity_type: EntityType,
    /// Offending record's ID (or a fallback, see the required-field check).
    pub entity_id: String,
    /// Canonical column name of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
    /// Structured cause.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
            kind,
        }
    }

    fn into_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ({}): {}",
            self.severity, self.entity_type, self.entity_id, self.field, self.message
        )
    }
}

/// Result of one validation run.
///
/// Recomputed wholesale on every call; never merged across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationSummary {
    fn from_findings(errors: Vec<ValidationError>, warnings: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors and warnings concerning one record.
    pub fn for_entity<'a>(
        &'a self,
        entity_type: EntityType,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |e| e.entity_type == entity_type && e.entity_id == entity_id)
    }

    /// Errors and warnings for one collection.
    pub fn for_type(&self, entity_type: EntityType) -> impl Iterator<Item = &ValidationError> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |e| e.entity_type == entity_type)
    }
}

/// Accumulates findings while the checks run.
#[derive(Default)]
struct Findings {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl Findings {
    fn error(&mut self, finding: ValidationError) {
        self.errors.push(finding);
    }

    fn warning(&mut self, finding: ValidationError) {
        self.warnings.push(finding.into_warning());
    }
}

/// Validates the three entity collections.
///
/// Runs, in order:
/// 1. Required fields
/// 2. Duplicate IDs
/// 3. Malformed phase lists
/// 4. Out-of-range values
/// 5. Broken `AttributesJSON`
/// 6. Unknown requested-task references
/// 7. Skill coverage
/// 8. Concurrency feasibility
/// 9. Worker overload (warnings)
///
/// Inputs are only read. The result is deterministic for a given input.
pub fn validate_all(clients: &[Client], workers: &[Worker], tasks: &[Task]) -> ValidationSummary {
    let mut findings = Findings::default();

    checks::required_fields(clients, workers, tasks, &mut findings);
    checks::duplicate_ids(clients, workers, tasks, &mut findings);
    checks::malformed_lists(workers, tasks, &mut findings);
    checks::out_of_range(clients, tasks, &mut findings);
    checks::broken_json(clients, &mut findings);
    checks::unknown_references(clients, tasks, &mut findings);
    checks::skill_coverage(workers, tasks, &mut findings);
    checks::concurrency_feasibility(workers, tasks, &mut findings);
    checks::overloaded_workers(workers, &mut findings);

    tracing::debug!(
        clients = clients.len(),
        workers = workers.len(),
        tasks = tasks.len(),
        errors = findings.errors.len(),
        warnings = findings.warnings.len(),
        "validation complete"
    );

    ValidationSummary::from_findings(findings.errors, findings.warnings)
}
