//! Correction suggestions for validation errors.
//!
//! Heuristics look at the current errors and the entity snapshot and
//! propose a replacement value for the offending field:
//!
//! | Error kind | Field | Suggestion |
//! |------------|-------|------------|
//! | `uncoveredSkill` | `RequiredSkills` | swap in a worker skill that contains, or is contained in, the missing one |
//! | `concurrencyShortfall` | `MaxConcurrent` | lower to the qualified-worker count, if at least 1 |
//! | `unknownReference` | `RequestedTaskIDs` | swap in a task ID that contains, or is contained in, the unknown one |
//! | `invalidJson` | `AttributesJSON` | replace with `{}` |
//!
//! Generating suggestions never mutates anything. [`apply_suggestion`] and
//! [`apply_all`] write them back, skipping any whose target no longer holds
//! the value the suggestion was computed from.

use serde::{Deserialize, Serialize};

use crate::error::CorrectionError;
use crate::models::{Client, Dataset, EntityType, FieldValue, Record, Task, Worker};
use crate::validation::{
    qualified_worker_count, Severity, ValidationError, ValidationErrorKind, ValidationSummary,
};

/// A proposed value for one field of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub entity_id: String,
    pub entity_type: EntityType,
    /// Canonical column name.
    pub field: String,
    /// Value the suggestion was computed from.
    pub current_value: FieldValue,
    pub suggested_value: FieldValue,
    pub explanation: String,
}

/// Proposes corrections for the given findings.
///
/// Warnings are ignored. Findings with no plausible fix produce nothing, and
/// identical suggestions are emitted once.
pub fn suggest_corrections(
    errors: &[ValidationError],
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();

    for error in errors.iter().filter(|e| e.severity == Severity::Error) {
        let suggestion = match &error.kind {
            ValidationErrorKind::UncoveredSkill { skill } => {
                replace_skill(error, skill, workers, tasks)
            }
            ValidationErrorKind::ConcurrencyShortfall { .. } => {
                lower_concurrency(error, workers, tasks)
            }
            ValidationErrorKind::UnknownReference { task_id } => {
                replace_reference(error, task_id, clients, tasks)
            }
            ValidationErrorKind::InvalidJson => reset_attributes(error, clients),
            _ => None,
        };

        if let Some(s) = suggestion {
            if !suggestions.contains(&s) {
                suggestions.push(s);
            }
        }
    }

    tracing::debug!(
        errors = errors.len(),
        suggestions = suggestions.len(),
        "correction suggestions generated"
    );
    suggestions
}

fn propose(
    error: &ValidationError,
    current_value: FieldValue,
    suggested_value: FieldValue,
    explanation: String,
) -> Suggestion {
    Suggestion {
        entity_id: error.entity_id.clone(),
        entity_type: error.entity_type,
        field: error.field.clone(),
        current_value,
        suggested_value,
        explanation,
    }
}

/// First non-empty candidate, other than `target`, that contains `target`
/// or is contained in it.
fn similar<'a>(target: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .filter(|c| !c.is_empty() && *c != target)
        .find(|c| c.contains(target) || target.contains(c))
}

fn replaced(items: &[String], from: &str, to: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| if item == from { to.to_string() } else { item.clone() })
        .collect()
}

fn replace_skill(
    error: &ValidationError,
    missing: &str,
    workers: &[Worker],
    tasks: &[Task],
) -> Option<Suggestion> {
    let task = tasks.iter().find(|t| t.id() == error.entity_id)?;
    let available = similar(
        missing,
        workers.iter().flat_map(|w| w.skills.iter().map(String::as_str)),
    )?;

    Some(propose(
        error,
        task.required_skills.clone().into(),
        replaced(&task.required_skills, missing, available).into(),
        format!("Replace unknown skill '{missing}' with available skill '{available}'"),
    ))
}

fn lower_concurrency(error: &ValidationError, workers: &[Worker], tasks: &[Task]) -> Option<Suggestion> {
    let task = tasks.iter().find(|t| t.id() == error.entity_id)?;
    let qualified = qualified_worker_count(task, workers) as i64;
    // Zero would only trade this error for an out-of-range one.
    if qualified < 1 {
        return None;
    }

    Some(propose(
        error,
        task.max_concurrent.into(),
        qualified.into(),
        format!("Reduce MaxConcurrent to {qualified}, which is the number of qualified workers"),
    ))
}

fn replace_reference(
    error: &ValidationError,
    unknown: &str,
    clients: &[Client],
    tasks: &[Task],
) -> Option<Suggestion> {
    let client = clients.iter().find(|c| c.id() == error.entity_id)?;
    let valid = similar(unknown, tasks.iter().map(|t| t.task_id.as_str()))?;

    Some(propose(
        error,
        client.requested_task_ids.clone().into(),
        replaced(&client.requested_task_ids, unknown, valid).into(),
        format!("Replace unknown task ID '{unknown}' with valid task ID '{valid}'"),
    ))
}

fn reset_attributes(error: &ValidationError, clients: &[Client]) -> Option<Suggestion> {
    let client = clients.iter().find(|c| c.id() == error.entity_id)?;

    Some(propose(
        error,
        client.attributes_json.clone().into(),
        "{}".into(),
        "Fix invalid JSON by using an empty object".to_string(),
    ))
}

/// Outcome of [`apply_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    /// Number of suggestions that changed at least one record.
    pub applied: usize,
    /// Suggestions whose target no longer held `current_value`.
    pub stale: Vec<Suggestion>,
    /// Validation of the dataset after applying.
    pub summary: ValidationSummary,
}

/// Writes one suggestion back into the dataset.
///
/// Every record of the suggestion's type with a matching ID whose field
/// still equals `current_value` is updated. Returns the number of records
/// changed; zero means the suggestion is stale.
pub fn apply_suggestion(dataset: &mut Dataset, suggestion: &Suggestion) -> Result<usize, CorrectionError> {
    match suggestion.entity_type {
        EntityType::Client => apply_to(&mut dataset.clients, suggestion),
        EntityType::Worker => apply_to(&mut dataset.workers, suggestion),
        EntityType::Task => apply_to(&mut dataset.tasks, suggestion),
    }
}

fn apply_to<R: Record>(records: &mut [R], suggestion: &Suggestion) -> Result<usize, CorrectionError> {
    let mut changed = 0;
    for record in records.iter_mut().filter(|r| r.id() == suggestion.entity_id) {
        let current = record
            .field(&suggestion.field)
            .ok_or_else(|| CorrectionError::UnknownField {
                entity: R::ENTITY_TYPE.as_str(),
                field: suggestion.field.clone(),
            })?;
        if current == suggestion.current_value {
            record.set_field(&suggestion.field, suggestion.suggested_value.clone())?;
            changed += 1;
        }
    }
    Ok(changed)
}

/// Applies suggestions in order, then re-validates.
///
/// A suggestion made stale by an earlier one (or by edits since it was
/// generated) is skipped and reported rather than forced through.
pub fn apply_all(dataset: &mut Dataset, suggestions: &[Suggestion]) -> Result<ApplyReport, CorrectionError> {
    let mut applied = 0;
    let mut stale = Vec::new();

    for suggestion in suggestions {
        if apply_suggestion(dataset, suggestion)? > 0 {
            applied += 1;
        } else {
            tracing::warn!(
                entity_type = %suggestion.entity_type,
                entity_id = %suggestion.entity_id,
                field = %suggestion.field,
                "skipping stale suggestion"
            );
            stale.push(suggestion.clone());
        }
    }

    Ok(ApplyReport {
        applied,
        stale,
        summary: dataset.validate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Client::new("C1")
                    .with_name("Acme")
                    .with_requested_task("T1")
                    .with_requested_task("T2x")
                    .with_attributes_json("{broken"),
            ],
            vec![
                Worker::new("W1")
                    .with_name("Alice")
                    .with_skill("ui-design")
                    .with_slots(&[1, 2]),
                Worker::new("W2")
                    .with_name("Bob")
                    .with_skill("coding")
                    .with_slots(&[1]),
            ],
            vec![
                Task::new("T1")
                    .with_name("Mockups")
                    .with_skill("design"),
                Task::new("T2")
                    .with_name("Backend")
                    .with_skill("coding")
                    .with_max_concurrent(3),
            ],
        )
    }

    fn suggest(ds: &Dataset) -> Vec<Suggestion> {
        let summary = ds.validate();
        suggest_corrections(&summary.errors, &ds.clients, &ds.workers, &ds.tasks)
    }

    fn find<'a>(suggestions: &'a [Suggestion], field: &str) -> &'a Suggestion {
        suggestions
            .iter()
            .find(|s| s.field == field)
            .unwrap_or_else(|| panic!("no suggestion for {field}"))
    }

    #[test]
    fn test_skill_replacement() {
        let suggestions = suggest(&dataset());
        let s = find(&suggestions, "RequiredSkills");
        assert_eq!(s.entity_id, "T1");
        assert_eq!(s.suggested_value, FieldValue::List(vec!["ui-design".into()]));
        assert_eq!(
            s.explanation,
            "Replace unknown skill 'design' with available skill 'ui-design'"
        );
    }

    #[test]
    fn test_skill_match_is_case_sensitive() {
        let mut ds = dataset();
        ds.workers[0].skills = vec!["UI-DESIGN".into()];
        let suggestions = suggest(&ds);
        assert!(suggestions.iter().all(|s| s.field != "RequiredSkills"));
    }

    #[test]
    fn test_concurrency_reduction() {
        let suggestions = suggest(&dataset());
        let s = find(&suggestions, "MaxConcurrent");
        assert_eq!(s.entity_id, "T2");
        assert_eq!(s.current_value, FieldValue::Integer(3));
        assert_eq!(s.suggested_value, FieldValue::Integer(1));
        assert_eq!(
            s.explanation,
            "Reduce MaxConcurrent to 1, which is the number of qualified workers"
        );
    }

    #[test]
    fn test_no_concurrency_suggestion_without_qualified_workers() {
        let suggestions = suggest(&dataset());
        assert!(suggestions
            .iter()
            .all(|s| !(s.entity_id == "T1" && s.field == "MaxConcurrent")));
    }

    #[test]
    fn test_reference_and_json() {
        let suggestions = suggest(&dataset());

        let s = find(&suggestions, "RequestedTaskIDs");
        assert_eq!(s.suggested_value, FieldValue::List(vec!["T1".into(), "T2".into()]));

        let s = find(&suggestions, "AttributesJSON");
        assert_eq!(s.current_value, FieldValue::Text("{broken".into()));
        assert_eq!(s.suggested_value, FieldValue::Text("{}".into()));
    }

    #[test]
    fn test_no_candidate_no_suggestion() {
        let ds = Dataset::new(
            vec![Client::new("C1").with_name("A").with_requested_task("ZZ")],
            vec![],
            vec![Task::new("T1").with_name("X")],
        );
        let suggestions = suggest(&ds);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_warnings_and_duplicates_ignored() {
        let ds = dataset();
        let mut errors = ds.validate().errors;
        errors.extend(errors.clone());
        let mut warning = errors[0].clone();
        warning.severity = Severity::Warning;
        errors.push(warning);

        let once = suggest(&ds);
        let twice = suggest_corrections(&errors, &ds.clients, &ds.workers, &ds.tasks);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_all_fixes_dataset() {
        let mut ds = dataset();
        let suggestions = suggest(&ds);
        assert_eq!(suggestions.len(), 4);

        let report = apply_all(&mut ds, &suggestions).unwrap();
        assert_eq!(report.applied, 4);
        assert!(report.stale.is_empty());
        assert!(report.summary.valid, "{:?}", report.summary.errors);
        assert_eq!(ds.tasks[1].max_concurrent, 1);
        assert_eq!(ds.clients[0].attributes_json, "{}");
    }

    #[test]
    fn test_stale_suggestion_skipped() {
        let mut ds = dataset();
        let suggestions = suggest(&ds);
        ds.tasks[1].max_concurrent = 2;

        let report = apply_all(&mut ds, &suggestions).unwrap();
        assert_eq!(report.applied, 3);
        assert_eq!(report.stale.len(), 1);
        assert_eq!(report.stale[0].field, "MaxConcurrent");
        assert_eq!(ds.tasks[1].max_concurrent, 2);
        assert!(!report.summary.valid);
    }

    #[test]
    fn test_apply_unknown_field_fails() {
        let mut ds = dataset();
        let s = Suggestion {
            entity_id: "T1".into(),
            entity_type: EntityType::Task,
            field: "Colour".into(),
            current_value: "red".into(),
            suggested_value: "blue".into(),
            explanation: String::new(),
        };
        assert_eq!(
            apply_suggestion(&mut ds, &s),
            Err(CorrectionError::UnknownField {
                entity: "task",
                field: "Colour".into()
            })
        );
    }

    #[test]
    fn test_suggestion_wire_shape() {
        let suggestions = suggest(&dataset());
        let value = serde_json::to_value(find(&suggestions, "MaxConcurrent")).unwrap();
        assert_eq!(value["entityType"], "task");
        assert_eq!(value["currentValue"], 3);
        assert_eq!(value["suggestedValue"], 1);
    }
}
