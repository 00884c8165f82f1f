//! The individual validation checks.
//!
//! Each check walks its collections in input order and only appends to
//! [`Findings`]; no check reads another check's output.

use std::collections::HashSet;

use super::{Findings, ValidationError, ValidationErrorKind};
use crate::models::{Client, EntityType, PhaseValue, PreferredPhases, Record, Task, Worker};

/// Allowed `Client.PriorityLevel` range.
const PRIORITY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

fn missing<R: Record>(field: &str, entity_id: &str, findings: &mut Findings) {
    findings.error(ValidationError::new(
        R::ENTITY_TYPE,
        entity_id,
        field,
        ValidationErrorKind::MissingField,
        format!("{field} is required"),
    ));
}

/// Reports an empty ID or name.
///
/// A missing ID is reported against the record's name (or `"unknown"`);
/// every other missing field is reported against the ID (or `"unknown"`).
fn check_identity<R: Record>(record: &R, id_field: &str, name_field: &str, findings: &mut Findings) {
    if record.id().is_empty() {
        missing::<R>(id_field, record.reference(), findings);
    }
    if record.name().is_empty() {
        missing::<R>(name_field, id_or_unknown(record), findings);
    }
}

fn id_or_unknown<R: Record>(record: &R) -> &str {
    if record.id().is_empty() {
        "unknown"
    } else {
        record.id()
    }
}

pub(super) fn required_fields(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    findings: &mut Findings,
) {
    for client in clients {
        check_identity(client, "ClientID", "ClientName", findings);
    }

    for worker in workers {
        check_identity(worker, "WorkerID", "WorkerName", findings);
        if worker.skills.is_empty() {
            missing::<Worker>("Skills", id_or_unknown(worker), findings);
        }
    }

    for task in tasks {
        check_identity(task, "TaskID", "TaskName", findings);
        if task.required_skills.is_empty() {
            missing::<Task>("RequiredSkills", id_or_unknown(task), findings);
        }
    }
}

/// Flags every occurrence of an ID after its first.
fn check_duplicates<R: Record>(records: &[R], id_field: &str, findings: &mut Findings) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            findings.error(ValidationError::new(
                R::ENTITY_TYPE,
                record.id(),
                id_field,
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {id_field} found"),
            ));
        }
    }
}

pub(super) fn duplicate_ids(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    findings: &mut Findings,
) {
    check_duplicates(clients, "ClientID", findings);
    check_duplicates(workers, "WorkerID", findings);
    check_duplicates(tasks, "TaskID", findings);
}

pub(super) fn malformed_lists(workers: &[Worker], tasks: &[Task], findings: &mut Findings) {
    for worker in workers {
        if !worker.has_numeric_slots() {
            findings.error(ValidationError::new(
                EntityType::Worker,
                &worker.worker_id,
                "AvailableSlots",
                ValidationErrorKind::MalformedList,
                "AvailableSlots must be a numeric array",
            ));
        }
    }

    for task in tasks {
        let message = match &task.preferred_phases {
            PreferredPhases::List(values) if values.iter().all(PhaseValue::is_numeric) => continue,
            PreferredPhases::List(_) => "PreferredPhases must contain only numbers",
            PreferredPhases::Raw(_) => "PreferredPhases is in an unexpected string format",
        };
        findings.error(ValidationError::new(
            EntityType::Task,
            &task.task_id,
            "PreferredPhases",
            ValidationErrorKind::MalformedList,
            message,
        ));
    }
}

pub(super) fn out_of_range(clients: &[Client], tasks: &[Task], findings: &mut Findings) {
    for client in clients {
        if !PRIORITY_RANGE.contains(&client.priority_level) {
            findings.error(ValidationError::new(
                EntityType::Client,
                &client.client_id,
                "PriorityLevel",
                ValidationErrorKind::OutOfRange,
                "PriorityLevel must be between 1 and 5",
            ));
        }
    }

    for task in tasks {
        if task.duration < 1 {
            findings.error(ValidationError::new(
                EntityType::Task,
                &task.task_id,
                "Duration",
                ValidationErrorKind::OutOfRange,
                "Duration must be at least 1",
            ));
        }
    }

    for task in tasks {
        if task.max_concurrent < 1 {
            findings.error(ValidationError::new(
                EntityType::Task,
                &task.task_id,
                "MaxConcurrent",
                ValidationErrorKind::OutOfRange,
                "MaxConcurrent must be at least 1",
            ));
        }
    }
}

pub(super) fn broken_json(clients: &[Client], findings: &mut Findings) {
    for client in clients.iter().filter(|c| !c.has_valid_attributes()) {
        findings.error(ValidationError::new(
            EntityType::Client,
            &client.client_id,
            "AttributesJSON",
            ValidationErrorKind::InvalidJson,
            "AttributesJSON contains invalid JSON",
        ));
    }
}

pub(super) fn unknown_references(clients: &[Client], tasks: &[Task], findings: &mut Findings) {
    let task_ids: HashSet<&str> = tasks.iter().map(|t| t.task_id.as_str()).collect();

    for client in clients {
        for task_id in &client.requested_task_ids {
            if !task_ids.contains(task_id.as_str()) {
                findings.error(ValidationError::new(
                    EntityType::Client,
                    &client.client_id,
                    "RequestedTaskIDs",
                    ValidationErrorKind::UnknownReference {
                        task_id: task_id.clone(),
                    },
                    format!("Unknown TaskID '{task_id}' in RequestedTaskIDs"),
                ));
            }
        }
    }
}

pub(super) fn skill_coverage(workers: &[Worker], tasks: &[Task], findings: &mut Findings) {
    let worker_skills: HashSet<&str> = workers
        .iter()
        .flat_map(|w| w.skills.iter().map(String::as_str))
        .collect();

    for task in tasks {
        for skill in &task.required_skills {
            if !worker_skills.contains(skill.as_str()) {
                findings.error(ValidationError::new(
                    EntityType::Task,
                    &task.task_id,
                    "RequiredSkills",
                    ValidationErrorKind::UncoveredSkill {
                        skill: skill.clone(),
                    },
                    format!("No worker has the required skill '{skill}'"),
                ));
            }
        }
    }
}

/// Number of workers whose skills are a superset of the task's.
pub(crate) fn qualified_worker_count(task: &Task, workers: &[Worker]) -> usize {
    workers
        .iter()
        .filter(|w| w.is_qualified_for(&task.required_skills))
        .count()
}

pub(super) fn concurrency_feasibility(workers: &[Worker], tasks: &[Task], findings: &mut Findings) {
    for task in tasks {
        let qualified = qualified_worker_count(task, workers);
        if (qualified as i64) < task.max_concurrent {
            findings.error(ValidationError::new(
                EntityType::Task,
                &task.task_id,
                "MaxConcurrent",
                ValidationErrorKind::ConcurrencyShortfall {
                    max_concurrent: task.max_concurrent,
                    qualified,
                },
                format!(
                    "MaxConcurrent ({}) exceeds the number of qualified workers ({qualified})",
                    task.max_concurrent
                ),
            ));
        }
    }
}

pub(super) fn overloaded_workers(workers: &[Worker], findings: &mut Findings) {
    for worker in workers {
        let available = worker.slot_count();
        if (available as i64) < worker.max_load_per_phase {
            findings.warning(ValidationError::new(
                EntityType::Worker,
                &worker.worker_id,
                "MaxLoadPerPhase",
                ValidationErrorKind::Overload {
                    max_load: worker.max_load_per_phase,
                    available,
                },
                format!(
                    "MaxLoadPerPhase ({}) exceeds available slots ({available})",
                    worker.max_load_per_phase
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{validate_all, Severity, ValidationSummary};
    use super::*;

    fn errors_of(summary: &ValidationSummary, field: &str) -> Vec<ValidationError> {
        summary
            .errors
            .iter()
            .filter(|e| e.field == field)
            .cloned()
            .collect()
    }

    fn covered_worker(id: &str) -> Worker {
        Worker::new(id)
            .with_name(id)
            .with_skill("coding")
            .with_slots(&[1, 2, 3])
    }

    #[test]
    fn test_missing_id_falls_back_to_name() {
        let clients = vec![
            Client::new("").with_name("Nameless Corp"),
            Client::new(""),
        ];
        let summary = validate_all(&clients, &[], &[]);
        let ids: Vec<ValidationError> = errors_of(&summary, "ClientID")
            .into_iter()
            .filter(|e| e.kind == ValidationErrorKind::MissingField)
            .collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].entity_id, "Nameless Corp");
        assert_eq!(ids[1].entity_id, "unknown");
        assert_eq!(ids[0].message, "ClientID is required");

        // The two empty IDs also collide.
        let duplicates: Vec<ValidationError> = errors_of(&summary, "ClientID")
            .into_iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].entity_id, "");
    }

    #[test]
    fn test_missing_worker_and_task_fields() {
        let workers = vec![Worker::new("W1").with_slots(&[1])];
        let tasks = vec![Task::new("T1")];
        let summary = validate_all(&[], &workers, &tasks);

        let skills = errors_of(&summary, "Skills");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].entity_id, "W1");
        assert_eq!(errors_of(&summary, "WorkerName").len(), 1);
        assert_eq!(errors_of(&summary, "TaskName").len(), 1);
        assert_eq!(errors_of(&summary, "RequiredSkills").len(), 1);
    }

    #[test]
    fn test_duplicate_ids_flag_each_repeat() {
        let clients = vec![
            Client::new("C1").with_name("a"),
            Client::new("C1").with_name("b"),
            Client::new("C1").with_name("c"),
            Client::new("C2").with_name("d"),
        ];
        let summary = validate_all(&clients, &[], &[]);
        let dups = errors_of(&summary, "ClientID");
        assert_eq!(dups.len(), 2);
        assert!(dups.iter().all(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(dups.iter().all(|e| e.entity_id == "C1"));
    }

    #[test]
    fn test_duplicate_worker_and_task_ids() {
        let workers = vec![covered_worker("W1"), covered_worker("W1")];
        let tasks = vec![
            Task::new("T1").with_name("a").with_skill("coding"),
            Task::new("T1").with_name("b").with_skill("coding"),
        ];
        let summary = validate_all(&[], &workers, &tasks);
        assert_eq!(errors_of(&summary, "WorkerID").len(), 1);
        assert_eq!(errors_of(&summary, "TaskID").len(), 1);
    }

    #[test]
    fn test_malformed_slots() {
        let mut worker = covered_worker("W1");
        worker.available_slots.push(PhaseValue::Text("soon".into()));
        let summary = validate_all(&[], &[worker], &[]);
        let slots = errors_of(&summary, "AvailableSlots");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].kind, ValidationErrorKind::MalformedList);
    }

    #[test]
    fn test_preferred_phases_formats() {
        let workers = vec![covered_worker("W1")];
        let mut mixed = Task::new("T2").with_name("b").with_skill("coding");
        mixed.preferred_phases =
            PreferredPhases::List(vec![PhaseValue::Integer(1), PhaseValue::Text("x".into())]);
        let tasks = vec![
            Task::new("T1")
                .with_name("a")
                .with_skill("coding")
                .with_phase_spec("1-3"),
            mixed,
            Task::new("T3")
                .with_name("c")
                .with_skill("coding")
                .with_phases(&[2]),
        ];
        let summary = validate_all(&[], &workers, &tasks);
        let phases = errors_of(&summary, "PreferredPhases");
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].entity_id, "T1");
        assert!(phases[0].message.contains("unexpected string format"));
        assert_eq!(phases[1].entity_id, "T2");
        assert!(phases[1].message.contains("only numbers"));
    }

    #[test]
    fn test_priority_level_bounds() {
        for (level, expect_error) in [(0, true), (1, false), (5, false), (6, true)] {
            let clients = vec![Client::new("C1").with_name("a").with_priority(level)];
            let summary = validate_all(&clients, &[], &[]);
            assert_eq!(
                errors_of(&summary, "PriorityLevel").len(),
                usize::from(expect_error),
                "level {level}"
            );
        }
    }

    #[test]
    fn test_duration_and_concurrency_minimums() {
        let workers = vec![covered_worker("W1")];
        let tasks = vec![Task::new("T1")
            .with_name("a")
            .with_skill("coding")
            .with_duration(0)
            .with_max_concurrent(0)];
        let summary = validate_all(&[], &workers, &tasks);
        assert_eq!(errors_of(&summary, "Duration").len(), 1);
        let max = errors_of(&summary, "MaxConcurrent");
        assert_eq!(max.len(), 1);
        assert_eq!(max[0].kind, ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn test_broken_json() {
        let cases = [("{not json", 1), ("{}", 0), (r#"{"a":1}"#, 0), ("", 0)];
        for (json, expected) in cases {
            let clients = vec![Client::new("C1").with_name("a").with_attributes_json(json)];
            let summary = validate_all(&clients, &[], &[]);
            assert_eq!(errors_of(&summary, "AttributesJSON").len(), expected, "{json}");
        }
    }

    #[test]
    fn test_unknown_references_one_per_id() {
        let clients = vec![Client::new("C1")
            .with_name("a")
            .with_requested_task("T1")
            .with_requested_task("TX")
            .with_requested_task("TY")];
        let tasks = vec![Task::new("T1").with_name("t").with_skill("coding")];
        let summary = validate_all(&clients, &[covered_worker("W1")], &tasks);
        let refs = errors_of(&summary, "RequestedTaskIDs");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].message, "Unknown TaskID 'TX' in RequestedTaskIDs");
        assert_eq!(
            refs[1].kind,
            ValidationErrorKind::UnknownReference {
                task_id: "TY".into()
            }
        );
    }

    #[test]
    fn test_uncovered_skill() {
        let workers = vec![covered_worker("W1")];
        let tasks = vec![Task::new("T1").with_name("a").with_skill("design")];
        let summary = validate_all(&[], &workers, &tasks);
        let uncovered: Vec<_> = summary
            .errors
            .iter()
            .filter(|e| matches!(e.kind, ValidationErrorKind::UncoveredSkill { .. }))
            .collect();
        assert_eq!(uncovered.len(), 1);
        assert_eq!(uncovered[0].entity_id, "T1");
        assert_eq!(uncovered[0].message, "No worker has the required skill 'design'");
    }

    #[test]
    fn test_skill_match_is_case_sensitive() {
        let workers = vec![covered_worker("W1")];
        let tasks = vec![Task::new("T1").with_name("a").with_skill("Coding")];
        let summary = validate_all(&[], &workers, &tasks);
        assert!(summary
            .errors
            .iter()
            .any(|e| matches!(&e.kind, ValidationErrorKind::UncoveredSkill { skill } if skill == "Coding")));
    }

    #[test]
    fn test_concurrency_shortfall() {
        let workers = vec![
            covered_worker("W1").with_skill("ml"),
            covered_worker("W2").with_skill("ml"),
            covered_worker("W3"),
        ];
        let tasks = vec![Task::new("T1")
            .with_name("a")
            .with_skill("coding")
            .with_skill("ml")
            .with_max_concurrent(3)];
        let summary = validate_all(&[], &workers, &tasks);
        let shortfall: Vec<_> = summary
            .errors
            .iter()
            .filter(|e| matches!(e.kind, ValidationErrorKind::ConcurrencyShortfall { .. }))
            .collect();
        assert_eq!(shortfall.len(), 1);
        assert_eq!(
            shortfall[0].message,
            "MaxConcurrent (3) exceeds the number of qualified workers (2)"
        );
        assert_eq!(qualified_worker_count(&tasks[0], &workers), 2);
    }

    #[test]
    fn test_overload_warning() {
        let over = Worker::new("W1")
            .with_name("a")
            .with_skill("coding")
            .with_slots(&[1, 2])
            .with_max_load(3);
        let exact = Worker::new("W2")
            .with_name("b")
            .with_skill("coding")
            .with_slots(&[1, 2, 3])
            .with_max_load(3);
        let summary = validate_all(&[], &[over, exact], &[]);
        assert!(summary.errors.is_empty());
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].entity_id, "W1");
        assert_eq!(summary.warnings[0].severity, Severity::Warning);
        assert_eq!(
            summary.warnings[0].message,
            "MaxLoadPerPhase (3) exceeds available slots (2)"
        );
    }
}
