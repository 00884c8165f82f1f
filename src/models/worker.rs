//! Worker model.
//!
//! Workers perform tasks. Each worker has a skill set, the phases in which
//! it is available, and a per-phase load cap.
//!
//! Skill names are compared by exact string equality everywhere in this
//! crate; no case folding or synonym matching is applied.

use serde::{Deserialize, Serialize};

use super::record::{unknown_field, wrong_shape, EntityType, FieldValue, Record};
use super::PhaseValue;
use crate::error::CorrectionError;

/// A worker that can be assigned to tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Worker {
    /// Unique worker identifier.
    #[serde(rename = "WorkerID")]
    pub worker_id: String,
    /// Human-readable name.
    pub worker_name: String,
    /// Skill names (must be non-empty).
    pub skills: Vec<String>,
    /// Phases in which the worker is available.
    pub available_slots: Vec<PhaseValue>,
    /// Maximum number of tasks assignable per phase.
    pub max_load_per_phase: i64,
    /// Grouping key used by load-limit and slot-restriction rules.
    pub worker_group: String,
    /// Free-form qualification label.
    pub qualification_level: String,
}

impl Worker {
    /// Creates a worker with the given ID and a load cap of 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            worker_id: id.into(),
            max_load_per_phase: 1,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Sets the available phases.
    pub fn with_slots(mut self, slots: &[i64]) -> Self {
        self.available_slots = super::phase_values(slots);
        self
    }

    pub fn with_max_load(mut self, max_load: i64) -> Self {
        self.max_load_per_phase = max_load;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.worker_group = group.into();
        self
    }

    pub fn with_qualification(mut self, level: impl Into<String>) -> Self {
        self.qualification_level = level.into();
        self
    }

    /// Whether this worker lists the given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Whether this worker's skills are a superset of `required`.
    pub fn is_qualified_for(&self, required: &[String]) -> bool {
        required.iter().all(|skill| self.has_skill(skill))
    }

    /// Number of available phases.
    pub fn slot_count(&self) -> usize {
        self.available_slots.len()
    }

    /// Whether every available slot coerces to a number.
    pub fn has_numeric_slots(&self) -> bool {
        self.available_slots.iter().all(PhaseValue::is_numeric)
    }
}

impl Record for Worker {
    const ENTITY_TYPE: EntityType = EntityType::Worker;

    fn id(&self) -> &str {
        &self.worker_id
    }

    fn name(&self) -> &str {
        &self.worker_name
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "WorkerID" => FieldValue::Text(self.worker_id.clone()),
            "WorkerName" => FieldValue::Text(self.worker_name.clone()),
            "Skills" => FieldValue::List(self.skills.clone()),
            "AvailableSlots" => FieldValue::Phases(self.available_slots.clone()),
            "MaxLoadPerPhase" => FieldValue::Integer(self.max_load_per_phase),
            "WorkerGroup" => FieldValue::Text(self.worker_group.clone()),
            "QualificationLevel" => FieldValue::Text(self.qualification_level.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), CorrectionError> {
        let shape = || wrong_shape::<Self>(field);
        match field {
            "WorkerID" => self.worker_id = value.into_text().ok_or_else(shape)?,
            "WorkerName" => self.worker_name = value.into_text().ok_or_else(shape)?,
            "Skills" => self.skills = value.into_list().ok_or_else(shape)?,
            "AvailableSlots" => self.available_slots = value.into_phases().ok_or_else(shape)?,
            "MaxLoadPerPhase" => self.max_load_per_phase = value.into_integer().ok_or_else(shape)?,
            "WorkerGroup" => self.worker_group = value.into_text().ok_or_else(shape)?,
            "QualificationLevel" => {
                self.qualification_level = value.into_text().ok_or_else(shape)?
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_builder() {
        let w = Worker::new("W1")
            .with_name("Alice")
            .with_skill("coding")
            .with_skill("design")
            .with_slots(&[1, 2, 3])
            .with_max_load(2)
            .with_group("GroupA")
            .with_qualification("senior");

        assert_eq!(w.worker_id, "W1");
        assert!(w.has_skill("coding"));
        assert!(!w.has_skill("Coding"));
        assert_eq!(w.slot_count(), 3);
        assert_eq!(w.max_load_per_phase, 2);
        assert!(w.has_numeric_slots());
    }

    #[test]
    fn test_qualification_superset() {
        let w = Worker::new("W1").with_skill("a").with_skill("b");
        assert!(w.is_qualified_for(&["a".into()]));
        assert!(w.is_qualified_for(&["a".into(), "b".into()]));
        assert!(!w.is_qualified_for(&["a".into(), "c".into()]));
        assert!(w.is_qualified_for(&[]));
    }

    #[test]
    fn test_non_numeric_slots() {
        let mut w = Worker::new("W1");
        w.available_slots = vec![PhaseValue::Integer(1), PhaseValue::Text("x".into())];
        assert!(!w.has_numeric_slots());
    }

    #[test]
    fn test_deserialize_canonical_columns() {
        let w: Worker = serde_json::from_str(
            r#"{"WorkerID":"W1","WorkerName":"Bob","Skills":["ml"],
                "AvailableSlots":[1,"2"],"MaxLoadPerPhase":2}"#,
        )
        .unwrap();
        assert_eq!(w.worker_id, "W1");
        assert_eq!(w.available_slots[1], PhaseValue::Text("2".into()));
        assert!(w.has_numeric_slots());
        assert!(w.worker_group.is_empty());
    }
}
