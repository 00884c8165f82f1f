//! Task model.
//!
//! A task is a unit of work requested by clients and performed by workers.
//! It declares the skills it needs, how many phases it lasts, the phases it
//! prefers, and how many workers may run it at once.
//!
//! # Preferred phases
//!
//! Uploads may deliver `PreferredPhases` as a list or as text such as
//! `"2-4"`. [`Task::normalize_phases`] expands text into an explicit list;
//! anything still textual at validation time is reported as malformed.

use serde::{Deserialize, Serialize};

use super::record::{unknown_field, wrong_shape, EntityType, FieldValue, Record};
use super::{expand_phase_spec, phase_values, PhaseValue};
use crate::error::CorrectionError;

/// A task to be allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Task {
    /// Unique task identifier.
    #[serde(rename = "TaskID")]
    pub task_id: String,
    /// Human-readable name.
    pub task_name: String,
    /// Task category (grouping and pattern-match rules).
    pub category: String,
    /// Number of phases the task occupies (≥ 1).
    pub duration: i64,
    /// Skill names a worker must hold (must be non-empty).
    pub required_skills: Vec<String>,
    /// Preferred phases, ideally an explicit list.
    pub preferred_phases: PreferredPhases,
    /// Maximum simultaneous assignments (≥ 1).
    pub max_concurrent: i64,
}

/// Preferred phases of a task: an explicit list or not-yet-expanded text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferredPhases {
    List(Vec<PhaseValue>),
    Raw(String),
}

impl Default for PreferredPhases {
    fn default() -> Self {
        PreferredPhases::List(Vec::new())
    }
}

impl PreferredPhases {
    /// Expands raw text into a list. Text that does not parse is kept raw.
    pub fn normalized(self) -> Self {
        match self {
            PreferredPhases::Raw(text) if text.trim().is_empty() => {
                PreferredPhases::List(Vec::new())
            }
            PreferredPhases::Raw(text) => match expand_phase_spec(&text) {
                Ok(phases) => PreferredPhases::List(phase_values(&phases)),
                Err(_) => PreferredPhases::Raw(text),
            },
            list => list,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, PreferredPhases::Raw(_))
    }
}

impl Default for Task {
    fn default() -> Self {
        Self {
            task_id: String::new(),
            task_name: String::new(),
            category: String::new(),
            duration: 0,
            required_skills: Vec::new(),
            preferred_phases: PreferredPhases::default(),
            max_concurrent: 0,
        }
    }
}

impl Task {
    /// Creates a new task with the given ID, duration 1 and concurrency 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            task_id: id.into(),
            duration: 1,
            max_concurrent: 1,
            ..Self::default()
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.task_name = name.into();
        self
    }

    /// Sets the task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the duration in phases.
    pub fn with_duration(mut self, phases: i64) -> Self {
        self.duration = phases;
        self
    }

    /// Adds a required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Sets explicit preferred phases.
    pub fn with_phases(mut self, phases: &[i64]) -> Self {
        self.preferred_phases = PreferredPhases::List(phase_values(phases));
        self
    }

    /// Sets preferred phases as unexpanded text (e.g. `"1-3"`).
    pub fn with_phase_spec(mut self, spec: impl Into<String>) -> Self {
        self.preferred_phases = PreferredPhases::Raw(spec.into());
        self
    }

    /// Sets the maximum concurrent assignments.
    pub fn with_max_concurrent(mut self, max: i64) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Expands textual preferred phases in place.
    pub fn normalize_phases(&mut self) {
        let phases = std::mem::take(&mut self.preferred_phases);
        self.preferred_phases = phases.normalized();
    }

    /// Whether the task requires the given skill.
    pub fn requires(&self, skill: &str) -> bool {
        self.required_skills.iter().any(|s| s == skill)
    }
}

impl Record for Task {
    const ENTITY_TYPE: EntityType = EntityType::Task;

    fn id(&self) -> &str {
        &self.task_id
    }

    fn name(&self) -> &str {
        &self.task_name
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "TaskID" => FieldValue::Text(self.task_id.clone()),
            "TaskName" => FieldValue::Text(self.task_name.clone()),
            "Category" => FieldValue::Text(self.category.clone()),
            "Duration" => FieldValue::Integer(self.duration),
            "RequiredSkills" => FieldValue::List(self.required_skills.clone()),
            "PreferredPhases" => match &self.preferred_phases {
                PreferredPhases::List(values) => FieldValue::Phases(values.clone()),
                PreferredPhases::Raw(text) => FieldValue::Text(text.clone()),
            },
            "MaxConcurrent" => FieldValue::Integer(self.max_concurrent),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), CorrectionError> {
        let shape = || wrong_shape::<Self>(field);
        match field {
            "TaskID" => self.task_id = value.into_text().ok_or_else(shape)?,
            "TaskName" => self.task_name = value.into_text().ok_or_else(shape)?,
            "Category" => self.category = value.into_text().ok_or_else(shape)?,
            "Duration" => self.duration = value.into_integer().ok_or_else(shape)?,
            "RequiredSkills" => self.required_skills = value.into_list().ok_or_else(shape)?,
            "PreferredPhases" => {
                self.preferred_phases = match value {
                    FieldValue::Text(text) => PreferredPhases::Raw(text),
                    other => PreferredPhases::List(other.into_phases().ok_or_else(shape)?),
                }
            }
            "MaxConcurrent" => self.max_concurrent = value.into_integer().ok_or_else(shape)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}
