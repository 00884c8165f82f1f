//! Business rules.
//!
//! Rules constrain the downstream allocator. They are pure configuration:
//! this crate checks that each rule is structurally complete when it is
//! built, then passes it through to export untouched.
//!
//! # Wire shape
//!
//! ```json
//! { "id": "…", "type": "phaseWindow",
//!   "parameters": { "taskId": "T1", "allowedPhases": [2, 3, 4] },
//!   "description": "Task T1 can only run in phases 2, 3, 4", "priority": 1 }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::expand_phase_spec;
use crate::error::RuleError;

/// A business rule: an identified, described [`RuleKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier (UUID v4 when built here).
    pub id: String,
    /// Variant and its parameters.
    #[serde(flatten)]
    pub kind: RuleKind,
    /// Human-readable summary.
    pub description: String,
    /// Optional precedence among rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// The five rule variants, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "camelCase")]
pub enum RuleKind {
    /// Listed tasks must be scheduled together.
    CoRun(CoRunParams),
    /// Members of a group must share a minimum number of available phases.
    SlotRestriction(SlotRestrictionParams),
    /// A worker group may take at most N slots per phase.
    LoadLimit(LoadLimitParams),
    /// A task may only run in the listed phases.
    PhaseWindow(PhaseWindowParams),
    /// Entities matching a regex get a templated rule.
    PatternMatch(PatternMatchParams),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoRunParams {
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRestrictionParams {
    pub group_type: GroupType,
    pub group_name: String,
    pub min_common_slots: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLimitParams {
    pub worker_group: String,
    pub max_slots_per_phase: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseWindowParams {
    pub task_id: String,
    pub allowed_phases: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatchParams {
    pub pattern: String,
    pub template: PatternTemplate,
    #[serde(default)]
    pub additional_params: serde_json::Map<String, serde_json::Value>,
}

/// Which grouping key a slot restriction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// Clients grouped by `GroupTag`.
    Client,
    /// Workers grouped by `WorkerGroup`.
    Worker,
}

impl FromStr for GroupType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "client" => Ok(GroupType::Client),
            "worker" => Ok(GroupType::Worker),
            other => Err(RuleError::UnknownGroupType(other.to_string())),
        }
    }
}

/// Template applied by a pattern-match rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternTemplate {
    PhaseConstraint,
    SkillRequirement,
    PriorityBoost,
    Custom,
}

impl PatternTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternTemplate::PhaseConstraint => "phaseConstraint",
            PatternTemplate::SkillRequirement => "skillRequirement",
            PatternTemplate::PriorityBoost => "priorityBoost",
            PatternTemplate::Custom => "custom",
        }
    }
}

impl FromStr for PatternTemplate {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "phaseConstraint" => Ok(PatternTemplate::PhaseConstraint),
            "skillRequirement" => Ok(PatternTemplate::SkillRequirement),
            "priorityBoost" => Ok(PatternTemplate::PriorityBoost),
            "custom" => Ok(PatternTemplate::Custom),
            other => Err(RuleError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Rule discriminant without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleType {
    CoRun,
    SlotRestriction,
    LoadLimit,
    PhaseWindow,
    PatternMatch,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::CoRun => "coRun",
            RuleType::SlotRestriction => "slotRestriction",
            RuleType::LoadLimit => "loadLimit",
            RuleType::PhaseWindow => "phaseWindow",
            RuleType::PatternMatch => "patternMatch",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "coRun" => Ok(RuleType::CoRun),
            "slotRestriction" => Ok(RuleType::SlotRestriction),
            "loadLimit" => Ok(RuleType::LoadLimit),
            "phaseWindow" => Ok(RuleType::PhaseWindow),
            "patternMatch" => Ok(RuleType::PatternMatch),
            other => Err(RuleError::UnknownType(other.to_string())),
        }
    }
}

impl RuleKind {
    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleKind::CoRun(_) => RuleType::CoRun,
            RuleKind::SlotRestriction(_) => RuleType::SlotRestriction,
            RuleKind::LoadLimit(_) => RuleType::LoadLimit,
            RuleKind::PhaseWindow(_) => RuleType::PhaseWindow,
            RuleKind::PatternMatch(_) => RuleType::PatternMatch,
        }
    }
}

impl Rule {
    fn from_kind(kind: RuleKind, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            description,
            priority: None,
        }
    }

    /// Creates a co-run rule.
    ///
    /// Blank and repeated IDs are dropped (first occurrence kept); at least
    /// two distinct task IDs must remain.
    pub fn co_run<I, S>(tasks: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for task in tasks {
            let task = task.into();
            let task = task.trim();
            if !task.is_empty() && !distinct.iter().any(|t| t == task) {
                distinct.push(task.to_string());
            }
        }
        if distinct.len() < 2 {
            return Err(RuleError::TooFewTasks(distinct.len()));
        }

        let description = format!("Tasks {} must run together", distinct.join(", "));
        Ok(Self::from_kind(
            RuleKind::CoRun(CoRunParams { tasks: distinct }),
            description,
        ))
    }

    /// Creates a slot-restriction rule.
    pub fn slot_restriction(
        group_type: GroupType,
        group_name: impl Into<String>,
        min_common_slots: i64,
    ) -> Result<Self, RuleError> {
        let group_name = required("groupName", group_name.into())?;
        positive("minCommonSlots", min_common_slots)?;

        let label = match group_type {
            GroupType::Client => "Client",
            GroupType::Worker => "Worker",
        };
        let description = format!(
            "{label} group {group_name} requires at least {min_common_slots} common slots"
        );
        Ok(Self::from_kind(
            RuleKind::SlotRestriction(SlotRestrictionParams {
                group_type,
                group_name,
                min_common_slots,
            }),
            description,
        ))
    }

    /// Creates a load-limit rule.
    pub fn load_limit(
        worker_group: impl Into<String>,
        max_slots_per_phase: i64,
    ) -> Result<Self, RuleError> {
        let worker_group = required("workerGroup", worker_group.into())?;
        positive("maxSlotsPerPhase", max_slots_per_phase)?;

        let description = format!(
            "Worker group {worker_group} has a maximum of {max_slots_per_phase} slots per phase"
        );
        Ok(Self::from_kind(
            RuleKind::LoadLimit(LoadLimitParams {
                worker_group,
                max_slots_per_phase,
            }),
            description,
        ))
    }

    /// Creates a phase-window rule from explicit phases (sorted, de-duplicated).
    pub fn phase_window(
        task_id: impl Into<String>,
        allowed_phases: Vec<i64>,
    ) -> Result<Self, RuleError> {
        let task_id = required("taskId", task_id.into())?;
        let mut allowed_phases = allowed_phases;
        allowed_phases.sort_unstable();
        allowed_phases.dedup();
        if allowed_phases.is_empty() {
            return Err(RuleError::MissingParameter("allowedPhases"));
        }

        let listed = allowed_phases
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let description = format!("Task {task_id} can only run in phases {listed}");
        Ok(Self::from_kind(
            RuleKind::PhaseWindow(PhaseWindowParams {
                task_id,
                allowed_phases,
            }),
            description,
        ))
    }

    /// Creates a phase-window rule from a `"start-end"` range or comma list.
    pub fn phase_window_from_spec(
        task_id: impl Into<String>,
        spec: &str,
    ) -> Result<Self, RuleError> {
        let phases = expand_phase_spec(spec)?;
        Self::phase_window(task_id, phases)
    }

    /// Creates a pattern-match rule. The pattern must compile as a regex.
    pub fn pattern_match(
        pattern: impl Into<String>,
        template: PatternTemplate,
        additional_params: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, RuleError> {
        let pattern = required("pattern", pattern.into())?;
        Regex::new(&pattern)?;

        let description = format!(
            "Pattern match rule: {pattern} with template {}",
            template.as_str()
        );
        Ok(Self::from_kind(
            RuleKind::PatternMatch(PatternMatchParams {
                pattern,
                template,
                additional_params,
            }),
            description,
        ))
    }

    /// Creates a pattern-match rule whose extra parameters arrive as JSON text.
    ///
    /// Blank text means no extra parameters; anything else must be a JSON object.
    pub fn pattern_match_json(
        pattern: impl Into<String>,
        template: PatternTemplate,
        additional_params: &str,
    ) -> Result<Self, RuleError> {
        let params = if additional_params.trim().is_empty() {
            serde_json::Map::new()
        } else {
            match serde_json::from_str::<serde_json::Value>(additional_params) {
                Ok(serde_json::Value::Object(map)) => map,
                Ok(other) => return Err(RuleError::AdditionalParams(other.to_string())),
                Err(e) => return Err(RuleError::AdditionalParams(e.to_string())),
            }
        };
        Self::pattern_match(pattern, template, params)
    }

    /// Sets the rule priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the generated description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn rule_type(&self) -> RuleType {
        self.kind.rule_type()
    }
}

fn required(name: &'static str, value: String) -> Result<String, RuleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RuleError::MissingParameter(name))
    } else {
        Ok(trimmed.to_string())
    }
}

fn positive(name: &'static str, value: i64) -> Result<(), RuleError> {
    if value < 1 {
        Err(RuleError::NonPositive { name, value })
    } else {
        Ok(())
    }
}
