//! Rule construction from raw form inputs.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::models::{GroupType, PatternTemplate, Rule, RuleType};

/// Raw rule inputs as entered by a user.
///
/// Only the fields relevant to the chosen rule type are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleForm {
    /// `coRun`: selected task IDs.
    pub tasks: Vec<String>,
    /// `slotRestriction`: `"client"` or `"worker"`.
    pub group_type: String,
    /// `slotRestriction`: group name.
    pub group_name: String,
    /// `slotRestriction`: minimum shared phases.
    pub min_common_slots: i64,
    /// `loadLimit`: worker group.
    pub worker_group: String,
    /// `loadLimit`: per-phase cap.
    pub max_slots_per_phase: i64,
    /// `phaseWindow`: task ID.
    pub task_id: String,
    /// `phaseWindow`: `"start-end"` range or comma list.
    pub allowed_phases: String,
    /// `patternMatch`: regex.
    pub pattern: String,
    /// `patternMatch`: template name.
    pub template: String,
    /// `patternMatch`: JSON object text.
    pub additional_params: String,
    /// Optional rule priority.
    pub priority: Option<i32>,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            group_type: "client".to_string(),
            group_name: String::new(),
            min_common_slots: 1,
            worker_group: String::new(),
            max_slots_per_phase: 1,
            task_id: String::new(),
            allowed_phases: String::new(),
            pattern: String::new(),
            template: String::new(),
            additional_params: "{}".to_string(),
            priority: None,
        }
    }
}

/// Builds a rule of the named type from form inputs.
///
/// Fails on an unknown type name or on inputs the typed constructor rejects.
pub fn build_rule(rule_type: &str, form: &RuleForm) -> Result<Rule, RuleError> {
    let rule = match rule_type.parse::<RuleType>()? {
        RuleType::CoRun => Rule::co_run(form.tasks.iter().cloned())?,
        RuleType::SlotRestriction => Rule::slot_restriction(
            form.group_type.parse::<GroupType>()?,
            form.group_name.as_str(),
            form.min_common_slots,
        )?,
        RuleType::LoadLimit => {
            Rule::load_limit(form.worker_group.as_str(), form.max_slots_per_phase)?
        }
        RuleType::PhaseWindow => {
            Rule::phase_window_from_spec(form.task_id.as_str(), &form.allowed_phases)?
        }
        RuleType::PatternMatch => {
            if form.template.trim().is_empty() {
                return Err(RuleError::MissingParameter("template"));
            }
            Rule::pattern_match_json(
                form.pattern.as_str(),
                form.template.parse::<PatternTemplate>()?,
                &form.additional_params,
            )?
        }
    };

    Ok(match form.priority {
        Some(priority) => rule.with_priority(priority),
        None => rule,
    })
}
