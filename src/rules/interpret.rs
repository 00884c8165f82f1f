//! Keyword-based interpretation of plain-language rule descriptions.
//!
//! A local fallback that needs no external service. It recognises entity
//! names from the current dataset and a small keyword vocabulary, then
//! builds the rule through the same typed constructors as every other path.
//!
//! | Keywords | Also needs | Rule |
//! |----------|------------|------|
//! | "run together", "co-run", "corun" | ≥ 2 task IDs | `coRun` |
//! | "phase", "window" | 1 task ID + numbers | `phaseWindow` |
//! | "load limit", "max load", "maximum load" | 1 worker group + number | `loadLimit` |
//! | "slot restriction", "common slots", "minimum slots" | 1 group + number | `slotRestriction` |
//!
//! Matching is case-insensitive and tried in table order.

use regex::Regex;

use crate::error::RuleError;
use crate::models::{expand_phase_spec, Client, GroupType, Rule, Task, Worker};

/// Phase numbers outside this range are ignored when no explicit range is given.
const PLAUSIBLE_PHASES: std::ops::RangeInclusive<i64> = 1..=10;

/// Builds a rule from a plain-language description.
pub fn interpret_description(
    description: &str,
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
) -> Result<Rule, RuleError> {
    let text = description.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

    let task_ids = mentioned(&text, tasks.iter().map(|t| t.task_id.as_str()));
    let worker_groups = mentioned(&text, workers.iter().map(|w| w.worker_group.as_str()));
    let client_groups = mentioned(&text, clients.iter().map(|c| c.group_tag.as_str()));

    let numbers: Vec<i64> = Regex::new(r"\d+")?
        .find_iter(&text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    let first_positive = numbers.iter().copied().find(|n| *n >= 1).unwrap_or(1);

    if has_any(&["run together", "co-run", "corun"]) && task_ids.len() >= 2 {
        return Rule::co_run(task_ids);
    }

    if has_any(&["phase", "window"]) && task_ids.len() == 1 && !numbers.is_empty() {
        let range = Regex::new(r"phase\s*(\d+)\s*-\s*(\d+)")?;
        let phases: Vec<i64> = match range.captures(&text) {
            Some(caps) => expand_phase_spec(&format!("{}-{}", &caps[1], &caps[2]))?,
            None => numbers
                .iter()
                .copied()
                .filter(|n| PLAUSIBLE_PHASES.contains(n))
                .collect(),
        };
        if !phases.is_empty() {
            return Rule::phase_window(task_ids[0].clone(), phases);
        }
    }

    if has_any(&["load limit", "max load", "maximum load"])
        && worker_groups.len() == 1
        && !numbers.is_empty()
    {
        return Rule::load_limit(worker_groups[0].clone(), first_positive);
    }

    if has_any(&["slot restriction", "common slots", "minimum slots"]) && !numbers.is_empty() {
        if worker_groups.len() == 1 {
            return Rule::slot_restriction(GroupType::Worker, worker_groups[0].clone(), first_positive);
        }
        if client_groups.len() == 1 {
            return Rule::slot_restriction(GroupType::Client, client_groups[0].clone(), first_positive);
        }
    }

    Err(RuleError::Uninterpretable(description.to_string()))
}

/// Distinct non-empty names (original casing) that occur in `text`.
fn mentioned<'a>(text: &str, names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for name in names {
        if !name.is_empty()
            && text.contains(&name.to_lowercase())
            && !found.iter().any(|f| f == name)
        {
            found.push(name.to_string());
        }
    }
    found
}
