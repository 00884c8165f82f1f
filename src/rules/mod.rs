//! Rule authoring.
//!
//! Rules are built three ways, all producing the same [`Rule`] values:
//! - directly, with the typed constructors on [`Rule`]
//! - from raw form inputs, with [`build_rule`]
//! - from a plain-language sentence, with [`interpret_description`]
//!
//! Built rules are kept in a [`RuleSet`] in insertion order.

mod form;
mod interpret;

pub use form::{build_rule, RuleForm};
pub use interpret::interpret_description;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::models::{Rule, RuleType};

/// Ordered collection of rules with unique IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Fails if a rule with the same ID is already present.
    pub fn add(&mut self, rule: Rule) -> Result<(), RuleError> {
        if self.get(&rule.id).is_some() {
            return Err(RuleError::DuplicateId(rule.id));
        }
        tracing::info!(id = %rule.id, rule_type = %rule.rule_type(), "rule added");
        self.rules.push(rule);
        Ok(())
    }

    /// Builder: adds a rule and returns self.
    pub fn with_rule(mut self, rule: Rule) -> Result<Self, RuleError> {
        self.add(rule)?;
        Ok(self)
    }

    /// Removes the rule with the given ID.
    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let pos = self.rules.iter().position(|r| r.id == id)?;
        let rule = self.rules.remove(pos);
        tracing::info!(id, "rule removed");
        Some(rule)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule counts per type, in order of each type's first appearance.
    pub fn count_by_type(&self) -> Vec<(RuleType, usize)> {
        let mut counts: Vec<(RuleType, usize)> = Vec::new();
        for rule in &self.rules {
            let rule_type = rule.rule_type();
            match counts.iter_mut().find(|(t, _)| *t == rule_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((rule_type, 1)),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
