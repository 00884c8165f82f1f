//! Uniform field access over entity records.
//!
//! Entities are addressed by `(entity type, id, field)` triples throughout
//! the crate: validation findings name a field, correction suggestions carry
//! a current and a suggested [`FieldValue`], and applying a suggestion sets
//! that field. The [`Record`] trait gives all three entity types the same
//! surface, keyed by the canonical (PascalCase) column names.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PhaseValue;
use crate::error::CorrectionError;

/// The kind of entity a finding or suggestion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Client,
    Worker,
    Task,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Client => "client",
            EntityType::Worker => "worker",
            EntityType::Task => "task",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed field value.
///
/// Variant order matters for deserialization: a JSON array of strings
/// becomes [`FieldValue::List`], a mixed or numeric array becomes
/// [`FieldValue::Phases`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Phases(Vec<PhaseValue>),
}

impl FieldValue {
    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Phase lists also accept a list of strings (each kept as text).
    pub fn into_phases(self) -> Option<Vec<PhaseValue>> {
        match self {
            FieldValue::Phases(values) => Some(values),
            FieldValue::List(items) => Some(items.into_iter().map(PhaseValue::Text).collect()),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// An entity record with named, settable fields.
pub trait Record {
    /// Which collection this record belongs to.
    const ENTITY_TYPE: EntityType;

    /// The record's identifier (may be empty in unvalidated data).
    fn id(&self) -> &str;

    /// The record's human-readable name (may be empty).
    fn name(&self) -> &str;

    /// Reads a field by its canonical column name.
    fn field(&self, field: &str) -> Option<FieldValue>;

    /// Overwrites a field by its canonical column name.
    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), CorrectionError>;

    /// Identifier to report in findings: the id, else the name, else `"unknown"`.
    fn reference(&self) -> &str {
        if !self.id().is_empty() {
            self.id()
        } else if !self.name().is_empty() {
            self.name()
        } else {
            "unknown"
        }
    }
}

/// Builds the error for a field the entity does not have.
pub(crate) fn unknown_field<R: Record>(field: &str) -> CorrectionError {
    CorrectionError::UnknownField {
        entity: R::ENTITY_TYPE.as_str(),
        field: field.to_string(),
    }
}

/// Builds the error for a value of the wrong shape.
pub(crate) fn wrong_shape<R: Record>(field: &str) -> CorrectionError {
    CorrectionError::WrongShape {
        entity: R::ENTITY_TYPE.as_str(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_deserialize_order() {
        let v: FieldValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, FieldValue::Integer(3));

        let v: FieldValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(v, FieldValue::List(vec!["a".into(), "b".into()]));

        let v: FieldValue = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(
            v,
            FieldValue::Phases(vec![PhaseValue::Integer(1), PhaseValue::Integer(2)])
        );
    }

    #[test]
    fn test_into_phases_from_list() {
        let phases = FieldValue::List(vec!["1".into()]).into_phases().unwrap();
        assert_eq!(phases, vec![PhaseValue::Text("1".into())]);
        assert!(FieldValue::Integer(1).into_phases().is_none());
    }

    #[test]
    fn test_entity_type_serde() {
        assert_eq!(
            serde_json::to_string(&EntityType::Worker).unwrap(),
            r#""worker""#
        );
        assert_eq!(EntityType::Task.to_string(), "task");
    }
}
