//! Client model.
//!
//! A client requests tasks and carries a priority level used by the
//! downstream allocator.

use serde::{Deserialize, Serialize};

use super::record::{unknown_field, wrong_shape, EntityType, FieldValue, Record};
use crate::error::CorrectionError;

/// A client requesting tasks.
///
/// Field names serialize as the canonical upload columns
/// (`ClientID`, `ClientName`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Client {
    /// Unique client identifier.
    #[serde(rename = "ClientID")]
    pub client_id: String,
    /// Human-readable name.
    pub client_name: String,
    /// Allocation priority, valid in `[1, 5]`.
    pub priority_level: i64,
    /// Requested task IDs, in request order.
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>,
    /// Free-form grouping key.
    pub group_tag: String,
    /// JSON-encoded client attributes.
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String,
}

impl Client {
    /// Creates a client with the given ID and priority level 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            client_id: id.into(),
            priority_level: 1,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn with_priority(mut self, level: i64) -> Self {
        self.priority_level = level;
        self
    }

    /// Appends a requested task ID.
    pub fn with_requested_task(mut self, task_id: impl Into<String>) -> Self {
        self.requested_task_ids.push(task_id.into());
        self
    }

    pub fn with_group(mut self, tag: impl Into<String>) -> Self {
        self.group_tag = tag.into();
        self
    }

    pub fn with_attributes_json(mut self, json: impl Into<String>) -> Self {
        self.attributes_json = json.into();
        self
    }

    /// Whether `AttributesJSON` is empty or parses as JSON.
    pub fn has_valid_attributes(&self) -> bool {
        self.attributes_json.is_empty()
            || serde_json::from_str::<serde_json::Value>(&self.attributes_json).is_ok()
    }

    /// Whether the client requests the given task.
    pub fn requests(&self, task_id: &str) -> bool {
        self.requested_task_ids.iter().any(|id| id == task_id)
    }
}

impl Record for Client {
    const ENTITY_TYPE: EntityType = EntityType::Client;

    fn id(&self) -> &str {
        &self.client_id
    }

    fn name(&self) -> &str {
        &self.client_name
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "ClientID" => FieldValue::Text(self.client_id.clone()),
            "ClientName" => FieldValue::Text(self.client_name.clone()),
            "PriorityLevel" => FieldValue::Integer(self.priority_level),
            "RequestedTaskIDs" => FieldValue::List(self.requested_task_ids.clone()),
            "GroupTag" => FieldValue::Text(self.group_tag.clone()),
            "AttributesJSON" => FieldValue::Text(self.attributes_json.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), CorrectionError> {
        let shape = || wrong_shape::<Self>(field);
        match field {
            "ClientID" => self.client_id = value.into_text().ok_or_else(shape)?,
            "ClientName" => self.client_name = value.into_text().ok_or_else(shape)?,
            "PriorityLevel" => self.priority_level = value.into_integer().ok_or_else(shape)?,
            "RequestedTaskIDs" => self.requested_task_ids = value.into_list().ok_or_else(shape)?,
            "GroupTag" => self.group_tag = value.into_text().ok_or_else(shape)?,
            "AttributesJSON" => self.attributes_json = value.into_text().ok_or_else(shape)?,
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }
}
