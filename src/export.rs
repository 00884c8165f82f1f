//! Export of the final configuration document.
//!
//! The document is one JSON object with the top-level keys `clients`,
//! `workers`, `tasks`, `rules` and `prioritization`. Entities and rules are
//! written in their wire shape with no further transformation, so the
//! downstream allocator reads the same field names the user uploaded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::models::{Client, Dataset, PriorityWeight, RuleType, Task, Worker};
use crate::rules::RuleSet;

/// The consolidated configuration handed to the allocation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
    pub rules: RuleSet,
    pub prioritization: Vec<PriorityWeight>,
}

impl ExportDocument {
    /// Snapshots the current dataset, rules and weights.
    pub fn assemble(dataset: &Dataset, rules: &RuleSet, weights: &[PriorityWeight]) -> Self {
        Self {
            clients: dataset.clients.clone(),
            workers: dataset.workers.clone(),
            tasks: dataset.tasks.clone(),
            rules: rules.clone(),
            prioritization: weights.to_vec(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ExportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the document to `dir/<file_name>` and returns the path.
    pub fn write_to(&self, dir: impl AsRef<Path>, config: &ExportConfig) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&config.file_name);
        std::fs::write(&path, self.to_json(config.pretty)?)?;

        let summary = self.summary();
        tracing::info!(
            path = %path.display(),
            clients = summary.clients,
            workers = summary.workers,
            tasks = summary.tasks,
            rules = summary.rules,
            "configuration exported"
        );
        Ok(path)
    }

    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            clients: self.clients.len(),
            workers: self.workers.len(),
            tasks: self.tasks.len(),
            rules: self.rules.len(),
            rules_by_type: self.rules.count_by_type(),
        }
    }
}

/// Entity and rule counts of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub clients: usize,
    pub workers: usize,
    pub tasks: usize,
    pub rules: usize,
    /// In order of each type's first appearance.
    pub rules_by_type: Vec<(RuleType, usize)>,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clients, {} workers, {} tasks, {} rules",
            self.clients, self.workers, self.tasks, self.rules
        )?;
        if !self.rules_by_type.is_empty() {
            let counts: Vec<String> = self
                .rules_by_type
                .iter()
                .map(|(t, n)| format!("{t}: {n}"))
                .collect();
            write!(f, " ({})", counts.join(", "))?;
        }
        Ok(())
    }
}
