//! The three entity collections as one unit.

use serde::{Deserialize, Serialize};

use super::{Client, Record, Task, Worker};
use crate::validation::{validate_all, ValidationSummary};

/// Clients, workers and tasks, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
}

impl Dataset {
    pub fn new(clients: Vec<Client>, workers: Vec<Worker>, tasks: Vec<Task>) -> Self {
        Self {
            clients,
            workers,
            tasks,
        }
    }

    /// Expands textual preferred phases on every task.
    pub fn normalize(&mut self) {
        for task in &mut self.tasks {
            task.normalize_phases();
        }
    }

    /// Runs every validation check over the current snapshot.
    pub fn validate(&self) -> ValidationSummary {
        validate_all(&self.clients, &self.workers, &self.tasks)
    }

    /// First client with the given ID.
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id() == id)
    }

    /// First worker with the given ID.
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id() == id)
    }

    /// First task with the given ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Workers whose skills cover every skill the task requires.
    pub fn qualified_workers<'a>(&'a self, task: &'a Task) -> impl Iterator<Item = &'a Worker> {
        self.workers
            .iter()
            .filter(move |w| w.is_qualified_for(&task.required_skills))
    }
}
