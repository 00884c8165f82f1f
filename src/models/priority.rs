//! Prioritization weights.
//!
//! Weights are opaque to this crate: they are edited by the user, passed
//! through export, and interpreted only by the downstream allocator.

use serde::{Deserialize, Serialize};

/// Lowest allowed weight.
pub const MIN_WEIGHT: u8 = 1;
/// Highest allowed weight.
pub const MAX_WEIGHT: u8 = 5;

/// A named allocation criterion with a relative weight in `[1, 5]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityWeight {
    /// Unique criterion key (e.g. `clientPriority`).
    pub name: String,
    /// Display label.
    pub description: String,
    /// Relative importance.
    pub weight: u8,
}

impl PriorityWeight {
    /// Creates a weight, clamping to `[MIN_WEIGHT, MAX_WEIGHT]`.
    pub fn new(name: impl Into<String>, description: impl Into<String>, weight: u8) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            weight: weight.clamp(MIN_WEIGHT, MAX_WEIGHT),
        }
    }
}

/// A named, fixed set of weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityProfile {
    pub name: String,
    pub description: String,
    pub weights: Vec<PriorityWeight>,
}

/// Criterion keys and labels, in display order.
const CRITERIA: [(&str, &str); 5] = [
    ("clientPriority", "Client Priority Level"),
    ("requestFulfillment", "Request Fulfillment"),
    ("fairDistribution", "Fair Distribution"),
    ("workerEfficiency", "Worker Efficiency"),
    ("phaseBalance", "Phase Balance"),
];

fn weights(values: [u8; 5]) -> Vec<PriorityWeight> {
    CRITERIA
        .iter()
        .zip(values)
        .map(|((name, label), w)| PriorityWeight::new(*name, *label, w))
        .collect()
}

fn profile(name: &str, description: &str, values: [u8; 5]) -> PriorityProfile {
    PriorityProfile {
        name: name.to_string(),
        description: description.to_string(),
        weights: weights(values),
    }
}

/// Weights used before the user picks a profile.
pub fn default_weights() -> Vec<PriorityWeight> {
    weights([5, 4, 3, 3, 2])
}

impl PriorityProfile {
    /// The built-in preset profiles.
    pub fn presets() -> Vec<PriorityProfile> {
        vec![
            profile(
                "Maximize Fulfillment",
                "Prioritize fulfilling as many client requests as possible",
                [5, 5, 2, 3, 2],
            ),
            profile(
                "Fair Distribution",
                "Balance work fairly across all workers",
                [3, 3, 5, 2, 4],
            ),
            profile(
                "Worker Efficiency",
                "Optimize for worker skill utilization and efficiency",
                [2, 3, 2, 5, 3],
            ),
            profile(
                "Phase Balance",
                "Distribute work evenly across all phases",
                [2, 3, 3, 2, 5],
            ),
        ]
    }

    /// Looks up a preset by exact name.
    pub fn preset(name: &str) -> Option<PriorityProfile> {
        Self::presets().into_iter().find(|p| p.name == name)
    }
}

/// The working weight vector, keyed by criterion name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prioritization {
    weights: Vec<PriorityWeight>,
}

impl Default for Prioritization {
    fn default() -> Self {
        Self {
            weights: default_weights(),
        }
    }
}

impl Prioritization {
    pub fn new(weights: Vec<PriorityWeight>) -> Self {
        Self { weights }
    }

    /// Replaces all weights with a profile's.
    pub fn apply_profile(&mut self, profile: &PriorityProfile) {
        self.weights = profile.weights.clone();
    }

    /// Sets a criterion's weight (clamped). Returns `false` if the name is unknown.
    pub fn set_weight(&mut self, name: &str, weight: u8) -> bool {
        match self.weights.iter_mut().find(|w| w.name == name) {
            Some(w) => {
                w.weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
                true
            }
            None => false,
        }
    }

    pub fn weight(&self, name: &str) -> Option<u8> {
        self.weights.iter().find(|w| w.name == name).map(|w| w.weight)
    }

    pub fn weights(&self) -> &[PriorityWeight] {
        &self.weights
    }
}
