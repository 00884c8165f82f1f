//! Allocation domain models.
//!
//! Provides the entity records uploaded by the user, the business rules that
//! constrain allocation, and the prioritization weights passed to the
//! downstream allocator.
//!
//! # Entities
//!
//! | Type | Identified by | Key references |
//! |------|---------------|----------------|
//! | `Client` | `ClientID` | `RequestedTaskIDs` → `Task` |
//! | `Worker` | `WorkerID` | `Skills`, `AvailableSlots` (phases) |
//! | `Task` | `TaskID` | `RequiredSkills`, `PreferredPhases` |
//!
//! No entity owns another; cross-references are by ID only.

mod client;
mod dataset;
mod phase;
mod priority;
mod record;
mod rule;
mod task;
mod worker;

pub use client::Client;
pub use dataset::Dataset;
pub use phase::{expand_phase_spec, phase_range, phase_values, PhaseValue, MAX_PHASE_SPAN};
pub use priority::{
    default_weights, Prioritization, PriorityProfile, PriorityWeight, MAX_WEIGHT, MIN_WEIGHT,
};
pub use record::{EntityType, FieldValue, Record};
pub use rule::{
    CoRunParams, GroupType, LoadLimitParams, PatternMatchParams, PatternTemplate,
    PhaseWindowParams, Rule, RuleKind, RuleType, SlotRestrictionParams,
};
pub use task::{PreferredPhases, Task};
pub use worker::Worker;
