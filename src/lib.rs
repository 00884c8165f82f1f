//! Resource-allocation configurator core.
//!
//! Takes uploaded clients, workers and tasks, checks them for integrity,
//! lets the user author business rules and priority weights, and produces
//! the configuration document consumed by an external allocation engine.
//! No allocation is performed here.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Client`, `Worker`, `Task`, `Rule`,
//!   `PriorityWeight`, `Dataset`
//! - **`validation`**: The nine integrity checks and `ValidationSummary`
//! - **`rules`**: `RuleSet`, form-based construction, description interpretation
//! - **`correction`**: Fix suggestions for validation errors and their application
//! - **`export`**: The consolidated JSON configuration document
//! - **`config`**: TOML settings
//! - **`logging`**: `tracing` subscriber setup
//!
//! # Workflow
//!
//! ```
//! use alloc_configurator::{Client, Dataset, ExportDocument, RuleSet, Task, Worker};
//! use alloc_configurator::models::default_weights;
//!
//! let dataset = Dataset::new(
//!     vec![Client::new("C1").with_name("Acme").with_requested_task("T1")],
//!     vec![Worker::new("W1").with_name("Ann").with_skill("coding").with_slots(&[1, 2])],
//!     vec![Task::new("T1").with_name("API").with_skill("coding")],
//! );
//! assert!(dataset.validate().valid);
//!
//! let doc = ExportDocument::assemble(&dataset, &RuleSet::new(), &default_weights());
//! assert!(doc.to_json(false).is_ok());
//! ```

pub mod config;
pub mod correction;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod rules;
pub mod validation;

pub use config::ConfiguratorConfig;
pub use correction::{apply_all, apply_suggestion, suggest_corrections, ApplyReport, Suggestion};
pub use error::{ConfigError, CorrectionError, ExportError, PhaseSpecError, RuleError};
pub use export::{ExportDocument, ExportSummary};
pub use models::{Client, Dataset, EntityType, FieldValue, Record, Rule, RuleKind, RuleType, Task, Worker};
pub use rules::{build_rule, interpret_description, RuleForm, RuleSet};
pub use validation::{validate_all, Severity, ValidationError, ValidationErrorKind, ValidationSummary};
