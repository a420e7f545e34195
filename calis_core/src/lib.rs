#![forbid(unsafe_code)]

//! Core domain model and business logic for the Calis workout system.
//!
//! This crate provides:
//! - Domain types (muscle groups, exercises, stretches, sessions)
//! - The built-in exercise and stretch catalog
//! - Workout generation (class rotation and drop sets)
//! - Stretch recommendation and workout completion
//! - Persistence (JSON snapshot, CSV export)

pub mod types;
pub mod error;
pub mod rotation;
pub mod store;
pub mod catalog;
pub mod drop_set;
pub mod selection;
pub mod database;
pub mod engine;
pub mod stretches;
pub mod completion;
pub mod config;
pub mod logging;
pub mod snapshot;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use rotation::{muscle_chains, next_workout_type, paired_workout_type};
pub use store::{CatalogStore, ProgressStore, SessionStore, SettingsStore, WorkoutStore};
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use drop_set::build_drop_set;
pub use selection::select_exercise_class;
pub use database::Database;
pub use engine::{generate_workout, record_set};
pub use stretches::{muscle_tags, recommend_stretches};
pub use completion::{complete_workout, complete_workout_with_rating};
pub use config::Config;
pub use history::{export_csv, export_csv_to_path};
