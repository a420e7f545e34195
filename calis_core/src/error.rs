//! Error types for the calis_core library.

use crate::MuscleGroup;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for calis_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No eligible exercise exists for a muscle group (or one of its classes)
    #[error("No active exercises for {muscle_group}{}", class_suffix(.exercise_class))]
    NoActiveExercises {
        muscle_group: MuscleGroup,
        exercise_class: Option<String>,
    },

    /// A referenced session, progress row, exercise or stretch does not exist
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    /// Malformed input (effort rating, set position, workout type name...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::RecordNotFound {
            kind,
            id: id.to_string(),
        }
    }
}

fn class_suffix(exercise_class: &Option<String>) -> String {
    exercise_class
        .as_deref()
        .map(|c| format!(" / {}", c))
        .unwrap_or_default()
}
