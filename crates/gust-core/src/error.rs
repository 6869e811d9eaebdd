//! Core error types for gust-core.
//!
//! Everything here is a local failure surfaced at construction or I/O time;
//! there is no retry logic anywhere in the core. A workout lookup that finds
//! nothing is `None`, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gust-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored stage list failed to deserialize.
    #[error("Corrupt stage list for workout {id}: {message}")]
    CorruptRecord { id: i64, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised when constructing workouts and sessions.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A stage must repeat at least once.
    #[error("Invalid stage: reps must be at least 1 (got {reps})")]
    InvalidStage { reps: u32 },

    #[error("Invalid workout: {reason}")]
    InvalidWorkout { reason: String },

    /// The add card or any stage-less workout cannot be played.
    #[error("Workout {id} is not playable: it has no stages")]
    NotPlayable { id: i64 },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        DatabaseError::QueryFailed(err.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
