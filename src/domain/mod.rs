//! Domain layer - core types and errors.
//!
//! This layer contains pure domain models and error types
//! without any external dependencies (DB, IO, etc.).

pub mod config;
pub mod error;
pub mod models;

pub use config::AppConfig;
pub use error::{AppError, Result, ValidationErrors};
pub use models::{
    format_decimal, seed_records, Entry, ExerciseKind, ExerciseRecord, ExerciseType, RecordId,
};
