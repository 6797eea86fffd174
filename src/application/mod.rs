//! Application layer - use cases and orchestration.
//!
//! This layer contains the exercise list, its persistence glue,
//! form validation and output formatting.

pub mod codec;
pub mod formatter;
pub mod journal;
pub mod store;
pub mod validation;

pub use formatter::{format_entries, format_record_detail, OutputFormat};
pub use journal::Journal;
pub use validation::ExerciseForm;
