/// Domain module containing the garden's entities and pure rules
///
/// This module defines users and their plants, the wellness records that
/// feed plant growth (moods, journals, habits, forum posts), the achievement
/// catalog, and the rules that don't need storage: stage thresholds, streak
/// arithmetic and validation.

pub mod types;
pub mod user;
pub mod plant;
pub mod mood;
pub mod journal;
pub mod habit;
pub mod completion;
pub mod streak;
pub mod community;
pub mod achievement;
pub mod crisis;

// Re-export public types for easy access
pub use types::*;
pub use user::*;
pub use plant::*;
pub use mood::*;
pub use journal::*;
pub use habit::*;
pub use completion::*;
pub use streak::*;
pub use community::*;
pub use achievement::*;
pub use crisis::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid thread: {0}")]
    InvalidThread(String),
}
