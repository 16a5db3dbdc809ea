/// Progression engines
///
/// The rules that tie wellness activity to plant growth: awarding points and
/// re-deriving the stage, granting stage milestones, and keeping habit
/// streaks current. Each engine is a set of functions over a
/// [`Repository`](crate::repository::Repository); the caller supplies the
/// current instant.

pub mod growth;
pub mod achievement;
pub mod streak;

pub use growth::{award_growth, GrowthOutcome};
pub use streak::{complete_habit, HabitCompletionOutcome};

use thiserror::Error;
use crate::domain::DomainError;

/// Fixed growth-point awards
pub mod points {
    pub const MOOD_ENTRY: i64 = 10;
    pub const JOURNAL_ENTRY: i64 = 15;
    pub const HABIT_COMPLETION: i64 = 20;
    pub const FORUM_POST: i64 = 25;
    pub const WATERING: i64 = 5;
}

/// Failures surfaced to callers of garden operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GardenError {
    #[error("No plant found for user '{user_id}'")]
    PlantNotFound { user_id: String },

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("No user found for '{user}'")]
    UserNotFound { user: String },

    #[error("Journal entry not found: {entry_id}")]
    JournalEntryNotFound { entry_id: String },

    #[error("Forum post not found: {post_id}")]
    ForumPostNotFound { post_id: String },

    #[error("No user is logged in")]
    NoActiveUser,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
