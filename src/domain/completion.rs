/// HabitCompletion entity for tracking habit check-offs
///
/// Each time a user completes a habit we append a HabitCompletion for the
/// current calendar day. A habit can be completed at most once per day.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{CompletionId, HabitId, UserId};

/// A record of completing a habit on a specific day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    /// Amount achieved (1 for a plain check-off)
    pub completed_value: u32,
    /// Which calendar day this completion counts for
    pub completion_date: NaiveDate,
    pub notes: String,
    /// When this completion was recorded
    pub created_at: DateTime<Utc>,
}

impl HabitCompletion {
    /// Record a completion for the UTC calendar day of `now`
    pub fn new(
        habit_id: HabitId,
        user_id: UserId,
        completed_value: u32,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::on_date(habit_id, user_id, completed_value, notes, now.date_naive(), now)
    }

    /// Record a completion for an explicit calendar day
    pub fn on_date(
        habit_id: HabitId,
        user_id: UserId,
        completed_value: u32,
        notes: impl Into<String>,
        completion_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            user_id,
            completed_value,
            completion_date,
            notes: notes.into(),
            created_at: now,
        }
    }

    /// Whether this completion is for the given habit and day
    pub fn is_for(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        &self.habit_id == habit_id && self.completion_date == date
    }
}
