/// Daily wellness summary
///
/// This module computes the dashboard view of a user's day: what they have
/// already done today, and where their plant stands.

use std::collections::HashSet;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    ForumPost, GrowthStage, Habit, HabitCompletion, JournalEntry, MoodEntry, Plant, UserId,
};
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// Today's activity for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    /// A mood entry exists from the last 24 hours
    pub mood_logged: bool,
    pub journal_written: bool,
    pub habits_completed: usize,
    pub total_habits: usize,
    pub posts_written: usize,
    pub stage: Option<GrowthStage>,
    pub total_growth_points: Option<i64>,
    pub points_to_next_stage: Option<i64>,
}

impl DailySummary {
    /// Share of active habits completed today (0.0 to 1.0)
    pub fn habit_progress(&self) -> f64 {
        if self.total_habits == 0 {
            0.0
        } else {
            self.habits_completed.min(self.total_habits) as f64 / self.total_habits as f64
        }
    }

    /// Short nudges for whatever hasn't been done yet today
    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        if self.stage.is_none() {
            suggestions.push("Sign up to plant your first seed!".to_string());
            return suggestions;
        }
        if !self.mood_logged {
            suggestions.push("Check in with your mood to give your plant some light.".to_string());
        }
        if !self.journal_written {
            suggestions.push("A few lines in your journal will help your plant grow.".to_string());
        }
        if self.total_habits == 0 {
            suggestions.push("Create a habit to start a streak.".to_string());
        } else if self.habits_completed < self.total_habits {
            suggestions.push(format!(
                "{} of {} habits done today. Keep going!",
                self.habits_completed, self.total_habits
            ));
        }
        if suggestions.is_empty() {
            suggestions.push("Everything is tended for today. Your garden is flourishing!".to_string());
        }

        suggestions
    }
}

/// Build the summary for `user_id` as of `now`
pub fn daily_summary<S: KeyValueStore>(
    repo: &Repository<S>,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> DailySummary {
    let today = now.date_naive();
    let day_ago = now - Duration::days(1);

    let mood_logged = repo
        .find_one::<MoodEntry>(|m| &m.user_id == user_id && m.created_at >= day_ago)
        .is_some();

    let journal_written = repo
        .find_one::<JournalEntry>(|j| &j.user_id == user_id && j.created_at.date_naive() == today)
        .is_some();

    let habits_completed = repo
        .list::<HabitCompletion>(|c| &c.user_id == user_id && c.completion_date == today)
        .into_iter()
        .map(|c| c.habit_id)
        .collect::<HashSet<_>>()
        .len();

    let total_habits = repo
        .list::<Habit>(|h| &h.user_id == user_id && h.is_active)
        .len();

    let posts_written = repo
        .list::<ForumPost>(|p| &p.user_id == user_id && p.created_at.date_naive() == today)
        .len();

    let plant = repo.find_one::<Plant>(|p| &p.user_id == user_id);

    DailySummary {
        date: today,
        mood_logged,
        journal_written,
        habits_completed,
        total_habits,
        posts_written,
        stage: plant.as_ref().map(|p| p.current_stage),
        total_growth_points: plant.as_ref().map(|p| p.total_growth_points),
        points_to_next_stage: plant.as_ref().and_then(|p| p.points_to_next_stage()),
    }
}
