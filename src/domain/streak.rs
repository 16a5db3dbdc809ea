/// Streak calculation for habits
///
/// A streak counts consecutive calendar days ending today. The history is
/// matched positionally: sorted newest first, the completion at index `i`
/// must fall exactly `i` days before today. A habit that hasn't been
/// completed today therefore has a current streak of zero, even if it was
/// completed every day up to yesterday.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{HabitCompletion, HabitId};

/// Calculated streak information for a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive days completed, ending today
    pub current_streak: u32,
    /// Best streak ever recorded for this habit
    pub longest_streak: u32,
    /// When the habit was last completed (None if never completed)
    pub last_completed: Option<NaiveDate>,
    /// Total number of completions on record
    pub total_completions: u32,
}

impl Streak {
    /// Create an empty streak for a habit that hasn't been completed yet
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            total_completions: 0,
        }
    }

    /// Calculate streak information from a habit's completions
    ///
    /// `previous_longest` is the longest streak already recorded on the
    /// habit; the result never reports less than that.
    pub fn calculate(
        habit_id: HabitId,
        completions: &[HabitCompletion],
        today: NaiveDate,
        previous_longest: u32,
    ) -> Self {
        let mut dates: Vec<NaiveDate> = completions
            .iter()
            .filter(|c| c.habit_id == habit_id)
            .map(|c| c.completion_date)
            .collect();
        dates.sort_by(|a, b| b.cmp(a));

        let current_streak = current_streak(&dates, today);

        Self {
            habit_id,
            current_streak,
            longest_streak: previous_longest.max(current_streak),
            last_completed: dates.first().copied(),
            total_completions: u32::try_from(dates.len()).unwrap_or(u32::MAX),
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Your plant is waiting. Complete this habit today to start a streak!".to_string(),
            1 => "First day done! Your plant felt that.".to_string(),
            2..=6 => format!("{} days in a row. New leaves are on the way.", self.current_streak),
            7..=29 => format!("{} days strong. Your garden is taking root!", self.current_streak),
            _ => format!("{} days of care. You're a master gardener!", self.current_streak),
        }
    }
}

/// Count completion dates that line up with today, today-1, today-2, ...
///
/// `dates_newest_first` must be sorted newest first. Counting stops at the
/// first index whose date is not exactly that many days before `today`.
pub fn current_streak(dates_newest_first: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut streak = 0;

    for (index, date) in dates_newest_first.iter().enumerate() {
        let days_back = (today - *date).num_days();
        if days_back != index as i64 {
            break;
        }
        streak += 1;
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use crate::domain::UserId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn completion(habit_id: &HabitId, days_ago: i64) -> HabitCompletion {
        let date = today() - Duration::days(days_ago);
        let recorded = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        HabitCompletion::on_date(habit_id.clone(), UserId::from_string("user_1"), 1, "", date, recorded)
    }

    #[test]
    fn test_new_streak() {
        let streak = Streak::new(HabitId::from_string("habit_1"));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert_eq!(streak.last_completed, None);
    }

    #[test]
    fn test_three_consecutive_days() {
        let habit_id = HabitId::from_string("habit_1");
        let completions = vec![completion(&habit_id, 2), completion(&habit_id, 0), completion(&habit_id, 1)];

        let streak = Streak::calculate(habit_id, &completions, today(), 0);
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.last_completed, Some(today()));
        assert_eq!(streak.total_completions, 3);
    }

    #[test]
    fn test_gap_breaks_the_streak() {
        let habit_id = HabitId::from_string("habit_1");
        let completions = vec![completion(&habit_id, 0), completion(&habit_id, 2)];

        let streak = Streak::calculate(habit_id, &completions, today(), 0);
        assert_eq!(streak.current_streak, 1);
    }

    #[test]
    fn test_yesterday_is_not_forgiven() {
        let habit_id = HabitId::from_string("habit_1");
        let completions = vec![completion(&habit_id, 1), completion(&habit_id, 2)];

        let streak = Streak::calculate(habit_id, &completions, today(), 5);
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 5);
    }

    #[test]
    fn test_other_habits_are_ignored() {
        let habit_id = HabitId::from_string("habit_1");
        let other = HabitId::from_string("habit_2");
        let completions = vec![completion(&habit_id, 0), completion(&other, 1), completion(&habit_id, 1)];

        let streak = Streak::calculate(habit_id, &completions, today(), 0);
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.total_completions, 2);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(current_streak(&[], today()), 0);
    }

    #[test]
    fn test_motivational_messages() {
        let mut streak = Streak::new(HabitId::from_string("habit_1"));
        assert!(streak.motivational_message().contains("start a streak"));

        streak.current_streak = 3;
        assert!(streak.motivational_message().contains("3 days in a row"));

        streak.current_streak = 45;
        assert!(streak.motivational_message().contains("master gardener"));
    }
}
