/// Streak Engine: habit completions and streak upkeep

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::domain::{Habit, HabitCompletion, HabitId, Streak, UserId};
use crate::engine::{growth, points, GardenError, GrowthOutcome};
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// Result of asking to complete a habit
#[derive(Debug, Clone, PartialEq)]
pub enum HabitCompletionOutcome {
    Completed {
        completion: HabitCompletion,
        streak: Streak,
        /// None when the user has no plant to grow
        growth: Option<GrowthOutcome>,
    },
    /// The habit already has a completion for today; nothing was written
    AlreadyCompletedToday,
}

/// Recalculate and store a habit's current and longest streak
///
/// Returns None if the habit doesn't exist.
pub fn recompute_streak<S: KeyValueStore>(
    repo: &mut Repository<S>,
    habit_id: &HabitId,
    today: NaiveDate,
) -> Option<Streak> {
    let completions = repo.list::<HabitCompletion>(|c| &c.habit_id == habit_id);
    let mut streak = None;

    repo.update_where::<Habit>(
        |habit| &habit.id == habit_id,
        |habit| {
            let calculated = Streak::calculate(habit_id.clone(), &completions, today, habit.longest_streak);
            habit.apply_streak(calculated.current_streak);
            streak = Some(calculated);
        },
    )?;

    streak
}

/// Record one completion of a habit for the UTC day of `now`
///
/// A second completion on the same day is absorbed. Otherwise the
/// completion is appended, the streak recomputed and the habit bonus
/// awarded to the user's plant.
pub fn complete_habit<S: KeyValueStore>(
    repo: &mut Repository<S>,
    habit_id: &HabitId,
    user_id: &UserId,
    value: u32,
    notes: &str,
    now: DateTime<Utc>,
) -> Result<HabitCompletionOutcome, GardenError> {
    let today = now.date_naive();

    if repo.find_one::<Habit>(|habit| &habit.id == habit_id).is_none() {
        return Err(GardenError::HabitNotFound {
            habit_id: habit_id.to_string(),
        });
    }

    if repo
        .find_one::<HabitCompletion>(|c| c.is_for(habit_id, today))
        .is_some()
    {
        debug!("Habit {} already completed on {}", habit_id, today);
        return Ok(HabitCompletionOutcome::AlreadyCompletedToday);
    }

    let completion = repo.append(HabitCompletion::new(
        habit_id.clone(),
        user_id.clone(),
        value,
        notes,
        now,
    ));

    let streak = recompute_streak(repo, habit_id, today)
        .unwrap_or_else(|| Streak::new(habit_id.clone()));
    info!("Habit {} completed, streak now {}", habit_id, streak.current_streak);

    let growth = match growth::award_growth(repo, user_id, points::HABIT_COMPLETION, now) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("No growth awarded for habit {}: {}", habit_id, e);
            None
        }
    };

    Ok(HabitCompletionOutcome::Completed {
        completion,
        streak,
        growth,
    })
}
