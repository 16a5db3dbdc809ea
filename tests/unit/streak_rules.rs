/// Positional streak counting from today backwards
use bloom_garden::*;
use chrono::{Duration, NaiveDate, Utc};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

fn completions(habit: &HabitId, days: &[u32]) -> Vec<HabitCompletion> {
    days.iter()
        .map(|d| HabitCompletion::on_date(habit.clone(), UserId::from_string("user_1"), 1, "", day(*d), Utc::now()))
        .collect()
}

#[test]
fn test_three_consecutive_days() {
    let habit = HabitId::new();
    let streak = Streak::calculate(habit.clone(), &completions(&habit, &[8, 10, 9]), day(10), 0);

    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.longest_streak, 3);
    assert_eq!(streak.total_completions, 3);
    assert_eq!(streak.last_completed, Some(day(10)));
}

#[test]
fn test_gap_yesterday_counts_only_today() {
    let habit = HabitId::new();
    let streak = Streak::calculate(habit.clone(), &completions(&habit, &[10, 8]), day(10), 0);
    assert_eq!(streak.current_streak, 1);
}

#[test]
fn test_missing_today_is_zero() {
    let dates = [day(9), day(8), day(7)];
    assert_eq!(current_streak(&dates, day(10)), 0);
}

#[test]
fn test_longest_is_never_lowered() {
    let habit = HabitId::new();
    let streak = Streak::calculate(habit.clone(), &completions(&habit, &[10]), day(10), 12);
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.longest_streak, 12);
}

#[test]
fn test_long_run() {
    let today = day(31);
    let dates: Vec<NaiveDate> = (0..30).map(|i| today - Duration::days(i)).collect();
    assert_eq!(current_streak(&dates, today), 30);
}
