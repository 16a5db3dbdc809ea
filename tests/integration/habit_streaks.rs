/// Habit streaks over a fixed calendar
use bloom_garden::*;
use chrono::{DateTime, TimeZone, Utc};

fn on_day(day: u32) -> Clock {
    Clock::Fixed(Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap())
}

fn setup() -> (Garden<MemoryStore>, UserId, HabitId) {
    let mut garden = Garden::with_clock(MemoryStore::new(), on_day(1));
    let user = garden
        .signup("habits@example.com", "habits", "Habits", PlantType::Fern)
        .unwrap()
        .into_value();
    let habit = garden
        .add_habit(NewHabit::daily(user.id.clone(), "Meditate"))
        .unwrap()
        .into_value();
    (garden, user.id, habit.id)
}

fn complete_on(garden: &mut Garden<MemoryStore>, day: u32, user: &UserId, habit: &HabitId) -> HabitCompletionOutcome {
    garden.set_clock(on_day(day));
    garden.complete_habit(habit, user, 1, "").unwrap().into_value()
}

fn streak_of(outcome: &HabitCompletionOutcome) -> Streak {
    match outcome {
        HabitCompletionOutcome::Completed { streak, .. } => streak.clone(),
        HabitCompletionOutcome::AlreadyCompletedToday => panic!("expected a new completion"),
    }
}

#[test]
fn test_consecutive_days_build_a_streak() {
    let (mut garden, user, habit) = setup();

    complete_on(&mut garden, 1, &user, &habit);
    complete_on(&mut garden, 2, &user, &habit);
    let outcome = complete_on(&mut garden, 3, &user, &habit);

    assert_eq!(streak_of(&outcome).current_streak, 3);
    let stored = garden.habit(&habit).unwrap();
    assert_eq!(stored.current_streak, 3);
    assert_eq!(stored.longest_streak, 3);
}

#[test]
fn test_skipped_day_restarts_streak() {
    let (mut garden, user, habit) = setup();

    complete_on(&mut garden, 1, &user, &habit);
    let outcome = complete_on(&mut garden, 3, &user, &habit);

    assert_eq!(streak_of(&outcome).current_streak, 1);
}

#[test]
fn test_second_completion_same_day_is_absorbed() {
    let (mut garden, user, habit) = setup();

    complete_on(&mut garden, 4, &user, &habit);
    let second = complete_on(&mut garden, 4, &user, &habit);

    assert_eq!(second, HabitCompletionOutcome::AlreadyCompletedToday);
    assert_eq!(garden.habit_completions(&habit).len(), 1);
    assert!(garden.is_completed_today(&habit));
    assert_eq!(garden.plant(&user).unwrap().total_growth_points, points::HABIT_COMPLETION);
}

#[test]
fn test_longest_streak_survives_a_break() {
    let (mut garden, user, habit) = setup();

    for day in 1..=4 {
        complete_on(&mut garden, day, &user, &habit);
    }
    complete_on(&mut garden, 10, &user, &habit);

    let stored = garden.habit(&habit).unwrap();
    assert_eq!(stored.current_streak, 1);
    assert_eq!(stored.longest_streak, 4);
}

#[test]
fn test_day_boundary_is_utc() {
    let (mut garden, user, habit) = setup();
    let late: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 5, 6, 23, 59, 59).unwrap();

    garden.set_clock(Clock::Fixed(late));
    garden.complete_habit(&habit, &user, 1, "").unwrap().into_value();
    garden.set_clock(Clock::Fixed(late + chrono::Duration::seconds(2)));
    let outcome = garden.complete_habit(&habit, &user, 1, "").unwrap().into_value();

    assert_eq!(streak_of(&outcome).current_streak, 2);
}
