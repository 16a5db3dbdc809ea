/// Mood and journal history over a fixed calendar
use bloom_garden::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn noon(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, day, 12, 0, 0).unwrap()
}

fn setup() -> (Garden<MemoryStore>, UserId) {
    let mut garden = Garden::with_clock(MemoryStore::new(), Clock::Fixed(noon(1)));
    let user = garden
        .signup("history@example.com", "history", "History", PlantType::Rose)
        .unwrap()
        .into_value();
    (garden, user.id)
}

fn log_mood_at(garden: &mut Garden<MemoryStore>, at: DateTime<Utc>, user: &UserId, level: u8) {
    garden.set_clock(Clock::Fixed(at));
    garden.add_mood_entry(NewMoodEntry::new(user.clone(), level, "")).unwrap().into_value();
}

#[test]
fn test_mood_window_excludes_older_entries() {
    let (mut garden, user) = setup();

    log_mood_at(&mut garden, noon(1), &user, 2);
    log_mood_at(&mut garden, noon(6), &user, 4);
    log_mood_at(&mut garden, noon(9), &user, 8);
    log_mood_at(&mut garden, noon(10) - Duration::hours(3), &user, 6);

    garden.set_clock(Clock::Fixed(noon(10)));
    let levels: Vec<u8> = garden
        .mood_entries(&user, 7)
        .iter()
        .map(|m| m.mood_level.value())
        .collect();

    // Day 1 is nine days back
    assert_eq!(levels, vec![6, 8, 4]);
    assert_eq!(garden.mood_entries(&user, 30).len(), 4);
    assert!(garden.mood_entries(&user, 7).iter().all(|m| m.user_id == user));
}

#[test]
fn test_mood_window_boundary_is_inclusive() {
    let (mut garden, user) = setup();

    log_mood_at(&mut garden, noon(3), &user, 7);
    garden.set_clock(Clock::Fixed(noon(10)));

    assert_eq!(garden.mood_entries(&user, 7).len(), 1);
    garden.set_clock(Clock::Fixed(noon(10) + Duration::seconds(1)));
    assert!(garden.mood_entries(&user, 7).is_empty());
}

#[test]
fn test_journal_entries_newest_first() {
    let (mut garden, user) = setup();

    for (day, title) in [(4, "Middle"), (2, "Oldest"), (8, "Newest")] {
        garden.set_clock(Clock::Fixed(noon(day)));
        garden
            .add_journal_entry(NewJournalEntry::new(user.clone(), title, "Some words"))
            .unwrap()
            .into_value();
    }

    let titles: Vec<String> = garden
        .journal_entries(&user)
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}
