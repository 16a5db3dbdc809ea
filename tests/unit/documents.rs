/// Persisted document shapes
use bloom_garden::*;
use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn test_plant_document_fields() {
    let now = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
    let mut plant = Plant::new(UserId::from_string("user_1"), PlantType::Bamboo, now);
    plant.apply_points(120);
    plant.record_milestone(GrowthStage::Sprout);

    let json = serde_json::to_value(&plant).unwrap();
    assert_eq!(json["userId"], "user_1");
    assert_eq!(json["plantType"], "bamboo");
    assert_eq!(json["currentStage"], "sprout");
    assert_eq!(json["totalGrowthPoints"], 120);
    assert_eq!(json["milestonesAchieved"], json!(["sprout"]));
    assert_eq!(json["lastWatered"], "2024-02-03T04:05:06Z");
}

#[test]
fn test_completion_date_is_calendar_day() {
    let now = Utc.with_ymd_and_hms(2024, 2, 3, 23, 59, 0).unwrap();
    let completion = HabitCompletion::new(HabitId::from_string("habit_1"), UserId::from_string("user_1"), 2, "", now);

    let json = serde_json::to_value(&completion).unwrap();
    assert_eq!(json["completionDate"], "2024-02-03");
    assert_eq!(json["completedValue"], 2);
    assert_eq!(json["habitId"], "habit_1");
}

#[test]
fn test_out_of_range_rating_is_rejected_on_load() {
    let doc = json!({
        "id": "mood_1",
        "userId": "user_1",
        "moodLevel": 11,
        "moodTags": [],
        "energyLevel": 5,
        "anxietyLevel": 3,
        "notes": "",
        "triggers": [],
        "copingStrategies": [],
        "createdAt": "2024-02-03T04:05:06Z"
    });
    assert!(serde_json::from_value::<MoodEntry>(doc).is_err());
}

#[test]
fn test_collection_keys_are_stable() {
    let keys: Vec<&str> = CollectionKey::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "current_user",
            "users",
            "plants",
            "mood_entries",
            "journal_entries",
            "habits",
            "habit_completions",
            "forums",
            "forum_posts",
            "crisis_resources",
            "achievements",
            "user_achievements",
        ]
    );
}
