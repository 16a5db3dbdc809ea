/// A plant growing through its stages
use bloom_garden::*;

fn garden_with_user() -> (Garden<MemoryStore>, UserId) {
    let mut garden = Garden::open(MemoryStore::new());
    let user = garden
        .signup("grower@example.com", "grower", "Grower", PlantType::Sunflower)
        .unwrap()
        .into_value();
    (garden, user.id)
}

fn achievement_ids(garden: &Garden<MemoryStore>, user_id: &UserId) -> Vec<String> {
    garden
        .user_achievements(user_id)
        .into_iter()
        .map(|a| a.achievement_id.as_str().to_string())
        .collect()
}

#[test]
fn test_signup_plants_a_seed() {
    let (garden, user_id) = garden_with_user();
    let plant = garden.plant(&user_id).unwrap();

    assert_eq!(plant.current_stage, GrowthStage::Seed);
    assert_eq!(plant.total_growth_points, 0);
    assert_eq!(plant.plant_type, PlantType::Sunflower);
    assert!(garden.user_achievements(&user_id).is_empty());
}

#[test]
fn test_growth_through_stages() {
    let (mut garden, user_id) = garden_with_user();

    let outcome = garden.award_growth(&user_id, 10).unwrap().into_value();
    assert_eq!(outcome.plant.current_stage, GrowthStage::Seed);
    assert!(outcome.achievement.is_none());

    let outcome = garden.award_growth(&user_id, 90).unwrap().into_value();
    assert_eq!(outcome.plant.current_stage, GrowthStage::Sprout);
    assert_eq!(outcome.plant.total_growth_points, 100);
    assert_eq!(achievement_ids(&garden, &user_id), vec!["first_growth"]);

    // 600 lands in bloom; bud is skipped over
    let outcome = garden.award_growth(&user_id, 500).unwrap().into_value();
    assert_eq!(outcome.plant.current_stage, GrowthStage::Bloom);
    assert_eq!(outcome.stage_change.previous, GrowthStage::Sprout);

    let ids = achievement_ids(&garden, &user_id);
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"full_bloom".to_string()));
    assert!(!ids.contains(&"budding_progress".to_string()));
}

#[test]
fn test_activities_award_fixed_points() {
    let (mut garden, user_id) = garden_with_user();

    garden.add_mood_entry(NewMoodEntry::new(user_id.clone(), 7, "steady")).unwrap().into_value();
    garden
        .add_journal_entry(NewJournalEntry::new(user_id.clone(), "Today", "A good walk"))
        .unwrap()
        .into_value();
    let habit = garden
        .add_habit(NewHabit::daily(user_id.clone(), "Stretch"))
        .unwrap()
        .into_value();
    garden.complete_habit(&habit.id, &user_id, 1, "").unwrap().into_value();
    garden.water_plant(&user_id).unwrap().into_value();

    let plant = garden.plant(&user_id).unwrap();
    let expected = points::MOOD_ENTRY + points::JOURNAL_ENTRY + points::HABIT_COMPLETION + points::WATERING;
    assert_eq!(plant.total_growth_points, expected);
}

#[test]
fn test_milestone_not_granted_twice_after_regrowth() {
    let (mut garden, user_id) = garden_with_user();

    garden.award_growth(&user_id, 150).unwrap().into_value();
    garden.award_growth(&user_id, -100).unwrap().into_value();
    let outcome = garden.award_growth(&user_id, 100).unwrap().into_value();

    assert_eq!(outcome.plant.current_stage, GrowthStage::Sprout);
    assert!(outcome.achievement.is_none());
    assert_eq!(achievement_ids(&garden, &user_id), vec!["first_growth"]);
}

#[test]
fn test_award_without_plant_is_not_found() {
    let mut garden = Garden::open(MemoryStore::new());
    let result = garden.award_growth(&UserId::from_string("user_missing"), 10);
    assert!(matches!(result, Err(GardenError::PlantNotFound { .. })));
}
