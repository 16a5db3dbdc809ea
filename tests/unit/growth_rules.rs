/// Stage thresholds, milestone mapping and point accounting
use bloom_garden::*;
use chrono::{Duration, TimeZone, Utc};

#[test]
fn test_thresholds_match_stable_contract() {
    let thresholds: Vec<(GrowthStage, i64)> = GrowthStage::ALL.iter().map(|s| (*s, s.threshold())).collect();
    assert_eq!(
        thresholds,
        vec![
            (GrowthStage::Seed, 0),
            (GrowthStage::Sprout, 100),
            (GrowthStage::Bud, 300),
            (GrowthStage::Bloom, 600),
            (GrowthStage::Thrive, 1000),
        ]
    );
}

#[test]
fn test_stage_is_highest_reached_threshold() {
    let cases = [
        (99, GrowthStage::Seed),
        (100, GrowthStage::Sprout),
        (299, GrowthStage::Sprout),
        (300, GrowthStage::Bud),
        (999, GrowthStage::Bloom),
        (1000, GrowthStage::Thrive),
    ];
    for (points, stage) in cases {
        assert_eq!(GrowthStage::for_points(points), stage, "{} points", points);
    }
}

#[test]
fn test_milestone_mapping() {
    assert_eq!(GrowthStage::Seed.milestone_achievement(), None);
    assert_eq!(GrowthStage::Sprout.milestone_achievement(), Some("first_growth"));
    assert_eq!(GrowthStage::Bud.milestone_achievement(), Some("budding_progress"));
    assert_eq!(GrowthStage::Bloom.milestone_achievement(), Some("full_bloom"));
    assert_eq!(GrowthStage::Thrive.milestone_achievement(), Some("thriving_garden"));
}

#[test]
fn test_point_awards_are_fixed() {
    assert_eq!(points::MOOD_ENTRY, 10);
    assert_eq!(points::JOURNAL_ENTRY, 15);
    assert_eq!(points::HABIT_COMPLETION, 20);
    assert_eq!(points::FORUM_POST, 25);
    assert_eq!(points::WATERING, 5);
}

#[test]
fn test_total_points_is_sum_of_awards() {
    let mut plant = Plant::new(UserId::new(), PlantType::Cactus, Utc::now());
    let awards = [10, 15, 20, 25, 5, 0, 300, 7];

    for award in awards {
        plant.apply_points(award);
        assert_eq!(plant.current_stage, GrowthStage::for_points(plant.total_growth_points));
    }
    assert_eq!(plant.total_growth_points, awards.iter().sum::<i64>());
    assert_eq!(plant.growth_points, plant.total_growth_points);
}

#[test]
fn test_watering_streak_by_calendar_day() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();
    let mut plant = Plant::new(UserId::new(), PlantType::Rose, start);

    plant.record_watering(start);
    assert_eq!(plant.water_streak, 1);

    // Two hours later is already the next UTC day
    plant.record_watering(start + Duration::hours(2));
    assert_eq!(plant.water_streak, 2);

    plant.record_watering(start + Duration::days(4));
    assert_eq!(plant.water_streak, 1);
}
