/// Durability of the garden across stores and restarts
use bloom_garden::*;
use serde_json::Value;
use tempfile::TempDir;

fn open_sqlite(dir: &TempDir) -> Garden<SqliteStore> {
    let store = SqliteStore::new(dir.path().join("garden.db")).unwrap();
    Garden::open(store)
}

#[test]
fn test_garden_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let user_id = {
        let mut garden = open_sqlite(&dir);
        let user = garden
            .signup("durable@example.com", "durable", "Durable", PlantType::Rose)
            .unwrap()
            .into_value();
        garden.award_growth(&user.id, 120).unwrap().into_value();
        user.id
    };

    let garden = open_sqlite(&dir);
    let plant = garden.plant(&user_id).unwrap();
    assert_eq!(plant.total_growth_points, 120);
    assert_eq!(plant.current_stage, GrowthStage::Sprout);
    assert_eq!(garden.current_user().map(|u| u.id), Some(user_id.clone()));
    assert_eq!(garden.user_achievements(&user_id).len(), 1);
}

#[test]
fn test_seeding_happens_once() {
    let dir = TempDir::new().unwrap();

    let first = open_sqlite(&dir);
    assert_eq!(first.seed_report().seeded.len(), 3);
    let forums = first.forums();
    drop(first);

    let second = open_sqlite(&dir);
    assert!(second.seed_report().is_noop());
    assert_eq!(second.forums(), forums);
    assert!(!second.crisis_resources().is_empty());
    assert!(!second.achievement_catalog().is_empty());
}

#[test]
fn test_collections_are_camel_case_arrays() {
    let mut garden = Garden::open(MemoryStore::new());
    let user = garden
        .signup("shape@example.com", "shape", "Shape", PlantType::Cactus)
        .unwrap()
        .into_value();
    garden.add_mood_entry(NewMoodEntry::new(user.id.clone(), 6, "")).unwrap().into_value();

    let raw = garden.repository().store().get("plants").unwrap().unwrap();
    let plants: Value = serde_json::from_str(&raw).unwrap();
    let plants = plants.as_array().unwrap();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0]["totalGrowthPoints"], 10);
    assert_eq!(plants[0]["userId"], user.id.as_str());

    let raw = garden.repository().store().get("mood_entries").unwrap().unwrap();
    let moods: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(moods[0]["moodLevel"], 6);
    assert_eq!(moods[0]["energyLevel"], 5);
}

/// Accepts reads but refuses to write one key
struct ReadOnlyPlants {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyPlants {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == "plants" && self.inner.get(key)?.is_some() {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

#[test]
fn test_failed_write_is_reported_not_raised() {
    let mut garden = Garden::open(ReadOnlyPlants { inner: MemoryStore::new() });
    let user = garden
        .signup("flaky@example.com", "flaky", "Flaky", PlantType::Fern)
        .unwrap();
    assert!(user.is_durable());
    let user = user.into_value();

    let saved = garden
        .add_mood_entry(NewMoodEntry::new(user.id.clone(), 8, "okay"))
        .unwrap();

    // The mood entry is kept even though the plant could not be updated
    assert!(!saved.is_durable());
    assert!(saved
        .failures
        .iter()
        .any(|f| f.key == CollectionKey::Plants && f.operation == StoreOperation::Write));
    assert_eq!(garden.mood_entries(&user.id, 7).len(), 1);
    assert_eq!(garden.plant(&user.id).unwrap().total_growth_points, 0);

    // The next operation starts with a clean slate
    let logout = garden.logout();
    assert!(logout.is_durable());
}
