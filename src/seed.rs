/// Bootstrap of the reference collections
///
/// Forums, crisis resources and the achievement catalog are written once,
/// the first time a store is opened. A collection that is already present
/// is never touched, so running the bootstrap again is a no-op. If the
/// store can't say whether a collection exists it is left alone.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{
    Achievement, AchievementCategory, AchievementId, CrisisResource, CrisisResourceId,
    CrisisResourceType, Forum, ForumCategory, ForumId, GrowthStage, Rarity,
};
use crate::repository::{PersistenceFailure, Record, Repository};
use crate::storage::{CollectionKey, KeyValueStore};

/// Which reference collections a bootstrap run wrote
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub seeded: Vec<CollectionKey>,
    pub failures: Vec<PersistenceFailure>,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty() && self.failures.is_empty()
    }
}

/// Write the default reference data for any collection that is absent
pub fn initialize<S: KeyValueStore>(repo: &mut Repository<S>, now: DateTime<Utc>) -> SeedReport {
    let mut report = SeedReport::default();

    seed_if_absent(repo, &default_forums(now), &mut report);
    seed_if_absent(repo, &default_crisis_resources(), &mut report);
    seed_if_absent(repo, &default_achievements(), &mut report);

    report.failures = repo.take_failures();
    if !report.seeded.is_empty() {
        info!("Seeded default data: {:?}", report.seeded);
    }
    report
}

fn seed_if_absent<S: KeyValueStore, T: Record>(
    repo: &mut Repository<S>,
    records: &[T],
    report: &mut SeedReport,
) {
    match repo.has_document(T::KEY) {
        Some(false) => {
            if repo.replace_all(records) {
                report.seeded.push(T::KEY);
            }
        }
        Some(true) => {}
        None => warn!("Skipping seed of '{}': presence unknown", T::KEY),
    }
}

pub fn default_forums(now: DateTime<Utc>) -> Vec<Forum> {
    let forum = |id: &str, name: &str, description: &str, category: ForumCategory, members: u32, posts: u32| Forum {
        id: ForumId::from_string(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        member_count: members,
        post_count: posts,
        is_active: true,
        created_at: now,
    };

    vec![
        forum(
            "anxiety_support",
            "Anxiety Support",
            "A safe space to discuss anxiety, share coping strategies, and find support.",
            ForumCategory::Anxiety,
            1247,
            3892,
        ),
        forum(
            "positivity_corner",
            "Positivity Corner",
            "Share positive thoughts, gratitude, and uplifting experiences.",
            ForumCategory::Positivity,
            2156,
            5643,
        ),
        forum(
            "sleep_wellness",
            "Sleep & Wellness",
            "Discuss sleep hygiene, relaxation techniques, and wellness routines.",
            ForumCategory::Sleep,
            892,
            2341,
        ),
        forum(
            "relationships",
            "Relationships & Social",
            "Navigate relationships, social anxiety, and connection challenges.",
            ForumCategory::Relationships,
            1534,
            4127,
        ),
    ]
}

pub fn default_crisis_resources() -> Vec<CrisisResource> {
    vec![
        CrisisResource {
            id: CrisisResourceId::from_string("suicide_prevention"),
            name: "National Suicide Prevention Lifeline".to_string(),
            resource_type: CrisisResourceType::Hotline,
            phone_number: Some("988".to_string()),
            text_number: None,
            website: None,
            description: "Free and confidential emotional support 24/7".to_string(),
            availability: "24/7".to_string(),
            location: "United States".to_string(),
        },
        CrisisResource {
            id: CrisisResourceId::from_string("crisis_text"),
            name: "Crisis Text Line".to_string(),
            resource_type: CrisisResourceType::Textline,
            phone_number: None,
            text_number: Some("741741".to_string()),
            website: None,
            description: "Text HOME to 741741 for crisis support".to_string(),
            availability: "24/7".to_string(),
            location: "United States".to_string(),
        },
        CrisisResource {
            id: CrisisResourceId::from_string("emergency"),
            name: "Emergency Services".to_string(),
            resource_type: CrisisResourceType::Emergency,
            phone_number: Some("911".to_string()),
            text_number: None,
            website: None,
            description: "For immediate life-threatening emergencies".to_string(),
            availability: "24/7".to_string(),
            location: "United States".to_string(),
        },
    ]
}

pub fn default_achievements() -> Vec<Achievement> {
    let milestone = |stage: GrowthStage, name: &str, description: &str, reward: i64, icon: &str, rarity: Rarity, level: u8| {
        Achievement {
            id: AchievementId::from_string(stage.milestone_achievement().unwrap_or_default()),
            name: name.to_string(),
            description: description.to_string(),
            category: AchievementCategory::Growth,
            requirements: json!({ "stage": stage }),
            points_reward: reward,
            icon_url: icon.to_string(),
            badge_url: icon.to_string(),
            rarity,
            difficulty_level: level,
        }
    };

    vec![
        milestone(
            GrowthStage::Sprout,
            "First Sprout",
            "Your plant has grown to the sprout stage!",
            50,
            "🌱",
            Rarity::Common,
            1,
        ),
        milestone(
            GrowthStage::Bud,
            "Budding Progress",
            "Your plant is budding with potential!",
            100,
            "🌿",
            Rarity::Common,
            2,
        ),
        milestone(
            GrowthStage::Bloom,
            "Full Bloom",
            "Your plant has reached full bloom!",
            200,
            "🌸",
            Rarity::Rare,
            3,
        ),
        milestone(
            GrowthStage::Thrive,
            "Thriving Garden",
            "Your plant is thriving in its full glory!",
            500,
            "🌺",
            Rarity::Epic,
            4,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::FlakyStore;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fresh_store_is_seeded() {
        let mut repo = Repository::new(MemoryStore::new());
        let report = initialize(&mut repo, Utc::now());

        assert_eq!(
            report.seeded,
            vec![CollectionKey::Forums, CollectionKey::CrisisResources, CollectionKey::Achievements]
        );
        assert_eq!(repo.load::<Forum>().len(), 4);
        assert_eq!(repo.load::<CrisisResource>().len(), 3);

        let catalog = repo.load::<Achievement>();
        let ids: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first_growth", "budding_progress", "full_bloom", "thriving_garden"]);
        assert_eq!(catalog[3].required_stage(), Some(GrowthStage::Thrive));
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut repo = Repository::new(MemoryStore::new());
        initialize(&mut repo, Utc::now());
        let forums_before = repo.store().get("forums").unwrap();

        let report = initialize(&mut repo, Utc::now());
        assert!(report.is_noop());
        assert_eq!(repo.store().get("forums").unwrap(), forums_before);
    }

    #[test]
    fn test_existing_collection_is_kept() {
        let mut store = MemoryStore::new();
        store.set("forums", "[]").unwrap();
        let mut repo = Repository::new(store);

        let report = initialize(&mut repo, Utc::now());
        assert!(!report.seeded.contains(&CollectionKey::Forums));
        assert!(repo.load::<Forum>().is_empty());
    }

    #[test]
    fn test_unreadable_store_is_not_seeded() {
        let mut repo = Repository::new(FlakyStore::default().fail_reads_of("achievements"));
        let report = initialize(&mut repo, Utc::now());

        assert_eq!(report.seeded.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(repo.store().inner.get("achievements").unwrap(), None);
    }

    #[test]
    fn test_crisis_resource_wire_shape() {
        let json = serde_json::to_value(&default_crisis_resources()[1]).unwrap();
        assert_eq!(json["type"], "textline");
        assert_eq!(json["textNumber"], "741741");
        assert!(json.get("phoneNumber").is_none());
    }
}
