/// Achievement Engine: stage milestones

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{AchievementId, GrowthStage, UserAchievement, UserId};
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// Grant the milestone achievement for reaching `stage`
///
/// Seed has no milestone. A user holds each achievement at most once, so a
/// repeated grant is a no-op. Returns the newly granted record, if any.
pub fn grant_milestone<S: KeyValueStore>(
    repo: &mut Repository<S>,
    user_id: &UserId,
    stage: GrowthStage,
    now: DateTime<Utc>,
) -> Option<UserAchievement> {
    let achievement_id = AchievementId::from_string(stage.milestone_achievement()?);

    if repo
        .find_one::<UserAchievement>(|earned| earned.is_for(user_id, &achievement_id))
        .is_some()
    {
        debug!("User {} already holds '{}'", user_id, achievement_id);
        return None;
    }

    let granted = UserAchievement::for_milestone(user_id.clone(), achievement_id, stage, now);
    info!("Granted '{}' to user {} for reaching {}", granted.achievement_id, user_id, stage);

    Some(repo.append(granted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_seed_has_no_milestone() {
        let mut repo = Repository::new(MemoryStore::new());
        let user = UserId::from_string("user_1");

        assert!(grant_milestone(&mut repo, &user, GrowthStage::Seed, Utc::now()).is_none());
        assert!(repo.load::<UserAchievement>().is_empty());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut repo = Repository::new(MemoryStore::new());
        let user = UserId::from_string("user_1");

        let first = grant_milestone(&mut repo, &user, GrowthStage::Sprout, Utc::now()).unwrap();
        assert_eq!(first.achievement_id.as_str(), "first_growth");
        assert!(first.is_displayed);
        assert_eq!(first.progress_data["stage"], "sprout");

        assert!(grant_milestone(&mut repo, &user, GrowthStage::Sprout, Utc::now()).is_none());
        assert_eq!(repo.load::<UserAchievement>().len(), 1);
    }

    #[test]
    fn test_grants_are_per_user() {
        let mut repo = Repository::new(MemoryStore::new());
        let ada = UserId::from_string("user_ada");
        let bo = UserId::from_string("user_bo");

        grant_milestone(&mut repo, &ada, GrowthStage::Thrive, Utc::now());
        grant_milestone(&mut repo, &bo, GrowthStage::Thrive, Utc::now());

        let earned = repo.load::<UserAchievement>();
        assert_eq!(earned.len(), 2);
        assert!(earned.iter().all(|e| e.achievement_id.as_str() == "thriving_garden"));
    }
}
