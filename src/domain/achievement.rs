/// Achievement catalog and earned achievements
///
/// The catalog is reference data seeded once at bootstrap. A user earns each
/// achievement at most once.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use chrono::{DateTime, Utc};
use crate::domain::{AchievementId, GrowthStage, UserAchievementId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Growth,
    Community,
    Wellness,
    Consistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    /// Free-form unlock requirements, e.g. `{"stage": "sprout"}`
    pub requirements: Value,
    pub points_reward: i64,
    pub icon_url: String,
    pub badge_url: String,
    pub rarity: Rarity,
    pub difficulty_level: u8,
}

impl Achievement {
    /// Growth stage named in the requirements, if any
    pub fn required_stage(&self) -> Option<GrowthStage> {
        self.requirements
            .get("stage")
            .and_then(|stage| serde_json::from_value(stage.clone()).ok())
    }
}

/// The join record between a user and an earned achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: UserAchievementId,
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub earned_at: DateTime<Utc>,
    #[serde(default)]
    pub progress_data: Value,
    pub is_displayed: bool,
}

impl UserAchievement {
    /// Record a stage milestone being reached
    pub fn for_milestone(
        user_id: UserId,
        achievement_id: AchievementId,
        stage: GrowthStage,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserAchievementId::new(),
            user_id,
            achievement_id,
            earned_at: now,
            progress_data: json!({ "stage": stage }),
            is_displayed: true,
        }
    }

    pub fn is_for(&self, user_id: &UserId, achievement_id: &AchievementId) -> bool {
        &self.user_id == user_id && &self.achievement_id == achievement_id
    }
}
