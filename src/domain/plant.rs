/// Plant entity and its growth arithmetic
///
/// Every user owns exactly one plant. The plant's stage is always derived
/// from its lifetime points; nothing else is allowed to set it.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{GrowthStage, PlantId, PlantType, UserId};

/// A user's virtual plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    /// Owner (one plant per user)
    pub user_id: UserId,
    /// Fixed at creation, mirrors the owner's personality type
    pub plant_type: PlantType,
    pub current_stage: GrowthStage,
    /// Points gained since the counter was last reset
    pub growth_points: i64,
    /// Lifetime points; the stage is derived from this
    pub total_growth_points: i64,
    pub last_watered: DateTime<Utc>,
    /// Consecutive calendar days with a watering
    pub water_streak: u32,
    /// Stages whose milestone has already been rewarded
    #[serde(default)]
    pub milestones_achieved: BTreeSet<GrowthStage>,
    pub created_at: DateTime<Utc>,
}

/// Stage before and after applying a point award
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub previous: GrowthStage,
    pub current: GrowthStage,
}

impl StageChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

impl Plant {
    /// Create a fresh seed for a new user
    pub fn new(user_id: UserId, plant_type: PlantType, now: DateTime<Utc>) -> Self {
        Self {
            id: PlantId::new(),
            user_id,
            plant_type,
            current_stage: GrowthStage::Seed,
            growth_points: 0,
            total_growth_points: 0,
            last_watered: now,
            water_streak: 0,
            milestones_achieved: BTreeSet::new(),
            created_at: now,
        }
    }

    /// Add points to both counters and re-derive the stage
    ///
    /// Points are not clamped; a negative award lowers both counters.
    pub fn apply_points(&mut self, points: i64) -> StageChange {
        let previous = self.current_stage;

        self.growth_points = self.growth_points.saturating_add(points);
        self.total_growth_points = self.total_growth_points.saturating_add(points);
        self.current_stage = GrowthStage::for_points(self.total_growth_points);

        StageChange {
            previous,
            current: self.current_stage,
        }
    }

    /// Remember that a stage's milestone was rewarded
    ///
    /// Returns false if it was already recorded.
    pub fn record_milestone(&mut self, stage: GrowthStage) -> bool {
        self.milestones_achieved.insert(stage)
    }

    /// Update the watering streak for a watering at `now`
    pub fn record_watering(&mut self, now: DateTime<Utc>) {
        let days_since = (now.date_naive() - self.last_watered.date_naive()).num_days();

        self.water_streak = match (self.water_streak, days_since) {
            (0, _) => 1,
            (streak, 0) => streak,
            (streak, 1) => streak.saturating_add(1),
            _ => 1,
        };
        self.last_watered = now;
    }

    /// Points still needed to reach the next stage
    pub fn points_to_next_stage(&self) -> Option<i64> {
        self.current_stage
            .next()
            .map(|next| (next.threshold() - self.total_growth_points).max(0))
    }
}
