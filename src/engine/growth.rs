/// Growth Engine: point awards and stage transitions

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Plant, StageChange, UserAchievement, UserId};
use crate::engine::{achievement, GardenError};
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// What a single award did to a plant
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthOutcome {
    pub plant: Plant,
    pub stage_change: StageChange,
    /// The milestone granted by this award, if it was new
    pub achievement: Option<UserAchievement>,
}

/// Add `points` to the user's plant and re-derive its stage
///
/// The plant is persisted first; when the stage changed the milestone for
/// the new stage is granted afterwards, in either direction. Only the final
/// stage of a multi-stage jump is considered. Points may be negative.
pub fn award_growth<S: KeyValueStore>(
    repo: &mut Repository<S>,
    user_id: &UserId,
    points: i64,
    now: DateTime<Utc>,
) -> Result<GrowthOutcome, GardenError> {
    let mut plant = repo
        .find_one::<Plant>(|plant| &plant.user_id == user_id)
        .ok_or_else(|| GardenError::PlantNotFound {
            user_id: user_id.to_string(),
        })?;

    let stage_change = plant.apply_points(points);
    debug!(
        "Awarded {} points to plant {} (total {})",
        points, plant.id, plant.total_growth_points
    );

    if stage_change.changed() && stage_change.current.milestone_achievement().is_some() {
        plant.record_milestone(stage_change.current);
    }

    let plant = repo.upsert(plant);

    let achievement = if stage_change.changed() {
        info!(
            "Plant {} grew from {} to {}",
            plant.id, stage_change.previous, stage_change.current
        );
        achievement::grant_milestone(repo, user_id, stage_change.current, now)
    } else {
        None
    };

    Ok(GrowthOutcome {
        plant,
        stage_change,
        achievement,
    })
}
