/// Tools for the user's plant
///
/// This module implements the plant_status and plant_water MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::Plant;
use crate::engine::{GardenError, GrowthOutcome};
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::{plural, resolve_user, with_durability};

/// Parameters for tools that act on one user
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UserParams {
    /// Defaults to the logged-in user
    pub user_id: Option<String>,
}

pub fn plant_status<S: KeyValueStore>(
    garden: &Garden<S>,
    params: UserParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let plant = garden
        .plant(&user_id)
        .ok_or_else(|| GardenError::PlantNotFound {
            user_id: user_id.to_string(),
        })?;

    Ok(describe_plant(&plant))
}

pub fn plant_water<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: UserParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let saved = garden.water_plant(&user_id)?;

    let plant = &saved.value.plant;
    let mut message = format!(
        "💧 Watered! Watering streak: {} day{}",
        plant.water_streak,
        plural(plant.water_streak)
    );
    message.push_str(&growth_line(&saved.value));

    Ok(with_durability(&saved, message))
}

pub(crate) fn describe_plant(plant: &Plant) -> String {
    let mut lines = vec![
        format!("🪴 **{}** ({})", plant.plant_type.display_name(), plant.current_stage),
        format!("   Growth points: {}", plant.total_growth_points),
    ];

    match plant.points_to_next_stage() {
        Some(remaining) => lines.push(format!("   Next stage in {} points", remaining)),
        None => lines.push("   Fully grown!".to_string()),
    }
    lines.push(format!(
        "   Watering streak: {} day{}",
        plant.water_streak,
        plural(plant.water_streak)
    ));

    if !plant.milestones_achieved.is_empty() {
        let milestones: Vec<&str> = plant.milestones_achieved.iter().map(|s| s.as_str()).collect();
        lines.push(format!("   Milestones: {}", milestones.join(", ")));
    }

    lines.join("\n")
}

/// One line about the points an action earned
pub(crate) fn growth_line(outcome: &GrowthOutcome) -> String {
    let mut line = format!(
        "\n🌿 Your plant now has {} growth points ({}).",
        outcome.plant.total_growth_points, outcome.plant.current_stage
    );

    if outcome.stage_change.changed() {
        line.push_str(&format!(
            "\n✨ It grew from {} to {}!",
            outcome.stage_change.previous, outcome.stage_change.current
        ));
    }
    if let Some(achievement) = &outcome.achievement {
        line.push_str(&format!("\n🏆 Achievement unlocked: {}", achievement.achievement_id));
    }

    line
}
