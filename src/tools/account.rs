/// Tools for signing up, logging in and out
///
/// This module implements the garden_signup, garden_login and garden_logout
/// MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::PlantType;
use crate::engine::GardenError;
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::with_durability;

/// Parameters for creating an account
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SignupParams {
    /// Email address used to log in
    pub email: String,
    pub username: String,
    /// Shown on the dashboard; defaults to the username
    pub display_name: Option<String>,
    /// sunflower, cactus, fern, rose or bamboo
    pub plant_type: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginParams {
    pub email: String,
}

pub fn garden_signup<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: SignupParams,
) -> Result<String, GardenError> {
    let plant_type = PlantType::parse(&params.plant_type)?;
    let display_name = params
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| params.username.clone());

    let saved = garden.signup(&params.email, &params.username, &display_name, plant_type)?;
    let user = &saved.value;

    let message = format!(
        "🌱 Welcome, {}! Your {} seed has been planted.\nUser ID: {}",
        user.display_name,
        user.personality_type.display_name(),
        user.id
    );
    Ok(with_durability(&saved, message))
}

pub fn garden_login<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: LoginParams,
) -> Result<String, GardenError> {
    let saved = garden.login(&params.email)?;
    let message = format!("👋 Welcome back, {}!\nUser ID: {}", saved.value.display_name, saved.value.id);
    Ok(with_durability(&saved, message))
}

pub fn garden_logout<S: KeyValueStore>(garden: &mut Garden<S>) -> Result<String, GardenError> {
    let saved = garden.logout();
    Ok(with_durability(&saved, "Logged out. Your garden will be waiting.".to_string()))
}
