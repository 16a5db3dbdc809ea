/// Tools for habits
///
/// This module implements the habit_create, habit_complete and habit_list
/// MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{FrequencyType, HabitCategory, HabitId, NewHabit};
use crate::engine::{GardenError, HabitCompletionOutcome};
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::plant::{growth_line, UserParams};
use crate::tools::{plural, resolve_user, with_durability};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitCreateParams {
    pub user_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// selfcare, exercise, mindfulness, social or creative (default selfcare)
    pub category: Option<String>,
    /// daily, weekly or custom (default daily)
    pub frequency: Option<String>,
    /// Times per period (default 1)
    pub frequency_value: Option<u32>,
    /// Amount per completion (default 1)
    pub target_value: Option<u32>,
    /// Unit of the target, e.g. "glasses" (default "times")
    pub unit: Option<String>,
}

/// Parameters for completing a habit today
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitCompleteParams {
    pub user_id: Option<String>,
    pub habit_id: String,
    /// Amount done (default 1)
    pub value: Option<u32>,
    pub notes: Option<String>,
}

pub fn habit_create<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: HabitCreateParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;

    let mut draft = NewHabit::daily(user_id, params.name);
    if let Some(description) = params.description {
        draft.description = description;
    }
    if let Some(category) = params.category {
        draft.category = HabitCategory::parse(&category)?;
    }
    if let Some(frequency) = params.frequency {
        draft.frequency_type = FrequencyType::parse(&frequency)?;
    }
    if let Some(value) = params.frequency_value {
        draft.frequency_value = value;
    }
    if let Some(target) = params.target_value {
        draft.target_value = target;
    }
    if let Some(unit) = params.unit {
        draft.unit = unit;
    }

    let saved = garden.add_habit(draft)?;
    let habit = &saved.value;
    let message = format!(
        "✅ Created habit '{}' ({}, {})! Ready to start your streak!\nHabit ID: {}",
        habit.name,
        habit.category.display_name(),
        habit.target_display(),
        habit.id
    );

    Ok(with_durability(&saved, message))
}

pub fn habit_complete<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: HabitCompleteParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let habit_id = HabitId::from_string(params.habit_id.trim());

    let saved = garden.complete_habit(
        &habit_id,
        &user_id,
        params.value.unwrap_or(1),
        params.notes.as_deref().unwrap_or(""),
    )?;

    let message = match &saved.value {
        HabitCompletionOutcome::AlreadyCompletedToday => {
            "Already completed today. Come back tomorrow to grow your streak!".to_string()
        }
        HabitCompletionOutcome::Completed { streak, growth, .. } => {
            let mut message = format!(
                "🔥 Logged! Current streak: {} day{} (best {})\n{}",
                streak.current_streak,
                plural(streak.current_streak),
                streak.longest_streak,
                streak.motivational_message()
            );
            if let Some(growth) = growth {
                message.push_str(&growth_line(growth));
            }
            message
        }
    };

    Ok(with_durability(&saved, message))
}

pub fn habit_list<S: KeyValueStore>(
    garden: &Garden<S>,
    params: UserParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let habits = garden.habits(&user_id);

    if habits.is_empty() {
        return Ok("No habits yet. Create your first habit to get started!".to_string());
    }

    let listed = habits
        .iter()
        .map(|h| {
            format!(
                "🎯 **{}** ({})\n   ID: {} | 🎯 Target: {} | 🔥 Streak: {} | 🏅 Best: {}{}",
                h.name,
                h.category.display_name(),
                h.id,
                h.target_display(),
                h.current_streak,
                h.longest_streak,
                if garden.is_completed_today(&h.id) { " | ✅ done today" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!("📋 **Your habits** ({})\n\n{}", habits.len(), listed))
}
