/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents a recurring self-care
/// task a user wants to keep up, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId, UserId};

/// Life areas a habit can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Selfcare,
    Exercise,
    Mindfulness,
    Social,
    Creative,
}

impl HabitCategory {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "selfcare" | "self-care" => Ok(HabitCategory::Selfcare),
            "exercise" => Ok(HabitCategory::Exercise),
            "mindfulness" => Ok(HabitCategory::Mindfulness),
            "social" => Ok(HabitCategory::Social),
            "creative" => Ok(HabitCategory::Creative),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid category '{}'. Valid options: selfcare, exercise, mindfulness, social, creative",
                    other
                ),
            }),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HabitCategory::Selfcare => "Self-care",
            HabitCategory::Exercise => "Exercise",
            HabitCategory::Mindfulness => "Mindfulness",
            HabitCategory::Social => "Social",
            HabitCategory::Creative => "Creative",
        }
    }
}

/// How often a habit is meant to be done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    Daily,
    Weekly,
    Custom,
}

impl FrequencyType {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(FrequencyType::Daily),
            "weekly" => Ok(FrequencyType::Weekly),
            "custom" => Ok(FrequencyType::Custom),
            other => Err(DomainError::Validation {
                message: format!("Invalid frequency '{}'. Valid options: daily, weekly, custom", other),
            }),
        }
    }
}

/// A habit represents something the user wants to do regularly
///
/// `current_streak` and `longest_streak` are a cache recomputed from the
/// habit's completion history; they are never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Owner of the habit
    pub user_id: UserId,
    /// Display name (e.g., "Drink water", "Stretch")
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub frequency_type: FrequencyType,
    pub frequency_value: u32,
    pub target_value: u32,
    pub unit: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Whether this habit is currently active (archived habits are kept)
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a habit
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub frequency_type: FrequencyType,
    pub frequency_value: u32,
    pub target_value: u32,
    pub unit: String,
}

impl NewHabit {
    /// A daily self-care habit done once (`1 times`)
    pub fn daily(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            description: String::new(),
            category: HabitCategory::Selfcare,
            frequency_type: FrequencyType::Daily,
            frequency_value: 1,
            target_value: 1,
            unit: "times".to_string(),
        }
    }
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// New habits are active and start with empty streaks.
    pub fn create(draft: NewHabit, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::validate_name(&draft.name)?;
        Self::validate_description(&draft.description)?;
        Self::validate_target_and_unit(draft.target_value, &draft.unit)?;

        if draft.frequency_value == 0 {
            return Err(DomainError::InvalidValue {
                message: "Frequency value must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            id: HabitId::new(),
            user_id: draft.user_id,
            name: draft.name.trim().to_string(),
            description: draft.description,
            category: draft.category,
            frequency_type: draft.frequency_type,
            frequency_value: draft.frequency_value,
            target_value: draft.target_value,
            unit: draft.unit,
            current_streak: 0,
            longest_streak: 0,
            is_active: true,
            created_at: now,
        })
    }

    /// Store a freshly computed current streak
    ///
    /// The longest streak only ever grows.
    pub fn apply_streak(&mut self, current_streak: u32) {
        self.current_streak = current_streak;
        self.longest_streak = self.longest_streak.max(current_streak);
    }

    /// Get a display string for the target (e.g., "8 glasses")
    pub fn target_display(&self) -> String {
        if self.unit.is_empty() {
            self.target_value.to_string()
        } else {
            format!("{} {}", self.target_value, self.unit)
        }
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.len() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string()
            });
        }
        Ok(())
    }

    /// Validate target value and unit together
    fn validate_target_and_unit(target_value: u32, unit: &str) -> Result<(), DomainError> {
        if target_value > 10000 {
            return Err(DomainError::InvalidValue {
                message: "Target value cannot exceed 10000".to_string()
            });
        }

        if unit.trim().len() > 20 {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be longer than 20 characters".to_string()
            });
        }

        Ok(())
    }
}
