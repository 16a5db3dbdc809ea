/// Mood log entries
///
/// Mood entries are append-only: they are never edited or deleted.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, MoodEntryId, Rating, UserId};

/// A single mood check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: MoodEntryId,
    pub user_id: UserId,
    pub mood_level: Rating,
    #[serde(default)]
    pub mood_tags: Vec<String>,
    pub energy_level: Rating,
    pub anxiety_level: Rating,
    pub notes: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub coping_strategies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a mood entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodEntry {
    pub user_id: UserId,
    pub mood_level: u8,
    pub notes: String,
    pub mood_tags: Vec<String>,
    pub energy_level: u8,
    pub anxiety_level: u8,
    pub triggers: Vec<String>,
    pub coping_strategies: Vec<String>,
}

impl NewMoodEntry {
    /// A check-in with the default energy (5) and anxiety (3) levels
    pub fn new(user_id: UserId, mood_level: u8, notes: impl Into<String>) -> Self {
        Self {
            user_id,
            mood_level,
            notes: notes.into(),
            mood_tags: Vec::new(),
            energy_level: 5,
            anxiety_level: 3,
            triggers: Vec::new(),
            coping_strategies: Vec::new(),
        }
    }
}

impl MoodEntry {
    /// Validate a draft and stamp it with an id and creation time
    pub fn create(draft: NewMoodEntry, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let mood_level = Rating::new(draft.mood_level)?;
        let energy_level = Rating::new(draft.energy_level)?;
        let anxiety_level = Rating::new(draft.anxiety_level)?;

        if draft.notes.len() > 2000 {
            return Err(DomainError::InvalidValue {
                message: "Notes cannot be longer than 2000 characters".to_string(),
            });
        }

        Ok(Self {
            id: MoodEntryId::new(),
            user_id: draft.user_id,
            mood_level,
            mood_tags: draft.mood_tags,
            energy_level,
            anxiety_level,
            notes: draft.notes,
            triggers: draft.triggers,
            coping_strategies: draft.coping_strategies,
            created_at: now,
        })
    }
}
