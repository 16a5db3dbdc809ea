/// Tools for mood check-ins, journaling and the daily summary
///
/// This module implements the mood_log, journal_write and wellness_summary
/// MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{NewJournalEntry, NewMoodEntry};
use crate::engine::GardenError;
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::plant::{growth_line, UserParams};
use crate::tools::{resolve_user, with_durability};

/// Parameters for a mood check-in
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoodLogParams {
    pub user_id: Option<String>,
    /// Overall mood, 1-10
    pub mood_level: u8,
    /// Energy, 1-10 (default 5)
    pub energy_level: Option<u8>,
    /// Anxiety, 1-10 (default 3)
    pub anxiety_level: Option<u8>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub coping_strategies: Vec<String>,
}

/// Parameters for a journal entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct JournalWriteParams {
    pub user_id: Option<String>,
    /// Defaults to "Journal Entry - <date>"
    pub title: Option<String>,
    pub content: String,
    /// Entries are private unless this is false
    pub private: Option<bool>,
}

pub fn mood_log<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: MoodLogParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;

    let mut draft = NewMoodEntry::new(user_id, params.mood_level, params.notes.unwrap_or_default());
    if let Some(energy) = params.energy_level {
        draft.energy_level = energy;
    }
    if let Some(anxiety) = params.anxiety_level {
        draft.anxiety_level = anxiety;
    }
    draft.mood_tags = params.tags;
    draft.triggers = params.triggers;
    draft.coping_strategies = params.coping_strategies;

    let saved = garden.add_mood_entry(draft)?;
    let mut message = format!(
        "📝 Mood logged: {}/10. Thank you for checking in.",
        saved.value.record.mood_level.value()
    );
    if let Some(growth) = &saved.value.growth {
        message.push_str(&growth_line(growth));
    }

    Ok(with_durability(&saved, message))
}

pub fn journal_write<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: JournalWriteParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;

    let mut draft = NewJournalEntry::new(user_id, params.title.unwrap_or_default(), params.content);
    if let Some(private) = params.private {
        draft.is_private = private;
    }

    let saved = garden.add_journal_entry(draft)?;
    let mut message = format!(
        "📓 Saved \"{}\".\nEntry ID: {}",
        saved.value.record.title, saved.value.record.id
    );
    if let Some(growth) = &saved.value.growth {
        message.push_str(&growth_line(growth));
    }

    Ok(with_durability(&saved, message))
}

pub fn wellness_summary<S: KeyValueStore>(
    garden: &Garden<S>,
    params: UserParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let summary = garden.daily_summary(&user_id);

    let check = |done: bool| if done { "✅" } else { "⬜" };
    let mut lines = vec![
        format!("📊 **Wellness summary for {}**", summary.date),
        format!("{} Mood check-in", check(summary.mood_logged)),
        format!("{} Journal entry", check(summary.journal_written)),
        format!(
            "{} Habits: {}/{} ({:.0}%)",
            check(summary.total_habits > 0 && summary.habits_completed >= summary.total_habits),
            summary.habits_completed,
            summary.total_habits,
            summary.habit_progress() * 100.0
        ),
        format!("💬 Community posts today: {}", summary.posts_written),
    ];

    if let (Some(stage), Some(points)) = (summary.stage, summary.total_growth_points) {
        lines.push(format!("🪴 Plant: {} with {} growth points", stage, points));
    }
    lines.push(String::new());
    lines.extend(summary.suggestions().into_iter().map(|s| format!("💡 {}", s)));

    Ok(lines.join("\n"))
}
