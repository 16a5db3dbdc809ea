/// Storage layer for persisting garden documents
///
/// The engine only needs a tiny synchronous key/value contract: `get`,
/// `set` and `remove` of whole JSON documents keyed by a fixed namespace.
/// SQLite provides the durable implementation, and an in-memory map is used
/// for ephemeral sessions and tests.

pub mod sqlite;
pub mod memory;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use std::fmt;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// The synchronous document store the garden is persisted in
///
/// Values are serialized JSON documents. A missing key is `Ok(None)`, never
/// an error. There are no multi-key transactions.
pub trait KeyValueStore {
    /// Read the document stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the document stored under `key` (no-op if absent)
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// The fixed key namespace; each key holds one full document
///
/// These names are part of the persistence format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    CurrentUser,
    Users,
    Plants,
    MoodEntries,
    JournalEntries,
    Habits,
    HabitCompletions,
    Forums,
    ForumPosts,
    CrisisResources,
    Achievements,
    UserAchievements,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 12] = [
        CollectionKey::CurrentUser,
        CollectionKey::Users,
        CollectionKey::Plants,
        CollectionKey::MoodEntries,
        CollectionKey::JournalEntries,
        CollectionKey::Habits,
        CollectionKey::HabitCompletions,
        CollectionKey::Forums,
        CollectionKey::ForumPosts,
        CollectionKey::CrisisResources,
        CollectionKey::Achievements,
        CollectionKey::UserAchievements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::CurrentUser => "current_user",
            CollectionKey::Users => "users",
            CollectionKey::Plants => "plants",
            CollectionKey::MoodEntries => "mood_entries",
            CollectionKey::JournalEntries => "journal_entries",
            CollectionKey::Habits => "habits",
            CollectionKey::HabitCompletions => "habit_completions",
            CollectionKey::Forums => "forums",
            CollectionKey::ForumPosts => "forum_posts",
            CollectionKey::CrisisResources => "crisis_resources",
            CollectionKey::Achievements => "achievements",
            CollectionKey::UserAchievements => "user_achievements",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
