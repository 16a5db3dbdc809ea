/// Binding of each entity family to its collection key

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    Achievement, CrisisResource, Forum, ForumPost, Habit, HabitCompletion, JournalEntry, MoodEntry,
    Plant, User, UserAchievement,
};
use crate::storage::CollectionKey;

/// An entity stored as one element of a collection document
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The document key holding every record of this type
    const KEY: CollectionKey;

    /// Identity used by `upsert`
    fn record_id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $key:expr) => {
        impl Record for $ty {
            const KEY: CollectionKey = $key;

            fn record_id(&self) -> &str {
                self.id.as_str()
            }
        }
    };
}

impl_record!(User, CollectionKey::Users);
impl_record!(Plant, CollectionKey::Plants);
impl_record!(MoodEntry, CollectionKey::MoodEntries);
impl_record!(JournalEntry, CollectionKey::JournalEntries);
impl_record!(Habit, CollectionKey::Habits);
impl_record!(HabitCompletion, CollectionKey::HabitCompletions);
impl_record!(Forum, CollectionKey::Forums);
impl_record!(ForumPost, CollectionKey::ForumPosts);
impl_record!(CrisisResource, CollectionKey::CrisisResources);
impl_record!(Achievement, CollectionKey::Achievements);
impl_record!(UserAchievement, CollectionKey::UserAchievements);
