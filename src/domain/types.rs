/// Core types and enums used throughout the domain layer
///
/// This module defines the opaque id types, the plant archetypes and growth
/// stages, and the small enumerations shared by the garden's entities.

use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::DomainError;

/// Declares a string-backed id type with its own prefix
///
/// Each id is a wrapper around an opaque string so you can't accidentally
/// pass a habit id where a user id is expected. Freshly generated ids look
/// like `habit_3f0c...`; ids loaded from storage are kept verbatim.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a new random id
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing id (useful for storage loading and seeded rows)
            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a user account
    UserId, "user"
);
string_id!(
    /// Unique identifier for a plant
    PlantId, "plant"
);
string_id!(MoodEntryId, "mood");
string_id!(JournalEntryId, "journal");
string_id!(
    /// Unique identifier for a habit definition
    HabitId, "habit"
);
string_id!(CompletionId, "completion");
string_id!(ForumId, "forum");
string_id!(ForumPostId, "post");
string_id!(
    /// Catalog id of an achievement (e.g. `first_growth`)
    AchievementId, "achievement"
);
string_id!(UserAchievementId, "achievement");
string_id!(CrisisResourceId, "resource");

/// The five plant archetypes a personality can be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Sunflower,
    Cactus,
    Fern,
    Rose,
    Bamboo,
}

impl PlantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Sunflower => "sunflower",
            PlantType::Cactus => "cactus",
            PlantType::Fern => "fern",
            PlantType::Rose => "rose",
            PlantType::Bamboo => "bamboo",
        }
    }

    /// Capitalized name used in anonymous forum author names
    pub fn display_name(&self) -> &'static str {
        match self {
            PlantType::Sunflower => "Sunflower",
            PlantType::Cactus => "Cactus",
            PlantType::Fern => "Fern",
            PlantType::Rose => "Rose",
            PlantType::Bamboo => "Bamboo",
        }
    }

    /// Parse a plant type from user input (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "sunflower" => Ok(PlantType::Sunflower),
            "cactus" => Ok(PlantType::Cactus),
            "fern" => Ok(PlantType::Fern),
            "rose" => Ok(PlantType::Rose),
            "bamboo" => Ok(PlantType::Bamboo),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid plant type '{}'. Valid options: sunflower, cactus, fern, rose, bamboo",
                    other
                ),
            }),
        }
    }
}

/// Ordered growth stages of a plant
///
/// The derived `Ord` follows declaration order, so `Seed < Sprout < ... < Thrive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Seed,
    Sprout,
    Bud,
    Bloom,
    Thrive,
}

impl GrowthStage {
    /// All stages, lowest threshold first
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seed,
        GrowthStage::Sprout,
        GrowthStage::Bud,
        GrowthStage::Bloom,
        GrowthStage::Thrive,
    ];

    /// Lifetime points needed to reach this stage (inclusive)
    pub fn threshold(&self) -> i64 {
        match self {
            GrowthStage::Seed => 0,
            GrowthStage::Sprout => 100,
            GrowthStage::Bud => 300,
            GrowthStage::Bloom => 600,
            GrowthStage::Thrive => 1000,
        }
    }

    /// The highest stage whose threshold is at or below `total_points`
    ///
    /// Totals below zero (possible through negative awards) stay at seed.
    pub fn for_points(total_points: i64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .find(|stage| total_points >= stage.threshold())
            .copied()
            .unwrap_or(GrowthStage::Seed)
    }

    /// Catalog id of the achievement rewarded for reaching this stage
    pub fn milestone_achievement(&self) -> Option<&'static str> {
        match self {
            GrowthStage::Seed => None,
            GrowthStage::Sprout => Some("first_growth"),
            GrowthStage::Bud => Some("budding_progress"),
            GrowthStage::Bloom => Some("full_bloom"),
            GrowthStage::Thrive => Some("thriving_garden"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Sprout => "sprout",
            GrowthStage::Bud => "bud",
            GrowthStage::Bloom => "bloom",
            GrowthStage::Thrive => "thrive",
        }
    }

    /// The next stage up, or None once thriving
    pub fn next(&self) -> Option<GrowthStage> {
        match self {
            GrowthStage::Seed => Some(GrowthStage::Sprout),
            GrowthStage::Sprout => Some(GrowthStage::Bud),
            GrowthStage::Bud => Some(GrowthStage::Bloom),
            GrowthStage::Bloom => Some(GrowthStage::Thrive),
            GrowthStage::Thrive => None,
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a user's activity is visible to the community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Private,
    Moderate,
    Open,
}

impl PrivacyLevel {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "private" => Ok(PrivacyLevel::Private),
            "moderate" => Ok(PrivacyLevel::Moderate),
            "open" => Ok(PrivacyLevel::Open),
            other => Err(DomainError::Validation {
                message: format!("Invalid privacy level '{}'. Valid options: private, moderate, open", other),
            }),
        }
    }
}

/// A 1-10 rating (mood, energy, anxiety)
///
/// Stored as a plain number; out-of-range values are rejected both when
/// constructing and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidValue {
                message: format!("Rating must be between {} and {}, got {}", Self::MIN, Self::MAX, value),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
