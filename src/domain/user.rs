/// User accounts
///
/// A user is created once at signup and is immutable afterwards, except for
/// the privacy level.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, PlantType, PrivacyLevel, UserId};

/// A registered gardener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    /// Plant archetype assigned by the personality quiz
    pub personality_type: PlantType,
    pub privacy_level: PrivacyLevel,
}

impl User {
    /// Create a new user with validation
    ///
    /// New accounts start with the `moderate` privacy level.
    pub fn new(
        email: &str,
        username: &str,
        display_name: &str,
        personality_type: PlantType,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let email = Self::normalize_email(email)?;
        let username = Self::require("Username", username)?;
        let display_name = Self::require("Display name", display_name)?;

        Ok(Self {
            id: UserId::new(),
            email,
            username,
            display_name,
            created_at: now,
            personality_type,
            privacy_level: PrivacyLevel::Moderate,
        })
    }

    /// Trim an email address and check it has a local part and a domain
    pub fn normalize_email(email: &str) -> Result<String, DomainError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEmail("Email is required".to_string()));
        }

        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Ok(trimmed.to_string())
            }
            _ => Err(DomainError::InvalidEmail(format!("'{}' is not a valid email", trimmed))),
        }
    }

    /// Name used for this user's anonymous forum posts
    pub fn anonymous_author_name(&self) -> String {
        anonymous_author_name(self.personality_type)
    }

    fn require(field: &str, value: &str) -> Result<String, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation {
                message: format!("{} is required", field),
            });
        }
        Ok(trimmed.to_string())
    }
}

/// `Anonymous Fern Guardian` and friends
pub fn anonymous_author_name(plant: PlantType) -> String {
    format!("Anonymous {} Guardian", plant.display_name())
}
