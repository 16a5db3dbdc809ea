/// Journal entries
///
/// Journals are append-only with optional in-place edits; each edit
/// advances `updated_at`.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, JournalEntryId, UserId};

/// How a journal entry was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    pub is_private: bool,
    #[serde(default)]
    pub share_with_circles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields of a journal entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewJournalEntry {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub is_private: bool,
    pub share_with_circles: Vec<String>,
}

impl NewJournalEntry {
    /// A private text entry
    pub fn new(user_id: UserId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            content: content.into(),
            content_type: ContentType::Text,
            is_private: true,
            share_with_circles: Vec::new(),
        }
    }
}

impl JournalEntry {
    /// Validate a draft and stamp it
    ///
    /// An empty title becomes `Journal Entry - <date>`.
    pub fn create(draft: NewJournalEntry, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::validate_content(&draft.content)?;

        let title = match draft.title.trim() {
            "" => format!("Journal Entry - {}", now.date_naive()),
            title => title.to_string(),
        };

        Ok(Self {
            id: JournalEntryId::new(),
            user_id: draft.user_id,
            title,
            content: draft.content,
            content_type: draft.content_type,
            audio_url: None,
            transcription: None,
            ai_insights: None,
            sentiment_score: None,
            is_private: draft.is_private,
            share_with_circles: draft.share_with_circles,
            created_at: now,
            updated_at: now,
        })
    }

    /// Edit the title and/or content in place
    pub fn edit(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_content) = content {
            Self::validate_content(new_content)?;
        }

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_content) = content {
            self.content = new_content;
        }
        self.updated_at = now;

        Ok(())
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Journal content cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
