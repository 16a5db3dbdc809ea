/// Community forums and posts
///
/// Posts are either top-level (`thread_depth` 0) or replies to a top-level
/// post (`thread_depth` 1). Threads are only one level deep.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{anonymous_author_name, DomainError, ForumId, ForumPostId, PlantType, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForumCategory {
    Anxiety,
    Depression,
    Positivity,
    Sleep,
    Relationships,
    General,
}

/// A discussion space, seeded at bootstrap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forum {
    pub id: ForumId,
    pub name: String,
    pub description: String,
    pub category: ForumCategory,
    pub member_count: u32,
    pub post_count: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: ForumPostId,
    pub forum_id: ForumId,
    pub user_id: UserId,
    pub author_name: String,
    pub author_plant: PlantType,
    pub title: String,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub reply_count: u32,
    pub view_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<ForumPostId>,
    pub thread_depth: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields of a post or reply
///
/// `author_name` defaults to the anonymous guardian name for the plant.
#[derive(Debug, Clone, PartialEq)]
pub struct NewForumPost {
    pub forum_id: ForumId,
    pub user_id: UserId,
    pub author_plant: PlantType,
    pub author_name: Option<String>,
    pub title: String,
    pub content: String,
}

impl ForumPost {
    /// Start a new top-level thread
    pub fn top_level(draft: NewForumPost, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::validate_content(&draft.content)?;
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Post title cannot be empty".to_string(),
            });
        }
        Ok(Self::build(draft, None, 0, now))
    }

    /// Reply to a top-level post
    ///
    /// The reply always lands in the parent's forum. Replying to a reply is
    /// rejected because threads are one level deep.
    pub fn reply_to(parent: &ForumPost, draft: NewForumPost, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if parent.is_reply() {
            return Err(DomainError::InvalidThread(format!(
                "Post {} is already a reply; replies can only be added to top-level posts",
                parent.id
            )));
        }
        Self::validate_content(&draft.content)?;

        let draft = NewForumPost {
            forum_id: parent.forum_id.clone(),
            ..draft
        };
        Ok(Self::build(draft, Some(parent.id.clone()), parent.thread_depth + 1, now))
    }

    pub fn is_reply(&self) -> bool {
        self.parent_post_id.is_some()
    }

    /// Net votes
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    fn build(
        draft: NewForumPost,
        parent_post_id: Option<ForumPostId>,
        thread_depth: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let author_name = draft
            .author_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| anonymous_author_name(draft.author_plant));

        Self {
            id: ForumPostId::new(),
            forum_id: draft.forum_id,
            user_id: draft.user_id,
            author_name,
            author_plant: draft.author_plant,
            title: draft.title,
            content: draft.content,
            upvotes: 0,
            downvotes: 0,
            reply_count: 0,
            view_count: 0,
            parent_post_id,
            thread_depth,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Post content cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
