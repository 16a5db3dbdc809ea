/// Tools for the community forums
///
/// This module implements the forum_list and forum_post MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{ForumId, ForumPostId, NewForumPost};
use crate::engine::GardenError;
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::plant::growth_line;
use crate::tools::{resolve_user, with_durability};

/// Parameters for browsing forums
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ForumListParams {
    /// Show this forum's threads instead of the forum list
    pub forum_id: Option<String>,
}

/// Parameters for posting in a forum or replying to a thread
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ForumPostParams {
    pub user_id: Option<String>,
    /// Required for a new thread
    pub forum_id: Option<String>,
    /// Post ID of the thread to reply to
    pub reply_to: Option<String>,
    /// Required for a new thread
    pub title: Option<String>,
    pub content: String,
    /// Defaults to an anonymous name based on the user's plant
    pub author_name: Option<String>,
}

pub fn forum_list<S: KeyValueStore>(
    garden: &Garden<S>,
    params: ForumListParams,
) -> Result<String, GardenError> {
    let Some(forum_id) = params.forum_id else {
        let forums = garden
            .forums()
            .into_iter()
            .filter(|f| f.is_active)
            .map(|f| {
                format!(
                    "💬 **{}** (ID: {})\n   {}\n   👥 {} members | 📝 {} posts",
                    f.name, f.id, f.description, f.member_count, f.post_count
                )
            })
            .collect::<Vec<_>>();
        if forums.is_empty() {
            return Ok("No forums are available.".to_string());
        }
        return Ok(forums.join("\n\n"));
    };

    let forum_id = ForumId::from_string(forum_id.trim());
    let posts = garden.forum_posts(&forum_id);
    if posts.is_empty() {
        return Ok("No posts yet. Start the first conversation!".to_string());
    }

    Ok(posts
        .iter()
        .map(|p| {
            format!(
                "📝 **{}** by {} (ID: {})\n   {}\n   💬 {} replies | 👍 {}",
                p.title,
                p.author_name,
                p.id,
                p.content,
                p.reply_count,
                p.score()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n"))
}

pub fn forum_post<S: KeyValueStore>(
    garden: &mut Garden<S>,
    params: ForumPostParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let author = garden.user(&user_id).ok_or_else(|| GardenError::UserNotFound {
        user: user_id.to_string(),
    })?;

    let draft = NewForumPost {
        forum_id: ForumId::from_string(params.forum_id.as_deref().unwrap_or("").trim()),
        user_id,
        author_plant: author.personality_type,
        author_name: params.author_name.filter(|name| !name.trim().is_empty()),
        title: params.title.unwrap_or_default(),
        content: params.content,
    };

    let saved = match params.reply_to {
        Some(parent) => garden.reply_to_post(&ForumPostId::from_string(parent.trim()), draft)?,
        None => {
            if garden.forum(&draft.forum_id).is_none() {
                return Err(GardenError::Domain(crate::domain::DomainError::Validation {
                    message: format!("Unknown forum '{}'", draft.forum_id),
                }));
            }
            garden.add_forum_post(draft)?
        }
    };

    let post = &saved.value.record;
    let mut message = if post.is_reply() {
        format!("💬 Reply posted as {}.\nPost ID: {}", post.author_name, post.id)
    } else {
        format!("📝 Posted \"{}\" as {}.\nPost ID: {}", post.title, post.author_name, post.id)
    };
    if let Some(growth) = &saved.value.growth {
        message.push_str(&growth_line(growth));
    }

    Ok(with_durability(&saved, message))
}
