/// MCP tools for tending the garden
///
/// This module contains all the MCP tools that external clients can call.
/// Each tool takes its deserialized parameter struct and returns the text
/// shown to the client.

pub mod account;
pub mod plant;
pub mod wellness;
pub mod habits;
pub mod community;
pub mod reference;

// Re-export tool functions for easy access
pub use account::*;
pub use plant::*;
pub use wellness::*;
pub use habits::*;
pub use community::*;
pub use reference::*;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::UserId;
use crate::engine::GardenError;
use crate::garden::Garden;
use crate::repository::Saved;
use crate::storage::KeyValueStore;

/// Arguments of tools that take none
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// The explicit `user_id` argument, else the logged-in user
pub(crate) fn resolve_user<S: KeyValueStore>(
    garden: &Garden<S>,
    user_id: Option<String>,
) -> Result<UserId, GardenError> {
    match user_id {
        Some(id) if !id.trim().is_empty() => Ok(UserId::from_string(id.trim())),
        _ => garden.active_user().map(|user| user.id),
    }
}

/// Append a warning when an operation could not be fully saved
pub(crate) fn with_durability<T>(saved: &Saved<T>, message: String) -> String {
    if saved.is_durable() {
        return message;
    }

    let details = saved
        .failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    format!("{}\n⚠️ Some changes could not be saved: {}", message, details)
}

pub(crate) fn plural(count: impl Into<u64>) -> &'static str {
    if count.into() == 1 {
        ""
    } else {
        "s"
    }
}
