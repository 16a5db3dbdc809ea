/// Tools for reference data
///
/// This module implements the achievements_list and crisis_resources MCP
/// tools.

use crate::engine::GardenError;
use crate::garden::Garden;
use crate::storage::KeyValueStore;
use crate::tools::plant::UserParams;
use crate::tools::resolve_user;

/// The achievement catalog, marking the ones the user has earned
pub fn achievements_list<S: KeyValueStore>(
    garden: &Garden<S>,
    params: UserParams,
) -> Result<String, GardenError> {
    let user_id = resolve_user(garden, params.user_id)?;
    let earned = garden.user_achievements(&user_id);

    let lines = garden
        .achievement_catalog()
        .into_iter()
        .map(|a| {
            let status = match earned.iter().find(|e| e.achievement_id == a.id) {
                Some(e) => format!("✅ earned {}", e.earned_at.format("%Y-%m-%d")),
                None => "🔒 locked".to_string(),
            };
            format!("{} **{}** ({:?}) - {}\n   {}", a.icon_url, a.name, a.rarity, status, a.description)
        })
        .collect::<Vec<_>>();

    Ok(format!(
        "🏆 **Achievements** ({}/{} earned)\n\n{}",
        earned.len(),
        lines.len(),
        lines.join("\n\n")
    ))
}

pub fn crisis_resources<S: KeyValueStore>(garden: &Garden<S>) -> Result<String, GardenError> {
    let lines = garden
        .crisis_resources()
        .into_iter()
        .map(|r| {
            format!(
                "🆘 **{}**: {}\n   {} ({}, {})",
                r.name,
                r.contact().unwrap_or("see website"),
                r.description,
                r.availability,
                r.location
            )
        })
        .collect::<Vec<_>>();

    Ok(format!(
        "If you are in crisis, please reach out now. You are not alone.\n\n{}",
        lines.join("\n\n")
    ))
}
