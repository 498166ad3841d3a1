//! # Helper Handlers
//!
//! `/help` (rendered from catalog metadata) and the admin-only `/id`.

use anyhow::Result;

use crate::domain::context::HandlerContext;
use crate::domain::types::SkillGroup;

/// Render the help text from the catalog's own metadata, so the listing can
/// never drift from what is actually registered.
pub fn render_help(groups: &[SkillGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("**{}** ({})\n", group.name, group.tag));
        if !group.description.is_empty() {
            out.push_str(&format!("{}\n", group.description));
        }
        for skill in &group.skills {
            out.push_str(&format!("* `{}`: {}", skill.usage, skill.description));
            if skill.admin_only {
                out.push_str(" (admin)");
            }
            out.push('\n');
            for example in &skill.examples {
                out.push_str(&format!("  e.g. `{example}`\n"));
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub async fn handle_help(ctx: HandlerContext, help_text: &str) -> Result<()> {
    ctx.send(help_text).await.map_err(anyhow::Error::msg)?;
    Ok(())
}

/// Admin-only: report the group id.
pub async fn handle_group_id(ctx: HandlerContext) -> Result<()> {
    ctx.send(&format!("Group ID: `{}`", ctx.group_id()))
        .await
        .map_err(anyhow::Error::msg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Skill, handler};

    #[test]
    fn test_render_help_lists_all_skills() {
        let groups = vec![
            SkillGroup::new("Group bot", "@bot", "Tipping and transactions.")
                .skill(
                    Skill::new("tip", handler(|_| async { Ok(()) }))
                        .usage("/tip [usernames] [amount]")
                        .describe("Tip users in a specified token.")
                        .example("/tip @vitalik 10"),
                )
                .skill(
                    Skill::new("id", handler(|_| async { Ok(()) }))
                        .describe("Get the group ID.")
                        .admin_only(),
                ),
        ];
        let text = render_help(&groups);
        assert!(text.contains("**Group bot** (@bot)"));
        assert!(text.contains("`/tip [usernames] [amount]`: Tip users"));
        assert!(text.contains("e.g. `/tip @vitalik 10`"));
        assert!(text.contains("`/id`: Get the group ID. (admin)"));
    }
}
