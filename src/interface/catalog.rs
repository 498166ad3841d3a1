//! # Demo Catalog
//!
//! Wires the example handlers into a skill group: triggers, parameter
//! schemas and admin gating. The host registers this with the dispatcher at
//! startup.

use std::sync::Arc;

use crate::domain::traits::LlmProvider;
use crate::domain::types::{ParamKind, ParamSpec, Skill, SkillGroup, handler};
use crate::interface::handlers::{agent, game, helpers, payment, tipping};

/// Build the demo skill group. The `/agent` skill is only registered when an
/// LLM provider is available.
pub fn build_catalog(llm: Option<Arc<dyn LlmProvider>>) -> Vec<SkillGroup> {
    let mut group = SkillGroup::new(
        "Group bot",
        "@bot",
        "Group agent for tipping and transactions.",
    )
    .skill(
        Skill::new("tip", handler(tipping::handle_tipping))
            .usage("/tip [usernames] [amount]")
            .describe("Tip users in a specified token.")
            .example("/tip @vitalik 10 usdc")
            .triggers(&["/tip"])
            .param(
                ParamSpec::new("username", ParamKind::Username)
                    .plural()
                    .default_text(""),
            )
            .param(ParamSpec::new("amount", ParamKind::Number).default_number(10.0)),
    )
    .skill(
        Skill::new("pay", handler(payment::handle_payment))
            .usage("/pay [amount] [token] [username]")
            .describe("Send a specified amount of a token to a destination.")
            .example("/pay 10 vitalik.eth")
            .triggers(&["/pay"])
            .param(ParamSpec::new("amount", ParamKind::Number).default_number(10.0))
            .param(
                ParamSpec::new("token", ParamKind::String)
                    .values(&["eth", "dai", "usdc", "degen"])
                    .default_text("usdc"),
            )
            .param(ParamSpec::new("username", ParamKind::Username).default_text("")),
    )
    .skill(
        Skill::new("game", handler(game::handle_game))
            .usage("/game [game]")
            .describe("Play a game.")
            .example("/game wordle")
            .example("/game slot")
            .triggers(&["/game", "\u{1f50e}", "\u{1f50d}"])
            .param(
                ParamSpec::new("game", ParamKind::String)
                    .values(&["wordle", "slot", "guess", "help"])
                    .default_text(""),
            ),
    )
    .skill(
        Skill::new("id", handler(helpers::handle_group_id))
            .describe("Get the group ID.")
            .example("/id")
            .admin_only(),
    );

    if let Some(llm) = llm {
        group = group.skill(
            Skill::new("agent", handler(move |ctx| agent::handle_agent(ctx, llm.clone())))
            .usage("/agent [prompt]")
            .describe("Ask the assistant anything.")
            .example("/agent what is my ens name")
            .param(ParamSpec::new("prompt", ParamKind::Prompt)),
        );
    }

    // The help skill lists the full catalog, itself included, so it is
    // registered first and its handler bound afterwards.
    let help_index = group.skills.len();
    group = group.skill(
        Skill::new("help", handler(|_ctx| async { Ok(()) }))
            .describe("Get help with the bot.")
            .example("/help"),
    );
    let help_text = helpers::render_help(std::slice::from_ref(&group));
    group.skills[help_index].handler = handler(move |ctx| {
        let help = help_text.clone();
        async move { helpers::handle_help(ctx, &help).await }
    });

    vec![group]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::parser::parse;
    use crate::application::registry::SkillRegistry;

    #[test]
    fn test_catalog_passes_registration() {
        let registry = SkillRegistry::new(build_catalog(None)).unwrap();
        assert_eq!(registry.skill_count(), 5);
        assert!(registry.find("help").is_some());
        assert!(registry.find("agent").is_none());
    }

    #[test]
    fn test_catalog_parses_demo_commands() {
        let catalog = build_catalog(None);
        assert_eq!(parse("/tip @vitalik 10 usdc", &catalog).command.as_deref(), Some("tip"));
        assert_eq!(parse("/game wordle", &catalog).command.as_deref(), Some("game"));
        assert_eq!(parse("/help", &catalog).command.as_deref(), Some("help"));
    }

    #[test]
    fn test_help_text_covers_the_catalog() {
        let catalog = build_catalog(None);
        let text = helpers::render_help(&catalog);
        for usage in ["/tip", "/pay", "/game", "/id", "/help"] {
            assert!(text.contains(usage), "help text missing {usage}");
        }
        // The catalog's examples are user-facing and belong in the listing.
        assert!(text.contains("e.g. `/tip @vitalik 10 usdc`"));
        assert!(text.contains("e.g. `/game wordle`"));
    }
}
