//! # Skill Dispatcher
//!
//! Routes an inbound message through the parser and invokes the matched
//! skill handler with the per-message [`HandlerContext`]. At most one handler
//! runs per message. Handler failures are contained here and surfaced to the
//! user as a generic reply; they never reach the transport loop.

use anyhow::Result;

use crate::application::parser::parse;
use crate::application::registry::SkillRegistry;
use crate::domain::context::HandlerContext;
use crate::strings::messages;

/// Explicit dispatcher configuration. Verbosity is passed in here rather
/// than read from ambient process state so dispatch stays testable.
#[derive(Debug, Clone, Default)]
pub struct DispatcherSettings {
    /// Addresses allowed to run admin-only skills (case-insensitive).
    pub admins: Vec<String>,
    /// Log parse outcomes for every inbound message.
    pub verbose_log: bool,
}

pub struct SkillDispatcher {
    registry: SkillRegistry,
    settings: DispatcherSettings,
}

impl SkillDispatcher {
    pub fn new(registry: SkillRegistry, settings: DispatcherSettings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    fn is_admin(&self, address: &str) -> bool {
        self.settings
            .admins
            .iter()
            .any(|a| a.eq_ignore_ascii_case(address))
    }

    /// Parse `text` and invoke the matched handler, if any. A non-command
    /// message is a normal no-op, not an error.
    pub async fn dispatch(&self, text: &str, ctx: HandlerContext) -> Result<()> {
        let parsed = parse(text, self.registry.groups());

        let Some(command) = parsed.command.clone() else {
            if self.settings.verbose_log {
                tracing::debug!("No skill matched: {}", preview(text));
            }
            return Ok(());
        };

        // Registration rejects duplicate command names, so this resolves to
        // the same skill the parser matched.
        let Some(skill) = self.registry.find(&command) else {
            return Ok(());
        };

        tracing::info!(
            "Dispatching '{}' for {}: {}",
            command,
            ctx.sender.address,
            preview(text)
        );

        if skill.admin_only && !self.is_admin(&ctx.sender.address) {
            tracing::warn!(
                "Rejected admin-only '{}' from {}",
                command,
                ctx.sender.address
            );
            let _ = ctx.notify(messages::AUTH_DENIED).await;
            return Ok(());
        }

        let handler = skill.handler.clone();
        let ctx = ctx.with_command(parsed);
        if let Err(e) = handler(ctx.clone()).await {
            tracing::error!("Skill '{}' failed: {:#}", command, e);
            let _ = ctx.notify(messages::HANDLER_FAILED).await;
        }

        Ok(())
    }
}

/// Shorten a message for log lines.
pub fn preview(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{HandlerContext, Sender};
    use crate::domain::traits::ChatProvider;
    use crate::domain::types::{ParamKind, ParamSpec, Skill, SkillGroup, handler};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records everything the dispatcher writes through the chat seam.
    #[derive(Default)]
    struct RecordingChat {
        messages: Mutex<Vec<String>>,
        notices: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingChat {
        async fn send_message(&self, content: &str) -> Result<String, String> {
            self.messages.lock().unwrap().push(content.to_string());
            Ok("$event".to_string())
        }

        async fn reply_message(&self, content: &str, _recipients: &[String]) -> Result<(), String> {
            self.messages.lock().unwrap().push(content.to_string());
            Ok(())
        }

        async fn send_notification(&self, content: &str) -> Result<(), String> {
            self.notices.lock().unwrap().push(content.to_string());
            Ok(())
        }

        fn room_id(&self) -> String {
            "!room:example.org".to_string()
        }
    }

    fn context(chat: Arc<RecordingChat>, sender: &str, text: &str) -> HandlerContext {
        HandlerContext::new(
            chat,
            Sender {
                address: sender.to_string(),
                display_name: None,
            },
            Vec::new(),
            text,
        )
    }

    fn dispatcher(groups: Vec<SkillGroup>, admins: Vec<String>) -> SkillDispatcher {
        SkillDispatcher::new(
            SkillRegistry::new(groups).unwrap(),
            DispatcherSettings {
                admins,
                verbose_log: false,
            },
        )
    }

    #[tokio::test]
    async fn test_handler_receives_parsed_params() {
        let chat = Arc::new(RecordingChat::default());
        let groups = vec![SkillGroup::new("g", "@g", "").skill(
            Skill::new("tip", handler(|ctx: HandlerContext| async move {
                let amount = ctx.command.number("amount").unwrap_or(0.0);
                ctx.send(&format!("amount={amount}")).await.map_err(anyhow::Error::msg)
            }))
            .triggers(&["/tip"])
            .param(ParamSpec::new("amount", ParamKind::Number).default_number(10.0)),
        )];
        let dispatcher = dispatcher(groups, Vec::new());

        let text = "/tip 42";
        dispatcher
            .dispatch(text, context(chat.clone(), "@user:example.org", text))
            .await
            .unwrap();

        assert_eq!(*chat.messages.lock().unwrap(), vec!["amount=42".to_string()]);
    }

    #[tokio::test]
    async fn test_no_match_is_a_silent_noop() {
        let chat = Arc::new(RecordingChat::default());
        let groups = vec![SkillGroup::new("g", "@g", "")
            .skill(Skill::new("tip", handler(|_| async { Ok(()) })).triggers(&["/tip"]))];
        let dispatcher = dispatcher(groups, Vec::new());

        for text in ["hello there", "/unknowncmd foo"] {
            dispatcher
                .dispatch(text, context(chat.clone(), "@user:example.org", text))
                .await
                .unwrap();
        }

        assert!(chat.messages.lock().unwrap().is_empty());
        assert!(chat.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_gate_blocks_non_admin() {
        let chat = Arc::new(RecordingChat::default());
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = invoked.clone();
        let groups = vec![SkillGroup::new("g", "@g", "").skill(
            Skill::new("id", handler(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }))
            .triggers(&["/id"])
            .admin_only(),
        )];
        let dispatcher = dispatcher(groups, vec!["@admin:example.org".to_string()]);

        dispatcher
            .dispatch("/id", context(chat.clone(), "@user:example.org", "/id"))
            .await
            .unwrap();
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
        assert_eq!(
            *chat.notices.lock().unwrap(),
            vec![messages::AUTH_DENIED.to_string()]
        );

        // Admin address matching is case-insensitive.
        dispatcher
            .dispatch("/id", context(chat.clone(), "@Admin:example.org", "/id"))
            .await
            .unwrap();
        assert_eq!(invoked.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_failure_becomes_generic_reply() {
        let chat = Arc::new(RecordingChat::default());
        let groups = vec![SkillGroup::new("g", "@g", "").skill(
            Skill::new("boom", handler(|_| async { Err(anyhow!("internal detail")) }))
                .triggers(&["/boom"]),
        )];
        let dispatcher = dispatcher(groups, Vec::new());

        let result = dispatcher
            .dispatch("/boom", context(chat.clone(), "@user:example.org", "/boom"))
            .await;

        assert!(result.is_ok());
        let notices = chat.notices.lock().unwrap();
        assert_eq!(*notices, vec![messages::HANDLER_FAILED.to_string()]);
        // The internal error text must not leak to the user.
        assert!(!notices[0].contains("internal detail"));
    }

    #[tokio::test]
    async fn test_exactly_one_handler_runs() {
        let chat = Arc::new(RecordingChat::default());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let c1 = first.clone();
        let c2 = second.clone();
        let groups = vec![
            SkillGroup::new("a", "@a", "").skill(
                Skill::new("ping", handler(move |_| {
                    let c = c1.clone();
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                }))
                .triggers(&["/ping"]),
            ),
            SkillGroup::new("b", "@b", "").skill(
                Skill::new("pingall", handler(move |_| {
                    let c = c2.clone();
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                }))
                .triggers(&["/pingall"]),
            ),
        ];
        let dispatcher = dispatcher(groups, Vec::new());

        // "/pingall" also starts with the earlier "/ping" trigger; only the
        // first match runs.
        dispatcher
            .dispatch(
                "/pingall",
                context(chat.clone(), "@user:example.org", "/pingall"),
            )
            .await
            .unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_preview_truncates_long_messages() {
        let long = "x".repeat(100);
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&long).chars().count(), 63);
        assert!(preview(&long).ends_with("..."));
    }
}
