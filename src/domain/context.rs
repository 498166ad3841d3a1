//! # Handler Context
//!
//! The per-message context object handed to skill handlers. Carries the
//! sender identity, group membership and the parsed command, plus reply
//! primitives that write through the [`ChatProvider`].

use std::sync::Arc;

use crate::domain::traits::ChatProvider;
use crate::domain::types::ParsedCommand;

#[derive(Debug, Clone)]
pub struct Member {
    pub address: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Sender {
    pub address: String,
    pub display_name: Option<String>,
}

impl Sender {
    /// Display name if known, otherwise the raw address.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.address)
    }
}

#[derive(Clone)]
pub struct HandlerContext {
    chat: Arc<dyn ChatProvider>,
    pub sender: Sender,
    pub members: Vec<Member>,
    /// Raw message text as received.
    pub text: String,
    /// Filled in by the dispatcher before the handler runs.
    pub command: ParsedCommand,
}

impl HandlerContext {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        sender: Sender,
        members: Vec<Member>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            sender,
            members,
            text: text.into(),
            command: ParsedCommand::no_match(),
        }
    }

    pub(crate) fn with_command(mut self, command: ParsedCommand) -> Self {
        self.command = command;
        self
    }

    pub fn group_id(&self) -> String {
        self.chat.room_id()
    }

    pub async fn send(&self, content: &str) -> Result<(), String> {
        self.chat.send_message(content).await.map(|_| ())
    }

    pub async fn reply(&self, content: &str, recipients: &[String]) -> Result<(), String> {
        self.chat.reply_message(content, recipients).await
    }

    pub async fn notify(&self, content: &str) -> Result<(), String> {
        self.chat.send_notification(content).await
    }
}
