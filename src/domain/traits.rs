//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat transport, LLM).
//! Allows for pluggable implementations in the Infrastructure layer and
//! recording fakes in tests.

use async_trait::async_trait;

/// Abstract interface for a chat transport (e.g. Matrix, Console).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the group. Returns the transport event id.
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a reply addressed to specific members. An empty recipient list
    /// replies to the whole group.
    async fn reply_message(&self, content: &str, recipients: &[String]) -> Result<(), String>;

    /// Send a notification (not tracked/editable).
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Get the current group/room ID.
    fn room_id(&self) -> String;
}

/// Abstract interface for an LLM completion provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn completion(&self, prompt: &str) -> Result<String, String>;
}
