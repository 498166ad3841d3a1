//! # Agent Handler
//!
//! Handles `/agent [prompt]`. Forwards the free-text prompt to the
//! configured LLM and relays the reply line by line.

use std::sync::Arc;

use anyhow::Result;

use crate::domain::context::HandlerContext;
use crate::domain::traits::LlmProvider;
use crate::strings::messages;

pub async fn handle_agent(ctx: HandlerContext, llm: Arc<dyn LlmProvider>) -> Result<()> {
    let prompt = ctx.command.text("prompt").unwrap_or("").to_string();
    if prompt.trim().is_empty() {
        ctx.send(messages::AGENT_USAGE)
            .await
            .map_err(anyhow::Error::msg)?;
        return Ok(());
    }

    match llm.completion(&prompt).await {
        Ok(reply) => {
            // Relay paragraph by paragraph so long completions stay readable.
            for chunk in reply.split("\n\n").filter(|c| !c.trim().is_empty()) {
                ctx.send(chunk.trim()).await.map_err(anyhow::Error::msg)?;
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("LLM call failed: {}", e);
            ctx.send(messages::AGENT_FAILED)
                .await
                .map_err(anyhow::Error::msg)?;
            Ok(())
        }
    }
}
