//! # Tipping Handler
//!
//! Handles `/tip [usernames] [amount]`. Notifies each receiver and then
//! the sender with the total.

use anyhow::Result;

use crate::domain::context::HandlerContext;
use crate::strings::messages;

pub async fn handle_tipping(ctx: HandlerContext) -> Result<()> {
    let receivers = ctx.command.text_list("username");
    let amount = ctx.command.number("amount").unwrap_or(0.0);

    if receivers.is_empty() || amount <= 0.0 {
        ctx.reply(messages::PAYMENT_MISSING, &[])
            .await
            .map_err(anyhow::Error::msg)?;
        return Ok(());
    }

    let sender_label = ctx.sender.label().to_string();
    for receiver in &receivers {
        ctx.reply(
            &messages::tip_received(amount, &sender_label),
            std::slice::from_ref(receiver),
        )
        .await
        .map_err(anyhow::Error::msg)?;
    }

    let total = amount * receivers.len() as f64;
    ctx.reply(&messages::tip_sent(total), &[ctx.sender.address.clone()])
        .await
        .map_err(anyhow::Error::msg)?;

    Ok(())
}
