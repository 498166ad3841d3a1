//! # Payment Handler
//!
//! Handles `/pay [amount] [token] [username]`. Confirms a transfer to the
//! resolved receiver. The actual transfer belongs to the wallet collaborator; this
//! demo only validates and acknowledges.

use anyhow::Result;

use crate::domain::context::HandlerContext;
use crate::strings::messages;

pub async fn handle_payment(ctx: HandlerContext) -> Result<()> {
    let amount = ctx.command.number("amount").unwrap_or(0.0);
    let token = ctx.command.text("token").unwrap_or("usdc").to_string();
    let receivers = ctx.command.text_list("username");

    let Some(receiver) = receivers.first() else {
        ctx.reply(messages::PAYMENT_MISSING, &[])
            .await
            .map_err(anyhow::Error::msg)?;
        return Ok(());
    };

    if amount <= 0.0 {
        ctx.reply(messages::PAYMENT_MISSING, &[])
            .await
            .map_err(anyhow::Error::msg)?;
        return Ok(());
    }

    ctx.reply(
        &messages::payment_sent(amount, &token, receiver),
        &[ctx.sender.address.clone()],
    )
    .await
    .map_err(anyhow::Error::msg)?;

    Ok(())
}
