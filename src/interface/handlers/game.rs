//! # Game Handler
//!
//! Handles `/game [game]`. Replies with the frame URL for the requested game.

use anyhow::Result;

use crate::domain::context::HandlerContext;
use crate::strings::messages;

const GAMES: &[(&str, &str)] = &[
    ("wordle", "https://openframedl.vercel.app/"),
    ("slot", "https://slot-machine-frame.vercel.app/"),
    ("guess", "https://farguessr.vercel.app/"),
];

pub async fn handle_game(ctx: HandlerContext) -> Result<()> {
    let requested = ctx.command.text("game").unwrap_or("");

    if requested == "help" {
        let options = GAMES
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");
        ctx.reply(&format!("Available games: {options}."), &[])
            .await
            .map_err(anyhow::Error::msg)?;
        return Ok(());
    }

    match GAMES.iter().find(|(name, _)| *name == requested) {
        Some((_, url)) => {
            ctx.reply(url, &[]).await.map_err(anyhow::Error::msg)?;
        }
        None => {
            ctx.reply(&messages::unknown_game("wordle, slot, guess, or help"), &[])
                .await
                .map_err(anyhow::Error::msg)?;
        }
    }

    Ok(())
}
