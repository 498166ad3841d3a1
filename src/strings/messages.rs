//! # Messages
//!
//! Constant strings and format functions for user-facing messages.

pub const AUTH_DENIED: &str = "🚫 **Authorization Denied**.";

/// Generic handler-failure reply. Deliberately carries no internal detail.
pub const HANDLER_FAILED: &str = "⚠️ Something went wrong while handling that command.";

pub const AGENT_FAILED: &str = "An error occurred while processing your request.";

pub const AGENT_USAGE: &str = "Usage: `/agent <message>`";

pub fn tip_received(amount: f64, from: &str) -> String {
    format!("You received {amount} tokens from {from}.")
}

pub fn tip_sent(total: f64) -> String {
    format!("You sent {total} tokens in total.")
}

pub fn payment_sent(amount: f64, token: &str, to: &str) -> String {
    format!("✅ Sent {amount} {token} to {to}.")
}

pub const PAYMENT_MISSING: &str = "Sender or receiver or amount not found.";

pub fn unknown_game(options: &str) -> String {
    format!("Command not recognized. Available games: {options}.")
}
