//! # Skill Handlers
//!
//! Handler functions for the demo skills. Each receives the per-message
//! [`crate::domain::context::HandlerContext`] and emits replies through it.

pub mod agent;
pub mod game;
pub mod helpers;
pub mod payment;
pub mod tipping;
