//! # Interface Layer
//!
//! The example bot surface: skill handlers and the demo catalog wiring them
//! to triggers and parameter schemas.

pub mod catalog;
pub mod handlers;
