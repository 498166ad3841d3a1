//! # Strings
//!
//! User-facing message constants and format helpers.

pub mod messages;
