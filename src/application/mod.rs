//! # Application Layer
//!
//! The deterministic core: command parsing, catalog validation and skill
//! dispatch. Everything here is driven by the Infrastructure layer and
//! callable standalone in tests.

pub mod dispatcher;
pub mod parser;
pub mod registry;
