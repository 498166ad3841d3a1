//! # Domain Layer
//!
//! Configuration, core types and abstract traits shared by the rest of the
//! application. Nothing here performs I/O.

pub mod config;
pub mod context;
pub mod traits;
pub mod types;
