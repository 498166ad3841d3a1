//! # skillkit
//!
//! A toolkit for building chat bots as collections of "skills": commands
//! with trigger sets, declarative parameter schemas and async handlers.
//!
//! - Domain: configuration, catalog types, collaborator traits
//! - Application: command parser, registry, dispatcher
//! - Infrastructure: Matrix transport, LLM client
//! - Interface: example handlers and the demo catalog
//!
//! The parser ([`application::parser::parse`]) and dispatcher are pure with
//! respect to the transport and usable standalone in tests.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod strings;
