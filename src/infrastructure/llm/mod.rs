//! # LLM Infrastructure
//!
//! OpenAI-compatible chat-completions client behind the `LlmProvider` trait.
//! Only the example `/agent` skill talks to it; the parser and dispatcher
//! never do.

mod client;

pub use client::LlmClient;
