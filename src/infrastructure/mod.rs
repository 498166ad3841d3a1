//! # Infrastructure Layer
//!
//! Concrete adapters for the external collaborators: the Matrix transport
//! and the LLM completion API.

pub mod llm;
pub mod matrix;
