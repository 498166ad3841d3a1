//! # Domain Types
//!
//! The skill catalog data model: groups, skills, parameter specs and the
//! parsed command produced by the parser.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;

use crate::domain::context::HandlerContext;

/// Future returned by a skill handler.
pub type HandlerFuture = BoxFuture<'static, Result<()>>;

/// A skill handler is a plain async function value. It is stored and invoked
/// as-is; nothing inspects it dynamically.
pub type SkillHandler = Arc<dyn Fn(HandlerContext) -> HandlerFuture + Send + Sync>;

/// Wrap an async function into a [`SkillHandler`].
pub fn handler<F, Fut>(f: F) -> SkillHandler
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |ctx| -> HandlerFuture { Box::pin(f(ctx)) })
}

/// How a parameter value is extracted from the tokenized message.
///
/// A `String` spec with a non-empty `allowed_values` set behaves as a closed
/// enum rather than a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Quoted,
    Url,
    Prompt,
    Username,
    Address,
    Number,
}

/// A typed parameter value. Composite tokens (comma-separated addresses,
/// numbers or usernames) produce the list variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
    TextList(Vec<String>),
    NumberList(Vec<f64>),
}

/// Declarative rule for extracting one named argument.
/// Declaration order within a skill decides which parameter claims a token
/// when several kinds could match it.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub allowed_values: Vec<String>,
    pub plural: bool,
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    pub fn new(name: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            allowed_values: Vec::new(),
            plural: false,
            default: None,
        }
    }

    /// Restrict the parameter to a closed set of accepted values.
    pub fn values(mut self, values: &[&str]) -> Self {
        self.allowed_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Collect every qualifying value instead of only the first.
    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }

    pub fn default_text(mut self, value: &str) -> Self {
        self.default = Some(ParamValue::Text(value.to_string()));
        self
    }

    pub fn default_number(mut self, value: f64) -> Self {
        self.default = Some(ParamValue::Number(value));
        self
    }
}

/// One invocable command: trigger set, parameter schema and handler.
#[derive(Clone)]
pub struct Skill {
    /// Canonical command name, e.g. "tip".
    pub command: String,
    /// Usage line shown in help, e.g. "/tip [usernames] [amount]".
    pub usage: String,
    pub description: String,
    pub examples: Vec<String>,
    /// Literal strings that invoke the skill when the first token starts
    /// with one of them.
    pub triggers: Vec<String>,
    /// Parameter schema. Order is significant.
    pub params: Vec<ParamSpec>,
    /// Gated by the dispatcher against the configured admin list.
    pub admin_only: bool,
    pub handler: SkillHandler,
}

impl Skill {
    pub fn new(command: &str, handler: SkillHandler) -> Self {
        Self {
            command: command.to_string(),
            usage: format!("/{command}"),
            description: String::new(),
            examples: Vec::new(),
            triggers: vec![format!("/{command}")],
            params: Vec::new(),
            admin_only: false,
            handler,
        }
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn example(mut self, example: &str) -> Self {
        self.examples.push(example.to_string());
        self
    }

    /// Replace the default `/command` trigger set.
    pub fn triggers(mut self, triggers: &[&str]) -> Self {
        self.triggers = triggers.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("command", &self.command)
            .field("triggers", &self.triggers)
            .field("params", &self.params)
            .field("admin_only", &self.admin_only)
            .finish_non_exhaustive()
    }
}

/// A named bundle of skills exposed under one bot persona.
#[derive(Debug, Clone)]
pub struct SkillGroup {
    pub name: String,
    /// Mention alias, e.g. "@bot".
    pub tag: String,
    pub description: String,
    pub skills: Vec<Skill>,
}

impl SkillGroup {
    pub fn new(name: &str, tag: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            description: description.to_string(),
            skills: Vec::new(),
        }
    }

    pub fn skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// Parser output: the matched command (if any) plus the extracted parameters.
/// A parameter with neither a value nor a default is simply absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCommand {
    pub command: Option<String>,
    pub params: HashMap<String, ParamValue>,
}

impl ParsedCommand {
    /// The "not a command" result.
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.params.get(name) {
            Some(ParamValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.params.get(name) {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Collapse a text parameter to a list. Empty strings (the usual "no
    /// value" default) yield an empty list.
    pub fn text_list(&self, name: &str) -> Vec<String> {
        match self.params.get(name) {
            Some(ParamValue::Text(s)) if !s.is_empty() => vec![s.clone()],
            Some(ParamValue::TextList(list)) => list.clone(),
            _ => Vec::new(),
        }
    }

    pub fn number_list(&self, name: &str) -> Vec<f64> {
        match self.params.get(name) {
            Some(ParamValue::Number(n)) => vec![*n],
            Some(ParamValue::NumberList(list)) => list.clone(),
            _ => Vec::new(),
        }
    }
}
