//! # Command Parser
//!
//! Maps raw message text plus the registered skill catalog to a structured
//! [`ParsedCommand`]. Parsing is pure and total: no I/O, no hidden state,
//! and malformed input degrades to the "no match" result instead of an error.
//!
//! The whole input is lower-cased before tokenizing, so quoted spans and
//! prompt payloads lose their case as well. This is long-standing behavior
//! that handlers rely on; do not "fix" it here.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::domain::types::{ParamKind, ParamSpec, ParamValue, ParsedCommand, Skill, SkillGroup};

/// Parse `text` against the catalog.
///
/// Text that does not start with `/` is not a command and yields
/// `command: None` with empty params. Trigger resolution is first-match-wins
/// across groups in order, then skills within each group in order; a skill
/// matches when one of its triggers is a prefix of (or equal to) the first
/// token. The canonical command name of the matched skill is reported.
pub fn parse(text: &str, groups: &[SkillGroup]) -> ParsedCommand {
    if !text.starts_with('/') {
        return ParsedCommand::no_match();
    }

    // Canonicalize smart quotes so quoted spans survive tokenization.
    let text = text.to_lowercase().replace(['\u{201c}', '\u{201d}'], "\"");

    let tokens = tokenize(&text);
    let Some(first) = tokens.first() else {
        return ParsedCommand::no_match();
    };

    let candidate = first.strip_prefix('/').unwrap_or(first);
    let prefixed = format!("/{candidate}");

    let Some(skill) = resolve(&prefixed, groups) else {
        return ParsedCommand::no_match();
    };

    let mut params = HashMap::new();
    let mut used: HashSet<usize> = HashSet::new();
    // Token 0 is the command itself; no parameter may claim it.
    used.insert(0);

    for spec in &skill.params {
        match extract(spec, &tokens, &mut used) {
            Some(value) => {
                params.insert(spec.name.clone(), value);
            }
            None => {
                if let Some(default) = &spec.default {
                    params.insert(spec.name.clone(), default.clone());
                }
            }
        }
    }

    ParsedCommand {
        command: Some(skill.command.clone()),
        params,
    }
}

/// Split on whitespace, except inside single-, double- or backtick-quoted
/// spans, which are kept as one token including their delimiters.
fn tokenize(text: &str) -> Vec<String> {
    let pattern = Regex::new(r#"[^\s"']+|"([^"]*)"|'([^']*)'|`([^`]*)`"#).unwrap();
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn resolve<'a>(prefixed: &str, groups: &'a [SkillGroup]) -> Option<&'a Skill> {
    for group in groups {
        for skill in &group.skills {
            if skill
                .triggers
                .iter()
                .any(|t| prefixed.starts_with(&t.to_lowercase()))
            {
                return Some(skill);
            }
        }
    }
    None
}

/// Extract one parameter value according to its kind, considering only
/// unconsumed tokens. Consumed token indices go into `used` so that no token
/// satisfies two parameters within a single parse.
fn extract(spec: &ParamSpec, tokens: &[String], used: &mut HashSet<usize>) -> Option<ParamValue> {
    match spec.kind {
        ParamKind::String if spec.allowed_values.is_empty() => {
            let idx = (0..tokens.len()).find(|i| !used.contains(i))?;
            used.insert(idx);
            Some(ParamValue::Text(tokens[idx].clone()))
        }
        ParamKind::Quoted => {
            let quoted = Regex::new(r#"^["'`].*["'`]$"#).unwrap();
            let idx = (0..tokens.len())
                .find(|i| !used.contains(i) && quoted.is_match(&tokens[*i]))?;
            used.insert(idx);
            let token = &tokens[idx];
            // Delimiters are ASCII quote characters, so byte slicing is safe.
            Some(ParamValue::Text(token[1..token.len() - 1].to_string()))
        }
        ParamKind::Url => {
            let idx = (0..tokens.len()).find(|i| {
                !used.contains(i)
                    && (tokens[*i].starts_with("http://") || tokens[*i].starts_with("https://"))
            })?;
            used.insert(idx);
            Some(ParamValue::Text(tokens[idx].clone()))
        }
        ParamKind::Prompt => {
            // The whole tail of the message, space-joined. Does not consume
            // individual tokens; designed to be the only/last param.
            Some(ParamValue::Text(tokens.get(1..).unwrap_or(&[]).join(" ")))
        }
        ParamKind::Username => {
            let handle = r"@[a-z][a-z0-9_-]*|[a-z0-9-]+\.eth";
            let username = Regex::new(&format!(r"^({handle})(,({handle}))*$")).unwrap();
            let mut found = Vec::new();
            for (idx, token) in tokens.iter().enumerate() {
                if used.contains(&idx) || !username.is_match(token) {
                    continue;
                }
                used.insert(idx);
                found.extend(token.split(',').map(|u| u.trim().to_string()));
            }
            if found.is_empty() {
                None
            } else if spec.plural {
                Some(ParamValue::TextList(found))
            } else {
                Some(ParamValue::Text(found.swap_remove(0)))
            }
        }
        ParamKind::Address => {
            let address = Regex::new(r"^0x[0-9a-f]{40}(,0x[0-9a-f]{40})*$").unwrap();
            let mut found = Vec::new();
            for (idx, token) in tokens.iter().enumerate() {
                if used.contains(&idx) || !address.is_match(token) {
                    continue;
                }
                used.insert(idx);
                found.extend(token.split(',').map(|a| a.trim().to_string()));
            }
            match found.len() {
                0 => None,
                1 => Some(ParamValue::Text(found.swap_remove(0))),
                _ => Some(ParamValue::TextList(found)),
            }
        }
        ParamKind::Number => {
            let mut found = Vec::new();
            for (idx, token) in tokens.iter().enumerate() {
                if used.contains(&idx) || leading_float(token).is_none() {
                    continue;
                }
                used.insert(idx);
                found.extend(token.split(',').filter_map(|n| leading_float(n.trim())));
            }
            match found.len() {
                0 => None,
                1 => Some(ParamValue::Number(found[0])),
                _ => Some(ParamValue::NumberList(found)),
            }
        }
        // A string spec with a closed value set: the first unconsumed token
        // that is a member of the set.
        ParamKind::String => {
            let idx = (0..tokens.len()).find(|i| {
                !used.contains(i)
                    && spec
                        .allowed_values
                        .iter()
                        .any(|v| v.eq_ignore_ascii_case(&tokens[*i]))
            })?;
            used.insert(idx);
            Some(ParamValue::Text(tokens[idx].clone()))
        }
    }
}

/// Parse the longest numeric prefix of `s`, `parseFloat`-style: "10usdc"
/// yields 10, "0x1a" yields 0, a token with no numeric prefix yields None.
fn leading_float(s: &str) -> Option<f64> {
    let mut ends: Vec<usize> = s.char_indices().map(|(i, _)| i).skip(1).collect();
    ends.push(s.len());
    for end in ends.into_iter().rev() {
        if let Ok(value) = s[..end].parse::<f64>() {
            // f64 parsing accepts "inf", "infinity" and "nan"; parseFloat
            // rejects those words, so only finite values count.
            if value.is_finite() {
                return Some(value);
            }
        }
    }
    None
}
