//! # Skill Registry
//!
//! The validated, read-only skill catalog. Construction rejects malformed
//! catalogs (duplicate command names, duplicate triggers, duplicate param
//! names) so that parsing and dispatch never have to.

use anyhow::{Result, bail};
use std::collections::HashSet;

use crate::domain::types::{Skill, SkillGroup};

pub struct SkillRegistry {
    groups: Vec<SkillGroup>,
}

impl SkillRegistry {
    pub fn new(groups: Vec<SkillGroup>) -> Result<Self> {
        let mut seen_commands = HashSet::new();
        let mut seen_triggers = HashSet::new();
        for group in &groups {
            for skill in &group.skills {
                // Dispatch re-resolves skills by canonical name, so names
                // must be unique across the whole catalog, not just triggers.
                if !seen_commands.insert(skill.command.to_lowercase()) {
                    bail!("command name '{}' registered twice", skill.command);
                }
                if skill.triggers.is_empty() {
                    bail!("skill '{}' declares no triggers", skill.command);
                }
                for trigger in &skill.triggers {
                    if trigger.is_empty() {
                        bail!("skill '{}' declares an empty trigger", skill.command);
                    }
                    if !seen_triggers.insert(trigger.to_lowercase()) {
                        bail!(
                            "trigger '{}' registered twice (skill '{}')",
                            trigger,
                            skill.command
                        );
                    }
                }
                let mut names = HashSet::new();
                for param in &skill.params {
                    if !names.insert(param.name.as_str()) {
                        bail!(
                            "duplicate param '{}' in skill '{}'",
                            param.name,
                            skill.command
                        );
                    }
                }
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    /// Look up a skill by its canonical command name.
    pub fn find(&self, command: &str) -> Option<&Skill> {
        self.groups
            .iter()
            .flat_map(|g| g.skills.iter())
            .find(|s| s.command == command)
    }

    pub fn skill_count(&self) -> usize {
        self.groups.iter().map(|g| g.skills.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ParamKind, ParamSpec, SkillHandler, handler};

    fn noop() -> SkillHandler {
        handler(|_ctx| async { Ok(()) })
    }

    #[test]
    fn test_valid_catalog_accepted() {
        let registry = SkillRegistry::new(vec![
            SkillGroup::new("a", "@a", "")
                .skill(Skill::new("tip", noop()).triggers(&["/tip"]))
                .skill(Skill::new("pay", noop()).triggers(&["/pay"])),
        ])
        .unwrap();
        assert_eq!(registry.skill_count(), 2);
        assert!(registry.find("tip").is_some());
        assert!(registry.find("nope").is_none());
    }

    #[test]
    fn test_duplicate_trigger_rejected() {
        let result = SkillRegistry::new(vec![
            SkillGroup::new("a", "@a", "")
                .skill(Skill::new("tip", noop()).triggers(&["/tip"])),
            SkillGroup::new("b", "@b", "")
                .skill(Skill::new("tip2", noop()).triggers(&["/TIP"])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_command_name_rejected() {
        // Two skills sharing a canonical name would make the dispatcher's
        // by-name lookup ambiguous even with distinct triggers.
        let result = SkillRegistry::new(vec![
            SkillGroup::new("a", "@a", "")
                .skill(Skill::new("status", noop()).triggers(&["/status"])),
            SkillGroup::new("b", "@b", "")
                .skill(Skill::new("status", noop()).triggers(&["/st2"])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_skill_without_triggers_rejected() {
        let result = SkillRegistry::new(vec![
            SkillGroup::new("a", "@a", "").skill(Skill::new("tip", noop()).triggers(&[])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_param_name_rejected() {
        let result = SkillRegistry::new(vec![SkillGroup::new("a", "@a", "").skill(
            Skill::new("tip", noop())
                .triggers(&["/tip"])
                .param(ParamSpec::new("amount", ParamKind::Number))
                .param(ParamSpec::new("amount", ParamKind::String)),
        )]);
        assert!(result.is_err());
    }
}
