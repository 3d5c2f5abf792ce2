use std::collections::HashMap;

pub mod category;
pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(config::definitions());
    commands.extend(transaction::definitions());
    commands.extend(category::definitions());
    commands.extend(report::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Splits `<action> [args...]` for commands with subcommands.
pub(crate) fn split_action<'a>(
    args: &'a [&'a str],
    usage: &str,
) -> Result<(String, &'a [&'a str]), CommandError> {
    match args.split_first() {
        Some((action, rest)) => Ok((action.to_ascii_lowercase(), rest)),
        None => Err(CommandError::InvalidArguments(format!("usage: {}", usage))),
    }
}

/// Parses trailing `key=value` pairs.
pub(crate) fn parse_assignments<'a>(
    args: &[&'a str],
) -> Result<Vec<(String, &'a str)>, CommandError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.trim().to_ascii_lowercase(), value))
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "expected key=value, got `{}`",
                        arg
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_definition_order() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"help"));
        assert!(names.contains(&"transaction"));
        assert!(names.contains(&"chart"));
        assert_eq!(registry.iter().count(), names.len());
    }

    #[test]
    fn assignments_require_equals_sign() {
        let parsed = parse_assignments(&["amount=12", "description=Bus fare"]).unwrap();
        assert_eq!(parsed[1], ("description".to_string(), "Bus fare"));
        assert!(parse_assignments(&["amount"]).is_err());
    }
}
