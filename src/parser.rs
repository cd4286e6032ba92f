//! Command parser
//!
//! [`CommandParser`] owns the command registry built from a command file and
//! dispatches raw input lines to registered handlers.
//!
//! Input is split on single spaces; runs of spaces are collapsed and there is
//! no quoting, so a value cannot contain a space. The first token, minus the
//! optional prefix character, names the command. The remaining tokens are
//! scanned for `-<argument>` flags in any order; a repeated flag resolves to
//! its first occurrence.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::command::Command;
use crate::config::{CommandFile, ConfigFormat};
use crate::errors::{CmdlineError, Result};
use crate::handlers::{BoundArguments, HandlerRegistry};

/// Immutable name → command mapping
pub type Registry = BTreeMap<String, Command>;

/// Parses user input against a set of registered commands
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    registry: Arc<Registry>,
    handlers: Arc<HandlerRegistry>,
    prefix: Option<char>,
}

impl CommandParser {
    /// Create a parser with an empty registry
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            handlers: Arc::new(handlers),
            prefix: None,
        }
    }

    /// Require and strip a leading marker on the command token, e.g. `!greet`
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn prefix(&self) -> Option<char> {
        self.prefix
    }

    /// Load commands from a file, replacing the current registry.
    ///
    /// The registry is left untouched if loading fails.
    pub fn load_configuration<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let commands = CommandFile::load(path.as_ref())?;
        self.install(commands)?;
        info!(path = %path.as_ref().display(), commands = self.registry.len(), "Loaded command file");
        Ok(())
    }

    /// Load commands from an in-memory document
    pub fn load_str(&mut self, content: &str, format: ConfigFormat) -> Result<()> {
        let commands = CommandFile::parse(content, format)?;
        self.install(commands)?;
        info!(commands = self.registry.len(), "Loaded commands");
        Ok(())
    }

    /// Replace the registry with already-built descriptors
    pub fn load_commands(&mut self, commands: Vec<Command>) -> Result<()> {
        self.install(commands)
    }

    fn install(&mut self, commands: Vec<Command>) -> Result<()> {
        let registry = build_registry(commands)?;

        // A parser without handlers is only used to inspect command files.
        if !self.handlers.is_empty() {
            for command in registry.values() {
                if !self.handlers.contains(&command.handler_ref) {
                    warn!(
                        command = %command.name,
                        handler = %command.handler_ref,
                        "No handler registered for command"
                    );
                }
            }
        }

        self.registry = Arc::new(registry);
        Ok(())
    }

    /// Tokenize `input`, bind its arguments and invoke the matching handler
    pub fn process(&self, input: &str) -> Result<()> {
        let (command, bound) = self.resolve(input)?;
        command.execute(&bound, &self.handlers)
    }

    /// Resolve and bind `input` without invoking the handler
    pub fn resolve(&self, input: &str) -> Result<(&Command, BoundArguments)> {
        let tokens = tokenize(input);
        let Some((first, rest)) = tokens.split_first() else {
            return Err(CmdlineError::CommandNotFound(String::new()));
        };
        let first = *first;

        let name = match self.prefix {
            Some(prefix) => first
                .strip_prefix(prefix)
                .ok_or_else(|| CmdlineError::CommandNotFound(first.to_string()))?,
            None => first,
        };

        let command = self
            .registry
            .get(name)
            .ok_or_else(|| CmdlineError::CommandNotFound(name.to_string()))?;

        let bound = command.bind(rest)?;
        debug!(command = %command.name, args = bound.len(), "Resolved input");
        Ok((command, bound))
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.registry.get(name)
    }

    /// Registered commands ordered by name
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.registry.values()
    }

    /// Shared read-only view of the registry
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Listing of every command with its usage and argument descriptions
    pub fn help(&self) -> String {
        if self.registry.is_empty() {
            return "No commands registered.\n".to_string();
        }

        let marker = self.prefix.map(String::from).unwrap_or_default();
        let mut help = String::from("Commands:\n");
        for command in self.registry.values() {
            help.push_str(&format!("\n  {}{}\n", marker, command.usage()));
            if !command.description.is_empty() {
                help.push_str(&format!("      {}\n", command.description));
            }
            for argument in &command.arguments {
                let required = if argument.required { " (required)" } else { "" };
                help.push_str(&format!(
                    "      -{:<16} {}{}\n",
                    argument.name, argument.friendly_name, required
                ));
                if !argument.description.is_empty() {
                    help.push_str(&format!("      {:<17} {}\n", "", argument.description));
                }
            }
        }
        help
    }
}

/// Split an input line on spaces, dropping empty tokens
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split(' ').filter(|t| !t.is_empty()).collect()
}

fn build_registry(commands: Vec<Command>) -> Result<Registry> {
    let mut registry = Registry::new();
    for command in commands {
        let mut seen = HashSet::new();
        for argument in &command.arguments {
            if !seen.insert(argument.name.as_str()) {
                return Err(CmdlineError::DuplicateArgument {
                    command: command.name.clone(),
                    argument: argument.name.clone(),
                });
            }
        }

        if registry.contains_key(&command.name) {
            return Err(CmdlineError::DuplicateCommand(command.name));
        }
        registry.insert(command.name.clone(), command);
    }
    Ok(registry)
}
