//! Command descriptors
//!
//! A [`Command`] is one named action declared in the command file: its
//! display metadata, its [`Argument`] list in declaration order and the
//! locator of the handler that implements it.

pub mod argument;

pub use argument::{Argument, ValueKind, ValueType};

use serde::Deserialize;
use tracing::debug;
use crate::errors::{CmdlineError, Result};
use crate::handlers::{BoundArguments, HandlerRegistry};

/// A named top-level action
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Command {
    #[serde(rename = "command")]
    pub name: String,

    pub description: String,

    /// Handler locator, `<namespace>/<symbol>`
    #[serde(rename = "implementation")]
    pub handler_ref: String,

    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Command {
    pub fn new(name: &str, handler_ref: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            handler_ref: handler_ref.to_string(),
            arguments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Bind the tokens following the command name to this command's arguments.
    ///
    /// Arguments are visited in declaration order and the first failure aborts.
    pub fn bind(&self, tokens: &[&str]) -> Result<BoundArguments> {
        let mut bound = BoundArguments::new();
        for argument in &self.arguments {
            if let Some((name, value)) = argument.extract_value(&self.name, tokens)? {
                bound.insert(name, value);
            }
        }
        Ok(bound)
    }

    /// Invoke the registered handler with the bound arguments
    pub fn execute(&self, bound: &BoundArguments, handlers: &HandlerRegistry) -> Result<()> {
        let handler = handlers.get(&self.handler_ref).ok_or_else(|| {
            CmdlineError::HandlerInvocation {
                locator: self.handler_ref.clone(),
                source: anyhow::anyhow!("no handler registered for this locator"),
            }
        })?;

        debug!(command = %self.name, handler = %self.handler_ref, args = bound.len(), "Invoking handler");

        handler
            .call(bound)
            .map_err(|source| CmdlineError::HandlerInvocation {
                locator: self.handler_ref.clone(),
                source,
            })
    }

    /// One-line usage, e.g. `greet -to <Recipient> [-loud]`
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for argument in &self.arguments {
            usage.push(' ');
            usage.push_str(&argument.usage());
        }
        usage
    }
}
