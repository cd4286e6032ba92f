//! Error types for cmdline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cmdline
#[derive(Error, Debug)]
pub enum CmdlineError {
    #[error("Failed to read configuration {path}: {source}")]
    ConfigurationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigurationFormat(String),

    #[error("Command '{0}' is declared more than once")]
    DuplicateCommand(String),

    #[error("Argument '{argument}' is declared more than once for command '{command}'")]
    DuplicateArgument {
        command: String,
        argument: String,
    },

    #[error("Command '{0}' was not registered with the command parser")]
    CommandNotFound(String),

    #[error("Missing required argument '-{argument}' for command '{command}'")]
    MissingArgument {
        command: String,
        argument: String,
    },

    #[error("Argument '-{argument}' of command '{command}' expects a value")]
    MissingArgumentValue {
        command: String,
        argument: String,
    },

    #[error("Invalid value '{value}' for argument '-{argument}' of command '{command}': expected {expected}")]
    InvalidArgumentValue {
        command: String,
        argument: String,
        value: String,
        expected: &'static str,
    },

    #[error("Handler '{locator}' failed: {source}")]
    HandlerInvocation {
        locator: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Handler '{0}' has already been registered")]
    DuplicateHandler(String),

    #[error("Invalid handler locator '{0}': expected <namespace>/<symbol>")]
    InvalidLocator(String),
}

impl CmdlineError {
    /// Whether the error was raised while loading a command file
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CmdlineError::ConfigurationRead { .. }
                | CmdlineError::ConfigurationFormat(_)
                | CmdlineError::DuplicateCommand(_)
                | CmdlineError::DuplicateArgument { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CmdlineError>;
