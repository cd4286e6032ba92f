//! Exit status codes for the CLI
//!
//! - 0: every input dispatched successfully
//! - 1: at least one input failed (unknown command, bad arguments, handler error)
//! - 2: usage error, or the command file could not be read or is malformed

use std::process::{ExitCode, Termination};
use crate::errors::CmdlineError;

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    /// Command file unreadable or invalid
    ConfigError = 2,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl From<&CmdlineError> for ExitStatus {
    fn from(err: &CmdlineError) -> Self {
        if err.is_configuration_error() {
            ExitStatus::ConfigError
        } else {
            ExitStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_error() {
        let config = CmdlineError::ConfigurationFormat("missing".into());
        assert_eq!(ExitStatus::from(&config), ExitStatus::ConfigError);

        let dispatch = CmdlineError::CommandNotFound("nope".into());
        assert_eq!(ExitStatus::from(&dispatch), ExitStatus::Error);
    }
}
