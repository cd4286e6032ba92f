//! CLI argument definitions using clap

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cmdline - dispatch text commands declared in a command file
#[derive(Parser, Debug, Clone)]
#[command(name = "cmdline", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Output format for structured logging: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Validate a command file and list its commands
    Check(ConfigArgs),

    /// Dispatch input lines against a command file without real handlers.
    ///
    /// Every command is bound to a handler that prints its locator and the
    /// bound arguments. Inputs are read from stdin, one per line, when none
    /// are given on the command line.
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Marker stripped from the command token, e.g. '!'
        #[arg(long = "prefix", value_name = "CHAR")]
        prefix: Option<char>,

        /// Input lines to dispatch
        #[arg(value_name = "INPUT")]
        inputs: Vec<String>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConfigArgs {
    /// Command file (YAML, TOML or JSON by extension)
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "CMDLINE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Explicit path, falling back to the per-user default location
    pub fn resolve(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::default_config_path)
    }
}

/// Log format for structured output (CI/CD)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
