use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::cli::{Args, CliCommand};
use crate::command::Command;
use crate::config::CommandFile;
use crate::errors::CmdlineError;
use crate::handlers::{BoundArguments, HandlerRegistry};
use crate::logging::init_logging;
use crate::parser::CommandParser;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Parses arguments, installs logging and dispatches to `check` or `run`.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitStatus::ConfigError
            } else {
                ExitStatus::Success
            };
        }
    };

    init_logging(parsed.log_format, parsed.verbose);

    match parsed.command {
        CliCommand::Check(config) => run_check(&config.resolve()),
        CliCommand::Run { config, prefix, inputs } => {
            run_dispatch(&config.resolve(), prefix, inputs)
        }
    }
}

fn run_check(path: &Path) -> ExitStatus {
    let mut parser = CommandParser::default();
    if let Err(e) = parser.load_configuration(path) {
        report(&e);
        return ExitStatus::from(&e);
    }

    print!("{}", parser.help());
    ExitStatus::Success
}

fn run_dispatch(path: &Path, prefix: Option<char>, inputs: Vec<String>) -> ExitStatus {
    let commands = match CommandFile::load(path) {
        Ok(commands) => commands,
        Err(e) => {
            report(&e);
            return ExitStatus::from(&e);
        }
    };

    let handlers = match echo_handlers(&commands) {
        Ok(handlers) => handlers,
        Err(e) => {
            report(&e);
            return ExitStatus::ConfigError;
        }
    };

    let mut parser = CommandParser::new(handlers);
    if let Some(prefix) = prefix {
        parser = parser.with_prefix(prefix);
    }
    if let Err(e) = parser.load_commands(commands) {
        report(&e);
        return ExitStatus::from(&e);
    }

    let lines: Box<dyn Iterator<Item = io::Result<String>>> = if inputs.is_empty() {
        Box::new(io::stdin().lock().lines())
    } else {
        Box::new(inputs.into_iter().map(io::Result::Ok))
    };

    let mut status = ExitStatus::Success;
    for line in lines {
        let line = match line {
            Ok(line) => line,
            // The offending line has been consumed; carry on with the next one.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                report_input(&e);
                status = ExitStatus::Error;
                continue;
            }
            Err(e) => {
                report_input(&e);
                return ExitStatus::Error;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        debug!(input = %line, "Dispatching");
        if let Err(e) = parser.process(&line) {
            report(&e);
            status = ExitStatus::Error;
        }
    }
    status
}

/// Bind every locator in `commands` to a handler that prints the dispatch
fn echo_handlers(commands: &[Command]) -> Result<HandlerRegistry, CmdlineError> {
    let stdout = Arc::new(Mutex::new(io::stdout()));
    let mut handlers = HandlerRegistry::new();

    for command in commands {
        if handlers.contains(&command.handler_ref) {
            continue;
        }
        let locator = command.handler_ref.clone();
        let out = Arc::clone(&stdout);
        handlers.register(&command.handler_ref, move |args: &BoundArguments| -> anyhow::Result<()> {
            let mut out = out
                .lock()
                .map_err(|_| anyhow::anyhow!("stdout lock poisoned"))?;
            writeln!(out, "{}", format_dispatch(&locator, args))?;
            Ok(())
        })?;
    }

    Ok(handlers)
}

/// `<locator> name=value flag ...`
pub fn format_dispatch(locator: &str, args: &BoundArguments) -> String {
    let mut line = locator.to_string();
    for (name, value) in args.iter() {
        line.push(' ');
        match value {
            Some(value) => {
                line.push_str(name);
                line.push('=');
                line.push_str(value);
            }
            None => line.push_str(name),
        }
    }
    line
}

fn report(err: &CmdlineError) {
    debug!(error = ?err, "Dispatch failed");
    eprintln!("error: {}", err);
}

fn report_input(err: &io::Error) {
    debug!(error = ?err, "Failed to read input line");
    eprintln!("error: failed to read input: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        let args: BoundArguments = [
            ("name", Some("Ada".to_string())),
            ("loud", None),
        ]
        .into_iter()
        .collect();
        assert_eq!(format_dispatch("greetings/sayHello", &args), "greetings/sayHello name=Ada loud");
        assert_eq!(format_dispatch("net/ping", &BoundArguments::new()), "net/ping");
    }

    #[test]
    fn test_echo_handlers_dedupe_locators() {
        let commands = vec![
            Command::new("a", "shared/handler"),
            Command::new("b", "shared/handler"),
            Command::new("c", "other/handler"),
        ];
        let handlers = echo_handlers(&commands).unwrap();
        assert_eq!(handlers.len(), 2);
    }

    #[test]
    fn test_echo_handlers_reject_bad_locator() {
        let commands = vec![Command::new("a", "nolocator")];
        assert!(matches!(echo_handlers(&commands), Err(CmdlineError::InvalidLocator(_))));
    }
}
