//! Common test utilities for cmdline integration tests
//!
//! This module provides shared test infrastructure including:
//! - Command file fixtures written to temporary directories
//! - Spy handlers that record every dispatch
//! - CLI invocation helpers

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use cmdline::{BoundArguments, HandlerRegistry};

/// Command file used by most tests
pub const GREET_YAML: &str = r#"
commands:
  - command: greet
    implementation: greetings/sayHello
    description: Say hello to someone
    arguments:
      - type: string
        input_type: value
        name: name
        friendly_name: Name
        description: Who to greet
        required: false
  - command: deploy
    implementation: ops/deploy
    description: Deploy a service
    arguments:
      - type: string
        input_type: value
        name: service
        friendly_name: Service
        description: Service to deploy
        required: true
      - type: integer
        input_type: value
        name: replicas
        friendly_name: Replicas
        description: Number of replicas
        required: true
      - type: string
        input_type: flag
        name: dry
        friendly_name: Dry run
        description: Print instead of deploying
        required: false
"#;

/// A command file on disk, removed when dropped
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(file_name: &str, content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join(file_name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        Self { dir, path }
    }

    pub fn yaml(content: &str) -> Self {
        Self::new("commands.yaml", content)
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("Non UTF-8 temp path")
    }
}

/// Records the bound arguments of every call made to the handlers it registers
#[derive(Clone, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<(String, BoundArguments)>>>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a recording handler for each locator
    pub fn registry(&self, locators: &[&str]) -> HandlerRegistry {
        let mut handlers = HandlerRegistry::new();
        for locator in locators {
            let calls = Arc::clone(&self.calls);
            let name = locator.to_string();
            handlers
                .register(locator, move |args: &BoundArguments| -> anyhow::Result<()> {
                    calls.lock().unwrap().push((name.clone(), args.clone()));
                    Ok(())
                })
                .expect("Failed to register spy handler");
        }
        handlers
    }

    pub fn calls(&self) -> Vec<(String, BoundArguments)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<BoundArguments> {
        self.calls.lock().unwrap().last().map(|(_, args)| args.clone())
    }
}

/// Result of running the cmdline binary
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliResponse {
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

/// Run the cmdline binary with the given arguments
pub fn cmdline(args: &[&str]) -> CliResponse {
    cmdline_with_stdin(args, None)
}

/// Run the cmdline binary, feeding `stdin` when given
pub fn cmdline_with_stdin(args: &[&str], stdin: Option<&str>) -> CliResponse {
    cmdline_with_stdin_bytes(args, stdin.map(str::as_bytes))
}

/// Like [`cmdline_with_stdin`] for input that need not be valid UTF-8
pub fn cmdline_with_stdin_bytes(args: &[&str], stdin: Option<&[u8]>) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdline"));
    cmd.args(args);
    cmd.env_remove("CMDLINE_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = if let Some(input) = stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(input).expect("Failed to write to stdin");
        }
        child.wait_with_output().expect("Failed to wait for command")
    } else {
        cmd.stdin(Stdio::null());
        cmd.output().expect("Failed to run command")
    };

    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}
