//! cmdline library interface
//!
//! Declarative command dispatch: commands and their arguments are declared in
//! a command file, loaded into a [`CommandParser`], and matched against raw
//! input lines such as `!greet -name Ada`. Each command names a handler
//! locator; hosts register the handlers themselves in a [`HandlerRegistry`].
//!
//! ```no_run
//! use cmdline::{BoundArguments, CommandParser, HandlerRegistry};
//!
//! # fn main() -> cmdline::Result<()> {
//! let mut handlers = HandlerRegistry::new();
//! handlers.register("greetings/sayHello", |args: &BoundArguments| -> anyhow::Result<()> {
//!     println!("Hello, {}!", args.get("name").unwrap_or("world"));
//!     Ok(())
//! })?;
//!
//! let mut parser = CommandParser::new(handlers).with_prefix('!');
//! parser.load_configuration("commands.yaml")?;
//! parser.process("!greet -name Ada")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`command`] - Command and argument descriptors, value extraction
//! - [`handlers`] - Handler locators, registration and bound arguments
//! - [`parser`] - Registry construction and input dispatch
//! - [`config`] - Command file formats
//! - [`errors`] - Error types (CmdlineError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Binary entry logic

pub mod cli;
pub mod command;
pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod status;

pub use command::{Argument, Command, ValueKind, ValueType};
pub use config::ConfigFormat;
pub use errors::{CmdlineError, Result};
pub use handlers::{BoundArguments, Handler, HandlerLocator, HandlerRegistry};
pub use parser::CommandParser;
