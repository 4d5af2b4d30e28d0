//! substvar - command line front end
//!
//! Wires the file system, XML and properties adapters into the tokenize and
//! extract use cases. `main.rs` only parses arguments and reports errors.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;

pub use cli::{Cli, Command};
pub use settings::{Loader, Settings};
