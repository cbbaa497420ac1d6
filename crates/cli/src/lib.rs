//! # Homestretch CLI
//!
//! Admin command-line tool for the homepage sections.
//!
//! ## Commands
//!
//! - `login` / `logout` - store or forget the admin token
//! - `list`, `show` - read sections
//! - `add`, `toggle`, `move`, `edit`, `rename`, `remove`, `upload` - change
//!   sections through the section editor
//! - `render` - draw the homepage locally from the server's sections
//!

pub mod args;
pub mod commands;
pub mod config;
pub mod output;

pub use args::{Cli, Command};
pub use config::CliConfig;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");
