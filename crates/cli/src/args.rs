//! Command-line schema

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use homestretch_sections::ImageSlot;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "homestretch")]
#[command(about = "Manage the sections of the club homepage")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Homestretch server
    #[arg(long, global = true, env = "HOMESTRETCH_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file (defaults to <config dir>/homestretch/config.toml)
    #[arg(long, global = true, env = "HOMESTRETCH_CLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Token file (defaults to <config dir>/homestretch/token)
    #[arg(long, global = true, env = "HOMESTRETCH_TOKEN_FILE", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Homepage to work on
    #[arg(long, global = true, value_name = "UUID")]
    pub homepage: Option<Uuid>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the admin token for later commands
    Login {
        /// Token to store; read from stdin when omitted
        token: Option<String>,
    },

    /// Forget the stored admin token
    Logout,

    /// List the homepage sections in render order
    List {
        /// Only sections with this `type`
        #[arg(long = "type", value_name = "TYPE")]
        section_type: Option<String>,
    },

    /// Print one section as JSON
    Show {
        /// Section id or a unique prefix of it
        id: String,
    },

    /// Add a section with starter content at the end of the page
    Add {
        /// Component, e.g. `HeroSection`, `hero` or `call-to-action`
        component: String,
        name: String,
        /// Create it hidden from the public page
        #[arg(long)]
        disabled: bool,
    },

    /// Show a hidden section or hide a visible one
    Toggle { id: String },

    /// Move a section to a 1-based position
    Move {
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,
    },

    /// Change payload fields of a section
    #[command(group(
        clap::ArgGroup::new("changes").required(true).args(["set", "data_file"])
    ))]
    Edit {
        id: String,
        /// `key=value`; the value is parsed as JSON and falls back to a string
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Replace the whole payload with the JSON object in this file
        #[arg(long, value_name = "PATH", conflicts_with = "set")]
        data_file: Option<PathBuf>,
    },

    /// Rename a section
    Rename { id: String, name: String },

    /// Delete a section
    Remove { id: String },

    /// Upload an image into a section
    Upload {
        id: String,
        slot: SlotArg,
        file: PathBuf,
    },

    /// Render the homepage to HTML from the server's sections
    Render {
        /// Include disabled sections, marked as such
        #[arg(long)]
        preview: bool,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Whether the command needs the admin token
    pub fn needs_token(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::Logout
                | Command::List { .. }
                | Command::Show { .. }
                | Command::Render { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Hero,
    Story,
}

impl From<SlotArg> for ImageSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Hero => ImageSlot::Hero,
            SlotArg::Story => ImageSlot::Story,
        }
    }
}
