//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::render::RendererKind;

/// Build and render hierarchical navigation menus from JSON or TOML sources
#[derive(Parser, Debug)]
#[command(name = "navmenu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding .navmenu.toml (default: the source file's directory)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a menu to stdout
    Render {
        /// Menu source file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
        /// Menu id (default: last menu in the source)
        #[arg(short, long)]
        menu: Option<String>,
        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<RendererKind>,
        /// Mark an item active (repeatable)
        #[arg(short, long = "active", value_name = "KEY")]
        active: Vec<String>,
        /// Renderer option override, e.g. menuClass=nav or whiteSpaces=4 (repeatable)
        #[arg(short, long = "option", value_name = "NAME=VALUE", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },

    /// Show the sorted menu as a tree
    Tree {
        /// Menu source file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
        /// Menu id (default: last menu in the source)
        #[arg(short, long)]
        menu: Option<String>,
    },

    /// Validate a source file
    Check {
        /// Menu source file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
    },

    /// Print normalized source records as JSON
    Export {
        /// Menu source file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
        /// Export only this menu
        #[arg(short, long)]
        menu: Option<String>,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}

/// Split `NAME=VALUE`; the value is typed later against the renderer's defaults.
pub fn parse_option(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing option name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}
