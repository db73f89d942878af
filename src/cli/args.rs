//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Classify every key of the target locales against the reference
//! - `keys`: List the leaf key paths of one locale
//! - `merge`: Merge a JSON patch into a locale file
//! - `fill`: Seed missing keys of a locale from the reference
//! - `init`: Initialize loctree configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|common| common.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Check(cmd)) => Some(&cmd.common),
            Some(Command::Keys(cmd)) => Some(&cmd.common),
            Some(Command::Merge(cmd)) => Some(&cmd.common),
            Some(Command::Fill(cmd)) => Some(&cmd.common),
            Some(Command::Init) | Some(Command::Serve) | None => None,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding the locale files (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Target locales to check (default: every locale except the reference)
    pub locales: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Locale to list (default: the reference locale)
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    /// Target locale
    pub locale: String,

    /// JSON patch file: {"path": value, ...} or [["path", value], ...]
    #[arg(long)]
    pub patch: PathBuf,

    /// Actually write the file (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Write even when the merge replaces a mapping or a scalar parent
    #[arg(long)]
    pub allow_overrides: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FillCommand {
    /// Target locale
    pub locale: String,

    /// Actually write the file (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translation completeness against the reference locale
    Check(CheckCommand),
    /// List every leaf key path of a locale
    Keys(KeysCommand),
    /// Merge a JSON patch into a locale file
    Merge(MergeCommand),
    /// Add every missing key to a locale, seeded from the reference
    Fill(FillCommand),
    /// Initialize a new .loctreerc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
