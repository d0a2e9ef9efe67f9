//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Interactive organizational chart: build, inspect and simulate collapsible org trees
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (replaces ./.orgchart.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the full hierarchy, ignoring collapse state
    Tree {
        /// Records file (JSON array or GraphQL response)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the rendered chart after applying toggles
    View {
        /// Records file (JSON array or GraphQL response)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node id to toggle, in order (repeatable)
        #[arg(short, long = "toggle", value_name = "ID")]
        toggles: Vec<String>,
        /// Expand every organization before toggling
        #[arg(long)]
        expand_all: bool,
    },

    /// Replay toggles on a virtual clock, printing highlight and scroll effects
    Simulate {
        /// Records file (JSON array or GraphQL response)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node id to toggle, in order (repeatable)
        #[arg(short, long = "toggle", value_name = "ID", required = true)]
        toggles: Vec<String>,
        /// Milliseconds between toggles
        #[arg(short, long, default_value_t = 250)]
        interval_ms: u64,
    },

    /// Validate records and print statistics
    Check {
        /// Records file (JSON array or GraphQL response)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
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
    /// Print the effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Print config file locations
    Path,
}
