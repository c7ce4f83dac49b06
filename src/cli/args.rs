//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::TopicDisplayMode;

/// Topic tree synthesis for visualization panels
#[derive(Parser, Debug)]
#[command(name = "topictree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .topictree.toml (default: cwd)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "TOPICTREE_CONFIG_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub config_dir: Option<PathBuf>,

    /// Base tree file, TOML or JSON (default: base_tree from config)
    #[arg(short = 't', long = "tree", global = true, value_hint = ValueHint::FilePath)]
    pub base_tree: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Inputs shared by commands that build a tree.
#[derive(Args, Debug, Default)]
pub struct TreeArgs {
    /// Display mode: show-tree, show-all, show-selected, show-available
    #[arg(short, long)]
    pub mode: Option<TopicDisplayMode>,

    /// File listing available topics (JSON array or one per line)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub topics: Option<PathBuf>,

    /// Available topic, repeatable
    #[arg(short = 'T', long = "topic")]
    pub topic: Vec<String>,

    /// Checked selection id (t:<topic>, x:<extension>, name:<group>), repeatable
    #[arg(short, long)]
    pub checked: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the displayed tree for the given topics and selection
    Build {
        #[command(flatten)]
        tree: TreeArgs,
        /// Print tree and checked ids as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the flattened leaves of the base tree
    Flatten {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split selection ids into topics and extensions
    Selection {
        /// Selection ids
        ids: Vec<String>,
    },

    /// Strip the second source prefix from topic names
    Canonical {
        /// Topic names
        names: Vec<String>,
    },

    /// Build the tree and show which topics are visible
    Visibility {
        #[command(flatten)]
        tree: TreeArgs,
        /// Hidden topic, repeatable
        #[arg(short = 'H', long = "hidden")]
        hidden: Vec<String>,
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
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a template config file
    Template,
}
