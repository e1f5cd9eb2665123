//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::Variant;

/// Category filter trees and sliding-window pagination for record listings
#[derive(Parser, Debug)]
#[command(name = "menu-controls")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "MENU_CONTROLS_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the category filter for a request
    Filter {
        /// Catalog of categories and records (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        catalog: PathBuf,

        /// Request query string, e.g. "demand[categories][0][uids]=2,3"
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Build the pagination for a listing
    Paginate {
        /// Number of items in the listing
        #[arg(long)]
        total: usize,

        /// Request query string, e.g. "page=3"
        #[arg(short, long, default_value = "")]
        query: String,

        /// Override the configured variant ("", "load-more", "infinite-scroll")
        #[arg(long)]
        variant: Option<Variant>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
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

    /// Print a commented config template
    Template,

    /// Show config paths
    Path,
}
