//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `ckan-repair`.
#[derive(Debug, Parser)]
#[command(name = "ckan-repair", version, about = "Maintenance tasks for a CKAN portal")]
pub struct Cli {
    /// Load environment variables from this file instead of `.env`.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Repair broken resource URLs of private datasets.
    Repair {
        /// Dataset id or name; may be repeated.
        #[arg(long = "dataset-id", alias = "dataset_id", value_name = "ID", required = true)]
        dataset_ids: Vec<String>,
        /// Validate corrected URLs without patching them.
        #[arg(long)]
        dry_run: bool,
        /// Repair at most this many invalid resources per dataset.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Create the organizations listed in a defaults file.
    Bootstrap {
        /// YAML file with an `organizations` list.
        #[arg(long, default_value = "initial.yaml", value_name = "PATH")]
        file: PathBuf,
    },
}
