use crate::config::OutputFormat;
use crate::permission::Syntax;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod handlers;
pub mod types;

pub use handlers::dispatch;
pub use types::CommandResult;

/// `gcp-permissions` - Catalog of GCP IAM permissions across V1 and V2 names.
#[derive(Parser, Debug)]
#[command(name = "gcp-permissions")]
#[command(version)]
#[command(about = "Look up GCP IAM permissions by V1 or V2 name.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.gcp-permission-mappings/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Scrape the IAM documentation instead of using bundled data
    #[arg(long, global = true)]
    pub live: bool,

    /// Output format (text, json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// More logging (debug)
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Less logging (warnings only)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List permissions in load order
    List {
        /// Only permissions of this service
        #[arg(long)]
        service: Option<String>,

        /// Only permissions usable in deny policies
        #[arg(long)]
        deny_only: bool,

        /// Print names in one syntax only (v1, v2); permissions without it are skipped
        #[arg(long)]
        syntax: Option<Syntax>,

        /// Order by service and action instead of load order
        #[arg(long)]
        sorted: bool,
    },

    /// Resolve a V1 or V2 name, including non-standard V1 names
    Lookup {
        /// Permission name in either syntax
        name: String,
    },

    /// Mechanically convert a V2 name to its V1 spelling
    Convert {
        /// V2 permission name (service.googleapis.com/action)
        name: String,
    },

    /// Show counts by syntax and deny support
    Stats,

    /// Report inconsistencies in the loaded data
    Audit,
}
