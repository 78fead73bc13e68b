//! CLI argument parsing for ausflug
//!
//! Global flags: --data, --format, --quiet, --verbose, --log-level,
//! --log-json

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for ausflug commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

/// Ausflug - attraction catalog browser for the terminal
#[derive(Parser, Debug)]
#[command(name = "ausflug")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the attractions dataset (JSON array of records)
    #[arg(long, global = true, env = "AUSFLUG_DATA")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List attractions as a filtered, sorted table
    List(ListArgs),

    /// Show discovered columns and their default visibility
    Columns,

    /// List the entry-fee categories present in the dataset
    Categories,

    /// Manage favorite attractions
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },

    /// Resolve a place name or postal code to coordinates
    Locate {
        /// Place name or postal code
        place: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive substring match on the attraction name
    #[arg(long, short)]
    pub search: Option<String>,

    /// Entry-fee category filter (repeatable)
    #[arg(long, short = 'c', action = clap::ArgAction::Append)]
    pub category: Vec<String>,

    /// Only show favorites
    #[arg(long)]
    pub favorites_only: bool,

    /// Geocode a place and use it as the center point
    #[arg(long)]
    pub near: Option<String>,

    /// Explicit center point as "lat,lon" (skips geocoding)
    #[arg(long, conflicts_with = "near")]
    pub center: Option<String>,

    /// Radius in km around the center point
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Sort key: an attribute name, or "distance"
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Hide a column (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub hide_column: Vec<String>,

    /// Also show the default-hidden coordinate columns
    #[arg(long)]
    pub show_hidden: bool,
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Toggle the favorite mark on the record matching a name term
    Toggle {
        /// Case-insensitive substring of the attraction name; must
        /// match exactly one record
        term: String,
    },

    /// List favorite attractions
    List,

    /// Remove all favorite marks
    Clear,
}
