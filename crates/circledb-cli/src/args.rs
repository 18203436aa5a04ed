use circledb_core::circle::CircleSort;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for circledb
#[derive(Debug, Parser)]
#[command(
    name = "circledb",
    version,
    about = "Find the thana number and circle of a Bihar village"
)]
pub struct CliArgs {
    /// District to load (one of `circledb districts`)
    #[arg(short = 'd', long, env = "CIRCLEDB_DISTRICT", default_value = "Patna", global = true)]
    pub district: String,

    /// Directory holding <district>.json or <district>.json.gz (default: bundled sample data)
    #[arg(long, env = "CIRCLEDB_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Fetch districts from the public district repository instead of a directory
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub remote: bool,

    /// Fetch districts from this content API instead (implies --remote)
    #[arg(long, env = "CIRCLEDB_REMOTE_URL", global = true, conflicts_with = "data_dir")]
    pub remote_url: Option<String>,

    /// Bearer token for --remote / --remote-url
    #[arg(long, env = "CIRCLEDB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Fuzzy threshold, 0.0 (exact) to 1.0 (anything)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log loader and search details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the districts datasets exist for
    Districts,

    /// Show a summary of the loaded district
    Stats,

    /// Search by village name, or by thana number when the query is all digits
    Search {
        query: String,

        /// Fuzzy hits to group (default 50)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the suggestion list for a partial query
    Suggest {
        query: String,

        /// Rows to show (default 8)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Villages with exactly this thana number
    Thana { number: String },

    /// Pick a village from the suggestions and show every village sharing its thana
    Select {
        query: String,

        /// Zero-based position in the suggestion list
        #[arg(short, long, default_value_t = 0)]
        pick: usize,
    },

    /// List the circles of the loaded district
    Circles,

    /// List the villages of one circle
    Circle {
        name: String,

        /// Keep villages whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Order by `name` or `thana`
        #[arg(short, long, default_value = "name")]
        sort: CircleSort,
    },
}
