use clap::{Parser, Subcommand};

/// CLI arguments for worldmap
#[derive(Debug, Parser)]
#[command(
    name = "worldmap",
    version,
    about = "Drive the worldmap-core state machines from the terminal"
)]
pub struct CliArgs {
    /// JSON file merged over the built-in configuration
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override one setting, e.g. --set search.limit=3 (repeatable)
    #[arg(short = 's', long = "set", global = true, value_name = "PATH=JSON")]
    pub set: Vec<String>,

    /// Skip the boundary download; only the manual registry is available
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print every emitted effect as a JSON line
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a configuration value by dotted path (e.g. ui.searchButtonText)
    Config {
        /// Dotted path; omit for the whole tree
        path: Option<String>,
    },

    /// List the manually registered regions
    Manual,

    /// Run a search session, optionally activating one result
    Search {
        /// Country (English or localized) or city name
        query: String,

        /// Zero-based index of the result to activate
        #[arg(short = 'p', long = "pick")]
        pick: Option<usize>,
    },

    /// Select a region by its canonical English name
    Select {
        /// Canonical English name (e.g. France)
        name: String,
    },

    /// List loaded regions below the small-region threshold
    Small,

    /// Show a summary of the loaded regions
    Stats,
}
