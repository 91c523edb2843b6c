use clap::{Parser, Subcommand};

/// CLI arguments for coverdb-cli
#[derive(Debug, Parser)]
#[command(
    name = "coverdb",
    version,
    about = "CLI for querying the coverdb-core coverage-area database and resolving addresses"
)]
pub struct CliArgs {
    /// Path to the input dataset (.json, .json.gz, .bin or .bin.gz)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Optional comma-separated list of city names to filter on (e.g. Dhaka,Sylhet)
    #[arg(short = 'f', long = "filter", global = true)]
    pub filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the database contents
    Stats,

    /// List all cities
    Cities,

    /// List all zones for a given city
    Zones {
        /// City name (case-insensitive)
        city: String,
    },

    /// Search coverage areas containing a substring
    Search {
        /// Substring to search (case-insensitive)
        query: String,
    },

    /// Resolve a free-form delivery address to a coverage area
    Resolve {
        /// The address to resolve, e.g. "House 5, Road 11, Gulshan 1, Dhaka"
        address: String,

        /// Also print the matching strategy and score
        #[arg(long)]
        explain: bool,
    },

    /// Write the binary cache for the loaded dataset
    Cache {
        /// Output path (.bin, or .bin.gz for a compressed cache)
        output: String,
    },
}
