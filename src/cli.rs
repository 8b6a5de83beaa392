use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "navigate-city")]
#[command(version, about = "City and point-of-interest browsing backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drop and rebuild the database from CSV seed files
    Rebuild {
        /// SQLite database path
        db: PathBuf,

        /// Directory containing the CSV seed files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// List distinct cities, countries and continents
    Places {
        /// SQLite database path
        db: PathBuf,
    },

    /// Look up a category filtered by a location dimension
    Lookup {
        /// SQLite database path
        db: PathBuf,

        /// Location dimension: city_name, country or continent
        dimension: String,

        /// Value to match, e.g. "France"
        value: String,

        /// Category: museum, park, sight, restaurant or food
        category: String,
    },

    /// Fetch a small random sample of a category
    Random {
        /// SQLite database path
        db: PathBuf,

        /// Category: museum, park, sight, restaurant or food
        category: String,
    },

    /// List all table names in the schema
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
