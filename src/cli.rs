use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default directory holding the curated per-table CSV files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default path of the generated SQL script.
pub const DEFAULT_SQL_OUT: &str = "create_and_populate.sql";

/// Consumption data from this year onward is projected, not historical.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2024;

#[derive(Parser, Debug)]
#[command(name = "agrifood-to-sql")]
#[command(version, about = "Normalize agri-food datasets and emit a SQL load script")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize raw datasets into curated per-table CSV files
    Normalize {
        /// Directory containing the raw source CSV files
        raw_dir: PathBuf,

        /// Directory to write the curated tables into
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        out_dir: PathBuf,

        /// Consumption rows with this year or later are dropped as projections
        #[arg(short, long, default_value_t = DEFAULT_CUTOFF_YEAR)]
        cutoff_year: i32,
    },

    /// Emit the SQL script from already-curated tables
    Emit {
        /// Directory containing the curated per-table CSV files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Output SQL script path
        #[arg(short, long, default_value = DEFAULT_SQL_OUT)]
        output: PathBuf,
    },

    /// Normalize and emit in one run
    Run {
        /// Directory containing the raw source CSV files
        raw_dir: PathBuf,

        /// Directory to write the curated tables into
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        out_dir: PathBuf,

        /// Output SQL script path
        #[arg(short, long, default_value = DEFAULT_SQL_OUT)]
        output: PathBuf,

        /// Consumption rows with this year or later are dropped as projections
        #[arg(short, long, default_value_t = DEFAULT_CUTOFF_YEAR)]
        cutoff_year: i32,
    },

    /// List all target table names
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
