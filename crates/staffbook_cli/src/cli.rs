//! Command-line arguments.

use clap::{Parser, Subcommand};
use staffbook_core::{EmployeeField, EmployeeSort};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "staffbook",
    version,
    about = "Import employee spreadsheets into a local store, edit them and export them back"
)]
pub struct Cli {
    /// TOML configuration file (defaults to $STAFFBOOK_CONFIG when set)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite store file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error|off
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr otherwise
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import an .xlsx/.xls/.ods/.csv file into the store
    Import { file: PathBuf },
    /// Detect the layout of a spreadsheet without importing it
    Validate { file: PathBuf },
    /// Browse stored employees
    List {
        /// id|nom|email|salaire
        #[arg(long, default_value = "id")]
        sort: EmployeeSort,
        #[arg(long, default_value_t = staffbook_core::DEFAULT_PREVIEW_ROWS)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Ignore --limit and list everything
        #[arg(long)]
        all: bool,
    },
    /// Case-insensitive search over every text field
    Search {
        text: String,
        #[arg(long)]
        departement: Option<String>,
        #[arg(long)]
        poste: Option<String>,
        /// id|nom|email|salaire
        #[arg(long, default_value = "id")]
        sort: EmployeeSort,
    },
    /// Set one field of one employee
    Update {
        id: i64,
        /// nom|email|telephone|departement|poste|salaire
        field: EmployeeField,
        /// New value; use an empty string to clear optional fields
        value: String,
    },
    /// Delete one employee
    Delete { id: i64 },
    /// Delete every employee (irreversible)
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Summary statistics
    Stats {
        /// Include headcount and mean salary per department
        #[arg(long)]
        by_department: bool,
    },
    /// Number of stored employees
    Count,
    /// Export the store to .xlsx or .csv
    Export { file: Option<PathBuf> },
}
