//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Fintrack - Track income and expenses, see where the month is heading
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "fintrack.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FINTRACK_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Whose records a command works on
#[derive(Args, Debug, Clone)]
pub struct UserArgs {
    /// Owner of the records (matches the identity the server sees)
    #[arg(short, long, default_value = "local-dev", global = true)]
    pub user: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        #[arg(long)]
        no_auth: bool,
    },

    /// Manage categories
    Categories {
        #[command(flatten)]
        user: UserArgs,

        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage transactions
    Transactions {
        #[command(flatten)]
        user: UserArgs,

        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Generate reports
    Report {
        #[command(flatten)]
        user: UserArgs,

        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Show recent audit log entries
    Audit {
        #[command(flatten)]
        user: UserArgs,

        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// income or expense
        #[arg(short, long)]
        kind: String,
    },

    /// Delete a category and all of its transactions
    Delete {
        /// Category ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions
    List {
        /// Start date (YYYY-MM-DD), used together with --to
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), used together with --from
        #[arg(long)]
        to: Option<String>,

        /// Sort order: date, -date, amount, -amount
        #[arg(long, default_value = "-date")]
        ordering: String,
    },

    /// Record a transaction
    Add {
        /// Category ID
        #[arg(short, long)]
        category: i64,

        /// income or expense
        #[arg(short, long)]
        kind: String,

        /// Amount with up to 2 decimal places
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

/// Options shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Reference date (YYYY-MM-DD), defaults to today; the report covers its month
    #[arg(long)]
    pub as_of: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and month-end projection
    Summary {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Expense breakdown and budget health score
    Categories {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Categories whose spending jumped versus last month
    Anomalies {
        #[command(flatten)]
        args: ReportArgs,
    },
}
