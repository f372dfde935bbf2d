pub mod expenses;
pub mod init;
pub mod status;
pub mod tracker;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "penny",
    version,
    about = "Local expense tracker for the terminal.",
    long_about = "Penny keeps a list of expenses with a running total. Run it without a \
                  subcommand to open the interactive tracker."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create an empty expense store.
    Init {
        /// Path for penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Add an expense dated today.
    Add {
        name: String,
        description: String,
        /// Amount, e.g. 3.50
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },
    /// Change fields of an existing expense. The original date is kept.
    Edit {
        /// Expense ID (see `penny list`)
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<String>,
    },
    /// Delete an expense.
    Delete {
        /// Expense ID (see `penny list`)
        id: u64,
    },
    /// Print every expense and the total.
    List,
    /// Print the total of all expenses.
    Total,
    /// Show where data lives and a summary.
    Status,
    /// Open the interactive tracker (same as running with no subcommand).
    Tracker,
}
