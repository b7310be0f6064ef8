pub mod auth;
pub mod demo;
pub mod expenses;
pub mod export;
pub mod init;
pub mod report;
pub mod status;
pub mod trips;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{PerdiemError, Result};
use crate::settings::get_data_dir;
use crate::storage::FileKv;

pub(crate) fn open_kv() -> FileKv {
    FileKv::new(&get_data_dir())
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse().map_err(|_| PerdiemError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_date_opt(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(parse_date).transpose()
}

/// Interactive yes/no prompt for destructive commands; `--yes` skips it.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    use std::io::Write;

    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[derive(Parser)]
#[command(name = "perdiem", about = "Local-first travel expense tracker with Excel export.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Perdiem: choose a data directory.
    Init {
        /// Path for Perdiem data (default: ~/Documents/perdiem)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Log in (mock credential check) and start a session.
    Login {
        /// Account email
        email: String,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Register a new account (mock) and start a session.
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session. Trip data stays on disk.
    Logout,
    /// Show the current session user.
    Whoami,
    /// Update profile fields on the current session.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long = "employee-id")]
        employee_id: Option<String>,
        #[arg(long = "phone")]
        phone_number: Option<String>,
    },
    /// Manage trips.
    Trips {
        #[command(subcommand)]
        command: TripsCommands,
    },
    /// Manage expenses attached to trips.
    Expenses {
        #[command(subcommand)]
        command: ExpensesCommands,
    },
    /// Print an expense report with category breakdown.
    Report {
        /// Scope to one trip (id or title)
        #[arg(long)]
        trip: Option<String>,
        /// Start date: YYYY-MM-DD
        #[arg(long = "from")]
        from_date: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long = "to")]
        to_date: Option<String>,
    },
    /// Export an Excel expense report (summary, detail, category sheets).
    Export {
        /// Scope to one trip (id or title)
        #[arg(long)]
        trip: Option<String>,
        /// Start date: YYYY-MM-DD
        #[arg(long = "from")]
        from_date: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long = "to")]
        to_date: Option<String>,
        /// Output file path (default: <data_dir>/exports/<name>.xlsx)
        #[arg(long)]
        output: Option<String>,
    },
    /// Load sample trips and expenses to explore Perdiem.
    Demo,
    /// Show data directory, session, and collection counts.
    Status,
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum TripsCommands {
    /// Create a trip.
    Add {
        /// Trip title, e.g. 'Berlin Conference'
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        /// Start date: YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Status: draft, active, completed (default: active)
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// List trips with expense counts and totals.
    List,
    /// Update trip fields; omitted fields are kept.
    Update {
        /// Trip id (shown in `perdiem trips list`)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a trip and every expense it owns.
    Delete {
        /// Trip id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Mark a trip completed (stamps the end date with today).
    Complete {
        /// Trip id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExpensesCommands {
    /// Add an expense to a trip.
    Add {
        /// Trip (id or title) the expense belongs to
        #[arg(long)]
        trip: String,
        /// Amount, e.g. 45.75
        amount: f64,
        /// What the money was spent on
        description: String,
        /// Category: food, travel, stay, conveyance, misc, parking
        #[arg(long)]
        category: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List expenses, optionally filtered.
    List {
        /// Only this trip (id or title)
        #[arg(long)]
        trip: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        /// Start date: YYYY-MM-DD
        #[arg(long = "from")]
        from_date: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long = "to")]
        to_date: Option<String>,
    },
    /// Update expense fields; omitted fields are kept.
    Update {
        /// Expense id (shown in `perdiem expenses list`)
        id: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense.
    Delete {
        /// Expense id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
