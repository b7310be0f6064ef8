use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;

use crate::cli::open_kv;
use crate::cli::report::scoped_expenses;
use crate::error::Result;
use crate::fmt::money;
use crate::reports::build_report;
use crate::session::require_user;
use crate::settings::get_data_dir;
use crate::share::{deliver, NoShareTarget};
use crate::store::TripStore;
use crate::workbook::{render_workbook, report_file_name};

pub fn run(
    trip: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let (expenses, scope) =
        scoped_expenses(&store, trip.as_deref(), from_date.as_deref(), to_date.as_deref())?;

    if expenses.is_empty() {
        eprintln!("{}", "No expenses in scope — exporting an empty report.".yellow());
    }

    let report = build_report(&expenses, scope);
    let bytes = render_workbook(&report, &expenses)?;

    let today = Local::now().date_naive();
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| get_data_dir().join("exports").join(report_file_name(&report.scope, today)));

    // Offer the workbook to the platform share surface; on this platform it
    // declines and the written file stands as the delivery.
    let written = deliver(
        &NoShareTarget,
        "Expense Report",
        &format!("Expense report — {} ({})", report.scope.label(), money(report.grand_total)),
        &bytes,
        &path,
    )?;
    println!("Wrote {}", written.display());
    Ok(())
}
