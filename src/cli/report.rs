use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_kv, parse_date_opt};
use crate::error::Result;
use crate::fmt::money;
use crate::models::Expense;
use crate::reports::{build_report, filter_by_range, ReportScope};
use crate::session::require_user;
use crate::store::TripStore;

/// Resolves the expense slice and scope for a report/export invocation:
/// either one trip's owned expenses, or the cross-trip flattening filtered
/// by date range.
pub(crate) fn scoped_expenses(
    store: &TripStore<'_>,
    trip: Option<&str>,
    from_date: Option<&str>,
    to_date: Option<&str>,
) -> Result<(Vec<Expense>, ReportScope)> {
    if let Some(needle) = trip {
        let trip = store.resolve_trip(needle)?;
        let from = parse_date_opt(from_date)?;
        let to = parse_date_opt(to_date)?;
        let expenses = filter_by_range(&trip.expenses, from, to);
        return Ok((expenses, ReportScope::Trip { title: trip.title }));
    }
    let from = parse_date_opt(from_date)?;
    let to = parse_date_opt(to_date)?;
    let expenses = store.expenses_filtered(None, from, to);
    let scope = if from.is_none() && to.is_none() {
        ReportScope::AllExpenses
    } else {
        ReportScope::DateRange { from, to }
    };
    Ok((expenses, scope))
}

pub fn run(
    trip: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let (expenses, scope) =
        scoped_expenses(&store, trip.as_deref(), from_date.as_deref(), to_date.as_deref())?;
    let report = build_report(&expenses, scope);

    println!("Expense Report — {}", report.scope.label().bold());
    println!(
        "Total: {}  ({} expenses)\n",
        money(report.grand_total).bold(),
        report.count
    );

    if report.categories.is_empty() {
        println!("No expenses in scope.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count"]);
    for cat in &report.categories {
        table.add_row(vec![
            Cell::new(cat.category),
            Cell::new(money(cat.total)),
            Cell::new(format!("{:.2}%", cat.pct)),
            Cell::new(cat.count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(report.grand_total)),
        Cell::new(""),
        Cell::new(report.count),
    ]);
    println!("By Category\n{table}");
    Ok(())
}
