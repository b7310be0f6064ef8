use chrono::NaiveDate;
use regex::Regex;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::fmt::money;
use crate::models::Expense;
use crate::reports::{ExpenseReport, ReportScope};

/// Renders the three-sheet workbook (summary, detail, category breakdown)
/// and returns the serialized xlsx bytes.
pub fn render_workbook(report: &ExpenseReport, expenses: &[Expense]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    // 1. Report Summary
    let summary = workbook.add_worksheet();
    summary.set_name("Report Summary")?;
    summary.write_string_with_format(0, 0, "Expense Report", &bold)?;
    let scope_label = match report.scope {
        ReportScope::Trip { .. } => "Trip",
        _ => "Date Range",
    };
    summary.write_string(1, 0, scope_label)?;
    summary.write_string(1, 1, report.scope.label())?;
    summary.write_string(2, 0, "Total Expenses")?;
    summary.write_string(2, 1, money(report.grand_total))?;
    summary.write_string(3, 0, "Expense Count")?;
    summary.write_number(3, 1, report.count as f64)?;
    summary.set_column_width(0, 18)?;
    summary.set_column_width(1, 24)?;

    // 2. Expenses Detail
    let detail = workbook.add_worksheet();
    detail.set_name("Expenses Detail")?;
    for (col, header) in ["Date", "Category", "Description", "Amount"].iter().enumerate() {
        detail.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, expense) in expenses.iter().enumerate() {
        let row = (i + 1) as u32;
        detail.write_string(row, 0, expense.date.to_string())?;
        detail.write_string(row, 1, expense.category.label())?;
        detail.write_string(row, 2, &expense.description)?;
        detail.write_number(row, 3, expense.amount)?;
    }
    detail.set_column_width(0, 12)?;
    detail.set_column_width(1, 20)?;
    detail.set_column_width(2, 36)?;

    // 3. By Category
    let breakdown = workbook.add_worksheet();
    breakdown.set_name("By Category")?;
    for (col, header) in ["Category", "Total Amount", "Percentage"].iter().enumerate() {
        breakdown.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, cat) in report.categories.iter().enumerate() {
        let row = (i + 1) as u32;
        breakdown.write_string(row, 0, cat.category.label())?;
        breakdown.write_number(row, 1, cat.total)?;
        breakdown.write_number(row, 2, cat.pct)?;
    }
    breakdown.set_column_width(0, 20)?;
    breakdown.set_column_width(1, 14)?;

    Ok(workbook.save_to_buffer()?)
}

/// Deterministic file name: trip title (or a date-range qualified stem),
/// whitespace runs collapsed to underscores, suffixed with the generation
/// date.
pub fn report_file_name(scope: &ReportScope, today: NaiveDate) -> String {
    let stem = match scope {
        ReportScope::Trip { title } => title.clone(),
        ReportScope::AllExpenses | ReportScope::DateRange { from: None, to: None } => {
            "Expense Report".to_string()
        }
        ReportScope::DateRange { .. } => format!("Expense Report {}", scope.label()),
    };
    format!("{}_{today}.xlsx", normalize_whitespace(&stem))
}

fn normalize_whitespace(s: &str) -> String {
    Regex::new(r"\s+")
        .map(|re| re.replace_all(s.trim(), "_").into_owned())
        .unwrap_or_else(|_| s.trim().replace(char::is_whitespace, "_"))
}
