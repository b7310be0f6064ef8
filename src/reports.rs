use chrono::NaiveDate;

use crate::models::{Category, Expense};

// ---------------------------------------------------------------------------
// Report scope
// ---------------------------------------------------------------------------

/// Identifies what a report covers; drives the summary header and file name.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportScope {
    AllExpenses,
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Trip {
        title: String,
    },
}

impl ReportScope {
    pub fn label(&self) -> String {
        match self {
            ReportScope::AllExpenses => "All Expenses".to_string(),
            ReportScope::DateRange { from: Some(f), to: Some(t) } => format!("{f} to {t}"),
            ReportScope::DateRange { from: Some(f), to: None } => format!("From {f}"),
            ReportScope::DateRange { from: None, to: Some(t) } => format!("Until {t}"),
            ReportScope::DateRange { from: None, to: None } => "All Expenses".to_string(),
            ReportScope::Trip { title } => title.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: usize,
    /// Share of the grand total, rounded to two decimals; 0.00 when the
    /// grand total is zero.
    pub pct: f64,
}

pub struct ExpenseReport {
    pub scope: ReportScope,
    pub grand_total: f64,
    pub count: usize,
    pub categories: Vec<CategoryTotal>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Aggregates an already-filtered expense sequence. Categories appear in
/// first-seen order; an empty input produces zero totals, not an error.
pub fn build_report(expenses: &[Expense], scope: ReportScope) -> ExpenseReport {
    let grand_total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut categories: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match categories.iter_mut().find(|c| c.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => categories.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
                count: 1,
                pct: 0.0,
            }),
        }
    }
    for entry in &mut categories {
        entry.pct = if grand_total != 0.0 {
            round2(entry.total / grand_total * 100.0)
        } else {
            0.0
        };
    }

    ExpenseReport {
        scope,
        grand_total,
        count: expenses.len(),
        categories,
    }
}

/// Inclusive date-range filter; either bound may be open.
pub fn filter_by_range(
    expenses: &[Expense],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| from.map_or(true, |d| e.date >= d))
        .filter(|e| to.map_or(true, |d| e.date <= d))
        .cloned()
        .collect()
}
