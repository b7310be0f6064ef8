use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{confirm, open_kv, parse_date, parse_date_opt};
use crate::error::Result;
use crate::fmt::money;
use crate::models::{Category, Expense};
use crate::session::require_user;
use crate::store::{ExpenseDraft, ExpensePatch, TripStore};

pub fn add(
    trip: &str,
    amount: f64,
    description: &str,
    category: &str,
    date: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let trip = store.resolve_trip(trip)?;

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => Local::now().date_naive(),
    };
    let expense = store.add_expense(
        &trip.id,
        ExpenseDraft {
            date,
            amount,
            description: description.to_string(),
            category: category.parse::<Category>()?,
        },
    )?;
    println!(
        "{} Added {} expense of {} to '{}'",
        "✓".green(),
        expense.category,
        money(expense.amount),
        trip.title
    );
    Ok(())
}

fn print_expenses(title: &str, expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Description", "Amount"]);
    for e in expenses {
        table.add_row(vec![
            Cell::new(&e.id),
            Cell::new(e.date),
            Cell::new(e.category),
            Cell::new(&e.description),
            Cell::new(money(e.amount)),
        ]);
    }
    println!("{title} ({} expenses, total: {})\n{table}", expenses.len(), money(total));
}

pub fn list(
    trip: Option<String>,
    category: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);

    let category = category.map(|c| c.parse::<Category>()).transpose()?;
    let from = parse_date_opt(from_date.as_deref())?;
    let to = parse_date_opt(to_date.as_deref())?;

    match trip {
        Some(needle) => {
            let trip = store.resolve_trip(&needle)?;
            let expenses: Vec<Expense> = trip
                .expenses
                .iter()
                .filter(|e| category.map_or(true, |c| e.category == c))
                .filter(|e| from.map_or(true, |d| e.date >= d))
                .filter(|e| to.map_or(true, |d| e.date <= d))
                .cloned()
                .collect();
            print_expenses(&format!("Expenses — {}", trip.title), &expenses);
        }
        None => {
            let expenses = store.expenses_filtered(category, from, to);
            print_expenses("Expenses", &expenses);
        }
    }
    Ok(())
}

pub fn update(
    id: &str,
    amount: Option<f64>,
    description: Option<String>,
    category: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let expense = store.update_expense(
        id,
        ExpensePatch {
            date: parse_date_opt(date.as_deref())?,
            amount,
            description,
            category: category.map(|c| c.parse::<Category>()).transpose()?,
        },
    )?;
    println!(
        "{} Updated expense {} ({}, {})",
        "✓".green(),
        expense.id,
        expense.category,
        money(expense.amount)
    );
    Ok(())
}

pub fn delete(id: &str, yes: bool) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    if !confirm(&format!("Delete expense {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    store.delete_expense(id)?;
    println!("Deleted expense {id}");
    Ok(())
}
