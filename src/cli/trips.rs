use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{confirm, open_kv, parse_date, parse_date_opt};
use crate::error::Result;
use crate::fmt::money;
use crate::models::TripStatus;
use crate::session::require_user;
use crate::store::{TripDraft, TripPatch, TripStore};

pub fn add(
    title: &str,
    description: Option<String>,
    destination: Option<String>,
    start: Option<String>,
    end: Option<String>,
    status: &str,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);

    let start_date = match start {
        Some(s) => parse_date(&s)?,
        None => Local::now().date_naive(),
    };
    let trip = store.create_trip(TripDraft {
        title: title.to_string(),
        description,
        destination,
        start_date,
        end_date: parse_date_opt(end.as_deref())?,
        status: status.parse::<TripStatus>()?,
    })?;
    println!("{} Created trip '{}' ({})", "✓".green(), trip.title, trip.id);
    Ok(())
}

pub fn list() -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let trips = store.trips();

    if trips.is_empty() {
        println!("No trips yet. Create one with `perdiem trips add <title>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Destination", "Start", "End", "Status", "Expenses", "Total"]);
    for trip in &trips {
        let status = match trip.status {
            TripStatus::Completed => trip.status.to_string().green().to_string(),
            TripStatus::Active => trip.status.to_string().cyan().to_string(),
            TripStatus::Draft => trip.status.to_string(),
        };
        table.add_row(vec![
            Cell::new(&trip.id),
            Cell::new(&trip.title),
            Cell::new(trip.destination.as_deref().unwrap_or("")),
            Cell::new(trip.start_date),
            Cell::new(trip.end_date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(status),
            Cell::new(trip.expenses.len()),
            Cell::new(money(trip.total())),
        ]);
    }
    println!("Trips ({})\n{table}", trips.len());
    Ok(())
}

pub fn update(
    id: &str,
    title: Option<String>,
    description: Option<String>,
    destination: Option<String>,
    start: Option<String>,
    end: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let trip = store.update_trip(
        id,
        TripPatch {
            title,
            description,
            destination,
            start_date: parse_date_opt(start.as_deref())?,
            end_date: parse_date_opt(end.as_deref())?,
            status: status.map(|s| s.parse::<TripStatus>()).transpose()?,
        },
    )?;
    println!("{} Updated trip '{}'", "✓".green(), trip.title);
    Ok(())
}

pub fn delete(id: &str, yes: bool) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let trip = store.find_trip(id)?;
    let prompt = format!(
        "Delete trip '{}' and its {} expense(s)?",
        trip.title,
        trip.expenses.len()
    );
    if !confirm(&prompt, yes)? {
        println!("Aborted.");
        return Ok(());
    }
    store.delete_trip(id)?;
    println!("Deleted trip '{}'", trip.title);
    Ok(())
}

pub fn complete(id: &str) -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);
    let trip = store.complete_trip(id, Local::now().date_naive())?;
    let end = trip.end_date.map(|d| d.to_string()).unwrap_or_default();
    println!("{} Trip '{}' completed (ended {})", "✓".green(), trip.title, end);
    Ok(())
}
