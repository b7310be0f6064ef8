use colored::Colorize;

use crate::cli::open_kv;
use crate::error::Result;
use crate::fmt::money;
use crate::session::current_user;
use crate::settings::{get_data_dir, settings_file_exists};
use crate::store::TripStore;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    println!("Data directory: {}", data_dir.display());
    if !settings_file_exists() {
        println!("{}", "Not initialized — run `perdiem init`.".yellow());
    }

    let kv = open_kv();
    match current_user(&kv) {
        Some(user) => {
            println!("Session: {} <{}>", user.name, user.email);
            let store = TripStore::open(&kv, &user);
            let trips = store.trips();
            let expenses = store.all_expenses();
            let total: f64 = expenses.iter().map(|e| e.amount).sum();
            println!(
                "Trips: {}   Expenses: {}   Total: {}",
                trips.len(),
                expenses.len(),
                money(total)
            );
        }
        None => println!("Session: {}", "not logged in".yellow()),
    }
    Ok(())
}
