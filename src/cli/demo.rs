use chrono::{Duration, Local, NaiveDate};
use colored::Colorize;

use crate::cli::open_kv;
use crate::error::Result;
use crate::models::{Category, TripStatus};
use crate::session::require_user;
use crate::store::{ExpenseDraft, TripDraft, TripStore};

struct DemoTrip {
    title: &'static str,
    destination: &'static str,
    /// Days before today the trip started.
    start_offset: i64,
    status: TripStatus,
    expenses: &'static [DemoExpense],
}

struct DemoExpense {
    /// Days after the trip start.
    day: i64,
    description: &'static str,
    amount: f64,
    category: Category,
}

const DEMO_TRIPS: &[DemoTrip] = &[
    DemoTrip {
        title: "Berlin Sales Conference",
        destination: "Berlin",
        start_offset: 30,
        status: TripStatus::Completed,
        expenses: &[
            DemoExpense { day: 0, description: "Flight SFO-BER", amount: 642.80, category: Category::Travel },
            DemoExpense { day: 0, description: "Airport taxi", amount: 38.50, category: Category::LocalConveyance },
            DemoExpense { day: 1, description: "Hotel, 3 nights", amount: 489.00, category: Category::Stay },
            DemoExpense { day: 1, description: "Team dinner", amount: 96.40, category: Category::Food },
            DemoExpense { day: 2, description: "Conference parking", amount: 24.00, category: Category::TollParking },
            DemoExpense { day: 3, description: "Client lunch", amount: 54.25, category: Category::Food },
        ],
    },
    DemoTrip {
        title: "Austin Site Visit",
        destination: "Austin",
        start_offset: 7,
        status: TripStatus::Active,
        expenses: &[
            DemoExpense { day: 0, description: "Flight SFO-AUS", amount: 312.00, category: Category::Travel },
            DemoExpense { day: 0, description: "Rental car tolls", amount: 17.75, category: Category::TollParking },
            DemoExpense { day: 1, description: "BBQ with the site team", amount: 68.90, category: Category::Food },
            DemoExpense { day: 2, description: "Office supplies", amount: 23.10, category: Category::Miscellaneous },
        ],
    },
    DemoTrip {
        title: "Q4 Planning Offsite",
        destination: "Lake Tahoe",
        start_offset: -14,
        status: TripStatus::Draft,
        expenses: &[],
    },
];

pub fn run() -> Result<()> {
    let kv = open_kv();
    let user = require_user(&kv)?;
    let store = TripStore::open(&kv, &user);

    let today = Local::now().date_naive();
    let mut trip_count = 0usize;
    let mut expense_count = 0usize;

    for demo in DEMO_TRIPS {
        let start: NaiveDate = today - Duration::days(demo.start_offset);
        let trip = store.create_trip(TripDraft {
            title: demo.title.to_string(),
            description: None,
            destination: Some(demo.destination.to_string()),
            start_date: start,
            end_date: None,
            // Completed demo trips go through the normal lifecycle so the
            // end date gets stamped.
            status: if demo.status == TripStatus::Completed {
                TripStatus::Active
            } else {
                demo.status
            },
        })?;
        trip_count += 1;
        for e in demo.expenses {
            store.add_expense(
                &trip.id,
                ExpenseDraft {
                    date: start + Duration::days(e.day),
                    amount: e.amount,
                    description: e.description.to_string(),
                    category: e.category,
                },
            )?;
            expense_count += 1;
        }
        if demo.status == TripStatus::Completed {
            store.complete_trip(&trip.id, start + Duration::days(4))?;
        }
    }

    println!(
        "{} Loaded {trip_count} sample trips with {expense_count} expenses.",
        "✓".green()
    );
    println!("Try `perdiem trips list`, `perdiem report`, or `perdiem export`.");
    Ok(())
}
