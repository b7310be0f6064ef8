use chrono::NaiveDate;

use crate::error::{PerdiemError, Result};
use crate::models::{generate_id, Category, Expense, Trip, TripStatus, User};
use crate::storage::KvStore;

pub struct TripDraft {
    pub title: String,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: TripStatus,
}

#[derive(Default)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
}

pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: Category,
}

#[derive(Default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
}

/// Per-user trip collection over a key-value store. Every mutation rewrites
/// the full collection under `trips-<user_id>` (last write wins).
pub struct TripStore<'a> {
    kv: &'a dyn KvStore,
    user_id: String,
}

impl<'a> TripStore<'a> {
    pub fn open(kv: &'a dyn KvStore, user: &User) -> Self {
        Self { kv, user_id: user.id.clone() }
    }

    fn key(&self) -> String {
        format!("trips-{}", self.user_id)
    }

    /// Loads the persisted collection. Missing or corrupt data reads as an
    /// empty collection rather than failing.
    pub fn trips(&self) -> Vec<Trip> {
        self.kv
            .get(&self.key())
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, trips: &[Trip]) -> Result<()> {
        let json = serde_json::to_string_pretty(trips)?;
        self.kv.set(&self.key(), &json)
    }

    pub fn find_trip(&self, trip_id: &str) -> Result<Trip> {
        self.trips()
            .into_iter()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| PerdiemError::UnknownTrip(trip_id.to_string()))
    }

    /// Resolves a trip by id, falling back to an exact title match.
    pub fn resolve_trip(&self, needle: &str) -> Result<Trip> {
        let trips = self.trips();
        if let Some(t) = trips.iter().find(|t| t.id == needle) {
            return Ok(t.clone());
        }
        let by_title: Vec<&Trip> = trips.iter().filter(|t| t.title == needle).collect();
        match by_title.as_slice() {
            [one] => Ok((*one).clone()),
            [] => Err(PerdiemError::UnknownTrip(needle.to_string())),
            _ => Err(PerdiemError::Other(format!(
                "Trip title '{needle}' is ambiguous — use the trip id"
            ))),
        }
    }

    pub fn create_trip(&self, draft: TripDraft) -> Result<Trip> {
        let trip = Trip {
            id: generate_id(),
            user_id: self.user_id.clone(),
            title: draft.title,
            description: draft.description,
            destination: draft.destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            expenses: Vec::new(),
        };
        let mut trips = self.trips();
        trips.push(trip.clone());
        self.save(&trips)?;
        Ok(trip)
    }

    /// Merges the provided fields into the trip; unspecified fields are
    /// retained.
    pub fn update_trip(&self, trip_id: &str, patch: TripPatch) -> Result<Trip> {
        let mut trips = self.trips();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| PerdiemError::UnknownTrip(trip_id.to_string()))?;
        if let Some(title) = patch.title {
            trip.title = title;
        }
        if let Some(description) = patch.description {
            trip.description = Some(description);
        }
        if let Some(destination) = patch.destination {
            trip.destination = Some(destination);
        }
        if let Some(start_date) = patch.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            trip.end_date = Some(end_date);
        }
        if let Some(status) = patch.status {
            trip.status = status;
        }
        let updated = trip.clone();
        self.save(&trips)?;
        Ok(updated)
    }

    /// Removes the trip and, with it, every expense it owns.
    pub fn delete_trip(&self, trip_id: &str) -> Result<()> {
        let mut trips = self.trips();
        let before = trips.len();
        trips.retain(|t| t.id != trip_id);
        if trips.len() == before {
            return Err(PerdiemError::UnknownTrip(trip_id.to_string()));
        }
        self.save(&trips)
    }

    /// Marks the trip completed and stamps the end date; start date and
    /// expenses are untouched.
    pub fn complete_trip(&self, trip_id: &str, today: NaiveDate) -> Result<Trip> {
        self.update_trip(
            trip_id,
            TripPatch {
                status: Some(TripStatus::Completed),
                end_date: Some(today),
                ..TripPatch::default()
            },
        )
    }

    pub fn add_expense(&self, trip_id: &str, draft: ExpenseDraft) -> Result<Expense> {
        if draft.amount < 0.0 || !draft.amount.is_finite() {
            return Err(PerdiemError::InvalidAmount(draft.amount));
        }
        let mut trips = self.trips();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| PerdiemError::UnknownTrip(trip_id.to_string()))?;
        let expense = Expense {
            id: generate_id(),
            trip_id: trip_id.to_string(),
            date: draft.date,
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
        };
        trip.expenses.push(expense.clone());
        self.save(&trips)?;
        Ok(expense)
    }

    pub fn update_expense(&self, expense_id: &str, patch: ExpensePatch) -> Result<Expense> {
        if let Some(amount) = patch.amount {
            if amount < 0.0 || !amount.is_finite() {
                return Err(PerdiemError::InvalidAmount(amount));
            }
        }
        let mut trips = self.trips();
        let expense = trips
            .iter_mut()
            .flat_map(|t| t.expenses.iter_mut())
            .find(|e| e.id == expense_id)
            .ok_or_else(|| PerdiemError::UnknownExpense(expense_id.to_string()))?;
        if let Some(date) = patch.date {
            expense.date = date;
        }
        if let Some(amount) = patch.amount {
            expense.amount = amount;
        }
        if let Some(description) = patch.description {
            expense.description = description;
        }
        if let Some(category) = patch.category {
            expense.category = category;
        }
        let updated = expense.clone();
        self.save(&trips)?;
        Ok(updated)
    }

    pub fn delete_expense(&self, expense_id: &str) -> Result<()> {
        let mut trips = self.trips();
        let mut removed = false;
        for trip in trips.iter_mut() {
            let before = trip.expenses.len();
            trip.expenses.retain(|e| e.id != expense_id);
            removed |= trip.expenses.len() != before;
        }
        if !removed {
            return Err(PerdiemError::UnknownExpense(expense_id.to_string()));
        }
        self.save(&trips)
    }

    /// Read-only flattening across all trips, ordered by date.
    pub fn all_expenses(&self) -> Vec<Expense> {
        let mut expenses: Vec<Expense> =
            self.trips().into_iter().flat_map(|t| t.expenses).collect();
        expenses.sort_by_key(|e| e.date);
        expenses
    }

    pub fn expenses_filtered(
        &self,
        category: Option<Category>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<Expense> {
        self.all_expenses()
            .into_iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| from.map_or(true, |d| e.date >= d))
            .filter(|e| to.map_or(true, |d| e.date <= d))
            .collect()
    }
}
