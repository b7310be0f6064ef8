use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PerdiemError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Closed set of expense categories used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Stay,
    #[serde(rename = "Local conveyance")]
    LocalConveyance,
    Miscellaneous,
    #[serde(rename = "Toll/Parking charges")]
    TollParking,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Travel,
        Category::Stay,
        Category::LocalConveyance,
        Category::Miscellaneous,
        Category::TollParking,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Stay => "Stay",
            Category::LocalConveyance => "Local conveyance",
            Category::Miscellaneous => "Miscellaneous",
            Category::TollParking => "Toll/Parking charges",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = PerdiemError;

    /// Accepts the display label (case-insensitive) plus short CLI aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase();
        match norm.as_str() {
            "food" => Ok(Category::Food),
            "travel" => Ok(Category::Travel),
            "stay" => Ok(Category::Stay),
            "local conveyance" | "local-conveyance" | "conveyance" => {
                Ok(Category::LocalConveyance)
            }
            "miscellaneous" | "misc" => Ok(Category::Miscellaneous),
            "toll/parking charges" | "toll/parking" | "toll-parking" | "parking" => {
                Ok(Category::TollParking)
            }
            _ => Err(PerdiemError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Draft,
    Active,
    Completed,
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TripStatus::Draft => "draft",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for TripStatus {
    type Err = PerdiemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(TripStatus::Draft),
            "active" => Ok(TripStatus::Active),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(PerdiemError::Other(format!(
                "Unknown trip status: {s} (expected draft, active or completed)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: Category,
}

/// A trip owns its expenses exclusively; deleting the trip deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: TripStatus,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Trip {
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

const ID_LEN: usize = 8;
const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random 8-char base-36 identifier.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}
