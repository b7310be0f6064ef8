use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerdiemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Not logged in — run `perdiem login <email>` first")]
    NotAuthenticated,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Unknown trip: {0}")]
    UnknownTrip(String),

    #[error("Unknown expense: {0}")]
    UnknownExpense(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid amount {0}: expenses must be >= 0")]
    InvalidAmount(f64),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PerdiemError>;
