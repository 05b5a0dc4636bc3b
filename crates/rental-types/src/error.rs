//! Error types for vehicle-rental

use thiserror::Error;

use crate::EntityKind;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Malformed field text or a rejected business rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid date '{0}', expected d/m/yyyy")]
    InvalidDate(String),

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown vehicle class code: {0}")]
    InvalidVehicleClass(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} must not contain ';' or line breaks: '{value}'")]
    ForbiddenCharacter { field: &'static str, value: String },

    #[error("{kind} with {key} already exists")]
    Duplicate { kind: EntityKind, key: String },

    #[error("Vehicle {0} is not free in the given date range")]
    VehicleUnavailable(String),

    #[error("Trip {0} is already completed")]
    TripCompleted(u64),

    #[error("Odometer reading must not be negative: {0}")]
    NegativeReading(i64),

    #[error("End reading {end} is below start reading {start}")]
    ReadingBelowStart { start: i64, end: i64 },

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: String, end: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("No such {kind} record found: {key}")]
    NotFound { kind: EntityKind, key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("System out of memory")]
    OutOfMemory,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        Error::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
