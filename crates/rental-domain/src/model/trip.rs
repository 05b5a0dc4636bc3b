//! Trip record
//!
//! Line: `id;vehicleId;userId;startDate;endDate;startReading;endReading;fare;completedFlag`
//!
//! A trip holds the identifiers of its vehicle and user. Turning them into
//! records goes through the database, which owns all tables.

use serde::{Deserialize, Serialize};

use rental_types::{Date, EntityKind, Reading, RecordId, ValidationError};

use crate::codec::{field, parse_field, Record};
use crate::model::{User, Vehicle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: RecordId,
    pub vehicle_id: RecordId,
    pub user_id: RecordId,
    /// Planned start
    pub start_date: Date,
    /// Planned end
    pub end_date: Date,
    pub start_reading: Reading,
    pub end_reading: Reading,
    pub fare: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    NotStarted,
    Ongoing,
    Completed,
}

impl TripStatus {
    pub fn label(self) -> &'static str {
        match self {
            TripStatus::NotStarted => "Not started",
            TripStatus::Ongoing => "On going",
            TripStatus::Completed => "Completed",
        }
    }
}

impl Trip {
    /// Unsaved booking; readings and fare start at zero
    pub fn new(vehicle_id: RecordId, user_id: RecordId, start_date: Date, end_date: Date) -> Self {
        Self {
            id: 0,
            vehicle_id,
            user_id,
            start_date,
            end_date,
            start_reading: 0,
            end_reading: 0,
            fare: 0.0,
            completed: false,
        }
    }

    pub fn status(&self) -> TripStatus {
        if self.completed {
            TripStatus::Completed
        } else if self.start_reading != 0 {
            TripStatus::Ongoing
        } else {
            TripStatus::NotStarted
        }
    }

    /// Record the odometer at pickup
    pub fn start(&mut self, reading: Reading) -> Result<(), ValidationError> {
        if self.completed {
            return Err(ValidationError::TripCompleted(self.id));
        }
        if reading < 0 {
            return Err(ValidationError::NegativeReading(reading));
        }
        self.start_reading = reading;
        Ok(())
    }

    /// Close the trip and fix its fare.
    ///
    /// Once completed the stored fare is returned and nothing else changes.
    pub fn complete(
        &mut self,
        end_reading: Reading,
        price_per_km: f64,
    ) -> Result<f64, ValidationError> {
        if self.completed {
            return Ok(self.fare);
        }
        if end_reading < 0 {
            return Err(ValidationError::NegativeReading(end_reading));
        }
        if end_reading < self.start_reading {
            return Err(ValidationError::ReadingBelowStart {
                start: self.start_reading,
                end: end_reading,
            });
        }
        self.end_reading = end_reading;
        self.fare = self.distance() as f64 * price_per_km;
        self.completed = true;
        Ok(self.fare)
    }

    /// Saturates, since rows read from disk are not range checked
    pub fn distance(&self) -> Reading {
        self.end_reading.saturating_sub(self.start_reading)
    }
}

impl Record for Trip {
    const KIND: EntityKind = EntityKind::Trip;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.vehicle_id.to_string(),
            self.user_id.to_string(),
            self.start_date.to_text(),
            self.end_date.to_text(),
            self.start_reading.to_string(),
            self.end_reading.to_string(),
            self.fare.to_string(),
            if self.completed { "1" } else { "0" }.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError> {
        Ok(Self {
            id: parse_field(fields, 0, "id")?,
            vehicle_id: parse_field(fields, 1, "vehicle_id")?,
            user_id: parse_field(fields, 2, "user_id")?,
            start_date: Date::try_from(field(fields, 3, "start_date")?.to_string())?,
            end_date: Date::try_from(field(fields, 4, "end_date")?.to_string())?,
            start_reading: parse_field(fields, 5, "start_reading")?,
            end_reading: parse_field(fields, 6, "end_reading")?,
            fare: parse_field(fields, 7, "fare")?,
            completed: field(fields, 8, "completed")?.trim() != "0",
        })
    }

    fn apply(&mut self, other: &Self) {
        self.vehicle_id = other.vehicle_id;
        self.user_id = other.user_id;
        self.start_date = other.start_date;
        self.end_date = other.end_date;
        self.start_reading = other.start_reading;
        self.end_reading = other.end_reading;
        self.fare = other.fare;
        self.completed = other.completed;
    }
}

/// A trip with its references resolved against the live tables
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TripDetails<'a> {
    pub trip: &'a Trip,
    pub vehicle: &'a Vehicle,
    pub user: &'a User,
    pub status: TripStatus,
}

impl<'a> TripDetails<'a> {
    pub fn new(trip: &'a Trip, vehicle: &'a Vehicle, user: &'a User) -> Self {
        Self {
            trip,
            vehicle,
            user,
            status: trip.status(),
        }
    }
}
