//! Shared identifiers and enumerations

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Per-table record identifier. Starts at 1; a vehicle 3 and a trip 3 are unrelated.
pub type RecordId = u64;

/// Odometer reading in distance units
pub type Reading = i64;

/// Which table a record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Vehicle,
    User,
    Trip,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Vehicle => write!(f, "vehicle"),
            EntityKind::User => write!(f, "user"),
            EntityKind::Trip => write!(f, "trip"),
        }
    }
}

/// Vehicle class, stored on disk as its numeric code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleClass {
    /// Code 1
    #[value(alias = "bike")]
    TwoWheeler,
    /// Code 2
    Car,
    /// Code 3
    Bus,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::TwoWheeler,
        VehicleClass::Car,
        VehicleClass::Bus,
    ];

    pub fn code(self) -> u8 {
        match self {
            VehicleClass::TwoWheeler => 1,
            VehicleClass::Car => 2,
            VehicleClass::Bus => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::TwoWheeler => "Bike",
            VehicleClass::Car => "Car",
            VehicleClass::Bus => "Bus",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for VehicleClass {
    type Err = ValidationError;

    /// Parses the on-disk numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| ValidationError::InvalidVehicleClass(s.to_string()))
    }
}
