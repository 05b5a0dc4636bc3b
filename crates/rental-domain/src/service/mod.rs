//! Domain services

pub mod availability;

pub use availability::{available_vehicles, has_conflicting_trip, overlaps};
