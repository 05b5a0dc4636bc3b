//! Persistent store for vehicles, users, and trips

pub mod database;
pub mod table;

pub use database::{Database, TRIP_FILE, USER_FILE, VEHICLE_FILE};
pub use table::Table;
