//! Domain models, record codec, and availability rules

pub mod codec;
pub mod model;
pub mod service;

pub use codec::{decode, encode, from_row, reader, writer, Record, DELIMITER};
pub use model::{Entity, Trip, TripDetails, TripStatus, User, Vehicle};
