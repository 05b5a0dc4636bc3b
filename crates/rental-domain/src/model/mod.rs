//! Domain model types

pub mod entity;
pub mod trip;
pub mod user;
pub mod vehicle;

pub use entity::Entity;
pub use trip::{Trip, TripDetails, TripStatus};
pub use user::User;
pub use vehicle::Vehicle;
