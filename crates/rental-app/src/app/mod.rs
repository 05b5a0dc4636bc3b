//! Application use cases

mod rental_service;

pub use rental_service::RentalService;
