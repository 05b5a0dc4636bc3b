//! Application service layer - config, repository access, rental use cases

pub mod app;
pub mod config;
pub mod repository;

pub use app::RentalService;
pub use config::Config;
