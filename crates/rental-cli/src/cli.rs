//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use rental_types::OutputFormat;
use rental_types::{Date, Reading, RecordId, VehicleClass};

#[derive(Parser)]
#[command(name = "vehicle-rental")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Vehicle rental records: fleet, customers, and trips")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding vehicle.txt, users.txt and trips.txt
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleCommand,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Book and run trips
    Trip {
        #[command(subcommand)]
        action: TripCommand,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Create missing table files on startup
        #[arg(long)]
        set_create_files: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Register a new vehicle
    Add {
        /// Registration plate
        #[arg(long)]
        plate: String,

        /// Vehicle class (two-wheeler, car, bus)
        #[arg(long, value_enum)]
        class: VehicleClass,

        /// Number of seats
        #[arg(long)]
        seats: u32,

        /// Operating company name
        #[arg(long)]
        company: String,

        /// Price per km
        #[arg(long)]
        price: f64,

        /// PUC expiry date (d/m/yyyy)
        #[arg(long)]
        puc_expiry: Date,
    },

    /// Show a vehicle by plate
    Show { plate: String },

    /// Change the price per km of a vehicle
    EditPrice {
        plate: String,

        /// New price per km
        price: f64,
    },

    /// List all vehicles
    List,

    /// List vehicles of a class free between two dates
    Available {
        /// Start date (d/m/yyyy)
        #[arg(long)]
        from: Date,

        /// End date (d/m/yyyy)
        #[arg(long)]
        to: Date,

        #[arg(long, value_enum)]
        class: VehicleClass,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Add {
        #[arg(long)]
        name: String,

        /// Contact number
        #[arg(long)]
        contact: String,

        #[arg(long)]
        email: String,
    },

    /// Show a user by contact number
    Show { contact: String },
}

#[derive(Subcommand)]
pub enum TripCommand {
    /// Book a vehicle for a user
    Create {
        /// Contact number of the user
        #[arg(long)]
        contact: String,

        /// Plate of the vehicle
        #[arg(long)]
        plate: String,

        /// Start date (d/m/yyyy)
        #[arg(long)]
        from: Date,

        /// End date (d/m/yyyy)
        #[arg(long)]
        to: Date,
    },

    /// Show a trip with its vehicle and user
    Show { id: RecordId },

    /// Record the odometer reading at pickup
    Start {
        id: RecordId,

        #[arg(long, short = 'r')]
        reading: Reading,
    },

    /// Record the odometer reading at return and compute the fare
    Complete {
        id: RecordId,

        #[arg(long, short = 'r')]
        reading: Reading,
    },
}
