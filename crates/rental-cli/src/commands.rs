//! Command handlers

use crate::cli::{Cli, Commands, OutputFormat, TripCommand, UserCommand, VehicleCommand};
use crate::output::{output_trip, output_user, output_vehicle, output_vehicle_list};
use rental_app::config::Config;
use rental_app::repository::open_database;
use rental_app::RentalService;
use rental_domain::model::{User, Vehicle};
use rental_types::Result;
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Vehicle { action } => {
            let mut service = open_service(&config)?;
            cmd_vehicle(&mut service, action, output_format)
        }
        Commands::User { action } => {
            let mut service = open_service(&config)?;
            cmd_user(&mut service, action, output_format)
        }
        Commands::Trip { action } => {
            let mut service = open_service(&config)?;
            cmd_trip(&mut service, action, output_format)
        }
        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_create_files,
            reset,
        } => cmd_config(show, set_data_dir, set_output, set_create_files, reset),
    }
}

fn open_service(config: &Config) -> Result<RentalService> {
    let db = open_database(config)?;
    log::debug!("Data directory: {}", db.data_dir().display());
    Ok(RentalService::new(db))
}

fn cmd_vehicle(
    service: &mut RentalService,
    action: VehicleCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match action {
        VehicleCommand::Add {
            plate,
            class,
            seats,
            company,
            price,
            puc_expiry,
        } => {
            let vehicle = service.add_vehicle(Vehicle::new(
                plate, class, seats, company, price, puc_expiry,
            ))?;
            if output_format == OutputFormat::Table {
                println!("Vehicle added successfully");
                println!("Vehicle id: {}", vehicle.id);
            } else {
                output_vehicle(output_format, &vehicle)?;
            }
        }
        VehicleCommand::Show { plate } => {
            let vehicle = service.get_vehicle_by_plate(&plate)?;
            output_vehicle(output_format, &vehicle)?;
        }
        VehicleCommand::EditPrice { plate, price } => {
            let vehicle = service.edit_vehicle_price(&plate, price)?;
            if output_format == OutputFormat::Table {
                println!("Vehicle updated successfully");
            }
            output_vehicle(output_format, &vehicle)?;
        }
        VehicleCommand::List => {
            output_vehicle_list(output_format, &service.list_vehicles())?;
        }
        VehicleCommand::Available { from, to, class } => {
            let vehicles = service.list_available_vehicles(&from, &to, class);
            if vehicles.is_empty() && output_format == OutputFormat::Table {
                println!("No vehicles are free in given date range");
                return Ok(());
            }
            output_vehicle_list(output_format, &vehicles)?;
        }
    }
    Ok(())
}

fn cmd_user(
    service: &mut RentalService,
    action: UserCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match action {
        UserCommand::Add {
            name,
            contact,
            email,
        } => {
            let user = service.add_user(User::new(name, contact, email))?;
            if output_format == OutputFormat::Table {
                println!("User added successfully");
                println!("User id: {}", user.id);
            } else {
                output_user(output_format, &user)?;
            }
        }
        UserCommand::Show { contact } => {
            let user = service.get_user_by_contact(&contact)?;
            output_user(output_format, &user)?;
        }
    }
    Ok(())
}

fn cmd_trip(
    service: &mut RentalService,
    action: TripCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match action {
        TripCommand::Create {
            contact,
            plate,
            from,
            to,
        } => {
            let trip = service.create_trip(&contact, &plate, from, to)?;
            if output_format == OutputFormat::Table {
                println!("Trip added successfully");
                println!("Trip id: {}", trip.id);
            } else {
                output_trip(output_format, &service.get_trip_details(trip.id)?)?;
            }
        }
        TripCommand::Show { id } => {
            output_trip(output_format, &service.get_trip_details(id)?)?;
        }
        TripCommand::Start { id, reading } => {
            service.start_trip(id, reading)?;
            if output_format == OutputFormat::Table {
                println!("Trip started successfully");
            } else {
                output_trip(output_format, &service.get_trip_details(id)?)?;
            }
        }
        TripCommand::Complete { id, reading } => {
            let fare = service.complete_trip(id, reading)?;
            if output_format == OutputFormat::Table {
                println!("Trip completed successfully");
                println!("Total fare: {:.2}", fare);
            } else {
                output_trip(output_format, &service.get_trip_details(id)?)?;
            }
        }
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_create_files: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(create) = set_create_files {
        config.create_missing_files = create;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
