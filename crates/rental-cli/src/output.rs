//! Output formatting module

use serde::Serialize;

use crate::cli::OutputFormat;
use rental_domain::model::{TripDetails, TripStatus, User, Vehicle};
use rental_types::{Date, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_vehicle(output_format: OutputFormat, vehicle: &Vehicle) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicle);
    }

    println!("\nVehicle Details");
    println!("===============");
    println!("Vehicle id:      {}", vehicle.id);
    println!("Registration:    {}", vehicle.plate);
    println!("Vehicle type:    {}", vehicle.class);
    println!("Seats:           {}", vehicle.seats);
    println!("Company:         {}", vehicle.company);
    println!("Price per km:    {}", vehicle.price_per_km);
    print!("PUC expiry:      {}", vehicle.puc_expiry);
    if vehicle.inspection_expired(&Date::now()) {
        print!("  (expired)");
    }
    println!();
    Ok(())
}

pub fn output_vehicle_list(output_format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles found");
        return Ok(());
    }

    println!(
        "{:<5} {:<15} {:<8} {:>6} {:>12}  {}",
        "ID", "Registration", "Type", "Seats", "Price/km", "Company"
    );
    println!("{}", "-".repeat(64));
    for v in vehicles {
        println!(
            "{:<5} {:<15} {:<8} {:>6} {:>12}  {}",
            v.id,
            truncate(&v.plate, 15),
            v.class.label(),
            v.seats,
            v.price_per_km,
            v.company
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_user(output_format: OutputFormat, user: &User) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(user);
    }

    println!("\nUser Details");
    println!("============");
    println!("User id:         {}", user.id);
    println!("Name:            {}", user.name);
    println!("Contact:         {}", user.contact);
    println!("Email:           {}", user.email);
    Ok(())
}

pub fn output_trip(output_format: OutputFormat, details: &TripDetails<'_>) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(details);
    }

    let TripDetails {
        trip,
        vehicle,
        user,
        status,
    } = details;

    println!("\nTrip {}", trip.id);
    println!("==========");
    println!("Registration:    {}", vehicle.plate);
    println!("Vehicle type:    {}", vehicle.class);
    println!("Company:         {}", vehicle.company);
    println!("Price per km:    {}", vehicle.price_per_km);
    println!();
    println!("User:            {}", user.name);
    println!("Contact:         {}", user.contact);
    println!();
    println!("Start date:      {}", trip.start_date);
    println!("End date:        {}", trip.end_date);
    if *status != TripStatus::NotStarted {
        println!("Start reading:   {}", trip.start_reading);
    }
    if *status == TripStatus::Completed {
        println!("End reading:     {}", trip.end_reading);
        println!("Total run:       {}", trip.distance());
        println!("Total fare:      {:.2}", trip.fare);
    }
    println!("Trip status:     {}", status.label());
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
