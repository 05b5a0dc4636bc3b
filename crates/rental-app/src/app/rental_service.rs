//! Rental Service - use cases behind the CLI
//!
//! Every mutation copies the stored record, changes the copy, and hands it to
//! the database as an update, so a failed write leaves the tables untouched.

use log::info;

use rental_domain::model::{Entity, Trip, TripDetails, User, Vehicle};
use rental_store::Database;
use rental_types::{Date, EntityKind, Reading, RecordId, Result, ValidationError, VehicleClass};

pub struct RentalService {
    db: Database,
}

impl RentalService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Register a vehicle. The plate must not be in use.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<Vehicle> {
        if self.db.find_vehicle_by_plate(&vehicle.plate).is_ok() {
            return Err(ValidationError::Duplicate {
                kind: EntityKind::Vehicle,
                key: format!("plate {}", vehicle.plate),
            }
            .into());
        }

        let mut record = Entity::Vehicle(vehicle);
        let id = self.db.add_record(&mut record)?;
        info!("Registered vehicle {}", id);
        Ok(self.db.vehicles().get_by_id(id)?.clone())
    }

    pub fn get_vehicle_by_plate(&self, plate: &str) -> Result<Vehicle> {
        self.db.find_vehicle_by_plate(plate).cloned()
    }

    pub fn list_vehicles(&self) -> Vec<Vehicle> {
        self.db.vehicles().records().to_vec()
    }

    pub fn edit_vehicle_price(&mut self, plate: &str, price_per_km: f64) -> Result<Vehicle> {
        let mut edited = self.db.find_vehicle_by_plate(plate)?.clone();
        edited.price_per_km = price_per_km;
        let id = edited.id;
        self.db.update_record(&Entity::Vehicle(edited))?;
        Ok(self.db.vehicles().get_by_id(id)?.clone())
    }

    /// Register a user. The contact must not be in use.
    pub fn add_user(&mut self, user: User) -> Result<User> {
        if self.db.find_user_by_contact(&user.contact).is_ok() {
            return Err(ValidationError::Duplicate {
                kind: EntityKind::User,
                key: format!("contact {}", user.contact),
            }
            .into());
        }

        let mut record = Entity::User(user);
        let id = self.db.add_record(&mut record)?;
        info!("Registered user {}", id);
        Ok(self.db.users().get_by_id(id)?.clone())
    }

    pub fn get_user_by_contact(&self, contact: &str) -> Result<User> {
        self.db.find_user_by_contact(contact).cloned()
    }

    pub fn list_available_vehicles(
        &self,
        start: &Date,
        end: &Date,
        class: VehicleClass,
    ) -> Vec<Vehicle> {
        self.db
            .find_available_vehicles(start, end, class)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Book `plate` for the user with `contact` over `[start, end]`
    pub fn create_trip(
        &mut self,
        contact: &str,
        plate: &str,
        start: Date,
        end: Date,
    ) -> Result<Trip> {
        if end.before(&start) {
            return Err(ValidationError::EndBeforeStart {
                start: start.to_text(),
                end: end.to_text(),
            }
            .into());
        }

        let user_id = self.db.find_user_by_contact(contact)?.id;
        let vehicle = self.db.find_vehicle_by_plate(plate)?;
        let vehicle_id = vehicle.id;

        let free = self
            .db
            .find_available_vehicles(&start, &end, vehicle.class)
            .iter()
            .any(|v| v.id == vehicle_id);
        if !free {
            return Err(ValidationError::VehicleUnavailable(plate.to_string()).into());
        }

        let mut record = Entity::Trip(Trip::new(vehicle_id, user_id, start, end));
        let id = self.db.add_record(&mut record)?;
        info!("Booked trip {} for vehicle {}", id, plate);
        self.get_trip_by_id(id)
    }

    pub fn get_trip_by_id(&self, id: RecordId) -> Result<Trip> {
        self.db.trips().get_by_id(id).cloned()
    }

    pub fn get_trip_details(&self, id: RecordId) -> Result<TripDetails<'_>> {
        self.db.trip_details(id)
    }

    pub fn start_trip(&mut self, id: RecordId, reading: Reading) -> Result<Trip> {
        let mut trip = self.get_trip_by_id(id)?;
        trip.start(reading)?;
        self.db.update_record(&Entity::Trip(trip))?;
        info!("Started trip {} at reading {}", id, reading);
        self.get_trip_by_id(id)
    }

    /// Close the trip and return its fare. A completed trip returns its stored fare.
    pub fn complete_trip(&mut self, id: RecordId, reading: Reading) -> Result<f64> {
        let mut trip = self.get_trip_by_id(id)?;
        if trip.completed {
            return Ok(trip.fare);
        }

        let price_per_km = self.db.vehicles().get_by_id(trip.vehicle_id)?.price_per_km;
        let fare = trip.complete(reading, price_per_km)?;
        self.db.update_record(&Entity::Trip(trip))?;
        info!("Completed trip {} with fare {}", id, fare);
        Ok(fare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_types::Error;
    use tempfile::tempdir;

    fn service(dir: &std::path::Path) -> RentalService {
        RentalService::new(Database::open_or_create(dir.to_path_buf()).unwrap())
    }

    fn date(text: &str) -> Date {
        Date::parse(text).unwrap()
    }

    fn car(plate: &str) -> Vehicle {
        Vehicle::new(plate, VehicleClass::Car, 4, "Acme", 2.5, date("1/1/2030"))
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        let err = svc.add_vehicle(car("AB123")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Duplicate { kind: EntityKind::Vehicle, .. })
        ));
        assert_eq!(svc.list_vehicles().len(), 1);
    }

    #[test]
    fn test_duplicate_contact_rejected() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_user(User::new("Jane", "555", "j@x.com")).unwrap();
        assert!(svc.add_user(User::new("Janet", "555", "jt@x.com")).is_err());
    }

    #[test]
    fn test_edit_price_unknown_plate() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        assert!(svc.edit_vehicle_price("NOPE", 1.0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_trip_rejects_overlapping_booking() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        svc.add_user(User::new("Jane", "555", "j@x.com")).unwrap();
        svc.create_trip("555", "AB123", date("10/6/2025"), date("20/6/2025"))
            .unwrap();

        let err = svc
            .create_trip("555", "AB123", date("12/6/2025"), date("15/6/2025"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::VehicleUnavailable(_))
        ));

        let later = svc
            .create_trip("555", "AB123", date("20/6/2025"), date("25/6/2025"))
            .unwrap();
        assert_eq!(later.id, 2);
    }

    #[test]
    fn test_create_trip_rejects_reversed_range() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        svc.add_user(User::new("Jane", "555", "j@x.com")).unwrap();
        let err = svc
            .create_trip("555", "AB123", date("5/6/2025"), date("1/6/2025"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_create_trip_unknown_user() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        let err = svc
            .create_trip("999", "AB123", date("1/6/2025"), date("5/6/2025"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_start_completed_trip_rejected() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        svc.add_user(User::new("Jane", "555", "j@x.com")).unwrap();
        let trip = svc
            .create_trip("555", "AB123", date("1/6/2025"), date("5/6/2025"))
            .unwrap();
        svc.start_trip(trip.id, 10).unwrap();
        svc.complete_trip(trip.id, 20).unwrap();
        assert!(matches!(
            svc.start_trip(trip.id, 30),
            Err(Error::Validation(ValidationError::TripCompleted(1)))
        ));
        assert_eq!(svc.get_trip_by_id(trip.id).unwrap().start_reading, 10);
    }

    #[test]
    fn test_completed_trip_frees_vehicle_for_new_booking() {
        let dir = tempdir().unwrap();
        let mut svc = service(dir.path());
        svc.add_vehicle(car("AB123")).unwrap();
        svc.add_user(User::new("Jane", "555", "j@x.com")).unwrap();
        let trip = svc
            .create_trip("555", "AB123", date("10/6/2025"), date("20/6/2025"))
            .unwrap();
        svc.start_trip(trip.id, 0).unwrap();
        svc.complete_trip(trip.id, 40).unwrap();

        let available =
            svc.list_available_vehicles(&date("12/6/2025"), &date("15/6/2025"), VehicleClass::Car);
        assert_eq!(available.len(), 1);
    }
}
