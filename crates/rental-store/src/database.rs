//! The rental database: vehicle, user, and trip tables in one data directory
//!
//! Only the database turns a trip's vehicle/user identifiers into records.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use log::{info, warn};

use rental_domain::model::{Entity, Trip, TripDetails, User, Vehicle};
use rental_domain::service::availability;
use rental_types::{Date, EntityKind, Error, RecordId, Result, VehicleClass};

use crate::table::Table;

pub const VEHICLE_FILE: &str = "vehicle.txt";
pub const USER_FILE: &str = "users.txt";
pub const TRIP_FILE: &str = "trips.txt";

pub struct Database {
    data_dir: PathBuf,
    vehicles: Table<Vehicle>,
    users: Table<User>,
    trips: Table<Trip>,
}

impl Database {
    /// Load all tables from `data_dir`. Every table file must already exist.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let mut db = Self {
            vehicles: Table::new(data_dir.join(VEHICLE_FILE)),
            users: Table::new(data_dir.join(USER_FILE)),
            trips: Table::new(data_dir.join(TRIP_FILE)),
            data_dir,
        };
        db.reload()?;
        Ok(db)
    }

    /// Like [`Database::open`], creating the directory and empty table files first
    pub fn open_or_create(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        for name in [VEHICLE_FILE, USER_FILE, TRIP_FILE] {
            let path = data_dir.join(name);
            if !path.exists() {
                OpenOptions::new().create(true).append(true).open(&path)?;
                info!("Created empty table file {}", path.display());
            }
        }
        Self::open(data_dir)
    }

    /// Vehicles, then users, then trips. Trips whose vehicle or user cannot
    /// be resolved are dropped.
    pub fn reload(&mut self) -> Result<()> {
        self.vehicles.load()?;
        self.users.load()?;

        let vehicles = &self.vehicles;
        let users = &self.users;
        let dropped = self
            .trips
            .load_lenient(|t| vehicles.contains(t.vehicle_id) && users.contains(t.user_id))?;
        if dropped > 0 {
            warn!("Skipped {} unreadable trip rows", dropped);
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn vehicles(&self) -> &Table<Vehicle> {
        &self.vehicles
    }

    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    pub fn trips(&self) -> &Table<Trip> {
        &self.trips
    }

    pub fn find_vehicle_by_plate(&self, plate: &str) -> Result<&Vehicle> {
        self.vehicles
            .find(|v| v.plate == plate)
            .ok_or_else(|| Error::not_found(EntityKind::Vehicle, plate))
    }

    pub fn find_user_by_contact(&self, contact: &str) -> Result<&User> {
        self.users
            .find(|u| u.contact == contact)
            .ok_or_else(|| Error::not_found(EntityKind::User, contact))
    }

    /// Vehicles of `class` with no incomplete trip overlapping `[start, end]`
    pub fn find_available_vehicles(
        &self,
        start: &Date,
        end: &Date,
        class: VehicleClass,
    ) -> Vec<&Vehicle> {
        availability::available_vehicles(
            self.vehicles.records(),
            self.trips.records(),
            start,
            end,
            class,
        )
    }

    pub fn resolve_trip<'a>(&'a self, trip: &'a Trip) -> Result<TripDetails<'a>> {
        let vehicle = self.vehicles.get_by_id(trip.vehicle_id)?;
        let user = self.users.get_by_id(trip.user_id)?;
        Ok(TripDetails::new(trip, vehicle, user))
    }

    pub fn trip_details(&self, id: RecordId) -> Result<TripDetails<'_>> {
        let trip = self.trips.get_by_id(id)?;
        self.resolve_trip(trip)
    }

    /// Insert into the table matching the record's kind. On success the
    /// assigned identifier is written back into `record`.
    pub fn add_record(&mut self, record: &mut Entity) -> Result<RecordId> {
        let id = match record {
            Entity::Vehicle(v) => self.vehicles.add(v.clone())?.id,
            Entity::User(u) => self.users.add(u.clone())?.id,
            Entity::Trip(t) => {
                self.check_references(t)?;
                self.trips.add(t.clone())?.id
            }
        };
        record.set_id(id);
        Ok(id)
    }

    pub fn update_record(&mut self, record: &Entity) -> Result<()> {
        match record {
            Entity::Vehicle(v) => {
                self.vehicles.update(v)?;
            }
            Entity::User(u) => {
                self.users.update(u)?;
            }
            Entity::Trip(t) => {
                self.check_references(t)?;
                self.trips.update(t)?;
            }
        }
        Ok(())
    }

    fn check_references(&self, trip: &Trip) -> Result<()> {
        self.vehicles.get_by_id(trip.vehicle_id)?;
        self.users.get_by_id(trip.user_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(text: &str) -> Date {
        Date::parse(text).unwrap()
    }

    fn seed(dir: &Path, vehicles: &str, users: &str, trips: &str) {
        fs::write(dir.join(VEHICLE_FILE), vehicles).unwrap();
        fs::write(dir.join(USER_FILE), users).unwrap();
        fs::write(dir.join(TRIP_FILE), trips).unwrap();
    }

    #[test]
    fn test_open_requires_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Database::open(dir.path().to_path_buf()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_open_or_create_starts_empty() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("rental");
        let db = Database::open_or_create(data_dir.clone()).unwrap();
        assert!(db.vehicles().is_empty());
        assert!(data_dir.join(TRIP_FILE).exists());
    }

    #[test]
    fn test_load_drops_unresolvable_trips() {
        let dir = tempdir().unwrap();
        seed(
            dir.path(),
            "1;AB123;2;4;Acme;2.5;1/1/2030\n",
            "1;Jane;555;j@x.com\n",
            "1;1;1;1/6/2025;5/6/2025;0;0;0;0\n\
             2;9;1;1/6/2025;5/6/2025;0;0;0;0\n\
             3;1;7;1/6/2025;5/6/2025;0;0;0;0\n\
             4;1;1;garbage\n",
        );
        let db = Database::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(db.trips().len(), 1);
        assert_eq!(db.trips().records()[0].id, 1);
    }

    #[test]
    fn test_new_trip_after_dropped_row_gets_fresh_id() {
        let dir = tempdir().unwrap();
        seed(
            dir.path(),
            "1;AB123;2;4;Acme;2.5;1/1/2030\n",
            "1;Jane;555;j@x.com\n",
            "1;1;1;1/6/2025;5/6/2025;0;0;0;0\n\
             2;9;1;1/6/2025;5/6/2025;0;0;0;0\n\
             3;1;1;10/7/2025;12/7/2025;0;0;0;0\n",
        );
        let mut db = Database::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(db.trips().len(), 2);

        let mut trip: Entity = Trip::new(1, 1, date("1/9/2025"), date("3/9/2025")).into();
        assert_eq!(db.add_record(&mut trip).unwrap(), 4);

        let details = db.trip_details(4).unwrap();
        assert_eq!(details.trip.start_date, date("1/9/2025"));
        assert_eq!(db.trip_details(3).unwrap().trip.start_date, date("10/7/2025"));

        let stored = fs::read_to_string(dir.path().join(TRIP_FILE)).unwrap();
        let ids: Vec<&str> = stored.lines().filter_map(|l| l.split(';').next()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_malformed_vehicle_fails_open() {
        let dir = tempdir().unwrap();
        seed(dir.path(), "1;AB123;2;four;Acme;2.5;1/1/2030\n", "", "");
        assert!(matches!(
            Database::open(dir.path().to_path_buf()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_lookup_by_business_keys() {
        let dir = tempdir().unwrap();
        seed(
            dir.path(),
            "1;AB123;2;4;Acme;2.5;1/1/2030\n2;CD456;3;30;Metro;9;1/1/2031\n",
            "1;Jane;555;j@x.com\n",
            "",
        );
        let db = Database::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(db.find_vehicle_by_plate("CD456").unwrap().id, 2);
        assert_eq!(db.find_user_by_contact("555").unwrap().name, "Jane");
        assert!(db.find_vehicle_by_plate("ZZ").unwrap_err().is_not_found());
        assert!(db.find_user_by_contact("000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_record_writes_id_back() {
        let dir = tempdir().unwrap();
        let mut db = Database::open_or_create(dir.path().to_path_buf()).unwrap();

        let mut vehicle: Entity = Vehicle::new(
            "AB123",
            VehicleClass::Car,
            4,
            "Acme",
            2.5,
            date("1/1/2030"),
        )
        .into();
        assert_eq!(db.add_record(&mut vehicle).unwrap(), 1);
        assert_eq!(vehicle.id(), 1);

        let mut user: Entity = User::new("Jane", "555", "j@x.com").into();
        db.add_record(&mut user).unwrap();
        assert_eq!(user.id(), 1);

        let mut trip: Entity = Trip::new(1, 1, date("1/6/2025"), date("5/6/2025")).into();
        db.add_record(&mut trip).unwrap();
        assert_eq!(trip.id(), 1);

        let details = db.trip_details(1).unwrap();
        assert_eq!(details.vehicle.plate, "AB123");
        assert_eq!(details.user.contact, "555");
    }

    #[test]
    fn test_add_trip_with_unknown_vehicle() {
        let dir = tempdir().unwrap();
        let mut db = Database::open_or_create(dir.path().to_path_buf()).unwrap();
        let mut user: Entity = User::new("Jane", "555", "j@x.com").into();
        db.add_record(&mut user).unwrap();

        let mut trip: Entity = Trip::new(4, 1, date("1/6/2025"), date("5/6/2025")).into();
        assert!(db.add_record(&mut trip).unwrap_err().is_not_found());
        assert!(db.trips().is_empty());
        assert_eq!(trip.id(), 0);
    }

    #[test]
    fn test_available_vehicles_scenario() {
        let dir = tempdir().unwrap();
        seed(
            dir.path(),
            "1;AB123;2;4;Acme;2.5;1/1/2030\n",
            "1;Jane;555;j@x.com\n",
            "1;1;1;10/6/2025;20/6/2025;0;0;0;0\n",
        );
        let db = Database::open(dir.path().to_path_buf()).unwrap();
        let car = VehicleClass::Car;
        assert_eq!(
            db.find_available_vehicles(&date("5/6/2025"), &date("8/6/2025"), car).len(),
            1
        );
        assert!(db
            .find_available_vehicles(&date("12/6/2025"), &date("15/6/2025"), car)
            .is_empty());
        assert_eq!(
            db.find_available_vehicles(&date("21/6/2025"), &date("30/6/2025"), car).len(),
            1
        );
        assert!(db
            .find_available_vehicles(&date("5/6/2025"), &date("8/6/2025"), VehicleClass::Bus)
            .is_empty());
    }

    #[test]
    fn test_update_record_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let mut db = Database::open_or_create(dir.path().to_path_buf()).unwrap();
        let mut vehicle: Entity = Vehicle::new(
            "AB123",
            VehicleClass::Car,
            4,
            "Acme",
            2.5,
            date("1/1/2030"),
        )
        .into();
        db.add_record(&mut vehicle).unwrap();

        let mut edited = db.find_vehicle_by_plate("AB123").unwrap().clone();
        edited.price_per_km = 3.0;
        db.update_record(&Entity::Vehicle(edited)).unwrap();

        let reopened = Database::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.find_vehicle_by_plate("AB123").unwrap().price_per_km, 3.0);
    }
}
