//! Vehicle availability for a requested date range

use rental_types::{Date, RecordId, VehicleClass};

use crate::model::{Trip, Vehicle};

/// Whether `trip`'s planned range overlaps `[start, end]`.
///
/// Ranges are apart when the trip lies entirely at or after `end`, or
/// entirely at or before `start`. Touching endpoints count as apart.
pub fn overlaps(trip: &Trip, start: &Date, end: &Date) -> bool {
    let entirely_after = trip.start_date.at_least(end) && trip.end_date.at_least(end);
    let entirely_before = trip.start_date.at_most(start) && trip.end_date.at_most(start);
    !(entirely_after || entirely_before)
}

/// An incomplete trip on `vehicle_id` overlapping the range.
///
/// Completed trips never block, whatever their planned dates.
pub fn has_conflicting_trip(
    trips: &[Trip],
    vehicle_id: RecordId,
    start: &Date,
    end: &Date,
) -> bool {
    trips
        .iter()
        .any(|t| !t.completed && t.vehicle_id == vehicle_id && overlaps(t, start, end))
}

pub fn available_vehicles<'a>(
    vehicles: &'a [Vehicle],
    trips: &[Trip],
    start: &Date,
    end: &Date,
    class: VehicleClass,
) -> Vec<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.class == class)
        .filter(|v| !has_conflicting_trip(trips, v.id, start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Date {
        Date::from_dmy(d, 6, 2025).unwrap()
    }

    fn vehicle(id: RecordId, class: VehicleClass) -> Vehicle {
        let mut v = Vehicle::new(format!("P{id}"), class, 4, "Acme", 2.5, day(30));
        v.id = id;
        v
    }

    fn trip(vehicle_id: RecordId, from: u32, to: u32) -> Trip {
        Trip::new(vehicle_id, 1, day(from), day(to))
    }

    #[test]
    fn test_car_booked_mid_month() {
        let vehicles = vec![vehicle(1, VehicleClass::Car)];
        let trips = vec![trip(1, 10, 20)];

        let before = available_vehicles(&vehicles, &trips, &day(5), &day(8), VehicleClass::Car);
        assert_eq!(before.len(), 1);

        let inside = available_vehicles(&vehicles, &trips, &day(12), &day(15), VehicleClass::Car);
        assert!(inside.is_empty());

        let after = available_vehicles(&vehicles, &trips, &day(21), &day(30), VehicleClass::Car);
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let t = trip(1, 10, 20);
        assert!(!overlaps(&t, &day(20), &day(25)));
        assert!(!overlaps(&t, &day(5), &day(10)));
        assert!(overlaps(&t, &day(19), &day(25)));
        assert!(overlaps(&t, &day(5), &day(11)));
        assert!(overlaps(&t, &day(1), &day(30)));
    }

    #[test]
    fn test_completed_trip_frees_vehicle() {
        let vehicles = vec![vehicle(1, VehicleClass::Car)];
        let mut t = trip(1, 10, 20);
        t.complete(0, 2.5).unwrap();
        let found = available_vehicles(&vehicles, &[t], &day(12), &day(15), VehicleClass::Car);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_filters_by_class_and_vehicle() {
        let vehicles = vec![
            vehicle(1, VehicleClass::Car),
            vehicle(2, VehicleClass::Car),
            vehicle(3, VehicleClass::Bus),
        ];
        let trips = vec![trip(1, 10, 20)];
        let found = available_vehicles(&vehicles, &trips, &day(12), &day(15), VehicleClass::Car);
        let ids: Vec<RecordId> = found.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
