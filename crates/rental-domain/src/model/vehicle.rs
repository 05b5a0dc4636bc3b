//! Vehicle record
//!
//! Line: `id;plate;classCode;seats;companyName;pricePerDistance;pucExpiry`

use serde::{Deserialize, Serialize};

use rental_types::{Date, EntityKind, RecordId, ValidationError, VehicleClass};

use crate::codec::{ensure_plain, field, parse_field, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: RecordId,
    /// Registration plate, unique per vehicle
    pub plate: String,
    pub class: VehicleClass,
    pub seats: u32,
    pub company: String,
    /// Price per distance unit
    pub price_per_km: f64,
    /// Pollution-under-control certificate expiry
    pub puc_expiry: Date,
}

impl Vehicle {
    /// Unsaved vehicle; the table assigns the identifier
    pub fn new(
        plate: impl Into<String>,
        class: VehicleClass,
        seats: u32,
        company: impl Into<String>,
        price_per_km: f64,
        puc_expiry: Date,
    ) -> Self {
        Self {
            id: 0,
            plate: plate.into(),
            class,
            seats,
            company: company.into(),
            price_per_km,
            puc_expiry,
        }
    }

    pub fn inspection_expired(&self, on: &Date) -> bool {
        self.puc_expiry.before(on)
    }
}

impl Record for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.plate.clone(),
            self.class.code().to_string(),
            self.seats.to_string(),
            self.company.clone(),
            self.price_per_km.to_string(),
            self.puc_expiry.to_text(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError> {
        Ok(Self {
            id: parse_field(fields, 0, "id")?,
            plate: field(fields, 1, "plate")?.to_string(),
            class: field(fields, 2, "class")?.parse()?,
            seats: parse_field(fields, 3, "seats")?,
            company: field(fields, 4, "company")?.to_string(),
            price_per_km: parse_field(fields, 5, "price")?,
            puc_expiry: Date::try_from(field(fields, 6, "puc_expiry")?.to_string())?,
        })
    }

    fn apply(&mut self, other: &Self) {
        self.plate = other.plate.clone();
        self.class = other.class;
        self.seats = other.seats;
        self.company = other.company.clone();
        self.price_per_km = other.price_per_km;
        self.puc_expiry = other.puc_expiry;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_plain("plate", &self.plate)?;
        ensure_plain("company", &self.company)?;
        if !self.price_per_km.is_finite() {
            return Err(ValidationError::InvalidNumber {
                field: "price",
                value: self.price_per_km.to_string(),
            });
        }
        Ok(())
    }
}
