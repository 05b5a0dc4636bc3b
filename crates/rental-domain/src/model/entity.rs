//! Tagged union over the stored record types

use serde::{Deserialize, Serialize};

use rental_types::{EntityKind, RecordId};

use crate::codec::Record;
use crate::model::{Trip, User, Vehicle};

/// Any persisted record. The database routes add/update on the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Vehicle(Vehicle),
    User(User),
    Trip(Trip),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Vehicle(_) => EntityKind::Vehicle,
            Entity::User(_) => EntityKind::User,
            Entity::Trip(_) => EntityKind::Trip,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            Entity::Vehicle(v) => v.id(),
            Entity::User(u) => u.id(),
            Entity::Trip(t) => t.id(),
        }
    }

    pub fn set_id(&mut self, id: RecordId) {
        match self {
            Entity::Vehicle(v) => v.set_id(id),
            Entity::User(u) => u.set_id(id),
            Entity::Trip(t) => t.set_id(id),
        }
    }
}

impl From<Vehicle> for Entity {
    fn from(v: Vehicle) -> Self {
        Entity::Vehicle(v)
    }
}

impl From<User> for Entity {
    fn from(u: User) -> Self {
        Entity::User(u)
    }
}

impl From<Trip> for Entity {
    fn from(t: Trip) -> Self {
        Entity::Trip(t)
    }
}
