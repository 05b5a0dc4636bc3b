//! User record
//!
//! Line: `id;name;contact;email`

use serde::{Deserialize, Serialize};

use rental_types::{EntityKind, RecordId, ValidationError};

use crate::codec::{ensure_plain, field, parse_field, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    /// Contact number, unique per user
    pub contact: String,
    pub email: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            contact: contact.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            self.email.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError> {
        Ok(Self {
            id: parse_field(fields, 0, "id")?,
            name: field(fields, 1, "name")?.to_string(),
            contact: field(fields, 2, "contact")?.to_string(),
            email: field(fields, 3, "email")?.to_string(),
        })
    }

    fn apply(&mut self, other: &Self) {
        self.name = other.name.clone();
        self.contact = other.contact.clone();
        self.email = other.email.clone();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_plain("name", &self.name)?;
        ensure_plain("contact", &self.contact)?;
        ensure_plain("email", &self.email)
    }
}
