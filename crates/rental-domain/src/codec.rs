//! Delimited record codec
//!
//! One record per line, identifier first, then the fields in a fixed per-type
//! order. The field order is the on-disk format. Table files and single lines
//! are both read through [`reader`], so there is one parser for the format.

use std::io::{Read, Write};
use std::str::FromStr;

use csv::StringRecord;

use rental_types::{EntityKind, RecordId, ValidationError};

pub const DELIMITER: char = ';';

/// A record type stored in its own table file
pub trait Record: Clone {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Fields in on-disk order, identifier first
    fn to_fields(&self) -> Vec<String>;

    fn from_fields(fields: &[&str]) -> Result<Self, ValidationError>;

    /// Overwrite this record's data from `other`, keyed by identifier
    fn apply(&mut self, other: &Self);

    /// Checks run before the record enters a table
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Line reader: `;` delimited, no header, no quoting, rows of any length.
/// Blank lines are skipped.
pub fn reader<T: Read>(source: T) -> csv::Reader<T> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(source)
}

pub fn writer<T: Write>(sink: T) -> csv::Writer<T> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER as u8)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(sink)
}

pub fn from_row<R: Record>(row: &StringRecord) -> Result<R, ValidationError> {
    let fields: Vec<&str> = row.iter().collect();
    R::from_fields(&fields)
}

pub fn encode<R: Record>(record: &R) -> String {
    record.to_fields().join(&DELIMITER.to_string())
}

pub fn decode<R: Record>(line: &str) -> Result<R, ValidationError> {
    let mut rows = reader(line.as_bytes());
    match rows.records().next() {
        Some(Ok(row)) => from_row(&row),
        Some(Err(e)) => Err(ValidationError::MalformedRecord(e.to_string())),
        None => Err(ValidationError::MissingField("id")),
    }
}

pub(crate) fn field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(index)
        .copied()
        .ok_or(ValidationError::MissingField(name))
}

pub(crate) fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    name: &'static str,
) -> Result<T, ValidationError> {
    let raw = field(fields, index, name)?;
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: name,
            value: raw.to_string(),
        })
}

/// Rejects text that would break the line format
pub(crate) fn ensure_plain(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(DELIMITER) || value.contains('\n') || value.contains('\r') {
        return Err(ValidationError::ForbiddenCharacter {
            field: name,
            value: value.to_string(),
        });
    }
    Ok(())
}
