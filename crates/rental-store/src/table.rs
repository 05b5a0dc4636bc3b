//! File-backed table for one record type
//!
//! The in-memory list is the source of truth. Every add/update rewrites the
//! whole file through a temp file in the same directory, then renames it over
//! the old one, so the file holds either the old or the new full list.
//! A failed write rolls the in-memory list back before the error is returned.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use rental_domain::codec::{self, Record};
use rental_types::{Error, RecordId, Result, ValidationError};

pub struct Table<T: Record> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> Table<T> {
    /// Empty table backed by `path`; nothing is read until [`Table::load`]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the backing file. A malformed line fails the whole load.
    pub fn load(&mut self) -> Result<()> {
        let rows = self.read_rows()?;
        let mut records = Vec::with_capacity(rows.len());
        for (line, row) in rows {
            let record = row.map_err(|e| {
                warn!("{} line {}: {}", self.path.display(), line, e);
                e
            })?;
            records.push(record);
        }
        self.records = records;
        debug!("Loaded {} {} records", self.records.len(), T::KIND);
        Ok(())
    }

    /// Read the backing file, dropping lines that fail to decode or that
    /// `keep` rejects. Returns the number of dropped lines.
    pub fn load_lenient<F>(&mut self, mut keep: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let rows = self.read_rows()?;
        let mut records = Vec::with_capacity(rows.len());
        let mut dropped = 0;
        for (line, row) in rows {
            match row {
                Ok(record) if keep(&record) => records.push(record),
                Ok(record) => {
                    warn!(
                        "{} line {}: dropping {} {} with unresolved references",
                        self.path.display(),
                        line,
                        T::KIND,
                        record.id()
                    );
                    dropped += 1;
                }
                Err(e) => {
                    warn!("{} line {}: dropping row: {}", self.path.display(), line, e);
                    dropped += 1;
                }
            }
        }
        self.records = records;
        debug!(
            "Loaded {} {} records ({} dropped)",
            self.records.len(),
            T::KIND,
            dropped
        );
        Ok(dropped)
    }

    fn read_rows(&self) -> Result<Vec<(u64, Result<T>)>> {
        let file = File::open(&self.path)?;
        let mut reader = codec::reader(BufReader::new(file));

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let fallback_line = index as u64 + 1;
            match result {
                Ok(record) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
                    rows.push((line, codec::from_row(&record).map_err(Error::from)));
                }
                Err(e) => match map_csv_error(e) {
                    Error::Io(e) => return Err(Error::Io(e)),
                    other => rows.push((fallback_line, Err(other))),
                },
            }
        }
        Ok(rows)
    }

    /// `len + 1` while identifiers are dense. Rows dropped at load leave gaps,
    /// so the highest stored identifier bounds it from below.
    pub fn next_id(&self) -> RecordId {
        let highest = self.records.iter().map(Record::id).max().unwrap_or(0);
        (self.records.len() as RecordId).max(highest) + 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in file order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn get_by_id(&self, id: RecordId) -> Result<&T> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND, id))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        self.records.iter().find(predicate)
    }

    /// Store a copy of `record` under the next identifier and persist.
    pub fn add(&mut self, record: T) -> Result<&T> {
        record.validate()?;
        self.records
            .try_reserve(1)
            .map_err(|_| Error::OutOfMemory)?;

        let mut record = record;
        record.set_id(self.next_id());
        let id = record.id();
        self.records.push(record);

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        info!("Added {} {}", T::KIND, id);
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Apply `updated` onto the stored record with the same identifier and persist.
    pub fn update(&mut self, updated: &T) -> Result<&T> {
        updated.validate()?;
        let index = self
            .records
            .iter()
            .position(|r| r.id() == updated.id())
            .ok_or_else(|| Error::not_found(T::KIND, updated.id()))?;

        let snapshot = self.records[index].clone();
        self.records[index].apply(updated);

        if let Err(e) = self.persist() {
            self.records[index] = snapshot;
            return Err(e);
        }

        info!("Updated {} {}", T::KIND, updated.id());
        Ok(&self.records[index])
    }

    fn persist(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = codec::writer(tmp.as_file());
            for record in &self.records {
                writer.write_record(record.to_fields()).map_err(map_csv_error)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(
            "Wrote {} {} records to {}",
            self.records.len(),
            T::KIND,
            self.path.display()
        );
        Ok(())
    }
}

fn map_csv_error(err: csv::Error) -> Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::Io(e),
        _ => ValidationError::MalformedRecord(message).into(),
    }
}
