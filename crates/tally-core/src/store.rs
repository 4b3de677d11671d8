//! Ledger storage
//!
//! # Architecture
//!
//! - `RecordStore` trait defines the append-only interface the pipeline needs
//! - `CsvRecordStore` keeps records in a flat CSV file
//! - `MemoryRecordStore` keeps records in memory (tests, embedding)
//!
//! # File Format
//!
//! ```text
//! date,category,amount,notes
//! 01/01/2024,Groceries,45.99,weekly shop
//! ```
//!
//! Rows are returned exactly as stored. Validation happens later, in
//! [`crate::normalize`].

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{RawRecord, LEDGER_HEADERS};

/// Append-only collection of raw ledger records
pub trait RecordStore: Send + Sync {
    /// All records in append order; an empty store yields an empty vector
    fn read_all(&self) -> Result<Vec<RawRecord>>;

    /// Append one record to the end of the store
    fn append(&self, record: &RawRecord) -> Result<()>;
}

/// CSV file ledger
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    /// Open a ledger file, creating it with a header row if it doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut wtr = WriterBuilder::new().from_path(&path)?;
            wtr.write_record(LEDGER_HEADERS)?;
            wtr.flush()?;
            info!("Created ledger: {}", path.display());
        }

        Ok(Self { path })
    }

    /// Get the ledger file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Map a CSV row to a raw record by position
///
/// Short rows yield empty fields, which the normalizer then rejects.
fn record_from_row(row: &StringRecord) -> RawRecord {
    let field = |i: usize| row.get(i).unwrap_or("").to_string();
    RawRecord {
        date: field(0),
        category: field(1),
        amount: field(2),
        notes: field(3),
    }
}

impl RecordStore for CsvRecordStore {
    fn read_all(&self) -> Result<Vec<RawRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            records.push(record_from_row(&row));
        }

        debug!(
            "Read {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn append(&self, record: &RawRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;

        let needs_header = file.metadata()?.len() == 0;
        if !needs_header && !ends_with_newline(&mut file)? {
            // Terminate a last line that lacks its newline
            file.write_all(b"\n")?;
        }

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            wtr.write_record(LEDGER_HEADERS)?;
        }
        wtr.write_record([
            record.date.as_str(),
            record.category.as_str(),
            record.amount.as_str(),
            record.notes.as_str(),
        ])?;
        wtr.flush()?;

        debug!("Appended record to {}", self.path.display());
        Ok(())
    }
}

/// Whether a non-empty file's last byte is a line feed
fn ends_with_newline(file: &mut File) -> Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// In-memory ledger
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<RawRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn poisoned() -> Error {
    Error::Io(std::io::Error::other("in-memory ledger lock poisoned"))
}

impl RecordStore for MemoryRecordStore {
    fn read_all(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.read().map_err(|_| poisoned())?.clone())
    }

    fn append(&self, record: &RawRecord) -> Result<()> {
        self.records
            .write()
            .map_err(|_| poisoned())?
            .push(record.clone());
        Ok(())
    }
}
