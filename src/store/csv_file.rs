//! Flat-file (CSV) backing of the visit store
//!
//! The whole table is read on every access and rewritten on every append,
//! through a temporary sibling file that replaces the original by rename.

use std::{
    fs,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{next_sequence, VisitStore};
use crate::{
    error::{AppResult, StoreError},
    models::{VisitEntry, VisitRecord},
};

/// Fixed, ordered column header of the data file
pub const COLUMNS: [&str; 7] = [
    "fecha",
    "nombre_cliente",
    "servicio",
    "profesional",
    "metodo_pago",
    "monto",
    "frecuencia_visita",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const TIMESTAMP_FORMAT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";
const SEQUENCE_PREFIX: &str = "Visita #";

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    fecha: String,
    nombre_cliente: String,
    servicio: String,
    profesional: String,
    metodo_pago: String,
    monto: String,
    frecuencia_visita: String,
}

impl From<&VisitRecord> for CsvRow {
    fn from(record: &VisitRecord) -> Self {
        Self {
            fecha: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            nombre_cliente: record.client_name.clone(),
            servicio: record.service_name.clone(),
            profesional: record.staff_name.clone(),
            metodo_pago: record.payment_method.clone(),
            monto: record.amount.to_string(),
            frecuencia_visita: format_sequence(record.visit_sequence_number),
        }
    }
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<VisitRecord, StoreError> {
        let malformed = |message: String| StoreError::MalformedRow { row, message };

        let timestamp = parse_timestamp(&self.fecha)
            .ok_or_else(|| malformed(format!("invalid fecha '{}'", self.fecha)))?;
        let amount = Decimal::from_str(self.monto.trim())
            .map_err(|_| malformed(format!("invalid monto '{}'", self.monto)))?;
        let visit_sequence_number = parse_sequence(&self.frecuencia_visita).ok_or_else(|| {
            malformed(format!("invalid frecuencia_visita '{}'", self.frecuencia_visita))
        })?;

        Ok(VisitRecord {
            timestamp,
            client_name: self.nombre_cliente,
            service_name: self.servicio,
            staff_name: self.profesional,
            payment_method: self.metodo_pago,
            amount,
            visit_sequence_number,
        })
    }
}

/// `Visita #3`
pub fn format_sequence(sequence: u32) -> String {
    format!("{}{}", SEQUENCE_PREFIX, sequence)
}

fn parse_sequence(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.strip_prefix(SEQUENCE_PREFIX).unwrap_or(raw).trim().parse().ok()
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT_SECONDS))
        .ok()
}

/// Parse a full table. Rows are numbered from 1, excluding the header.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<VisitRecord>, StoreError> {
    csv::Reader::from_reader(reader)
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, row)| row.map_err(StoreError::from)?.into_record(i + 1))
        .collect()
}

/// Write a full table, header first, even when `records` is empty.
pub fn write_records_to<W: Write>(writer: W, records: &[VisitRecord]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer
        .flush()
        .map_err(|e| StoreError::Csv(csv::Error::from(e)))?;
    Ok(())
}

/// Clones share one write lock, so appends through any of them are serialized.
#[derive(Debug, Clone)]
pub struct CsvVisitStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvVisitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a header-only file when none exists. Returns whether a file was created.
    pub fn initialize(&self) -> AppResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        self.write_records(&[])?;
        tracing::info!(path = %self.path.display(), "Created data file");
        Ok(true)
    }

    /// Read every record; a missing file reads as an empty table.
    pub fn read_records(&self) -> AppResult<Vec<VisitRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e).into()),
        };
        Ok(read_records_from(file)?)
    }

    /// Replace the file contents with `records`
    pub fn write_records(&self, records: &[VisitRecord]) -> AppResult<()> {
        let tmp_path = self.temp_path();
        let file = fs::File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
        let mut writer = BufWriter::new(file);
        write_records_to(&mut writer, records)?;
        writer.flush().map_err(|e| StoreError::io(&tmp_path, e))?;
        drop(writer);
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl VisitStore for CsvVisitStore {
    async fn load_all(&self) -> AppResult<Vec<VisitRecord>> {
        self.read_records()
    }

    async fn append(&self, entry: VisitEntry) -> AppResult<VisitRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records()?;
        let prior = records
            .iter()
            .filter(|r| r.client_name == entry.client_name)
            .count();
        let record = entry.numbered(next_sequence(prior));
        records.push(record.clone());
        self.write_records(&records)?;
        Ok(record)
    }
}
