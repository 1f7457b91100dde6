use std::path::Path;

use csv::StringRecord;
use tokio::io::AsyncReadExt;

use crate::error::{ReplayError, Result};
use crate::models::VitalReading;

/// First-column value that marks a header row.
pub const HEADER_MARKER: &str = "timestamp";

/// Convert one source row into a reading.
///
/// Never fails: missing text columns read as empty and numeric columns that
/// are missing or unparsable read as zero.
pub fn parse_record(record: &StringRecord) -> VitalReading {
    let text = |index: usize| record.get(index).unwrap_or_default().to_string();
    let int = |index: usize| {
        record
            .get(index)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0)
    };
    let float = |index: usize| {
        record
            .get(index)
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    VitalReading {
        timestamp: text(0),
        patient_id: text(1),
        patient_name: text(2),
        patient_cpf: text(3),
        heart_rate: int(4),
        oxygen_saturation: int(5),
        systolic_pressure: int(6),
        diastolic_pressure: int(7),
        temperature: float(8),
        respiratory_rate: int(9),
        status: text(10),
    }
}

/// Split raw CSV bytes into records. Every row must have the width of the first.
///
/// Cells are not required to be UTF-8; invalid bytes become U+FFFD.
pub fn read_records(raw: &[u8]) -> std::result::Result<Vec<StringRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(raw)
        .byte_records()
        .map(|record| record.map(StringRecord::from_byte_record_lossy))
        .collect()
}

/// Read a whole source into memory. The file handle is released before this returns.
pub async fn load_records(path: &Path) -> Result<Vec<StringRecord>> {
    let mut raw = Vec::new();
    {
        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(|source| ReplayError::SourceOpen {
                path: path.to_path_buf(),
                source,
            })?;
        file.read_to_end(&mut raw)
            .await
            .map_err(|source| ReplayError::SourceRead {
                path: path.to_path_buf(),
                source,
            })?;
    }

    read_records(&raw).map_err(|source| ReplayError::SourceFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Rows to stream: everything after the header, if there is one.
pub fn data_rows(records: &[StringRecord]) -> &[StringRecord] {
    match records.first() {
        Some(first) if first.get(0) == Some(HEADER_MARKER) => &records[1..],
        _ => records,
    }
}
