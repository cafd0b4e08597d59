//! CSV ingestion: the first record is the header row, the rest are data.

use crate::error::{ImportError, ImportResult};
use std::io::Read;
use std::path::Path;

/// An uploaded table before matching: headers plus string records.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Read a CSV document from any reader.
pub fn read_csv<R: Read>(reader: R) -> ImportResult<ImportedTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ImportError::NoHeaders);
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(ImportedTable { headers, records })
}

/// Read a CSV file from disk.
pub fn read_csv_file(path: impl AsRef<Path>) -> ImportResult<ImportedTable> {
    read_csv(std::fs::File::open(path)?)
}
