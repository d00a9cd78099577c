// src/dataset/mod.rs

pub mod value;

use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::BufReader,
    path::Path,
};
use tracing::debug;

use crate::error::DataError;
use self::value::{clean_cell, ColumnKind};

/// One program listing: column name → typed cell, in header order.
pub type ProgramRecord = Map<String, Value>;

/// The whole CSV file held in memory for the duration of one request.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Typed cells, one `Vec` per data row; short rows are padded with `null`.
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header row.
    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Cell at (`row`, `col`); `None` when either index is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Materialise row `row` as a JSON object keyed by header.
    pub fn record(&self, row: usize) -> ProgramRecord {
        let mut map = Map::with_capacity(self.headers.len());
        if let Some(cells) = self.rows.get(row) {
            for (name, cell) in self.headers.iter().zip(cells) {
                map.insert(name.clone(), cell.clone());
            }
        }
        map
    }
}

/// Read the CSV at `path` (first row is the header) into a [`Dataset`].
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source: csv::Error| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let raw_headers: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    let headers = dedupe_headers(raw_headers);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        if record.len() > headers.len() {
            return Err(DataError::MalformedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }
        records.push(record);
    }

    // one kind per column, derived from every row
    let kinds: Vec<ColumnKind> = headers
        .iter()
        .enumerate()
        .map(|(col, name)| {
            ColumnKind::derive(name, records.iter().map(|r| r.get(col).and_then(clean_cell)))
        })
        .collect();

    let rows: Vec<Vec<Value>> = records
        .iter()
        .map(|r| {
            kinds
                .iter()
                .enumerate()
                .map(|(col, kind)| kind.to_value(r.get(col).and_then(clean_cell)))
                .collect()
        })
        .collect();

    debug!(columns = headers.len(), rows = rows.len(), "loaded dataset");
    Ok(Dataset { headers, rows })
}

/// Rename repeated header names to `name.1`, `name.2`, ... so every column
/// stays addressable and no record key is overwritten.
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for name in raw {
        let mut unique = name.clone();
        while seen.contains(&unique) {
            let n = counts.entry(name.clone()).or_insert(0);
            *n += 1;
            unique = format!("{}.{}", name, n);
        }
        if unique != name {
            debug!(column = %name, renamed = %unique, "duplicate header renamed");
        }
        seen.insert(unique.clone());
        headers.push(unique);
    }
    headers
}
