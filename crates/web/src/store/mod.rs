//! CSV-backed record store.
//!
//! # Files
//!
//! - `users.csv` - One row per signup (see [`users::UserTable`])
//! - `images.csv` - The outfit catalog (see [`catalog::CatalogTable`])
//!
//! Both tables are loaded whole on every read. Appending a row reloads the
//! file, adds the row in memory and rewrites the entire file. There is no
//! locking: two concurrent writers race and the last one wins.

pub mod catalog;
pub mod users;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur reading or writing a table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The table file does not exist.
    #[error("CSV file '{}' not found.", .0.display())]
    NotFound(PathBuf),

    /// The table file is not valid CSV or a row does not fit the expected shape.
    #[error("Error reading CSV file: {0}")]
    Parse(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("Error reading CSV file: missing column '{0}'")]
    MissingColumn(&'static str),

    /// The file could not be opened or written.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row could not be encoded.
    #[error("failed to encode row: {0}")]
    Encode(String),

    /// The blocking file task panicked or was cancelled.
    #[error("table task failed: {0}")]
    Task(String),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// An in-memory copy of a CSV file: the header and every row, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Column names, in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Returns true if the header contains `name`.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode every row into `T`, matching fields by column name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` if any row does not decode.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        self.rows
            .iter()
            .map(|row| row.deserialize(Some(&self.headers)).map_err(StoreError::from))
            .collect()
    }

    /// Add a row, matching its fields to existing columns by name.
    ///
    /// Columns the table does not have yet are appended to the header and
    /// left empty in earlier rows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if `row` cannot be written as a CSV record.
    pub fn push_row<T: Serialize>(&mut self, row: &T) -> Result<(), StoreError> {
        let (columns, values) = encode_row(row)?;

        for column in &columns {
            if !self.has_column(column) {
                self.headers.push_field(column);
                for existing in &mut self.rows {
                    existing.push_field("");
                }
            }
        }

        let aligned: StringRecord = self
            .headers
            .iter()
            .map(|header| {
                columns
                    .iter()
                    .position(|c| c == header)
                    .and_then(|i| values.get(i))
                    .unwrap_or("")
            })
            .collect();
        self.rows.push(aligned);
        Ok(())
    }

    /// Overwrite `path` with this table. An empty table with no header
    /// produces an empty file.
    fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !self.headers.is_empty() {
            writer.write_record(&self.headers)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| StoreError::io(path, e))
    }
}

/// Serialize a single row into its column names and values.
fn encode_row<T: Serialize>(row: &T) -> Result<(StringRecord, StringRecord), StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(row)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Encode(e.to_string()))?;

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let columns = reader.headers()?.clone();
    let values = reader
        .records()
        .next()
        .transpose()?
        .ok_or_else(|| StoreError::Encode("row produced no fields".to_string()))?;
    Ok((columns, values))
}

/// Load a CSV file, keeping column names and row order.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the file does not exist and
/// `StoreError::Parse` if it is not valid CSV (including rows with a
/// different number of fields than the header).
pub fn read_table(path: &Path) -> Result<Table, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    Ok(Table { headers, rows })
}

/// Append a row to a CSV file by rewriting it in full.
///
/// A missing file is treated as an empty table, so the first append writes
/// the header followed by the row.
///
/// # Errors
///
/// Returns any `StoreError` from reading the existing file (other than
/// `NotFound`), encoding the row, or writing the file.
pub fn append_row<T: Serialize>(path: &Path, row: &T) -> Result<(), StoreError> {
    let mut table = match read_table(path) {
        Ok(table) => table,
        Err(StoreError::NotFound(_)) => Table::default(),
        Err(e) => return Err(e),
    };
    table.push_row(row)?;
    table.write_to(path)
}

/// Run a table operation on the blocking thread pool.
async fn blocking<T, F>(op: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Size")]
        size: f64,
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_read_preserves_columns_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Size\nb,2\na,1\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers().collect::<Vec<_>>(), vec!["Name", "Size"]);
        assert_eq!(table.len(), 2);

        let items: Vec<Item> = table.deserialize().unwrap();
        assert_eq!(items[0].name, "b");
        assert_eq!(items[1].name, "a");
    }

    #[test]
    fn test_read_ragged_rows_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Size\nonly-one-field\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_deserialize_bad_number_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Size\na,big\n").unwrap();

        let table = read_table(&path).unwrap();
        assert!(matches!(
            table.deserialize::<Item>().unwrap_err(),
            StoreError::Parse(_)
        ));
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");

        append_row(
            &path,
            &Item {
                name: "a".to_string(),
                size: 1.5,
            },
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Size\na,1.5\n");
    }

    #[test]
    fn test_append_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Size\na,1.0\n").unwrap();

        append_row(
            &path,
            &Item {
                name: "b".to_string(),
                size: 2.0,
            },
        )
        .unwrap();

        let items: Vec<Item> = read_table(&path).unwrap().deserialize().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "a");
        assert_eq!(items[1].name, "b");
    }

    #[test]
    fn test_append_matches_columns_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Size,Extra,Name\n1.0,x,a\n").unwrap();

        append_row(
            &path,
            &Item {
                name: "b".to_string(),
                size: 2.0,
            },
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Size,Extra,Name\n1.0,x,a\n2.0,,b\n"
        );
    }

    #[test]
    fn test_append_adds_unknown_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name\na\n").unwrap();

        append_row(
            &path,
            &Item {
                name: "b".to_string(),
                size: 3.0,
            },
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Name,Size\na,\nb,3.0\n"
        );
    }

    #[test]
    fn test_append_to_malformed_file_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Size\nbroken\n").unwrap();

        let result = append_row(
            &path,
            &Item {
                name: "b".to_string(),
                size: 3.0,
            },
        );
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Size\nbroken\n");
    }

    #[test]
    fn test_empty_file_reads_as_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "").unwrap();

        let table = read_table(&path).unwrap();
        assert!(table.is_empty());
        assert!(!table.has_column("Name"));
    }
}
