//! Tabular test data lookup.
//!
//! Test values live in an external 2-D table: row 0 holds the column
//! headers, every following row is one data set. A [`DataTable`] opens its
//! source on first access and answers `(column, row)` lookups from then on.

use crate::result::{QuoteError, QuoteResult};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// In-memory copy of a table; row 0 is the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet from raw rows (header row first)
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a one-data-row sheet from `(header, value)` pairs
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .unzip();
        Self {
            rows: vec![headers, values],
        }
    }

    /// Header row
    #[must_use]
    pub fn headers(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of populated rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column whose header equals `header`
    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers().iter().position(|h| h == header)
    }

    /// Cell content at `(header, row)`
    ///
    /// A row shorter than the header reads as empty past its last cell.
    pub fn cell_value(&self, header: &str, row: usize) -> QuoteResult<String> {
        let column = self
            .column_index(header)
            .ok_or_else(|| QuoteError::ColumnNotFound {
                column: header.to_string(),
            })?;
        let cells = self.rows.get(row).ok_or_else(|| QuoteError::RowOutOfRange {
            column: header.to_string(),
            row,
            rows: self.rows.len(),
        })?;
        Ok(cells.get(column).cloned().unwrap_or_default())
    }

    /// Serialize the sheet as CSV
    pub fn to_csv(&self) -> QuoteResult<String> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row).map_err(encode_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| QuoteError::Io(io::Error::new(e.error().kind(), e.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|e| QuoteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Header cells lose surrounding whitespace; data cells are kept verbatim.
    fn trim_headers(mut self) -> Self {
        if let Some(headers) = self.rows.first_mut() {
            for header in headers {
                let trimmed = header.trim();
                if trimmed.len() != header.len() {
                    *header = trimmed.to_string();
                }
            }
        }
        self
    }
}

fn encode_error(e: csv::Error) -> QuoteError {
    QuoteError::Io(e.into())
}

/// Reads a physical table format into a [`Sheet`]
pub trait SheetReader: fmt::Debug + Send + Sync {
    /// Open and parse the source at `path`
    fn read(&self, path: &Path) -> QuoteResult<Sheet>;
}

fn unreadable(path: &Path, message: impl fmt::Display) -> QuoteError {
    QuoteError::SourceUnreadable {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Comma-separated values, first record is the header row
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    /// Create a comma-delimited reader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter (e.g. `b';'` or `b'\t'`)
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl SheetReader for CsvReader {
    fn read(&self, path: &Path) -> QuoteResult<Sheet> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(path)
            .map_err(|e| unreadable(path, e))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| unreadable(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        if rows.is_empty() {
            return Err(unreadable(path, "no header row"));
        }
        Ok(Sheet::from_rows(rows).trim_headers())
    }
}

/// Spreadsheet workbook (xls, xlsx, ods); reads the first worksheet
#[cfg(feature = "workbook")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookReader;

#[cfg(feature = "workbook")]
impl SheetReader for WorkbookReader {
    fn read(&self, path: &Path) -> QuoteResult<Sheet> {
        use calamine::{open_workbook_auto, Reader};

        let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| unreadable(path, "workbook has no worksheets"))?
            .map_err(|e| unreadable(path, e))?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        if rows.is_empty() {
            return Err(unreadable(path, "no header row"));
        }
        Ok(Sheet::from_rows(rows).trim_headers())
    }
}

/// Text of a workbook cell as the form expects to receive it
///
/// Dates render as `MM/DD/YYYY`, with `HH:MM:SS` appended only when the
/// cell carries a time of day. Whole numbers have no fraction.
#[cfg(feature = "workbook")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| dt.to_string(), format_datetime),
        Data::DateTimeIso(iso) => parse_iso(iso).map_or_else(|| iso.clone(), format_datetime),
        other => other.to_string(),
    }
}

#[cfg(feature = "workbook")]
fn parse_iso(iso: &str) -> Option<chrono::NaiveDateTime> {
    let iso = iso.trim_end_matches('Z');
    chrono::NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(feature = "workbook")]
fn format_datetime(value: chrono::NaiveDateTime) -> String {
    use chrono::Timelike;

    if value.time().num_seconds_from_midnight() == 0 {
        value.format("%m/%d/%Y").to_string()
    } else {
        value.format("%m/%d/%Y %H:%M:%S").to_string()
    }
}

/// Pick a reader from the file extension
pub fn reader_for_path(path: &Path) -> QuoteResult<Box<dyn SheetReader>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(Box::new(CsvReader::new())),
        "tsv" => Ok(Box::new(CsvReader::new().with_delimiter(b'\t'))),
        #[cfg(feature = "workbook")]
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(Box::new(WorkbookReader)),
        #[cfg(not(feature = "workbook"))]
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Err(unreadable(
            path,
            "spreadsheet support not enabled. Rebuild with --features workbook",
        )),
        other => Err(unreadable(path, format!("unsupported extension '{other}'"))),
    }
}

/// Lazily opened test data source
#[derive(Debug)]
pub struct DataTable {
    path: PathBuf,
    reader: Box<dyn SheetReader>,
    sheet: OnceLock<Sheet>,
}

impl DataTable {
    /// Describe a source without opening it
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, reader: Box<dyn SheetReader>) -> Self {
        Self {
            path: path.into(),
            reader,
            sheet: OnceLock::new(),
        }
    }

    /// Describe a source, choosing the reader by extension
    pub fn open(path: impl Into<PathBuf>) -> QuoteResult<Self> {
        let path = path.into();
        let reader = reader_for_path(&path)?;
        Ok(Self::new(path, reader))
    }

    /// Wrap an already loaded sheet
    #[must_use]
    pub fn from_sheet(sheet: Sheet) -> Self {
        let table = Self::new("<memory>", Box::new(CsvReader::new()));
        let _ = table.sheet.set(sheet);
        table
    }

    /// Path of the source
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the source has been read yet
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.sheet.get().is_some()
    }

    /// Loaded sheet, reading the source on first call
    pub fn sheet(&self) -> QuoteResult<&Sheet> {
        if let Some(sheet) = self.sheet.get() {
            return Ok(sheet);
        }
        tracing::debug!(path = %self.path.display(), "opening test data");
        let sheet = self.reader.read(&self.path)?;
        Ok(self.sheet.get_or_init(|| sheet))
    }

    /// Cell content at `(column, row)`
    pub fn get_cell_value(&self, column: &str, row: usize) -> QuoteResult<String> {
        self.sheet()?.cell_value(column, row)
    }
}
