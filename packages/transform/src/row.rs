//! CSV rows keyed by header name.
//!
//! Rows keep their cells in header order so a rejected row can be logged
//! exactly as it appeared in the file.

use std::fmt;
use std::io::Read;

use crate::TransformError;
use crate::config::TransformOptions;

/// Column names the transformer reads.
pub mod columns {
    /// City the venue belongs to.
    pub const CITY: &str = "City";
    /// Venue display name.
    pub const NAME: &str = "name";
    /// Latitude.
    pub const LAT: &str = "lat";
    /// Longitude.
    pub const LNG: &str = "lng";
    /// Comma-separated activities.
    pub const ACTIVITIES: &str = "activities";
    /// Average rating.
    pub const RATING: &str = "rating";
    /// Number of ratings.
    pub const USER_RATINGS_TOTAL: &str = "user_ratings_total";
    /// Street address.
    pub const FORMATTED_ADDRESS: &str = "formatted_address";
    /// Phone number.
    pub const FORMATTED_PHONE_NUMBER: &str = "formatted_phone_number";
    /// Free-form description.
    pub const DESCRIPTION: &str = "description";
    /// Website URL.
    pub const WEBSITE: &str = "website";
}

/// One data row, as `(header, value)` pairs in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    line: u64,
    cells: Vec<(String, String)>,
}

impl Row {
    /// Creates a row read from `line` of the input (1-based, counting the
    /// header).
    #[must_use]
    pub const fn new(line: u64, cells: Vec<(String, String)>) -> Self {
        Self { line, cells }
    }

    /// Builds a row from literal pairs. Line number is `0`.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            0,
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    /// Returns the cell for `column`, matched by exact header name.
    ///
    /// `None` means the column is absent from this row. With duplicate
    /// headers the rightmost column wins.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .rev()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    /// Input line this row started on, or `0` for synthetic rows.
    #[must_use]
    pub const fn line(&self) -> u64 {
        self.line
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (header, value)) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{header:?}: {value:?}")?;
        }
        f.write_str("}")
    }
}

/// Streams [`Row`]s out of CSV input with a header line.
pub struct RowReader<R> {
    records: csv::StringRecordsIntoIter<R>,
    headers: Vec<String>,
    limit: Option<u64>,
    read: u64,
}

impl<R: Read> RowReader<R> {
    /// Reads the header line and prepares to stream data rows.
    ///
    /// Rows may be shorter than the header; their missing trailing cells
    /// are treated as absent columns.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Csv`] if the header cannot be read (I/O
    /// failure or invalid UTF-8).
    pub fn new(inner: R, options: &TransformOptions) -> Result<Self, TransformError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_reader(inner);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_owned()
                } else {
                    h.to_owned()
                }
            })
            .collect();

        log::debug!("CSV headers: {headers:?}");

        Ok(Self {
            records: reader.into_records(),
            headers,
            limit: options.limit,
            read: 0,
        })
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(limit) = self.limit
            && self.read >= limit
        {
            return None;
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        self.read += 1;

        let line = record.position().map_or(0, csv::Position::line);
        let cells = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_owned()))
            .collect();

        Some(Ok(Row::new(line, cells)))
    }
}
