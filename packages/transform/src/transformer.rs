//! Row-to-venue transformation and per-city grouping.
//!
//! [`Transformer`] owns all run state: the venues grouped so far, the
//! per-city counters used to name venues without a `name`, and the
//! diagnostics raised along the way. Feed it rows in file order with
//! [`Transformer::push`], then call [`Transformer::finish`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use club_map_venue_models::{Geometry, Location, OpeningHours, Venue, VenueMap};
use serde::Serialize;

use crate::TransformError;
use crate::config::TransformOptions;
use crate::media::{MediaUrls, build_media_urls};
use crate::normalize::normalize_key;
use crate::parsing::{parse_f64_or_zero, parse_i64_or_zero, split_list, trimmed};
use crate::row::{Row, RowReader, columns};

/// Prefix of names given to venues whose `name` cell is blank.
pub const DEFAULT_NAME_PREFIX: &str = "venue_";

/// All venues of one normalized city key.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGroup {
    /// Normalized city key, also the output file stem.
    pub key: String,
    /// Venues keyed by display name.
    pub venues: VenueMap,
}

/// City groups in order of each city's first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityGroups {
    groups: Vec<CityGroup>,
    positions: BTreeMap<String, usize>,
}

impl CityGroups {
    /// Returns the group for `key`, creating an empty one at the end if it
    /// does not exist yet.
    fn entry(&mut self, key: &str) -> &mut CityGroup {
        let index = if let Some(&index) = self.positions.get(key) {
            index
        } else {
            self.positions.insert(key.to_string(), self.groups.len());
            self.groups.push(CityGroup {
                key: key.to_string(),
                venues: VenueMap::new(),
            });
            self.groups.len() - 1
        };
        &mut self.groups[index]
    }

    /// Looks up a city by normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CityGroup> {
        self.positions.get(key).map(|&index| &self.groups[index])
    }

    /// Number of cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no row produced a venue.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of venues across all cities.
    #[must_use]
    pub fn venue_count(&self) -> usize {
        self.groups.iter().map(|g| g.venues.len()).sum()
    }

    /// Iterates cities in first-appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, CityGroup> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a CityGroups {
    type Item = &'a CityGroup;
    type IntoIter = std::slice::Iter<'a, CityGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Advisory event raised while transforming. None of these stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The row had a blank `City` and was dropped.
    SkippedRow {
        /// Input line of the row (`0` for synthetic rows).
        line: u64,
        /// The row's raw cells, rendered for display.
        row: String,
    },
    /// A venue name repeated within a city; the later row replaced the
    /// earlier one.
    DuplicateVenue {
        /// Normalized city key.
        city_key: String,
        /// Venue display name.
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedRow { line, row } => {
                write!(f, "Skipping row {line} due to missing City: {row}")
            }
            Self::DuplicateVenue { city_key, name } => write!(
                f,
                "Duplicate venue name '{name}' in city '{city_key}'. Overwriting previous entry."
            ),
        }
    }
}

/// Summary counts for one transformation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    /// Data rows seen.
    pub rows_read: u64,
    /// Rows dropped for a blank `City`.
    pub rows_skipped: u64,
    /// Rows that replaced an earlier venue of the same name.
    pub duplicates: u64,
    /// Distinct city keys.
    pub cities: usize,
    /// Venues across all cities after deduplication.
    pub venues: usize,
}

impl fmt::Display for TransformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row(s) read, {} skipped, {} duplicate(s) overwritten, {} venue(s) in {} city(ies)",
            self.rows_read, self.rows_skipped, self.duplicates, self.venues, self.cities
        )
    }
}

/// Result of a completed transformation.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Venues grouped by city.
    pub groups: CityGroups,
    /// Diagnostics in the order they were raised.
    pub diagnostics: Vec<Diagnostic>,
    /// Summary counts.
    pub report: TransformReport,
}

/// Accumulates venues from rows fed in file order.
pub struct Transformer<'a> {
    options: &'a TransformOptions,
    groups: CityGroups,
    default_name_counters: BTreeMap<String, u32>,
    diagnostics: Vec<Diagnostic>,
    report: TransformReport,
}

impl<'a> Transformer<'a> {
    /// Creates a transformer with no rows seen.
    #[must_use]
    pub fn new(options: &'a TransformOptions) -> Self {
        Self {
            options,
            groups: CityGroups::default(),
            default_name_counters: BTreeMap::new(),
            diagnostics: Vec::new(),
            report: TransformReport::default(),
        }
    }

    /// Transforms one row and adds its venue to the city groups.
    pub fn push(&mut self, row: &Row) {
        self.report.rows_read += 1;

        let city = trimmed(row.get(columns::CITY));
        if city.is_empty() {
            self.report.rows_skipped += 1;
            self.raise(Diagnostic::SkippedRow {
                line: row.line(),
                row: row.to_string(),
            });
            return;
        }

        let city_key = normalize_key(&city);
        let counter = self
            .default_name_counters
            .entry(city_key.clone())
            .or_insert(1);

        let mut name = trimmed(row.get(columns::NAME));
        if name.is_empty() {
            name = format!("{DEFAULT_NAME_PREFIX}{counter}");
            *counter += 1;
        }

        let media = self
            .options
            .media_base_url
            .as_deref()
            .map(|base| build_media_urls(base, &city_key, &normalize_key(&name)))
            .unwrap_or_default();

        log::debug!("Row {}: '{name}' in '{city_key}'", row.line());

        let venue = build_venue(row, name, media);
        let group = self.groups.entry(&city_key);
        if let Some(previous) = group.venues.insert(venue) {
            self.report.duplicates += 1;
            self.raise(Diagnostic::DuplicateVenue {
                city_key,
                name: previous.name,
            });
        }
    }

    /// Logs a diagnostic and keeps it for the caller.
    fn raise(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Consumes the transformer and returns the grouped venues.
    #[must_use]
    pub fn finish(self) -> TransformOutput {
        let report = TransformReport {
            cities: self.groups.len(),
            venues: self.groups.venue_count(),
            ..self.report
        };
        log::info!("Transform complete: {report}");

        TransformOutput {
            groups: self.groups,
            diagnostics: self.diagnostics,
            report,
        }
    }
}

/// Assembles the venue record for a row whose name has been resolved.
fn build_venue(row: &Row, name: String, media: MediaUrls) -> Venue {
    Venue {
        formatted_address: trimmed(row.get(columns::FORMATTED_ADDRESS)),
        formatted_phone_number: trimmed(row.get(columns::FORMATTED_PHONE_NUMBER)),
        geometry: Geometry {
            location: Location {
                lat: parse_f64_or_zero(row.get(columns::LAT)),
                lng: parse_f64_or_zero(row.get(columns::LNG)),
            },
        },
        name,
        opening_hours: OpeningHours::default(),
        description: trimmed(row.get(columns::DESCRIPTION)),
        photo_urls: media.photo_urls,
        rating: parse_f64_or_zero(row.get(columns::RATING)),
        reviews: Vec::new(),
        logo: media.logo,
        user_ratings_total: parse_i64_or_zero(row.get(columns::USER_RATINGS_TOTAL)),
        website: trimmed(row.get(columns::WEBSITE)),
        activities: split_list(row.get(columns::ACTIVITIES)),
    }
}

/// Transforms an in-memory sequence of rows.
#[must_use]
pub fn transform_rows<'r>(
    rows: impl IntoIterator<Item = &'r Row>,
    options: &TransformOptions,
) -> TransformOutput {
    let mut transformer = Transformer::new(options);
    for row in rows {
        transformer.push(row);
    }
    transformer.finish()
}

/// Reads CSV from `reader` and transforms every row.
///
/// # Errors
///
/// Returns [`TransformError::Csv`] if the CSV cannot be read or contains
/// invalid UTF-8. Nothing is returned for rows processed before the error.
pub fn transform_reader<R: Read>(
    reader: R,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let mut transformer = Transformer::new(options);
    for row in RowReader::new(reader, options)? {
        transformer.push(&row?);
    }
    Ok(transformer.finish())
}

/// Opens `path` and transforms every CSV row in it.
///
/// # Errors
///
/// Returns [`TransformError::Io`] if the file cannot be opened, or any
/// error from [`transform_reader`].
pub fn transform_file(
    path: &Path,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    log::info!("Reading venues from {}", path.display());
    let file = File::open(path).map_err(|e| TransformError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    transform_reader(BufReader::new(file), options)
}
