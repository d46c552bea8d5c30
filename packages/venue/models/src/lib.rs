#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Venue record types and the ordered per-city venue map.
//!
//! A [`Venue`] is the JSON shape consumed by the club directory frontend.
//! Field declaration order is the serialized key order, so do not reorder
//! the struct fields.

use std::collections::BTreeMap;

use serde::ser::SerializeMap as _;
use serde::{Deserialize, Serialize, Serializer};

/// A latitude/longitude pair in WGS84.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude. `0.0` when the source row has no usable value.
    pub lat: f64,
    /// Longitude. `0.0` when the source row has no usable value.
    pub lng: f64,
}

/// Wrapper matching the Places-style `geometry.location` nesting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Venue coordinates.
    pub location: Location,
}

/// Opening hours block. The CSV carries no hours, so every venue gets the
/// closed/empty placeholder from [`OpeningHours::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Whether the venue is open right now.
    pub open_now: bool,
    /// Opening periods.
    pub periods: Vec<serde_json::Value>,
    /// Human-readable weekday lines.
    pub weekday_text: Vec<String>,
}

/// A single venue as written to a city's JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Street address.
    pub formatted_address: String,
    /// Phone number as printed.
    pub formatted_phone_number: String,
    /// Coordinates.
    pub geometry: Geometry,
    /// Display name. Also the key of this venue within its city.
    pub name: String,
    /// Opening hours placeholder.
    pub opening_hours: OpeningHours,
    /// Free-form description.
    pub description: String,
    /// Photo URLs. Empty unless media URL generation is enabled.
    pub photo_urls: Vec<String>,
    /// Average rating.
    pub rating: f64,
    /// Reviews. Never populated from CSV.
    pub reviews: Vec<serde_json::Value>,
    /// Logo URL. Empty unless media URL generation is enabled.
    pub logo: String,
    /// Number of ratings behind [`Venue::rating`].
    pub user_ratings_total: i64,
    /// Website URL.
    pub website: String,
    /// Activities offered (pool, darts, ...).
    pub activities: Vec<String>,
}

/// Venues of one city keyed by display name, iterated in the order names
/// were first inserted.
///
/// Serializes as a JSON object. Replacing an existing name keeps its
/// original position, so the written file lists venues in the order they
/// first appeared in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueMap {
    venues: Vec<Venue>,
    positions: BTreeMap<String, usize>,
}

impl VenueMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            venues: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Inserts `venue` under its [`Venue::name`].
    ///
    /// Returns the venue previously stored under that name, if any.
    pub fn insert(&mut self, venue: Venue) -> Option<Venue> {
        if let Some(&index) = self.positions.get(&venue.name) {
            return Some(std::mem::replace(&mut self.venues[index], venue));
        }

        self.positions.insert(venue.name.clone(), self.venues.len());
        self.venues.push(venue);
        None
    }

    /// Looks up a venue by display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Venue> {
        self.positions.get(name).map(|&index| &self.venues[index])
    }

    /// Returns `true` if a venue with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Number of venues.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.venues.len()
    }

    /// Returns `true` if the map holds no venues.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Iterates venues in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Venue> {
        self.venues.iter()
    }
}

impl<'a> IntoIterator for &'a VenueMap {
    type Item = &'a Venue;
    type IntoIter = std::slice::Iter<'a, Venue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for VenueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.venues.len()))?;
        for venue in &self.venues {
            map.serialize_entry(&venue.name, venue)?;
        }
        map.end()
    }
}
