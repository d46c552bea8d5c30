#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Writes one pretty-printed JSON file of venues per city.
//!
//! Each city group becomes `{city_key}.json` in the output directory: a
//! JSON object mapping venue name to venue, in first-appearance order,
//! indented with two spaces and with non-ASCII text left unescaped.
//! Existing files are overwritten. If a write fails the run stops there;
//! files already written stay on disk.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use club_map_transform::{CityGroup, CityGroups};
use serde::Serialize;

/// Errors that end the emit phase.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Output file or directory could not be created or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A city file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Number of venues in it.
    pub venues: usize,
}

/// File name for a normalized city key.
#[must_use]
pub fn city_file_name(city_key: &str) -> String {
    format!("{city_key}.json")
}

/// Serializes `value` as pretty JSON into `path`, replacing any existing
/// file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EmitError> {
    let io_err = |e| EmitError::Io {
        path: path.display().to_string(),
        source: e,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(io_err)
}

/// Writes a single city's venues to `{output_dir}/{key}.json`.
///
/// # Errors
///
/// Returns [`EmitError`] if the file cannot be created, serialized, or
/// flushed.
pub fn write_city(output_dir: &Path, group: &CityGroup) -> Result<WrittenFile, EmitError> {
    let file_name = city_file_name(&group.key);
    let path = output_dir.join(&file_name);

    write_json(&path, &group.venues)?;

    let venues = group.venues.len();
    log::info!("Created {file_name} with {venues} venue(s).");

    Ok(WrittenFile { path, venues })
}

/// Writes every city group to `output_dir`, creating the directory if
/// needed.
///
/// Files are written in city first-appearance order.
///
/// # Errors
///
/// Returns [`EmitError`] on the first directory or file failure. Files
/// written before the failure are left in place.
pub fn write_all(groups: &CityGroups, output_dir: &Path) -> Result<Vec<WrittenFile>, EmitError> {
    std::fs::create_dir_all(output_dir).map_err(|e| EmitError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let written = groups
        .iter()
        .map(|group| write_city(output_dir, group))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Wrote {} city file(s) to {}",
        written.len(),
        output_dir.display()
    );

    Ok(written)
}

/// Renders a city's venues exactly as [`write_city`] would write them.
///
/// # Errors
///
/// Returns [`EmitError::Json`] if serialization fails.
pub fn render_city(group: &CityGroup) -> Result<String, EmitError> {
    Ok(serde_json::to_string_pretty(&group.venues)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_map_transform::{Row, TransformOptions, transform_reader, transform_rows};
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("club_map_emit_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_new_york_example() {
        let rows = [
            Row::from_pairs(&[
                ("City", "New York"),
                ("name", "Joe's Bar"),
                ("lat", "40.7"),
                ("lng", "-74.0"),
                ("activities", "pool, darts"),
                ("rating", "4.5"),
                ("user_ratings_total", "120"),
            ]),
            Row::from_pairs(&[
                ("City", "New York"),
                ("name", ""),
                ("lat", ""),
                ("lng", ""),
                ("activities", ""),
                ("rating", ""),
                ("user_ratings_total", ""),
            ]),
        ];
        let output = transform_rows(&rows, &TransformOptions::default());
        let dir = scratch_dir("new_york");

        let written = write_all(&output.groups, &dir).unwrap();
        assert_eq!(
            written,
            [WrittenFile {
                path: dir.join("new_york.json"),
                venues: 2,
            }]
        );

        let text = fs::read_to_string(dir.join("new_york.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        let joes = &json["Joe's Bar"];
        assert_eq!(
            joes["geometry"]["location"],
            serde_json::json!({"lat": 40.7, "lng": -74.0})
        );
        assert_eq!(joes["activities"], serde_json::json!(["pool", "darts"]));
        assert_eq!(joes["rating"], serde_json::json!(4.5));
        assert_eq!(joes["user_ratings_total"], serde_json::json!(120));

        let unnamed = &json["venue_1"];
        assert_eq!(
            unnamed["geometry"]["location"],
            serde_json::json!({"lat": 0.0, "lng": 0.0})
        );
        assert_eq!(unnamed["rating"], serde_json::json!(0.0));
        assert_eq!(unnamed["user_ratings_total"], serde_json::json!(0));
        assert_eq!(unnamed["activities"], serde_json::json!([]));

        assert!(text.find("\"Joe's Bar\"").unwrap() < text.find("\"venue_1\"").unwrap());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writes_pretty_utf8_without_escaping() {
        let csv = "City,name,description\nMünchen,Café Olé,Größte Bar\n";
        let output = transform_reader(csv.as_bytes(), &TransformOptions::default()).unwrap();
        let group = output.groups.get("mnchen").unwrap();

        let text = render_city(group).unwrap();
        assert!(text.contains("\"Café Olé\""), "{text}");
        assert!(text.contains("Größte Bar"));
        assert!(text.starts_with("{\n  \"Café Olé\": {\n    \"formatted_address\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn writes_one_file_per_city_and_overwrites() {
        let csv = "City,name\nRome,A\nMilan,B\nRome,C\n";
        let output = transform_reader(csv.as_bytes(), &TransformOptions::default()).unwrap();
        let dir = scratch_dir("per_city");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("rome.json"), "stale").unwrap();

        let written = write_all(&output.groups, &dir).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|w| w.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["rome.json", "milan.json"]);
        assert_eq!(written[0].venues, 2);

        let rome = fs::read_to_string(dir.join("rome.json")).unwrap();
        assert_eq!(rome, render_city(output.groups.get("rome").unwrap()).unwrap());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_failure_is_an_error() {
        let csv = "City,name\nRome,A\n";
        let output = transform_reader(csv.as_bytes(), &TransformOptions::default()).unwrap();
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        fs::create_dir_all(dir.join("rome.json")).unwrap();

        assert!(matches!(
            write_all(&output.groups, &dir),
            Err(EmitError::Io { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
