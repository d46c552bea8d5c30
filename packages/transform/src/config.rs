//! Run configuration.
//!
//! A [`RunConfig`] can be loaded from a TOML file, layered with the
//! `CLUB_MAP_MEDIA_BASE_URL` environment variable, and finally overridden
//! by CLI flags. [`RunConfig::transform_options`] validates the result and
//! produces the [`TransformOptions`] the transformer runs with.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::TransformError;

/// Input file used when none is configured.
pub const DEFAULT_INPUT: &str = "json_clubs.csv";

/// Environment variable that supplies the image-hosting base URL.
pub const MEDIA_BASE_URL_ENV: &str = "CLUB_MAP_MEDIA_BASE_URL";

/// Settings for generated photo/logo URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Whether to build `photo_urls` and `logo` for every venue.
    pub enabled: bool,
    /// Image-hosting root, e.g. `"https://cdn.example.com/clubs"`.
    pub base_url: Option<String>,
}

/// Everything a conversion run needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// CSV file to read.
    pub input: PathBuf,
    /// Directory the per-city JSON files are written to.
    pub output_dir: PathBuf,
    /// CSV field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Maximum number of data rows to read.
    pub limit: Option<u64>,
    /// Photo/logo URL generation.
    pub media: MediaConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            delimiter: ',',
            limit: None,
            media: MediaConfig::default(),
        }
    }
}

/// Validated options consumed by the row reader and the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// CSV field delimiter byte.
    pub delimiter: u8,
    /// Maximum number of data rows to read.
    pub limit: Option<u64>,
    /// Image-hosting root without a trailing `/`. `Some` turns on photo
    /// and logo URL generation.
    pub media_base_url: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            limit: None,
            media_base_url: None,
        }
    }
}

impl RunConfig {
    /// Parses a config from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ConfigParse`] if the TOML is malformed or
    /// contains unknown keys.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TransformError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Io`] if the file cannot be read, or
    /// [`TransformError::ConfigParse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, TransformError> {
        let contents = std::fs::read_to_string(path).map_err(|e| TransformError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Fills in the media base URL from the environment when the config
    /// does not set one.
    ///
    /// `lookup` is normally `|k| std::env::var(k).ok()`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.media.base_url.is_none()
            && let Some(url) = lookup(MEDIA_BASE_URL_ENV).filter(|u| !u.trim().is_empty())
        {
            self.media.base_url = Some(url);
        }
        self
    }

    /// Validates the config and builds [`TransformOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Config`] if the delimiter is not a single
    /// ASCII character, or if media generation is enabled without a base
    /// URL.
    pub fn transform_options(&self) -> Result<TransformOptions, TransformError> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| TransformError::Config {
                message: format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ),
            })?;

        let media_base_url = if self.media.enabled {
            let base = self
                .media
                .base_url
                .as_deref()
                .map(|u| u.trim().trim_end_matches('/'))
                .filter(|u| !u.is_empty())
                .ok_or_else(|| TransformError::Config {
                    message: format!(
                        "media URL generation is enabled but no base URL is set \
                         (use --media-base-url, {MEDIA_BASE_URL_ENV}, or [media].base_url)"
                    ),
                })?;
            Some(base.to_string())
        } else {
            None
        };

        Ok(TransformOptions {
            delimiter,
            limit: self.limit,
            media_base_url,
        })
    }
}
