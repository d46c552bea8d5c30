//! CLI arguments and their layering over the config file.

use std::path::PathBuf;

use clap::Args;
use club_map_transform::{RunConfig, TransformError};

/// Arguments shared by every subcommand that reads the CSV.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// CSV file to read (default: `json_clubs.csv`)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// TOML config file. CLI flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Single-character field delimiter (default: `,`)
    #[arg(long)]
    pub delimiter: Option<String>,
    /// Maximum number of data rows to read (useful for testing)
    #[arg(long)]
    pub limit: Option<u64>,
}

/// Output and media arguments for `convert`.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Directory to write `<city>.json` files into (default: current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Generate `photo_urls` and `logo` for every venue
    #[arg(long)]
    pub media: bool,
    /// Image-hosting base URL. Implies `--media`.
    #[arg(long)]
    pub media_base_url: Option<String>,
}

/// Builds the effective config: defaults, then the config file, then the
/// environment, then CLI flags.
///
/// # Errors
///
/// Returns [`TransformError`] if the config file cannot be loaded or the
/// delimiter flag is not exactly one character.
pub fn resolve_config(
    source: &SourceArgs,
    output: Option<&OutputArgs>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<RunConfig, TransformError> {
    let mut config = match &source.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    }
    .with_env_overrides(env);

    if let Some(input) = &source.input {
        config.input.clone_from(input);
    }
    if let Some(delimiter) = &source.delimiter {
        config.delimiter = single_char(delimiter)?;
    }
    if source.limit.is_some() {
        config.limit = source.limit;
    }

    if let Some(output) = output {
        if let Some(dir) = &output.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(url) = &output.media_base_url {
            config.media.base_url = Some(url.clone());
            config.media.enabled = true;
        }
        if output.media {
            config.media.enabled = true;
        }
    }

    Ok(config)
}

fn single_char(value: &str) -> Result<char, TransformError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TransformError::Config {
            message: format!("--delimiter expects a single character, got {value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_flags() {
        let config = resolve_config(&SourceArgs::default(), None, no_env).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join("club_map_cli_flags_override.toml");
        std::fs::write(
            &path,
            "input = \"file.csv\"\ndelimiter = \";\"\n[media]\nbase_url = \"https://file.test\"\n",
        )
        .unwrap();

        let source = SourceArgs {
            input: Some(PathBuf::from("flag.csv")),
            config: Some(path.clone()),
            delimiter: None,
            limit: Some(3),
        };
        let output = OutputArgs {
            output_dir: Some(PathBuf::from("out")),
            media: true,
            media_base_url: None,
        };
        let config = resolve_config(&source, Some(&output), no_env).unwrap();

        assert_eq!(config.input, PathBuf::from("flag.csv"));
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.media.enabled);
        assert_eq!(config.media.base_url.as_deref(), Some("https://file.test"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn media_base_url_flag_enables_media() {
        let output = OutputArgs {
            media_base_url: Some("https://flag.test".to_string()),
            ..OutputArgs::default()
        };
        let config = resolve_config(&SourceArgs::default(), Some(&output), |_| {
            Some("https://env.test".to_string())
        })
        .unwrap();

        assert!(config.media.enabled);
        assert_eq!(config.media.base_url.as_deref(), Some("https://flag.test"));
    }

    #[test]
    fn rejects_multi_char_delimiter() {
        let source = SourceArgs {
            delimiter: Some("||".to_string()),
            ..SourceArgs::default()
        };
        assert!(resolve_config(&source, None, no_env).is_err());
    }
}
