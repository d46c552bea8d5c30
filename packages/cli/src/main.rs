#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the club map venue converter.
//!
//! Reads a CSV of venues and writes one `<city>.json` per normalized city.
//! Log output defaults to `info`; set `RUST_LOG` to change it.

mod args;

use clap::{Parser, Subcommand};
use club_map_transform::transform_file;

use crate::args::{OutputArgs, SourceArgs, resolve_config};

#[derive(Parser)]
#[command(name = "club_map", about = "Venue CSV to per-city JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the CSV into one JSON file per city
    Convert {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the normalized cities and venue counts without writing files
    Cities {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn init_logger() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();

    let env = |key: &str| std::env::var(key).ok();

    match cli.command.unwrap_or(Commands::Convert {
        source: SourceArgs::default(),
        output: OutputArgs::default(),
    }) {
        Commands::Convert { source, output } => {
            let config = resolve_config(&source, Some(&output), env)?;
            let options = config.transform_options()?;

            let result = transform_file(&config.input, &options)?;
            let written = club_map_emit::write_all(&result.groups, &config.output_dir)?;

            log::info!(
                "Done: {} file(s) written, {}",
                written.len(),
                result.report
            );
        }
        Commands::Cities { source } => {
            let config = resolve_config(&source, None, env)?;
            let options = config.transform_options()?;
            let result = transform_file(&config.input, &options)?;

            println!("{:<32} VENUES", "CITY");
            println!("{}", "-".repeat(40));
            for group in &result.groups {
                println!("{:<32} {}", group.key, group.venues.len());
            }
        }
    }

    Ok(())
}
