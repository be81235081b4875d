//! tiff-georef - Read the georeferencing of GeoTIFF images.
//!
//! This binary opens local files and prints their georeference or raw tags.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_georef::{
    config::{Cli, Command, InfoConfig, OutputFormat, TagsConfig},
    ByteOrder, FileRangeReader, GeoReference, GeoTiff, TagValue, TiffDirectory, TiffTag,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Info(config) => run_info(config).await,
        Command::Tags(config) => run_tags(config).await,
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so they never mix with the report on stdout.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiff_georef=debug"
    } else {
        "tiff_georef=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Info Command
// =============================================================================

/// Outcome for one file in JSON output.
#[derive(Serialize)]
struct FileReport<'a> {
    file: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    georeference: Option<&'a GeoReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn run_info(config: InfoConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut results = Vec::with_capacity(config.files.len());
    for path in &config.files {
        let result = GeoTiff::open_path(path).await;
        if let Err(ref e) = result {
            error!(file = %path.display(), "{}", e);
        }
        results.push((path.as_path(), result));
    }

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();

    match config.format {
        OutputFormat::Text => {
            for (path, result) in &results {
                match result {
                    Ok(geotiff) => print_georeference(path, geotiff),
                    Err(e) => {
                        println!("✗ {}", path.display());
                        println!("  Error: {}", e);
                        println!();
                    }
                }
            }
        }
        OutputFormat::Json => {
            let reports: Vec<FileReport> = results
                .iter()
                .map(|(path, result)| FileReport {
                    file: path.display().to_string(),
                    georeference: result.as_ref().ok().map(GeoTiff::georeference),
                    error: result.as_ref().err().map(|e| e.to_string()),
                })
                .collect();

            match serde_json::to_string_pretty(&reports) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize report: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    debug!(files = results.len(), failures, "info finished");

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_georeference(path: &Path, geotiff: &GeoTiff) {
    let georef = geotiff.georeference();
    let size = geotiff.directory().raster_size;
    let bbox = &georef.bounding_box;

    println!("✓ {}", path.display());
    if georef.name.is_empty() {
        println!("  Name:         (none)");
    } else {
        println!("  Name:         {}", georef.name);
    }
    println!("  Size:         {} x {}", size.width, size.height);
    println!(
        "  Pixel scale:  {} x {}",
        georef.pixel_scale.width, georef.pixel_scale.height
    );
    println!("  Top left:     {}", bbox.top_left);
    println!("  Bottom right: {}", bbox.bottom_right);
    println!("  Tiepoints:");
    for tiepoint in &georef.tiepoints {
        println!(
            "    ({}, {}) -> {}",
            tiepoint.raster_point.x, tiepoint.raster_point.y, tiepoint.coordinate
        );
    }
    println!();
}

// =============================================================================
// Tags Command
// =============================================================================

async fn run_tags(config: TagsConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let directory = match FileRangeReader::open(&config.file).await {
        Ok(reader) => TiffDirectory::read(&reader).await,
        Err(e) => Err(e.into()),
    };

    let directory = match directory {
        Ok(d) => d,
        Err(e) => {
            error!(file = %config.file.display(), "{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", config.file.display());
    println!(
        "{} entries, {}, {}",
        directory.ifd.len(),
        if directory.header.is_bigtiff {
            "BigTIFF"
        } else {
            "TIFF"
        },
        match directory.header.byte_order {
            ByteOrder::LittleEndian => "little-endian",
            ByteOrder::BigEndian => "big-endian",
        }
    );
    println!();

    for (tag, values) in directory.tags.iter() {
        let name = TiffTag::from_u16(tag).map(TiffTag::name).unwrap_or("-");
        println!("{:>6}  {:<24} {}", tag, name, format_values(values));
    }

    ExitCode::SUCCESS
}

/// Maximum values printed per tag before truncating
const MAX_PRINTED_VALUES: usize = 12;

fn format_values(values: &[TagValue]) -> String {
    let mut parts: Vec<String> = values
        .iter()
        .take(MAX_PRINTED_VALUES)
        .map(TagValue::to_string)
        .collect();

    if values.len() > MAX_PRINTED_VALUES {
        parts.push(format!("... ({} values)", values.len()));
    }

    parts.join(", ")
}
