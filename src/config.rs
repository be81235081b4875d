//! Command-line configuration for tiff-georef.
//!
//! This module provides the CLI for the `tiff-georef` binary:
//! - Command-line arguments via clap
//! - Environment variables with `GEOREF_` prefix
//!
//! # Subcommands
//!
//! - `info <FILES...>` - Print the georeference of each file
//! - `tags <FILE>` - Dump the raw tags of the first image directory
//!
//! # Environment Variables
//!
//! - `GEOREF_FORMAT` - Output format of `info`, `text` or `json` (default: text)
//! - `GEOREF_VERBOSE` - Enable debug logging (default: false)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// =============================================================================
// CLI Arguments
// =============================================================================

/// tiff-georef - Read the georeferencing of GeoTIFF images.
///
/// Reports the image name, tiepoints, pixel scale and geographic bounding box
/// of GeoTIFF files whose model space is latitude/longitude.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-georef")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the georeference of one or more GeoTIFF files.
    Info(InfoConfig),

    /// Dump the tags of the first image directory of a TIFF file.
    Tags(TagsConfig),
}

/// Output format for the `info` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,

    /// One JSON document with an entry per file
    Json,
}

// =============================================================================
// Info
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// GeoTIFF files to read.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "GEOREF_FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false, env = "GEOREF_VERBOSE")]
    pub verbose: bool,
}

impl InfoConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one file is required".to_string());
        }

        if let Some(empty) = self.files.iter().find(|f| f.as_os_str().is_empty()) {
            return Err(format!("Invalid file path: {:?}", empty));
        }

        Ok(())
    }
}

// =============================================================================
// Tags
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct TagsConfig {
    /// TIFF file to read.
    pub file: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false, env = "GEOREF_VERBOSE")]
    pub verbose: bool,
}

impl TagsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.file.as_os_str().is_empty() {
            return Err("A file is required".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
