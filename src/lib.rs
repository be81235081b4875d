//! # tiff-georef
//!
//! Reads the georeferencing of GeoTIFF images whose model space is
//! geographic latitude/longitude.
//!
//! Given the tags of an image, the library extracts its name, tiepoints and
//! pixel scale, and derives the geographic bounding box of the raster. The
//! TIFF container is read through byte-range requests, so only the header,
//! the first image directory and the values it points to are ever loaded.
//!
//! ## Architecture
//!
//! - [`io`] - Range readers over files and memory
//! - [`mod@format`] - TIFF/BigTIFF container parsing and the [`GeoTiff`] wrapper
//! - [`georef`] - Tag interpretation and bounding box computation
//! - [`config`] - CLI types
//!
//! The [`georef`] layer is independent of TIFF: any source that can produce a
//! [`TagDictionary`] and a [`RasterSize`] can be interpreted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiff_georef::GeoTiff;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tiff_georef::GeoTiffError> {
//!     let geotiff = GeoTiff::open_path("chart.tif").await?;
//!     let bbox = geotiff.georeference().bounding_box;
//!     println!("{} to {}", bbox.top_left, bbox.bottom_right);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod georef;
pub mod io;

// Re-export commonly used types
pub use config::{Cli, Command, InfoConfig, OutputFormat, TagsConfig};
pub use error::{GeoTiffError, GeorefError, IoError, MalformedReason, TiffError, ValueError};
pub use format::tiff::{
    decode_values, ByteOrder, FieldType, Ifd, IfdEntry, TiffDirectory, TiffHeader, TiffTag,
    ValueReader, BIGTIFF_HEADER_SIZE, MAX_IFD_ENTRIES, TIFF_HEADER_SIZE,
};
pub use format::GeoTiff;
pub use georef::{
    compute_bounding_box, interpret, read_name, read_pixel_scale, read_tiepoints, BoundingBox,
    GeoCoordinate, GeoReference, PixelScale, RasterPoint, RasterSize, RasterSizeProvider,
    TagDictionary, TagValue, Tiepoint,
};
pub use io::{FileRangeReader, MemoryRangeReader, RangeReader};
