//! File format readers.
//!
//! [`tiff`] decodes the TIFF container into a tag dictionary; [`GeoTiff`]
//! puts that together with the georeference interpreter.

pub mod geotiff;
pub mod tiff;

pub use geotiff::GeoTiff;
