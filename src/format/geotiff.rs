//! GeoTIFF reader.
//!
//! Opens a TIFF through a [`RangeReader`], reads its first directory and
//! interprets the georeferencing tags. A file is only returned as a
//! [`GeoTiff`] when its georeferencing is complete and valid.

use std::path::Path;

use tracing::{debug, info};

use crate::error::GeoTiffError;
use crate::georef::{interpret, GeoReference, RasterSize, RasterSizeProvider, TagDictionary};
use crate::io::{FileRangeReader, RangeReader};

use super::tiff::TiffDirectory;

/// A georeferenced TIFF image.
#[derive(Debug, Clone)]
pub struct GeoTiff {
    identifier: String,
    directory: TiffDirectory,
    georeference: GeoReference,
}

impl GeoTiff {
    /// Read and interpret a GeoTIFF from any range reader.
    pub async fn open<R: RangeReader>(reader: &R) -> Result<Self, GeoTiffError> {
        let identifier = reader.identifier().to_string();
        debug!(identifier = %identifier, size = reader.size(), "opening GeoTIFF");

        let directory = TiffDirectory::read(reader).await?;
        let georeference = interpret(&directory.tags, &directory)?;

        info!(
            identifier = %identifier,
            name = %georeference.name,
            top_left = %georeference.bounding_box.top_left,
            bottom_right = %georeference.bounding_box.bottom_right,
            "georeferenced image"
        );

        Ok(GeoTiff {
            identifier,
            directory,
            georeference,
        })
    }

    /// Open a GeoTIFF from a local file.
    pub async fn open_path(path: impl AsRef<Path>) -> Result<Self, GeoTiffError> {
        let reader = FileRangeReader::open(path).await?;
        Self::open(&reader).await
    }

    pub fn georeference(&self) -> &GeoReference {
        &self.georeference
    }

    /// All tags of the first directory with a known field type.
    pub fn tags(&self) -> &TagDictionary {
        &self.directory.tags
    }

    pub fn directory(&self) -> &TiffDirectory {
        &self.directory
    }

    /// Identifier of the source the image was read from
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl RasterSizeProvider for GeoTiff {
    fn raster_size(&self) -> RasterSize {
        self.directory.raster_size
    }
}
