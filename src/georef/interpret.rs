use serde::Serialize;
use tracing::debug;

use crate::error::GeorefError;

use super::bbox::{compute_bounding_box, BoundingBox};
use super::dictionary::TagDictionary;
use super::readers::{read_name, read_pixel_scale, read_tiepoints};
use super::types::{PixelScale, RasterSizeProvider, Tiepoint};

/// Georeferencing of one image.
///
/// Only produced by a successful [`interpret`], so every field is usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoReference {
    /// Image name, empty when the file carries no description
    pub name: String,

    /// All tiepoints in source order; the first anchors the bounding box
    pub tiepoints: Vec<Tiepoint>,

    pub pixel_scale: PixelScale,

    pub bounding_box: BoundingBox,
}

impl GeoReference {
    /// The tiepoint the bounding box is anchored on.
    pub fn anchor(&self) -> &Tiepoint {
        // A GeoReference is never built without tiepoints
        &self.tiepoints[0]
    }
}

/// Interpret a tag dictionary as GeoTIFF georeferencing.
///
/// Reads the name, tiepoints and pixel scale, then derives the bounding box
/// from the first tiepoint. The first failure is returned as is.
pub fn interpret<P>(tags: &TagDictionary, raster: &P) -> Result<GeoReference, GeorefError>
where
    P: RasterSizeProvider + ?Sized,
{
    let name = read_name(tags)?;
    let tiepoints = read_tiepoints(tags)?;
    let pixel_scale = read_pixel_scale(tags)?;

    let anchor = tiepoints.first().ok_or(GeorefError::MissingGeoreference)?;
    let raster_size = raster.raster_size();
    let bounding_box = compute_bounding_box(anchor.coordinate, raster_size, pixel_scale)?;

    debug!(
        name = %name,
        tiepoints = tiepoints.len(),
        width = raster_size.width,
        height = raster_size.height,
        top_left = %bounding_box.top_left,
        bottom_right = %bounding_box.bottom_right,
        "interpreted georeference"
    );

    Ok(GeoReference {
        name,
        tiepoints,
        pixel_scale,
        bounding_box,
    })
}
