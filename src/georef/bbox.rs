//! Geographic bounding box derived from an anchor tiepoint.

use serde::Serialize;

use crate::error::GeorefError;

use super::types::{GeoCoordinate, PixelScale, RasterSize};

/// Geographic rectangle spanned by the raster, given by two corners.
///
/// Corners are kept as computed. For rasters whose rows run northward the
/// "bottom right" corner lies north of the "top left" one; use
/// [`BoundingBox::north`] and friends for orientation-independent edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub top_left: GeoCoordinate,
    pub bottom_right: GeoCoordinate,
}

impl BoundingBox {
    pub const fn new(top_left: GeoCoordinate, bottom_right: GeoCoordinate) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Both corners valid and the box spans a non-zero extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.top_left.is_valid()
            && self.bottom_right.is_valid()
            && self.top_left.latitude != self.bottom_right.latitude
            && self.top_left.longitude != self.bottom_right.longitude
    }

    pub fn north(&self) -> f64 {
        self.top_left.latitude.max(self.bottom_right.latitude)
    }

    pub fn south(&self) -> f64 {
        self.top_left.latitude.min(self.bottom_right.latitude)
    }

    pub fn west(&self) -> f64 {
        self.top_left.longitude.min(self.bottom_right.longitude)
    }

    pub fn east(&self) -> f64 {
        self.top_left.longitude.max(self.bottom_right.longitude)
    }

    /// Whether a coordinate lies inside the box, edges included.
    pub fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        (self.south()..=self.north()).contains(&coordinate.latitude)
            && (self.west()..=self.east()).contains(&coordinate.longitude)
    }
}

/// Project the raster extent from `top_left` through the pixel scale.
///
/// The anchor is taken as the geographic position of pixel (0, 0); the
/// opposite corner is the position of the last pixel, hence the `- 1`.
pub fn compute_bounding_box(
    top_left: GeoCoordinate,
    raster: RasterSize,
    scale: PixelScale,
) -> Result<BoundingBox, GeorefError> {
    let steps_x = f64::from(raster.width) - 1.0;
    let steps_y = f64::from(raster.height) - 1.0;

    let longitude = top_left.longitude + steps_x * scale.width;

    // Two raster conventions, kept as separate branches.
    let latitude = if scale.height > 0.0 {
        // Rows increase southward
        top_left.latitude - steps_y * scale.height
    } else {
        // Rows increase northward; the scale is stored negated
        top_left.latitude + steps_y * scale.height.abs()
    };

    let bbox = BoundingBox::new(top_left, GeoCoordinate::new(latitude, longitude));
    if raster.is_empty() || !bbox.is_valid() {
        return Err(GeorefError::InvalidBoundingBox {
            top_left: bbox.top_left,
            bottom_right: bbox.bottom_right,
        });
    }

    Ok(bbox)
}
