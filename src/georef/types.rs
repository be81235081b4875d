//! Geometry value types shared by the field readers and the bounding box.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Raster space
// =============================================================================

/// A location in pixel space: column (`x`) and row (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RasterPoint {
    pub x: f64,
    pub y: f64,
}

impl RasterPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the raster grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Anything that knows the pixel extent of the raster being georeferenced.
pub trait RasterSizeProvider {
    fn raster_size(&self) -> RasterSize;
}

impl RasterSizeProvider for RasterSize {
    fn raster_size(&self) -> RasterSize {
        *self
    }
}

// =============================================================================
// Geographic space
// =============================================================================

/// A geographic coordinate in degrees.
///
/// The default value is the uninitialised sentinel (NaN, NaN) and is not valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180]. NaN fails both.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Correspondence between a raster location and a geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tiepoint {
    pub raster_point: RasterPoint,
    pub coordinate: GeoCoordinate,
}

/// Ground distance covered by one pixel step along each axis.
///
/// A positive `height` means rows run southward, which is the usual raster
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelScale {
    pub width: f64,
    pub height: f64,
}

impl PixelScale {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
