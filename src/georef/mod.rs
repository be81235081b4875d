//! GeoTIFF georeferencing interpreter.
//!
//! Turns a [`TagDictionary`] into a [`GeoReference`]: image name, tiepoints,
//! pixel scale, and the geographic bounding box of the raster.
//!
//! # Tags
//!
//! | Tag   | Name               | Layout                                   |
//! |-------|--------------------|------------------------------------------|
//! | 270   | ImageDescription   | first value is the image name            |
//! | 33550 | ModelPixelScaleTag | `ScaleX, ScaleY[, ScaleZ]`               |
//! | 33922 | ModelTiepointTag   | groups of `I, J, K, X (lon), Y (lat), Z` |
//!
//! # Assumptions
//!
//! Model coordinates are already geographic latitude/longitude in degrees;
//! no reprojection is done. The bounding box is anchored on the first
//! tiepoint and extended by the pixel scale, without checking that further
//! tiepoints agree with it.
//!
//! Interpretation is synchronous and has no state, so it can run on any
//! number of images in parallel.

mod bbox;
mod dictionary;
mod interpret;
mod readers;
mod types;

pub use bbox::{compute_bounding_box, BoundingBox};
pub use dictionary::{TagDictionary, TagValue};
pub use interpret::{interpret, GeoReference};
pub use readers::{
    read_name, read_pixel_scale, read_tiepoints, TAG_IMAGE_DESCRIPTION, TAG_MODEL_PIXEL_SCALE,
    TAG_MODEL_TIEPOINT,
};
pub use types::{GeoCoordinate, PixelScale, RasterPoint, RasterSize, RasterSizeProvider, Tiepoint};
