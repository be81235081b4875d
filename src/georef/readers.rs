//! Field readers for the three tags that carry georeferencing.
//!
//! Each reader looks at one tag of the dictionary and either produces its
//! value or a [`GeorefError::MalformedTag`] naming the tag and, where one
//! value is at fault, its index in the tag's value list. An absent tag is
//! never an error at this level.

use tracing::debug;

use crate::error::{GeorefError, MalformedReason};

use super::dictionary::{TagDictionary, TagValue};
use super::types::{GeoCoordinate, PixelScale, RasterPoint, Tiepoint};

/// ImageDescription
pub const TAG_IMAGE_DESCRIPTION: u16 = 270;

/// ModelPixelScaleTag
pub const TAG_MODEL_PIXEL_SCALE: u16 = 33550;

/// ModelTiepointTag
pub const TAG_MODEL_TIEPOINT: u16 = 33922;

/// Values per tiepoint in ModelTiepointTag: I, J, K, X, Y, Z
const TIEPOINT_STRIDE: usize = 6;

const RASTER_X: usize = 0;
const RASTER_Y: usize = 1;
const LONGITUDE: usize = 3;
const LATITUDE: usize = 4;

/// Read value `index` of `tag` as a finite number.
fn number_at(tag: u16, values: &[TagValue], index: usize) -> Result<f64, GeorefError> {
    let value = values.get(index).ok_or(GeorefError::MalformedTag {
        tag,
        index: Some(index),
        reason: MalformedReason::TooFewValues {
            expected: index + 1,
            actual: values.len(),
        },
    })?;

    value.to_number().map_err(|e| GeorefError::MalformedTag {
        tag,
        index: Some(index),
        reason: e.into(),
    })
}

/// Read the image name from ImageDescription (270).
///
/// Absent tag gives an empty name; a tag without values is malformed.
pub fn read_name(tags: &TagDictionary) -> Result<String, GeorefError> {
    let Some(values) = tags.get(TAG_IMAGE_DESCRIPTION) else {
        return Ok(String::new());
    };

    let first = values.first().ok_or(GeorefError::MalformedTag {
        tag: TAG_IMAGE_DESCRIPTION,
        index: None,
        reason: MalformedReason::NoData,
    })?;

    Ok(first.to_text())
}

/// Read all tiepoints from ModelTiepointTag (33922), in source order.
///
/// Values come in groups of six; a trailing partial group is ignored. The
/// first bad value aborts the whole read.
pub fn read_tiepoints(tags: &TagDictionary) -> Result<Vec<Tiepoint>, GeorefError> {
    let Some(values) = tags.get(TAG_MODEL_TIEPOINT) else {
        return Ok(Vec::new());
    };

    let count = values.len() / TIEPOINT_STRIDE;
    if values.len() % TIEPOINT_STRIDE != 0 {
        debug!(
            values = values.len(),
            "ignoring trailing partial tiepoint group"
        );
    }

    let mut tiepoints = Vec::with_capacity(count);
    for base in (0..count).map(|i| i * TIEPOINT_STRIDE) {
        let x = number_at(TAG_MODEL_TIEPOINT, values, base + RASTER_X)?;
        let y = number_at(TAG_MODEL_TIEPOINT, values, base + RASTER_Y)?;
        let latitude = number_at(TAG_MODEL_TIEPOINT, values, base + LATITUDE)?;
        let longitude = number_at(TAG_MODEL_TIEPOINT, values, base + LONGITUDE)?;

        let coordinate = GeoCoordinate::new(latitude, longitude);
        if !coordinate.is_valid() {
            return Err(GeorefError::MalformedTag {
                tag: TAG_MODEL_TIEPOINT,
                index: Some(base + LATITUDE),
                reason: MalformedReason::CoordinateOutOfRange {
                    latitude,
                    longitude,
                },
            });
        }

        tiepoints.push(Tiepoint {
            raster_point: RasterPoint::new(x, y),
            coordinate,
        });
    }

    debug!(count = tiepoints.len(), "read tiepoints");
    Ok(tiepoints)
}

/// Read the pixel scale from ModelPixelScaleTag (33550).
///
/// Absent tag gives a zero scale. The Z scale, if present, is ignored.
pub fn read_pixel_scale(tags: &TagDictionary) -> Result<PixelScale, GeorefError> {
    let Some(values) = tags.get(TAG_MODEL_PIXEL_SCALE) else {
        return Ok(PixelScale::default());
    };

    if values.len() < 2 {
        return Err(GeorefError::MalformedTag {
            tag: TAG_MODEL_PIXEL_SCALE,
            index: None,
            reason: MalformedReason::TooFewValues {
                expected: 2,
                actual: values.len(),
            },
        });
    }

    let width = number_at(TAG_MODEL_PIXEL_SCALE, values, 0)?;
    let height = number_at(TAG_MODEL_PIXEL_SCALE, values, 1)?;
    Ok(PixelScale::new(width, height))
}
