use thiserror::Error;

use crate::georef::GeoCoordinate;

/// I/O errors that can occur when reading from a byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Error from the local filesystem
    #[error("File error: {0}")]
    File(String),

    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),
}

/// Errors that can occur when parsing TIFF files
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42 (TIFF) or 43 (BigTIFF), got {0}")]
    InvalidVersion(u16),

    /// Invalid BigTIFF offset byte size (must be 8)
    #[error("Invalid BigTIFF offset byte size: expected 8, got {0}")]
    InvalidBigTiffOffsetSize(u16),

    /// File is too small to contain a valid TIFF header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Invalid IFD offset (points outside file or to invalid location)
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// IFD declares more entries than we are willing to read
    #[error("Too many IFD entries: {count} (limit {limit})")]
    TooManyEntries { count: u64, limit: u64 },

    /// Required tag is missing from IFD
    #[error("Missing required tag: {0}")]
    MissingTag(&'static str),

    /// Tag has unexpected type or count
    #[error("Invalid tag value for {tag}: {message}")]
    InvalidTagValue { tag: &'static str, message: String },

    /// Unknown field type in IFD entry
    #[error("Unknown field type: {0}")]
    UnknownFieldType(u16),
}

/// A tag value that could not be converted to the requested kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Text that does not hold a decimal number
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    /// NaN or infinite
    #[error("not a finite number: {0}")]
    NonFinite(f64),
}

/// Why a georeferencing tag was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedReason {
    /// The tag is present but carries no values
    #[error("tag has no data")]
    NoData,

    #[error("expected at least {expected} values, got {actual}")]
    TooFewValues { expected: usize, actual: usize },

    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ValueError),

    /// Tiepoint coordinate outside [-90, 90] x [-180, 180]
    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
}

/// Errors produced while interpreting GeoTIFF tags.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeorefError {
    /// A georeferencing tag is present but its payload is unusable
    #[error("Invalid data for tag {tag}{}: {reason}", .index.map(|i| format!(" at value {i}")).unwrap_or_default())]
    MalformedTag {
        tag: u16,
        index: Option<usize>,
        reason: MalformedReason,
    },

    /// Tag 33922 is absent or yields no tiepoints
    #[error("No usable tiepoint data (tag 33922)")]
    MissingGeoreference,

    /// The computed bounding box fails validation
    #[error("The bounding box is invalid: top left {top_left}, bottom right {bottom_right}")]
    InvalidBoundingBox {
        top_left: GeoCoordinate,
        bottom_right: GeoCoordinate,
    },
}

impl GeorefError {
    /// Tag id carried by a `MalformedTag` error.
    pub fn tag(&self) -> Option<u16> {
        match self {
            GeorefError::MalformedTag { tag, .. } => Some(*tag),
            _ => None,
        }
    }
}

/// Errors from opening a GeoTIFF file end to end
#[derive(Debug, Clone, Error)]
pub enum GeoTiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The container is not a readable TIFF
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// The TIFF is readable but its georeferencing is not
    #[error("Georeferencing error: {0}")]
    Georef(#[from] GeorefError),
}
