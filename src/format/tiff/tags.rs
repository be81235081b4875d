//! TIFF tag and field type definitions.
//!
//! Covers the TIFF 6.0 field types, the BigTIFF 64-bit types, and the tags
//! GeoTIFF georeferencing depends on.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated strings
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two LONGs: numerator, denominator
    Rational = 5,

    SByte = 6,

    /// Undefined byte data
    Undefined = 7,

    SShort = 8,

    SLong = 9,

    /// Two SLONGs: numerator, denominator
    SRational = 10,

    /// IEEE single precision
    Float = 11,

    /// IEEE double precision
    Double = 12,

    /// 32-bit IFD offset
    Ifd = 13,

    /// Unsigned 64-bit integer - BigTIFF only
    Long8 = 16,

    /// Signed 64-bit integer - BigTIFF only
    SLong8 = 17,

    /// 64-bit IFD offset - BigTIFF only
    Ifd8 = 18,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational
            | FieldType::SRational
            | FieldType::Double
            | FieldType::Long8
            | FieldType::SLong8
            | FieldType::Ifd8 => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            13 => Some(FieldType::Ifd),
            16 => Some(FieldType::Long8),
            17 => Some(FieldType::SLong8),
            18 => Some(FieldType::Ifd8),
            _ => None,
        }
    }

    /// Maximum bytes that can be stored inline in a classic TIFF IFD entry.
    pub const INLINE_THRESHOLD_TIFF: usize = 4;

    /// Maximum bytes that can be stored inline in a BigTIFF IFD entry.
    pub const INLINE_THRESHOLD_BIGTIFF: usize = 8;

    /// Check if a value with this type and count fits inline in an entry.
    #[inline]
    pub fn fits_inline(self, count: u64, is_bigtiff: bool) -> bool {
        let threshold = if is_bigtiff {
            Self::INLINE_THRESHOLD_BIGTIFF as u64
        } else {
            Self::INLINE_THRESHOLD_TIFF as u64
        };
        match (self.size_in_bytes() as u64).checked_mul(count) {
            Some(total) => total <= threshold,
            None => false,
        }
    }
}

// =============================================================================
// TIFF Tags
// =============================================================================

/// TIFF tag IDs this crate knows by name.
///
/// Every tag of the first IFD ends up in the tag dictionary regardless; the
/// names are used for raster dimensions, georeferencing, and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    // -------------------------------------------------------------------------
    // Baseline
    // -------------------------------------------------------------------------
    /// Image width in pixels
    ImageWidth = 256,

    /// Image height (length) in pixels
    ImageLength = 257,

    BitsPerSample = 258,

    Compression = 259,

    PhotometricInterpretation = 262,

    /// Description string, used as the image name
    ImageDescription = 270,

    SamplesPerPixel = 277,

    PlanarConfiguration = 284,

    TileWidth = 322,

    TileLength = 323,

    SampleFormat = 339,

    // -------------------------------------------------------------------------
    // GeoTIFF
    // -------------------------------------------------------------------------
    /// Ground units per pixel: (ScaleX, ScaleY, ScaleZ)
    ModelPixelScale = 33550,

    /// Raster to model tiepoints: groups of (I, J, K, X, Y, Z)
    ModelTiepoint = 33922,

    /// 4x4 raster to model affine matrix
    ModelTransformation = 34264,

    GeoKeyDirectory = 34735,

    GeoDoubleParams = 34736,

    GeoAsciiParams = 34737,

    // -------------------------------------------------------------------------
    // GDAL
    // -------------------------------------------------------------------------
    GdalMetadata = 42112,

    GdalNoData = 42113,
}

impl TiffTag {
    /// Create a TiffTag from its numeric value.
    ///
    /// Returns `None` for unrecognized tags. Unknown tags are still carried
    /// in the tag dictionary.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            256 => Some(TiffTag::ImageWidth),
            257 => Some(TiffTag::ImageLength),
            258 => Some(TiffTag::BitsPerSample),
            259 => Some(TiffTag::Compression),
            262 => Some(TiffTag::PhotometricInterpretation),
            270 => Some(TiffTag::ImageDescription),
            277 => Some(TiffTag::SamplesPerPixel),
            284 => Some(TiffTag::PlanarConfiguration),
            322 => Some(TiffTag::TileWidth),
            323 => Some(TiffTag::TileLength),
            339 => Some(TiffTag::SampleFormat),
            33550 => Some(TiffTag::ModelPixelScale),
            33922 => Some(TiffTag::ModelTiepoint),
            34264 => Some(TiffTag::ModelTransformation),
            34735 => Some(TiffTag::GeoKeyDirectory),
            34736 => Some(TiffTag::GeoDoubleParams),
            34737 => Some(TiffTag::GeoAsciiParams),
            42112 => Some(TiffTag::GdalMetadata),
            42113 => Some(TiffTag::GdalNoData),
            _ => None,
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Name as used in the TIFF and GeoTIFF specifications.
    pub const fn name(self) -> &'static str {
        match self {
            TiffTag::ImageWidth => "ImageWidth",
            TiffTag::ImageLength => "ImageLength",
            TiffTag::BitsPerSample => "BitsPerSample",
            TiffTag::Compression => "Compression",
            TiffTag::PhotometricInterpretation => "PhotometricInterpretation",
            TiffTag::ImageDescription => "ImageDescription",
            TiffTag::SamplesPerPixel => "SamplesPerPixel",
            TiffTag::PlanarConfiguration => "PlanarConfiguration",
            TiffTag::TileWidth => "TileWidth",
            TiffTag::TileLength => "TileLength",
            TiffTag::SampleFormat => "SampleFormat",
            TiffTag::ModelPixelScale => "ModelPixelScaleTag",
            TiffTag::ModelTiepoint => "ModelTiepointTag",
            TiffTag::ModelTransformation => "ModelTransformationTag",
            TiffTag::GeoKeyDirectory => "GeoKeyDirectoryTag",
            TiffTag::GeoDoubleParams => "GeoDoubleParamsTag",
            TiffTag::GeoAsciiParams => "GeoAsciiParamsTag",
            TiffTag::GdalMetadata => "GDAL_METADATA",
            TiffTag::GdalNoData => "GDAL_NODATA",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
