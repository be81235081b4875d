//! First image file directory of a TIFF, decoded into a tag dictionary.
//!
//! Only the first IFD is read. Georeferencing tags describe the full
//! resolution image, which by convention is the first directory.

use tracing::{debug, warn};

use crate::error::TiffError;
use crate::georef::{RasterSize, RasterSizeProvider, TagDictionary, TagValue};
use crate::io::RangeReader;

use super::parser::{Ifd, TiffHeader, BIGTIFF_HEADER_SIZE};
use super::tags::TiffTag;
use super::values::ValueReader;

/// Maximum number of entries accepted in one IFD
pub const MAX_IFD_ENTRIES: u64 = 4096;

/// Header, first IFD and decoded tags of a TIFF file.
#[derive(Debug, Clone)]
pub struct TiffDirectory {
    pub header: TiffHeader,

    pub ifd: Ifd,

    /// Every entry with a known field type, decoded
    pub tags: TagDictionary,

    /// Dimensions from ImageWidth and ImageLength
    pub raster_size: RasterSize,
}

impl TiffDirectory {
    /// Read the header and first IFD, decoding every tag value.
    ///
    /// Entries with an unknown field type are skipped. ImageWidth and
    /// ImageLength must be present and non-zero.
    pub async fn read<R: RangeReader>(reader: &R) -> Result<Self, TiffError> {
        let header_len = (BIGTIFF_HEADER_SIZE as u64).min(reader.size()) as usize;
        let header_bytes = reader.read_exact_at(0, header_len).await?;
        let header = TiffHeader::parse(&header_bytes, reader.size())?;

        let ifd = Self::read_ifd(reader, &header, header.first_ifd_offset).await?;
        debug!(
            identifier = reader.identifier(),
            bigtiff = header.is_bigtiff,
            entries = ifd.len(),
            "read first IFD"
        );

        let tags = Self::read_tags(reader, &header, &ifd).await?;
        let raster_size = RasterSize::new(
            dimension(&tags, TiffTag::ImageWidth)?,
            dimension(&tags, TiffTag::ImageLength)?,
        );

        Ok(TiffDirectory {
            header,
            ifd,
            tags,
            raster_size,
        })
    }

    async fn read_ifd<R: RangeReader>(
        reader: &R,
        header: &TiffHeader,
        offset: u64,
    ) -> Result<Ifd, TiffError> {
        // First, read just enough to get the entry count
        let count_bytes = reader.read_exact_at(offset, header.ifd_count_size()).await?;
        let entry_count = header.read_entry_count(&count_bytes);
        if entry_count > MAX_IFD_ENTRIES {
            return Err(TiffError::TooManyEntries {
                count: entry_count,
                limit: MAX_IFD_ENTRIES,
            });
        }

        let ifd_size = Ifd::calculate_size(entry_count, header);
        let ifd_bytes = reader.read_exact_at(offset, ifd_size).await?;
        Ifd::parse(&ifd_bytes, header)
    }

    async fn read_tags<R: RangeReader>(
        reader: &R,
        header: &TiffHeader,
        ifd: &Ifd,
    ) -> Result<TagDictionary, TiffError> {
        let value_reader = ValueReader::new(reader, header);
        let mut tags = TagDictionary::new();

        for entry in &ifd.entries {
            if entry.field_type.is_none() {
                warn!(
                    tag = entry.tag_id,
                    field_type = entry.field_type_raw,
                    "skipping entry with unknown field type"
                );
                continue;
            }
            // Duplicates keep the first occurrence, as the IFD index does
            if tags.contains(entry.tag_id) {
                continue;
            }

            let values = value_reader.read_values(entry).await?;
            tags.insert(entry.tag_id, values);
        }

        Ok(tags)
    }
}

impl RasterSizeProvider for TiffDirectory {
    fn raster_size(&self) -> RasterSize {
        self.raster_size
    }
}

/// Read a required, non-zero image dimension.
fn dimension(tags: &TagDictionary, tag: TiffTag) -> Result<u32, TiffError> {
    let value = tags
        .get(tag.as_u16())
        .and_then(|values| values.first())
        .ok_or(TiffError::MissingTag(tag.name()))?;

    let number = value.to_number().map_err(|e| TiffError::InvalidTagValue {
        tag: tag.name(),
        message: e.to_string(),
    })?;

    match number {
        n if n == 0.0 => Err(TiffError::MissingTag(tag.name())),
        n if n < 0.0 || n > f64::from(u32::MAX) || n.fract() != 0.0 => {
            Err(TiffError::InvalidTagValue {
                tag: tag.name(),
                message: format!("not a pixel count: {}", TagValue::Number(n)),
            })
        }
        n => Ok(n as u32),
    }
}
