//! TIFF tag value reading.
//!
//! Values are stored either inline in the IFD entry (when they fit in the
//! value/offset field) or elsewhere in the file at the offset the entry
//! points to. Either way they are decoded into loosely-typed [`TagValue`]s.

use bytes::Bytes;

use crate::error::TiffError;
use crate::georef::TagValue;
use crate::io::RangeReader;

use super::parser::{ByteOrder, IfdEntry, TiffHeader};
use super::tags::FieldType;

/// Upper bound on the bytes fetched for a single tag value.
///
/// Guards against entries whose count would have us allocate gigabytes.
pub const MAX_VALUE_BYTES: u64 = 16 * 1024 * 1024;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads tag values from a TIFF file, respecting its byte order and format.
pub struct ValueReader<'a, R: RangeReader> {
    reader: &'a R,
    header: &'a TiffHeader,
}

impl<'a, R: RangeReader> ValueReader<'a, R> {
    pub fn new(reader: &'a R, header: &'a TiffHeader) -> Self {
        Self { reader, header }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Read the raw bytes of an entry's value.
    ///
    /// For inline values, returns the bytes from the entry.
    /// For offset values, fetches the bytes from the file.
    pub async fn read_bytes(&self, entry: &IfdEntry) -> Result<Bytes, TiffError> {
        let size = entry
            .value_byte_size()
            .ok_or(TiffError::UnknownFieldType(entry.field_type_raw))?;

        if size > MAX_VALUE_BYTES {
            return Err(TiffError::InvalidTagValue {
                tag: "value",
                message: format!(
                    "tag {} holds {} bytes, limit is {}",
                    entry.tag_id, size, MAX_VALUE_BYTES
                ),
            });
        }

        if entry.is_inline {
            Ok(Bytes::copy_from_slice(
                &entry.value_offset_bytes[..size as usize],
            ))
        } else {
            let offset = entry.value_offset(self.header.byte_order);
            let bytes = self.reader.read_exact_at(offset, size as usize).await?;
            Ok(bytes)
        }
    }

    /// Read and decode all values of an entry.
    pub async fn read_values(&self, entry: &IfdEntry) -> Result<Vec<TagValue>, TiffError> {
        let field_type = entry
            .field_type
            .ok_or(TiffError::UnknownFieldType(entry.field_type_raw))?;

        if entry.count == 0 {
            return Ok(Vec::new());
        }

        let bytes = self.read_bytes(entry).await?;
        Ok(decode_values(
            &bytes,
            entry.count as usize,
            field_type,
            self.header.byte_order,
        ))
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Split ASCII data into its NUL-terminated strings.
///
/// A missing final terminator is tolerated. Empty strings between
/// terminators are kept, trailing padding after the last terminator is not.
fn decode_ascii(bytes: &[u8]) -> Vec<TagValue> {
    let data = match bytes.last() {
        Some(0) => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    if data.is_empty() {
        return vec![TagValue::Text(String::new())];
    }

    data.split(|&b| b == 0)
        .map(|s| TagValue::Text(String::from_utf8_lossy(s).into_owned()))
        .collect()
}

/// Decode `count` values of `field_type` from raw bytes.
///
/// Numeric types become [`TagValue::Number`], rationals are divided out
/// (a zero denominator gives a non-finite number, rejected by whoever
/// converts it). ASCII becomes one [`TagValue::Text`] per string. Values
/// past the end of `bytes` are dropped.
pub fn decode_values(
    bytes: &[u8],
    count: usize,
    field_type: FieldType,
    byte_order: ByteOrder,
) -> Vec<TagValue> {
    if field_type == FieldType::Ascii {
        return decode_ascii(&bytes[..count.min(bytes.len())]);
    }

    let size = field_type.size_in_bytes();
    bytes
        .chunks_exact(size)
        .take(count)
        .map(|chunk| {
            let value = match field_type {
                FieldType::Byte | FieldType::Undefined => chunk[0] as f64,
                FieldType::SByte => chunk[0] as i8 as f64,
                FieldType::Short => byte_order.read_u16(chunk) as f64,
                FieldType::SShort => byte_order.read_u16(chunk) as i16 as f64,
                FieldType::Long | FieldType::Ifd => byte_order.read_u32(chunk) as f64,
                FieldType::SLong => byte_order.read_u32(chunk) as i32 as f64,
                FieldType::Long8 | FieldType::Ifd8 => byte_order.read_u64(chunk) as f64,
                FieldType::SLong8 => byte_order.read_u64(chunk) as i64 as f64,
                FieldType::Float => byte_order.read_f32(chunk) as f64,
                FieldType::Double => byte_order.read_f64(chunk),
                FieldType::Rational => {
                    let num = byte_order.read_u32(&chunk[..4]) as f64;
                    let den = byte_order.read_u32(&chunk[4..]) as f64;
                    num / den
                }
                FieldType::SRational => {
                    let num = byte_order.read_u32(&chunk[..4]) as i32 as f64;
                    let den = byte_order.read_u32(&chunk[4..]) as i32 as f64;
                    num / den
                }
                FieldType::Ascii => unreachable!("handled above"),
            };
            TagValue::Number(value)
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
