//! TIFF container reading for georeferencing.
//!
//! This module reads just enough of a TIFF or BigTIFF file to hand its tags
//! to the georeference interpreter: the header, the first IFD, and the
//! values its entries point to.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian, MM = big-endian)
//!   in the header. All multi-byte values must be read respecting this order.
//!
//! - **Classic TIFF vs BigTIFF**: Classic TIFF uses 32-bit offsets (max 4GB files),
//!   while BigTIFF uses 64-bit offsets. The parser handles both transparently.
//!
//! - **Inline vs offset values**: Small values are stored inline in the IFD entry,
//!   larger values (tiepoint arrays, descriptions) are stored at an offset.

mod directory;
mod parser;
mod tags;
mod values;

pub use directory::{TiffDirectory, MAX_IFD_ENTRIES};
pub use parser::{ByteOrder, Ifd, IfdEntry, TiffHeader, BIGTIFF_HEADER_SIZE, TIFF_HEADER_SIZE};
pub use tags::{FieldType, TiffTag};
pub use values::{decode_values, ValueReader, MAX_VALUE_BYTES};
