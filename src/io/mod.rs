//! Byte-range access to TIFF containers.
//!
//! The tag parser is written against [`RangeReader`] so the same code reads
//! local files and in-memory buffers.

mod reader;

pub use reader::{FileRangeReader, MemoryRangeReader, RangeReader};
