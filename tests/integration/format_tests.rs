//! Format-specific integration tests.
//!
//! Tests verify:
//! - TIFF parser handles little-endian and big-endian files
//! - BigTIFF files are parsed correctly
//! - Tag values of every common field type decode to the same dictionary
//! - Only the ranges needed are read

use tiff_georef::{MemoryRangeReader, TagValue, TiffDirectory, TiffError, MAX_IFD_ENTRIES};

use super::test_utils::{
    chart_ifd, create_chart, create_geotiff, is_bigtiff_magic, is_tiff_magic, ByteOrderType,
    EntryValue, IfdBuilder, TiffBuilder, TrackingMockReader, TAG_MODEL_TIEPOINT,
};

async fn read_directory(data: Vec<u8>) -> Result<TiffDirectory, TiffError> {
    let reader = MemoryRangeReader::new(data, "mem://test.tif");
    TiffDirectory::read(&reader).await
}

// =============================================================================
// TIFF Byte Order Tests
// =============================================================================

#[tokio::test]
async fn test_little_endian_tiff() {
    let data = create_chart(ByteOrderType::LittleEndian, false);
    assert_eq!(&data[0..2], b"II");
    assert!(is_tiff_magic(&data));

    let dir = read_directory(data).await.unwrap();
    assert!(!dir.header.is_bigtiff);
    assert_eq!(dir.raster_size.width, 101);
    assert_eq!(
        dir.tags.get(270),
        Some(&[TagValue::from("EDFE Approach")][..])
    );
}

#[tokio::test]
async fn test_big_endian_tiff() {
    let data = create_chart(ByteOrderType::BigEndian, false);
    assert_eq!(&data[0..2], b"MM");
    assert!(is_tiff_magic(&data));

    let dir = read_directory(data).await.unwrap();
    assert_eq!(dir.raster_size.height, 101);
    let tiepoints = dir.tags.get(TAG_MODEL_TIEPOINT).unwrap();
    assert_eq!(tiepoints[3], TagValue::Number(8.0));
    assert_eq!(tiepoints[4], TagValue::Number(50.0));
}

#[tokio::test]
async fn test_both_byte_orders_produce_equivalent_results() {
    let le = read_directory(create_chart(ByteOrderType::LittleEndian, false))
        .await
        .unwrap();
    let be = read_directory(create_chart(ByteOrderType::BigEndian, false))
        .await
        .unwrap();

    assert_eq!(le.tags, be.tags);
    assert_eq!(le.raster_size, be.raster_size);
}

// =============================================================================
// BigTIFF Tests
// =============================================================================

#[tokio::test]
async fn test_bigtiff() {
    let data = create_chart(ByteOrderType::LittleEndian, true);
    assert!(is_bigtiff_magic(&data));

    let dir = read_directory(data).await.unwrap();
    assert!(dir.header.is_bigtiff);
    assert_eq!(dir.header.first_ifd_offset, 16);
    assert_eq!(dir.ifd.len(), 5);
}

#[tokio::test]
async fn test_bigtiff_big_endian_matches_classic() {
    let classic = read_directory(create_chart(ByteOrderType::LittleEndian, false))
        .await
        .unwrap();
    let big = read_directory(create_chart(ByteOrderType::BigEndian, true))
        .await
        .unwrap();

    assert_eq!(classic.tags, big.tags);
}

// =============================================================================
// Field Types
// =============================================================================

#[tokio::test]
async fn test_field_types_decode() {
    let mut ifd = IfdBuilder::image(10, 20);
    ifd.shorts(258, &[8, 8, 8])
        .add(282, EntryValue::Rational(vec![(300, 1)]))
        .add(
            42113,
            EntryValue::Raw {
                field_type: 2,
                count: 4,
                bytes: b"-99\0".to_vec(),
            },
        );

    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let data = TiffBuilder::new(ifd.clone()).with_byte_order(order).build();
        let dir = read_directory(data).await.unwrap();

        assert_eq!(dir.raster_size.width, 10);
        assert_eq!(dir.raster_size.height, 20);
        assert_eq!(
            dir.tags.get(258),
            Some(&[TagValue::Number(8.0), TagValue::Number(8.0), TagValue::Number(8.0)][..])
        );
        assert_eq!(dir.tags.get(282), Some(&[TagValue::Number(300.0)][..]));
        assert_eq!(dir.tags.get(42113), Some(&[TagValue::from("-99")][..]));
    }
}

#[tokio::test]
async fn test_short_dimensions() {
    let mut ifd = IfdBuilder::new();
    ifd.shorts(256, &[640]).shorts(257, &[480]);

    let dir = read_directory(create_geotiff(ifd)).await.unwrap();
    assert_eq!(dir.raster_size.width, 640);
    assert_eq!(dir.raster_size.height, 480);
}

#[tokio::test]
async fn test_unknown_field_type_skipped() {
    let mut ifd = chart_ifd();
    ifd.add(
        50000,
        EntryValue::Raw {
            field_type: 99,
            count: 1,
            bytes: vec![1, 2, 3, 4],
        },
    );

    let dir = read_directory(create_geotiff(ifd)).await.unwrap();
    assert!(dir.ifd.get_entry(50000).is_some());
    assert!(!dir.tags.contains(50000));
    assert!(dir.tags.contains(TAG_MODEL_TIEPOINT));
}

// =============================================================================
// Structural Errors
// =============================================================================

#[tokio::test]
async fn test_missing_dimensions() {
    let mut ifd = chart_ifd();
    ifd.remove(257);

    let result = read_directory(create_geotiff(ifd)).await;
    assert!(matches!(result, Err(TiffError::MissingTag("ImageLength"))));
}

#[tokio::test]
async fn test_truncated_value() {
    let mut data = create_chart(ByteOrderType::LittleEndian, false);
    data.truncate(data.len() - 8);

    let result = read_directory(data).await;
    assert!(matches!(result, Err(TiffError::Io(_))));
}

#[tokio::test]
async fn test_first_ifd_past_end() {
    let mut data = create_chart(ByteOrderType::LittleEndian, false);
    let past_end = (data.len() as u32 + 100).to_le_bytes();
    data[4..8].copy_from_slice(&past_end);

    let result = read_directory(data).await;
    assert!(matches!(result, Err(TiffError::InvalidIfdOffset(_))));
}

#[tokio::test]
async fn test_entry_count_limit() {
    let mut data = create_chart(ByteOrderType::BigEndian, true);
    data[16..24].copy_from_slice(&(MAX_IFD_ENTRIES + 1).to_be_bytes());

    let result = read_directory(data).await;
    assert!(matches!(result, Err(TiffError::TooManyEntries { .. })));
}

#[tokio::test]
async fn test_invalid_version() {
    let mut data = create_chart(ByteOrderType::LittleEndian, false);
    data[2] = 44;

    let result = read_directory(data).await;
    assert!(matches!(result, Err(TiffError::InvalidVersion(44))));
}

// =============================================================================
// Range Access
// =============================================================================

#[tokio::test]
async fn test_reads_only_needed_ranges() {
    let mut data = create_chart(ByteOrderType::LittleEndian, false);
    // Pixel data nobody should touch
    data.extend(vec![0xAB; 64 * 1024]);
    let total = data.len();

    let reader = TrackingMockReader::new(data, "tracked.tif");
    let dir = TiffDirectory::read(&reader).await.unwrap();
    assert_eq!(dir.tags.len(), 5);

    // Header, entry count, IFD, then description, tiepoints and scale
    assert_eq!(reader.request_count(), 6);
    assert!(reader.bytes_read().await < total / 100);

    let requests = reader.get_requests().await;
    assert_eq!(requests[0], (0, 16));
}
