//! End-to-end GeoTIFF tests: container bytes in, georeference out.
//!
//! Tests verify:
//! - The reference chart yields the expected name, tiepoint and bounding box
//! - Northward rasters extend the box north of the anchor
//! - Malformed and missing georeferencing tags are reported with their tag
//! - Results serialize to JSON

use std::path::PathBuf;

use tiff_georef::{
    GeoCoordinate, GeoTiff, GeoTiffError, GeorefError, MalformedReason, MemoryRangeReader,
    RasterSize, RasterSizeProvider, TiffError,
};

use super::test_utils::{
    chart_ifd, create_chart, create_geotiff, ByteOrderType, EntryValue, IfdBuilder, TiffBuilder,
    TAG_IMAGE_DESCRIPTION, TAG_MODEL_PIXEL_SCALE, TAG_MODEL_TIEPOINT,
};

const EPS: f64 = 1e-9;

async fn open(data: Vec<u8>) -> Result<GeoTiff, GeoTiffError> {
    let reader = MemoryRangeReader::new(data, "mem://chart.tif");
    GeoTiff::open(&reader).await
}

fn assert_close(actual: GeoCoordinate, latitude: f64, longitude: f64) {
    assert!(
        (actual.latitude - latitude).abs() < EPS && (actual.longitude - longitude).abs() < EPS,
        "expected ({}, {}), got {}",
        latitude,
        longitude,
        actual
    );
}

// =============================================================================
// Valid Charts
// =============================================================================

#[tokio::test]
async fn test_chart_all_layouts() {
    let layouts = [
        (ByteOrderType::LittleEndian, false),
        (ByteOrderType::BigEndian, false),
        (ByteOrderType::LittleEndian, true),
        (ByteOrderType::BigEndian, true),
    ];

    for (order, bigtiff) in layouts {
        let geotiff = open(create_chart(order, bigtiff)).await.unwrap();
        let georef = geotiff.georeference();

        assert_eq!(georef.name, "EDFE Approach");
        assert_eq!(georef.tiepoints.len(), 1);
        assert_eq!(georef.tiepoints[0].raster_point.x, 0.0);
        assert_eq!(georef.tiepoints[0].raster_point.y, 0.0);
        assert_eq!(georef.pixel_scale.width, 0.01);
        assert_eq!(georef.pixel_scale.height, 0.01);
        assert_close(georef.bounding_box.top_left, 50.0, 8.0);
        assert_close(georef.bounding_box.bottom_right, 49.0, 9.0);
        assert_eq!(geotiff.raster_size(), RasterSize::new(101, 101));
    }
}

#[tokio::test]
async fn test_northward_chart() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_PIXEL_SCALE)
        .doubles(TAG_MODEL_PIXEL_SCALE, &[0.01, -0.01, 0.0]);

    let geotiff = open(create_geotiff(ifd)).await.unwrap();
    let bbox = geotiff.georeference().bounding_box;
    assert_close(bbox.bottom_right, 51.0, 9.0);
    assert!(bbox.contains(&GeoCoordinate::new(50.5, 8.5)));
}

#[tokio::test]
async fn test_chart_without_name() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_IMAGE_DESCRIPTION);

    let geotiff = open(create_geotiff(ifd)).await.unwrap();
    assert_eq!(geotiff.georeference().name, "");
}

#[tokio::test]
async fn test_multiple_tiepoints_first_anchors() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_TIEPOINT).doubles(
        TAG_MODEL_TIEPOINT,
        &[
            0.0, 0.0, 0.0, 8.0, 50.0, 0.0, //
            100.0, 100.0, 0.0, 9.0, 49.0, 0.0,
        ],
    );

    let geotiff = open(create_geotiff(ifd)).await.unwrap();
    let georef = geotiff.georeference();
    assert_eq!(georef.tiepoints.len(), 2);
    assert_close(georef.tiepoints[1].coordinate, 49.0, 9.0);
    assert_close(georef.bounding_box.top_left, 50.0, 8.0);
}

#[tokio::test]
async fn test_rational_pixel_scale() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_PIXEL_SCALE).add(
        TAG_MODEL_PIXEL_SCALE,
        EntryValue::Rational(vec![(1, 100), (1, 100), (0, 1)]),
    );

    let geotiff = open(create_geotiff(ifd)).await.unwrap();
    assert_close(geotiff.georeference().bounding_box.bottom_right, 49.0, 9.0);
}

// =============================================================================
// Georeferencing Errors
// =============================================================================

#[tokio::test]
async fn test_missing_tiepoints() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_TIEPOINT);

    let result = open(create_geotiff(ifd)).await;
    assert!(matches!(
        result,
        Err(GeoTiffError::Georef(GeorefError::MissingGeoreference))
    ));
}

#[tokio::test]
async fn test_latitude_out_of_range() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_TIEPOINT)
        .doubles(TAG_MODEL_TIEPOINT, &[0.0, 0.0, 0.0, 8.0, 200.0, 0.0]);

    let err = open(create_geotiff(ifd)).await.unwrap_err();
    match err {
        GeoTiffError::Georef(GeorefError::MalformedTag { tag, reason, .. }) => {
            assert_eq!(tag, TAG_MODEL_TIEPOINT);
            assert!(matches!(
                reason,
                MalformedReason::CoordinateOutOfRange { .. }
            ));
        }
        other => panic!("expected malformed tiepoint, got {:?}", other),
    }
}

#[tokio::test]
async fn test_text_tiepoints_are_malformed() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_TIEPOINT)
        .ascii(TAG_MODEL_TIEPOINT, "0\u{0}0\u{0}0\u{0}east\u{0}50\u{0}0");

    let err = open(create_geotiff(ifd)).await.unwrap_err();
    match err {
        GeoTiffError::Georef(GeorefError::MalformedTag { tag, index, reason }) => {
            assert_eq!(tag, TAG_MODEL_TIEPOINT);
            assert_eq!(index, Some(3));
            assert!(matches!(reason, MalformedReason::InvalidNumber(_)));
        }
        other => panic!("expected malformed tiepoint, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_description_is_malformed() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_IMAGE_DESCRIPTION).add(
        TAG_IMAGE_DESCRIPTION,
        EntryValue::Raw {
            field_type: 2,
            count: 0,
            bytes: Vec::new(),
        },
    );

    let err = open(create_geotiff(ifd)).await.unwrap_err();
    match err {
        GeoTiffError::Georef(e) => assert_eq!(e.tag(), Some(TAG_IMAGE_DESCRIPTION)),
        other => panic!("expected georef error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_scale_gives_invalid_box() {
    let mut ifd = chart_ifd();
    ifd.remove(TAG_MODEL_PIXEL_SCALE);

    let result = open(create_geotiff(ifd)).await;
    assert!(matches!(
        result,
        Err(GeoTiffError::Georef(GeorefError::InvalidBoundingBox { .. }))
    ));
}

#[tokio::test]
async fn test_plain_tiff_is_not_georeferenced() {
    let data = TiffBuilder::new(IfdBuilder::image(64, 64))
        .with_byte_order(ByteOrderType::BigEndian)
        .build();

    let result = open(data).await;
    assert!(matches!(
        result,
        Err(GeoTiffError::Georef(GeorefError::MissingGeoreference))
    ));
}

#[tokio::test]
async fn test_container_error_reported_first() {
    // Broken georeferencing and no ImageWidth: the container error wins
    let mut ifd = chart_ifd();
    ifd.remove(256).remove(TAG_MODEL_TIEPOINT);

    let result = open(create_geotiff(ifd)).await;
    assert!(matches!(
        result,
        Err(GeoTiffError::Tiff(TiffError::MissingTag("ImageWidth")))
    ));
}

// =============================================================================
// Files and Serialization
// =============================================================================

#[tokio::test]
async fn test_open_path() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "tiff-georef-it-{}.tif",
        std::process::id()
    ));
    tokio::fs::write(&path, create_chart(ByteOrderType::BigEndian, true))
        .await
        .unwrap();

    let result = GeoTiff::open_path(&path).await;
    let _ = tokio::fs::remove_file(&path).await;

    let geotiff = result.unwrap();
    assert_eq!(geotiff.identifier(), path.display().to_string());
    assert_eq!(geotiff.georeference().name, "EDFE Approach");
}

#[tokio::test]
async fn test_georeference_serializes() {
    let geotiff = open(create_chart(ByteOrderType::LittleEndian, false))
        .await
        .unwrap();

    let json = serde_json::to_value(geotiff.georeference()).unwrap();
    assert_eq!(json["name"], "EDFE Approach");
    assert_eq!(json["bounding_box"]["top_left"]["latitude"], 50.0);
    assert_eq!(json["tiepoints"][0]["coordinate"]["longitude"], 8.0);

    let tags = serde_json::to_value(geotiff.tags()).unwrap();
    assert_eq!(tags["270"][0], "EDFE Approach");
}
