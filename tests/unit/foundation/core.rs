use super::*;

#[test]
fn raster_from_rgba8_checks_buffer_length() {
    assert!(RasterImage::from_rgba8("ok", 2, 2, vec![0u8; 16]).is_ok());
    assert!(RasterImage::from_rgba8("short", 2, 2, vec![0u8; 15]).is_err());
    assert!(RasterImage::from_rgba8("long", 2, 2, vec![0u8; 17]).is_err());
}

#[test]
fn raster_rejects_zero_dimensions() {
    assert!(RasterImage::from_rgba8("w", 0, 2, Vec::new()).is_err());
    assert!(RasterImage::from_rgba8("h", 2, 0, Vec::new()).is_err());
}

#[test]
fn canvas_bounding_takes_per_axis_maxima() {
    let layers = [
        RasterImage::from_rgba8("a", 3, 5, vec![0u8; 60]).unwrap(),
        RasterImage::from_rgba8("b", 5, 3, vec![0u8; 60]).unwrap(),
    ];
    assert_eq!(
        Canvas::bounding(&layers),
        Canvas {
            width: 5,
            height: 5
        }
    );
}

#[test]
fn canvas_bounding_of_empty_list_is_zero() {
    assert_eq!(
        Canvas::bounding(&[]),
        Canvas {
            width: 0,
            height: 0
        }
    );
}
