use super::*;

fn buf(px: &[[u8; 4]]) -> PixelBuffer {
    PixelBuffer::from_premul_rgba8(px.len() as u32, 1, px.concat()).unwrap()
}

#[test]
fn identical_buffers_report_nothing() {
    let a = buf(&[[10, 20, 30, 40], [0, 0, 0, 0]]);
    let report = compare_buffers(&a, &a.clone(), 0).unwrap();
    assert!(report.is_identical());
    assert_eq!(report.max_channel_delta, 0);
    assert!(report.diff.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn counts_changes_beyond_tolerance() {
    let a = buf(&[[10, 20, 30, 40], [0, 0, 0, 0], [100, 100, 100, 255]]);
    let b = buf(&[[12, 20, 30, 40], [0, 0, 0, 9], [100, 100, 100, 255]]);

    let strict = compare_buffers(&a, &b, 0).unwrap();
    assert_eq!(strict.pixels_changed, 2);
    assert_eq!(strict.max_channel_delta, 9);
    assert_eq!(strict.diff.pixel(0, 0).unwrap().to_bytes(), [255, 0, 0, 255]);
    assert_eq!(strict.diff.pixel(2, 0).unwrap().a, 0);

    let loose = compare_buffers(&a, &b, 2).unwrap();
    assert_eq!(loose.pixels_changed, 1);
    assert_eq!(loose.diff.pixel(0, 0).unwrap().a, 0);
    assert_eq!(loose.diff.pixel(1, 0).unwrap().a, 255);
}

#[test]
fn size_mismatch_is_rejected() {
    let a = buf(&[[0, 0, 0, 0]]);
    let b = buf(&[[0, 0, 0, 0], [0, 0, 0, 0]]);
    assert!(matches!(
        compare_buffers(&a, &b, 0),
        Err(RecolorError::DimensionMismatch(_))
    ));
}

#[test]
fn strides_do_not_matter() {
    let packed = buf(&[[1, 1, 1, 1]]);
    let padded =
        PixelBuffer::from_premul_rgba8_with_stride(1, 1, 8, vec![1, 1, 1, 1, 9, 9, 9, 9]).unwrap();
    assert!(compare_buffers(&packed, &padded, 0).unwrap().is_identical());
}
