use super::*;

#[test]
fn from_straight_rgba_premultiplies_with_rounding() {
    let p = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
    assert_eq!(
        p,
        Rgba8Premul {
            r: ((100u16 * 128 + 127) / 255) as u8,
            g: ((50u16 * 128 + 127) / 255) as u8,
            b: ((200u16 * 128 + 127) / 255) as u8,
            a: 128,
        }
    );
    assert!(p.is_valid_premul());
}

#[test]
fn construction_rejects_bad_lengths_and_strides() {
    assert!(matches!(
        PixelBuffer::from_premul_rgba8(2, 2, vec![0; 15]),
        Err(RecolorError::DimensionMismatch(_))
    ));
    assert!(matches!(
        PixelBuffer::from_premul_rgba8_with_stride(2, 1, 7, vec![0; 7]),
        Err(RecolorError::DimensionMismatch(_))
    ));
    PixelBuffer::from_premul_rgba8_with_stride(2, 2, 12, vec![0; 24]).unwrap();
}

#[test]
fn construction_rejects_invalid_premultiplication() {
    let err = PixelBuffer::from_premul_rgba8(1, 1, vec![200, 0, 0, 100]).unwrap_err();
    assert!(err.to_string().contains("(0, 0)"));
}

#[test]
fn accessors_are_bounds_checked_and_honor_stride() {
    let mut data = vec![0u8; 2 * 12];
    // Pixel (1, 1) with 4 bytes of padding per row.
    data[12 + 4..12 + 8].copy_from_slice(&[10, 20, 30, 40]);
    let mut buf = PixelBuffer::from_premul_rgba8_with_stride(2, 2, 12, data).unwrap();

    assert_eq!(
        buf.pixel(1, 1).unwrap(),
        Rgba8Premul {
            r: 10,
            g: 20,
            b: 30,
            a: 40
        }
    );
    assert!(buf.pixel(2, 0).is_err());
    assert!(buf.pixel(0, 2).is_err());

    buf.set_pixel(0, 0, Rgba8Premul::from_straight_rgba(255, 0, 0, 255))
        .unwrap();
    assert_eq!(buf.pixel(0, 0).unwrap().to_bytes(), [255, 0, 0, 255]);

    let bad = Rgba8Premul {
        r: 9,
        g: 0,
        b: 0,
        a: 1,
    };
    assert!(buf.set_pixel(0, 0, bad).is_err());
}

#[test]
fn packing_drops_row_padding() {
    let mut data = vec![0u8; 2 * 8];
    data[0..4].copy_from_slice(&[1, 1, 1, 1]);
    data[8..12].copy_from_slice(&[2, 2, 2, 2]);
    let buf = PixelBuffer::from_premul_rgba8_with_stride(1, 2, 8, data).unwrap();

    assert_eq!(buf.to_packed_rgba8(), vec![1, 1, 1, 1, 2, 2, 2, 2]);
    let packed = buf.to_packed();
    assert_eq!(packed.stride(), 4);
    assert_eq!(packed.pixel(0, 1).unwrap(), buf.pixel(0, 1).unwrap());
    assert_eq!(buf.into_packed_rgba8().len(), 8);
}

#[test]
fn new_transparent_is_all_zero() {
    let buf = PixelBuffer::new_transparent(3, 2).unwrap();
    assert_eq!(buf.as_bytes().len(), 24);
    assert!(buf.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(buf.first_invalid_premul(), None);
}
