use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8Premul;

fn png_bytes(width: u32, height: u32, straight: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, straight).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bytes = png_bytes(1, 1, vec![100, 50, 200, 128]);

    let buf = PngCodec.decode(&bytes).unwrap();
    assert_eq!((buf.width(), buf.height()), (1, 1));
    assert_eq!(
        buf.pixel(0, 0).unwrap(),
        Rgba8Premul::from_straight_rgba(100, 50, 200, 128)
    );
}

#[test]
fn decode_rejects_garbage() {
    let err = PngCodec.decode(b"definitely not a png").unwrap_err();
    assert!(matches!(err, RecolorError::Decode(_)), "{err}");
}

#[test]
fn encode_writes_straight_alpha_png() {
    let buf = PixelBuffer::from_straight_rgba8(
        2,
        1,
        vec![255, 0, 0, 255, 0, 0, 255, 128],
    )
    .unwrap();

    let bytes = PngCodec.encode(&buf).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 128]);
}

#[test]
fn encode_zeroes_color_of_transparent_pixels() {
    let buf = PixelBuffer::new_transparent(1, 1).unwrap();
    let bytes = PngCodec.encode(&buf).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn encode_then_decode_preserves_opaque_pixels() {
    let straight = vec![
        10, 20, 30, 255, 200, 100, 0, 255, //
        0, 0, 0, 0, 255, 255, 255, 255,
    ];
    let buf = PixelBuffer::from_straight_rgba8(2, 2, straight).unwrap();
    let back = PngCodec.decode(&PngCodec.encode(&buf).unwrap()).unwrap();
    assert_eq!(back, buf);
}
