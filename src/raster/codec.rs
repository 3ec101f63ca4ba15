use std::io::Cursor;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{RecolorError, RecolorResult};
use crate::foundation::math::unpremul_u8;

/// Encoded-raster collaborator: bytes in, premultiplied pixels out, and back.
pub trait RasterCodec {
    /// Decode encoded image bytes into a premultiplied buffer.
    fn decode(&self, bytes: &[u8]) -> RecolorResult<PixelBuffer>;

    /// Encode a premultiplied buffer into file bytes.
    fn encode(&self, buf: &PixelBuffer) -> RecolorResult<Vec<u8>>;
}

/// 8-bit-per-channel RGBA PNG codec backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

impl RasterCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> RecolorResult<PixelBuffer> {
        let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|e| RecolorError::decode(format!("decode png: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::from_straight_rgba8(width, height, rgba.into_raw())
    }

    fn encode(&self, buf: &PixelBuffer) -> RecolorResult<Vec<u8>> {
        buf.check_layout()?;
        let mut straight = buf.to_packed_rgba8();
        unpremultiply_rgba8_in_place(&mut straight);

        let img = image::RgbaImage::from_raw(buf.width(), buf.height(), straight)
            .ok_or_else(|| RecolorError::dimension("rgba8 length does not match dimensions"))?;
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| RecolorError::write(format!("encode png: {e}")))?;
        Ok(out)
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = unpremul_u8(px[0], a);
        px[1] = unpremul_u8(px[1], a);
        px[2] = unpremul_u8(px[2], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/codec.rs"]
mod tests;
