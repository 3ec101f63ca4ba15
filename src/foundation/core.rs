use crate::foundation::error::{RecolorError, RecolorResult};
use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    /// Red channel, scaled by alpha.
    pub r: u8,
    /// Green channel, scaled by alpha.
    pub g: u8,
    /// Blue channel, scaled by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Premultiply a straight RGBA8 color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// `true` when no color channel exceeds alpha.
    pub fn is_valid_premul(self) -> bool {
        self.r <= self.a && self.g <= self.a && self.b <= self.a
    }

    /// Byte layout used by [`PixelBuffer`].
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn from_bytes(px: &[u8]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

/// An owned premultiplied RGBA8 image.
///
/// Rows are `stride` bytes apart; the first `4 * width` bytes of each row hold
/// pixels as `[r, g, b, a]` with every color channel `<= a`. Constructors
/// validate sizing and premultiplication, and all pixel access goes through the
/// bounds-checked `(x, y)` accessors.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Allocate a fully transparent, tightly packed buffer.
    pub fn new_transparent(width: u32, height: u32) -> RecolorResult<Self> {
        let stride = packed_stride(width)?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| RecolorError::dimension(format!("{width}x{height} overflows")))?;
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0u8; len],
        })
    }

    /// Wrap tightly packed premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> RecolorResult<Self> {
        let stride = packed_stride(width)?;
        Self::from_premul_rgba8_with_stride(width, height, stride, data)
    }

    /// Wrap premultiplied RGBA8 bytes whose rows are `stride` bytes apart.
    pub fn from_premul_rgba8_with_stride(
        width: u32,
        height: u32,
        stride: usize,
        data: Vec<u8>,
    ) -> RecolorResult<Self> {
        let buf = Self {
            width,
            height,
            stride,
            data,
        };
        buf.check_layout()?;
        if let Some((x, y)) = buf.first_invalid_premul() {
            return Err(RecolorError::validation(format!(
                "pixel ({x}, {y}) has a color channel above its alpha"
            )));
        }
        Ok(buf)
    }

    /// Premultiply straight (non-premultiplied) tightly packed RGBA8 bytes in place
    /// and wrap them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> RecolorResult<Self> {
        for px in data.chunks_exact_mut(4) {
            let p = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
            px.copy_from_slice(&p.to_bytes());
        }
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between row starts in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw backing bytes, including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Verify that the byte store matches `stride * height` and `stride >= 4 * width`.
    pub fn check_layout(&self) -> RecolorResult<()> {
        let row = (self.width as usize)
            .checked_mul(4)
            .ok_or_else(|| RecolorError::dimension("row size overflows"))?;
        if self.stride < row {
            return Err(RecolorError::dimension(format!(
                "stride {} is smaller than row size {row}",
                self.stride
            )));
        }
        let expected = self
            .stride
            .checked_mul(self.height as usize)
            .ok_or_else(|| RecolorError::dimension("buffer size overflows"))?;
        if self.data.len() != expected {
            return Err(RecolorError::dimension(format!(
                "expected {expected} bytes for {}x{} (stride {}), got {}",
                self.width,
                self.height,
                self.stride,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Coordinates of the first pixel whose color exceeds its alpha, if any.
    pub fn first_invalid_premul(&self) -> Option<(u32, u32)> {
        for y in 0..self.height {
            for (x, px) in self.row(y).chunks_exact(4).enumerate() {
                if !Rgba8Premul::from_bytes(px).is_valid_premul() {
                    return Some((x as u32, y));
                }
            }
        }
        None
    }

    /// Read the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> RecolorResult<Rgba8Premul> {
        let i = self.offset(x, y)?;
        Ok(Rgba8Premul::from_bytes(&self.data[i..i + 4]))
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// Rejects values that violate premultiplication so the invariant holds for
    /// every buffer the crate hands out.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8Premul) -> RecolorResult<()> {
        if !px.is_valid_premul() {
            return Err(RecolorError::validation(format!(
                "pixel {px:?} at ({x}, {y}) has a color channel above its alpha"
            )));
        }
        let i = self.offset(x, y)?;
        self.data[i..i + 4].copy_from_slice(&px.to_bytes());
        Ok(())
    }

    /// Pixel bytes of row `y` (padding excluded). Panics if `y` is out of range.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.stride * y as usize;
        &self.data[start..start + self.width as usize * 4]
    }

    /// Copy pixels into a tightly packed `Vec` (row padding dropped).
    pub fn to_packed_rgba8(&self) -> Vec<u8> {
        if self.stride == self.width as usize * 4 {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// Copy of this buffer with row padding removed.
    pub fn to_packed(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stride: self.width as usize * 4,
            data: self.to_packed_rgba8(),
        }
    }

    /// Consume the buffer, returning tightly packed premultiplied RGBA8 bytes.
    pub fn into_packed_rgba8(self) -> Vec<u8> {
        if self.stride == self.width as usize * 4 {
            self.data
        } else {
            self.to_packed_rgba8()
        }
    }

    /// Tightly packed pixel bytes, mutable. Crate-internal kernels only; callers
    /// must keep every pixel premultiplied.
    pub(crate) fn packed_bytes_mut(&mut self) -> &mut [u8] {
        debug_assert_eq!(self.stride, self.width as usize * 4);
        &mut self.data
    }

    fn offset(&self, x: u32, y: u32) -> RecolorResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(RecolorError::dimension(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        Ok(self.stride * y as usize + x as usize * 4)
    }
}

fn packed_stride(width: u32) -> RecolorResult<usize> {
    (width as usize)
        .checked_mul(4)
        .ok_or_else(|| RecolorError::dimension(format!("width {width} overflows")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
