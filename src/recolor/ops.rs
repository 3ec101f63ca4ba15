use crate::color::model::{Color, hsv_to_rgb, normalize_hue, rgb_to_hsv};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{RecolorError, RecolorResult};
use crate::foundation::math::unit_to_u8;
use crate::recolor::blend::{BlendMode, composite_masked_color};

/// A single recoloring step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// [`tint_blend`] with the given color and operator.
    Tint {
        /// Tint color.
        color: Color,
        /// Blend operator.
        mode: BlendMode,
    },
    /// [`recolor_flat`] with the given fill.
    Flat {
        /// Fill color.
        color: Color,
    },
    /// [`hue_shift`] by the given angle.
    HueShift {
        /// Hue rotation in degrees; any sign or magnitude.
        degrees: f64,
    },
}

impl Transform {
    /// Apply this transform, returning a new buffer of the same size.
    pub fn apply(&self, buf: &PixelBuffer) -> RecolorResult<PixelBuffer> {
        match *self {
            Self::Tint { color, mode } => tint_blend(buf, color, mode),
            Self::Flat { color } => recolor_flat(buf, color),
            Self::HueShift { degrees } => hue_shift(buf, degrees),
        }
    }
}

/// Tint `buf` with `color` using `mode`, masked by `buf`'s own alpha.
///
/// The source is copied verbatim and the flat color is composited over it with
/// the chosen operator; coverage at each pixel is `color.a` times the source
/// alpha, so fully transparent pixels stay transparent and anti-aliased edges
/// receive a proportional tint. Shading structure is preserved while the hue
/// changes.
#[tracing::instrument(skip(buf), fields(width = buf.width(), height = buf.height()))]
pub fn tint_blend(buf: &PixelBuffer, color: Color, mode: BlendMode) -> RecolorResult<PixelBuffer> {
    buf.check_layout()?;
    let mut out = buf.to_packed();
    composite_masked_color(out.packed_bytes_mut(), color, mode);
    Ok(out)
}

/// Discard the color of `buf` and paint `color` through its alpha channel.
///
/// Output alpha is `color.a * src_alpha`; color channels are the straight
/// `color` scaled by that alpha. An opaque `color` therefore reproduces the
/// source alpha exactly, giving a silhouette fill.
#[tracing::instrument(skip(buf), fields(width = buf.width(), height = buf.height()))]
pub fn recolor_flat(buf: &PixelBuffer, color: Color) -> RecolorResult<PixelBuffer> {
    buf.check_layout()?;
    let color = Color::new(color.r, color.g, color.b, color.a);
    let mut out = buf.to_packed();
    for px in out.packed_bytes_mut().chunks_exact_mut(4) {
        let a = unit_to_u8(color.a * f64::from(px[3]) / 255.0);
        let af = f64::from(a);
        px[0] = ((color.r * af).round() as u8).min(a);
        px[1] = ((color.g * af).round() as u8).min(a);
        px[2] = ((color.b * af).round() as u8).min(a);
        px[3] = a;
    }
    Ok(out)
}

/// Rotate the hue of every visible pixel by `degrees`.
///
/// Each pixel with nonzero alpha is un-premultiplied, rotated in HSV space,
/// clamped, re-premultiplied and rounded to the nearest byte. Alpha is never
/// changed and fully transparent pixels are skipped, so `0` and `360` are both
/// identities.
#[tracing::instrument(skip(buf), fields(width = buf.width(), height = buf.height()))]
pub fn hue_shift(buf: &PixelBuffer, degrees: f64) -> RecolorResult<PixelBuffer> {
    if !degrees.is_finite() {
        return Err(RecolorError::validation(format!(
            "hue shift must be finite (got {degrees})"
        )));
    }
    buf.check_layout()?;
    let delta = normalize_hue(degrees);
    let mut out = buf.to_packed();
    for px in out.packed_bytes_mut().chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        let a = f64::from(px[3]) / 255.0;
        let r = f64::from(px[0]) / 255.0 / a;
        let g = f64::from(px[1]) / 255.0 / a;
        let b = f64::from(px[2]) / 255.0 / a;

        let (h, s, v) = rgb_to_hsv(r, g, b);
        let h = normalize_hue(h + delta + 360.0);
        let (r, g, b) = hsv_to_rgb(h, s, v);

        px[0] = unit_to_u8(r.clamp(0.0, 1.0) * a);
        px[1] = unit_to_u8(g.clamp(0.0, 1.0) * a);
        px[2] = unit_to_u8(b.clamp(0.0, 1.0) * a);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/recolor/ops.rs"]
mod tests;
