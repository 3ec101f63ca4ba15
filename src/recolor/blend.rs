use crate::color::model::Color;
use crate::foundation::math::unit_to_u8;

/// Blend operator used by [`tint_blend`](crate::tint_blend).
///
/// Separable modes combine each channel independently; [`BlendMode::HslColor`]
/// takes hue and saturation from the tint and luminosity from the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// `s * d`. Darkens, keeps shading.
    #[default]
    Multiply,
    /// Multiply or screen depending on the backdrop.
    Overlay,
    /// Gentle dodge/burn driven by the tint.
    SoftLight,
    /// Non-separable "color": tint hue/saturation, image luminosity.
    HslColor,
    /// `s + d - s * d`. Lightens.
    Screen,
    /// Channel-wise minimum.
    Darken,
    /// Channel-wise maximum.
    Lighten,
}

impl BlendMode {
    /// Every supported mode, in declaration order.
    pub const ALL: [BlendMode; 7] = [
        BlendMode::Multiply,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HslColor,
        BlendMode::Screen,
        BlendMode::Darken,
        BlendMode::Lighten,
    ];

    /// Look a mode up by name, case-insensitively, accepting `-` or `_`
    /// separators.
    ///
    /// Unknown names resolve to [`BlendMode::Multiply`]; this lookup never fails.
    pub fn from_name(name: &str) -> Self {
        let norm = name.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "multiply" => Self::Multiply,
            "overlay" => Self::Overlay,
            "soft-light" | "softlight" => Self::SoftLight,
            "hsl-color" | "color" => Self::HslColor,
            "screen" => Self::Screen,
            "darken" => Self::Darken,
            "lighten" => Self::Lighten,
            _ => {
                tracing::debug!(name, "unknown blend mode; using multiply");
                Self::Multiply
            }
        }
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Multiply => "multiply",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HslColor => "hsl-color",
            Self::Screen => "screen",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

type Rgb = [f64; 3];

/// Composite a flat straight `color` over premultiplied, tightly packed RGBA8
/// `dst`, masked by `dst`'s own alpha.
pub(crate) fn composite_masked_color(dst: &mut [u8], color: Color, mode: BlendMode) {
    // Blend mode dispatch happens once per buffer; each branch monomorphizes its kernel.
    match mode {
        BlendMode::Multiply => composite_masked_color_blend(dst, color, separable(|s, d| s * d)),
        BlendMode::Screen => {
            composite_masked_color_blend(dst, color, separable(|s, d| s + d - s * d))
        }
        BlendMode::Overlay => composite_masked_color_blend(
            dst,
            color,
            separable(|s, d| {
                if d <= 0.5 {
                    2.0 * s * d
                } else {
                    1.0 - 2.0 * (1.0 - s) * (1.0 - d)
                }
            }),
        ),
        BlendMode::Darken => composite_masked_color_blend(dst, color, separable(f64::min)),
        BlendMode::Lighten => composite_masked_color_blend(dst, color, separable(f64::max)),
        BlendMode::SoftLight => composite_masked_color_blend(
            dst,
            color,
            separable(|s, d| {
                if s <= 0.5 {
                    d - (1.0 - 2.0 * s) * d * (1.0 - d)
                } else {
                    let g = if d <= 0.25 {
                        ((16.0 * d - 12.0) * d + 4.0) * d
                    } else {
                        d.sqrt()
                    };
                    d + (2.0 * s - 1.0) * (g - d)
                }
            }),
        ),
        BlendMode::HslColor => {
            composite_masked_color_blend(dst, color, |s, d| set_lum(s, lum(d)))
        }
    }
}

fn separable<F>(f: F) -> impl Fn(Rgb, Rgb) -> Rgb
where
    F: Fn(f64, f64) -> f64,
{
    move |s, d| [f(s[0], d[0]), f(s[1], d[1]), f(s[2], d[2])]
}

#[inline(always)]
fn composite_masked_color_blend<F>(dst: &mut [u8], color: Color, blend_fn: F)
where
    F: Fn(Rgb, Rgb) -> Rgb,
{
    let sc = [color.r, color.g, color.b];

    for d in dst.chunks_exact_mut(4) {
        // Source-over with the blend applied to straight channels:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        // where the flat source's coverage is the tint alpha times the mask.
        let da = f64::from(d[3]) / 255.0;
        let sa = color.a * da;
        if sa <= 0.0 {
            continue;
        }

        let dp = [
            f64::from(d[0]) / 255.0,
            f64::from(d[1]) / 255.0,
            f64::from(d[2]) / 255.0,
        ];
        let dc = dp.map(|p| (p / da).clamp(0.0, 1.0));
        let b = blend_fn(sc, dc);

        let out_a = unit_to_u8(sa + da * (1.0 - sa));
        for c in 0..3 {
            let bc = b[c].clamp(0.0, 1.0);
            let out_p = sc[c] * sa * (1.0 - da) + dp[c] * (1.0 - sa) + bc * sa * da;
            d[c] = unit_to_u8(out_p).min(out_a);
        }
        d[3] = out_a;
    }
}

fn lum(c: Rgb) -> f64 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: Rgb) -> Rgb {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

fn set_lum(c: Rgb, l: f64) -> Rgb {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

#[cfg(test)]
#[path = "../../tests/unit/recolor/blend.rs"]
mod tests;
