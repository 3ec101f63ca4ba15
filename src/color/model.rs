use crate::foundation::error::{RecolorError, RecolorResult};
use crate::foundation::math::unit_to_u8;

/// Straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha (coverage); `1.0` is opaque.
    pub a: f64,
}

impl Color {
    /// Build a color, clamping every component into `[0, 1]`.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Quantize to straight RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        ]
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when the color is not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl std::str::FromStr for Color {
    type Err = RecolorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// Parse `#RRGGBB` (opaque) or `#RRGGBBAA`.
///
/// Anything else (wrong length, missing `#`, a non-hex digit) is rejected with
/// [`RecolorError::InvalidColorFormat`].
pub fn parse_hex_color(text: &str) -> RecolorResult<Color> {
    let digits = text
        .strip_prefix('#')
        .ok_or_else(|| RecolorError::invalid_color(format!("'{text}' must start with '#'")))?;
    if digits.len() != 6 && digits.len() != 8 {
        return Err(RecolorError::invalid_color(format!(
            "'{text}' must have 6 or 8 hex digits"
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RecolorError::invalid_color(format!(
            "'{text}' contains a non-hex digit"
        )));
    }

    let byte = |i: usize| -> RecolorResult<f64> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| f64::from(v) / 255.0)
            .map_err(|e| RecolorError::invalid_color(format!("'{text}': {e}")))
    };

    let a = if digits.len() == 8 { byte(6)? } else { 1.0 };
    Ok(Color {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a,
    })
}

/// Wrap any finite angle into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-18 % 360 + 360 rounds to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// HSV to RGB. `h` must already be in `[0, 360)`; `s` and `v` in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    (r + m, g + m, b + m)
}

/// RGB to HSV with hue in `[0, 360)`. Greys (`r == g == b`) get hue 0.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let v = max;
    let s = if max == 0.0 { 0.0 } else { d / max };
    if d == 0.0 {
        return (0.0, s, v);
    }

    let h = if max == r {
        60.0 * (((g - b) / d) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };
    (normalize_hue(h), s, v)
}

#[cfg(test)]
#[path = "../../tests/unit/color/model.rs"]
mod tests;
