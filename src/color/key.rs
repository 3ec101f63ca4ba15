use crate::color::model::{Color, hsv_to_rgb, parse_hex_color};
use crate::foundation::math::Fnv1a64;

const KEY_VALUE: f64 = 0.85;
const KEY_SAT_BASE: f64 = 0.62;
const KEY_SAT_SPAN: f64 = 0.25;

/// Turn any string into a color.
///
/// Valid hex strings (`#RRGGBB`, `#RRGGBBAA`) are honored as-is. Any other key
/// is hashed (FNV-1a 64 over its UTF-8 bytes) onto the hue wheel with a bright,
/// fairly saturated value, so the same key always maps to the same opaque color
/// and distinct keys spread over the full hue range.
pub fn color_from_key(key: &str) -> Color {
    if let Ok(c) = parse_hex_color(key) {
        return c;
    }

    let hash = key_hash(key);
    let hue = (hash % 360) as f64;
    let sat = KEY_SAT_BASE + ((hash >> 9) & 0x3F) as f64 / 255.0 * KEY_SAT_SPAN;
    let (r, g, b) = hsv_to_rgb(hue, sat, KEY_VALUE);
    Color::rgb(r, g, b)
}

fn key_hash(key: &str) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(key.as_bytes());
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/color/key.rs"]
mod tests;
