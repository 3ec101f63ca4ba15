use super::*;
use crate::color::model::rgb_to_hsv;

#[test]
fn hex_keys_defer_to_parser() {
    assert_eq!(
        color_from_key("#6A5ACD"),
        parse_hex_color("#6A5ACD").unwrap()
    );
    assert_eq!(
        color_from_key("#10203040"),
        parse_hex_color("#10203040").unwrap()
    );
}

#[test]
fn same_key_is_bit_identical() {
    for key in ["Nerofea", "", "ünïcødé", "#nothex"] {
        let a = color_from_key(key);
        let b = color_from_key(key);
        assert_eq!(a.r.to_bits(), b.r.to_bits());
        assert_eq!(a.g.to_bits(), b.g.to_bits());
        assert_eq!(a.b.to_bits(), b.b.to_bits());
        assert_eq!(a.a, 1.0);
    }
}

#[test]
fn hashed_colors_stay_in_documented_ranges() {
    for key in ["a", "b", "alpha", "beta", "gamma", "status:ok", "status:error"] {
        let c = color_from_key(key);
        let (h, s, v) = rgb_to_hsv(c.r, c.g, c.b);
        assert!((0.0..360.0).contains(&h));
        assert!((0.619..=0.682).contains(&s), "{key}: s={s}");
        assert!((v - 0.85).abs() < 1e-9, "{key}: v={v}");
        assert_eq!(h.round(), (key_hash(key) % 360) as f64, "{key}");
    }
}

#[test]
fn distinct_keys_get_distinct_hues() {
    let keys = ["a", "b", "c", "red", "green", "blue", "Nerofea", "BTC", "ETH"];
    let hues: Vec<u64> = keys.iter().map(|k| key_hash(k) % 360).collect();
    for i in 0..hues.len() {
        for j in (i + 1)..hues.len() {
            assert_ne!(hues[i], hues[j], "{} vs {}", keys[i], keys[j]);
        }
    }
}
