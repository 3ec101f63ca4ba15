use super::*;

#[test]
fn names_resolve_leniently() {
    for mode in BlendMode::ALL {
        assert_eq!(BlendMode::from_name(mode.name()), mode);
        assert_eq!(BlendMode::from_name(&mode.name().to_uppercase()), mode);
    }
    assert_eq!(BlendMode::from_name("soft_light"), BlendMode::SoftLight);
    assert_eq!(BlendMode::from_name("color"), BlendMode::HslColor);
    assert_eq!(BlendMode::from_name(" screen "), BlendMode::Screen);
}

#[test]
fn unknown_names_fall_back_to_multiply() {
    for name in ["", "normal", "hard-light", "mulitply", "🎨"] {
        assert_eq!(BlendMode::from_name(name), BlendMode::Multiply, "{name}");
    }
    assert_eq!(BlendMode::default(), BlendMode::Multiply);
}

#[test]
fn transparent_pixels_are_untouched_for_every_mode() {
    for mode in BlendMode::ALL {
        let mut px = [0u8, 0, 0, 0];
        composite_masked_color(&mut px, Color::rgb(1.0, 0.5, 0.0), mode);
        assert_eq!(px, [0, 0, 0, 0], "{mode}");
    }
}

#[test]
fn opaque_pixels_keep_alpha_and_validity() {
    for mode in BlendMode::ALL {
        let mut px = [200u8, 120, 40, 255, 10, 10, 10, 255];
        composite_masked_color(&mut px, Color::rgb(0.9, 0.25, 0.2), mode);
        assert_eq!(px[3], 255, "{mode}");
        assert_eq!(px[7], 255, "{mode}");
    }
}

#[test]
fn multiply_white_backdrop_yields_tint() {
    let mut px = [255u8, 255, 255, 255];
    composite_masked_color(&mut px, Color::rgb(0.9, 0.25, 0.2), BlendMode::Multiply);
    assert_eq!(px, [230, 64, 51, 255]);
}

#[test]
fn screen_black_backdrop_yields_tint() {
    let mut px = [0u8, 0, 0, 255];
    composite_masked_color(&mut px, Color::rgb(0.2, 0.55, 0.9), BlendMode::Screen);
    assert_eq!(px, [51, 140, 230, 255]);
}

#[test]
fn darken_and_lighten_pick_channel_extremes() {
    let mut dark = [128u8, 128, 128, 255];
    composite_masked_color(&mut dark, Color::rgb(1.0, 0.0, 1.0), BlendMode::Darken);
    assert_eq!(dark, [128, 0, 128, 255]);

    let mut light = [128u8, 128, 128, 255];
    composite_masked_color(&mut light, Color::rgb(1.0, 0.0, 1.0), BlendMode::Lighten);
    assert_eq!(light, [255, 128, 255, 255]);
}

#[test]
fn hsl_color_keeps_backdrop_luminosity() {
    let mut px = [128u8, 128, 128, 255];
    composite_masked_color(&mut px, Color::rgb(1.0, 0.0, 0.0), BlendMode::HslColor);
    let out = [px[0], px[1], px[2]].map(|v| f64::from(v) / 255.0);
    let backdrop = 128.0 / 255.0;
    assert!((lum(out) - backdrop).abs() < 0.01, "{px:?}");
    assert!(px[0] > px[1] && px[1] == px[2], "{px:?}");
}

#[test]
fn partial_mask_scales_tint_coverage() {
    // Half-covered white pixel, opaque red tint, multiply.
    let mut px = [128u8, 128, 128, 128];
    composite_masked_color(&mut px, Color::rgb(1.0, 0.0, 0.0), BlendMode::Multiply);
    let m: f64 = 128.0 / 255.0;
    let expected_a = m + m * (1.0 - m);
    assert_eq!(px[3], (expected_a * 255.0).round() as u8);
    assert!(px[1] < 128 && px[2] < 128, "{px:?}");
    for c in 0..3 {
        assert!(px[c] <= px[3]);
    }
}

#[test]
fn translucent_tint_blends_less() {
    let mut strong = [255u8, 255, 255, 255];
    composite_masked_color(&mut strong, Color::rgb(0.0, 0.0, 0.0), BlendMode::Multiply);
    let mut weak = [255u8, 255, 255, 255];
    composite_masked_color(
        &mut weak,
        Color::new(0.0, 0.0, 0.0, 0.5),
        BlendMode::Multiply,
    );
    assert_eq!(strong, [0, 0, 0, 255]);
    assert_eq!(weak, [128, 128, 128, 255]);
}

#[test]
fn clip_color_keeps_channels_in_range() {
    let c = set_lum([1.0, 0.0, 0.0], 0.9);
    for v in c {
        assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{c:?}");
    }
    assert!((lum(c) - 0.9).abs() < 1e-9);
}
