use super::*;

#[test]
fn display_prefixes_are_stable() {
    let cases = [
        (RecolorError::invalid_color("x"), "invalid color format:"),
        (RecolorError::unsupported("x"), "unsupported format:"),
        (RecolorError::decode("x"), "decode error:"),
        (RecolorError::render("x"), "render error:"),
        (RecolorError::write("x"), "write error:"),
        (RecolorError::dimension("x"), "dimension mismatch:"),
        (RecolorError::validation("x"), "validation error:"),
    ];
    for (err, prefix) in cases {
        assert!(err.to_string().starts_with(prefix), "{err}");
    }
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RecolorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
