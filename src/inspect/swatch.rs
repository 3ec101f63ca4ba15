use crate::color::model::Color;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::RecolorResult;
use crate::raster::svg::{ResvgRasterizer, VectorRasterizer};

/// Default swatch card size.
pub const DEFAULT_SWATCH_SIZE: (u32, u32) = (800, 300);

const CORNER_RADIUS: f64 = 24.0;
const BAR_INSET: f64 = 20.0;
const BAR_HEIGHT: f64 = 40.0;
const BAR_OPACITY: f64 = 0.92;

/// Render a rounded color card with a translucent white bar across the middle.
///
/// Handy for previewing what [`color_from_key`](crate::color_from_key) assigns
/// to a label.
pub fn render_swatch(color: Color, width: u32, height: u32) -> RecolorResult<PixelBuffer> {
    render_swatch_with(&ResvgRasterizer::without_system_fonts(), color, width, height)
}

/// [`render_swatch`] with an explicit rasterizer.
pub fn render_swatch_with(
    rasterizer: &dyn VectorRasterizer,
    color: Color,
    width: u32,
    height: u32,
) -> RecolorResult<PixelBuffer> {
    let svg = swatch_svg(color, width, height);
    rasterizer.render_data(svg.as_bytes(), width, height)
}

fn swatch_svg(color: Color, width: u32, height: u32) -> String {
    let (w, h) = (f64::from(width), f64::from(height));
    let radius = CORNER_RADIUS.min(w / 2.0).min(h / 2.0);
    let [r, g, b, _] = color.to_rgba8();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push_str(&format!(
        r##"<rect width="{w}" height="{h}" rx="{radius}" ry="{radius}" fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{a}"/>"##,
        a = color.a
    ));
    let bar_w = w - 2.0 * BAR_INSET;
    if bar_w > 0.0 {
        let bar_y = (h / 2.0).floor() - BAR_HEIGHT / 2.0;
        svg.push_str(&format!(
            r##"<rect x="{BAR_INSET}" y="{bar_y}" width="{bar_w}" height="{BAR_HEIGHT}" fill="#ffffff" fill-opacity="{BAR_OPACITY}"/>"##
        ));
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
#[path = "../../tests/unit/inspect/swatch.rs"]
mod tests;
