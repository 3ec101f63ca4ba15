use std::path::Path;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{RecolorError, RecolorResult};
use crate::raster::codec::{PngCodec, RasterCodec};
use crate::raster::svg::{ResvgRasterizer, VectorRasterizer};

/// Input formats the loader dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Raster PNG, decoded directly.
    Png,
    /// Vector SVG, rasterized at a fixed size.
    Svg,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> RecolorResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            Some(other) => Err(RecolorError::unsupported(format!(
                "'{}': extension '.{other}' is not .png or .svg",
                path.display()
            ))),
            None => Err(RecolorError::unsupported(format!(
                "'{}': missing .png or .svg extension",
                path.display()
            ))),
        }
    }
}

/// Load `path` into a premultiplied buffer using the default PNG codec and SVG
/// rasterizer.
///
/// `size` is the SVG viewport; PNGs always load at their native size.
pub fn load_image(path: &Path, size: Option<(u32, u32)>) -> RecolorResult<PixelBuffer> {
    load_image_with(&PngCodec, &ResvgRasterizer::new(), path, size)
}

/// [`load_image`] with explicit collaborators.
#[tracing::instrument(skip(codec, rasterizer))]
pub fn load_image_with(
    codec: &dyn RasterCodec,
    rasterizer: &dyn VectorRasterizer,
    path: &Path,
    size: Option<(u32, u32)>,
) -> RecolorResult<PixelBuffer> {
    match InputFormat::from_path(path)? {
        InputFormat::Png => {
            if let Some((w, h)) = size {
                tracing::debug!(w, h, "ignoring target size for png input");
            }
            let bytes = std::fs::read(path).map_err(|e| {
                RecolorError::decode(format!("read png '{}': {e}", path.display()))
            })?;
            codec.decode(&bytes)
        }
        InputFormat::Svg => {
            tracing::debug!(?size, "rasterizing svg");
            rasterizer.render_fitted(path, size)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/load.rs"]
mod tests;
