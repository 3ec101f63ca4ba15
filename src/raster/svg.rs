use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Context;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{RecolorError, RecolorResult};

/// Largest raster edge the rasterizer will allocate.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Viewport used for SVGs that report no usable intrinsic size.
pub const DEFAULT_SVG_SIZE: (u32, u32) = (800, 600);

/// Vector-document collaborator that turns a document into premultiplied pixels.
pub trait VectorRasterizer {
    /// Intrinsic `(width, height)` the document declares, before any scaling.
    ///
    /// A document whose declared size is zero or negative reports `(0.0, 0.0)`.
    fn intrinsic_size(&self, path: &Path) -> RecolorResult<(f32, f32)>;

    /// Render the whole document fitted to a `width` x `height` viewport.
    fn render(&self, path: &Path, width: u32, height: u32) -> RecolorResult<PixelBuffer>;

    /// Render an in-memory document fitted to a `width` x `height` viewport.
    fn render_data(&self, svg: &[u8], width: u32, height: u32) -> RecolorResult<PixelBuffer>;

    /// Render at `size`, or at [`svg_viewport`] of the intrinsic size when `None`.
    fn render_fitted(&self, path: &Path, size: Option<(u32, u32)>) -> RecolorResult<PixelBuffer> {
        let (w, h) = match size {
            Some(s) => s,
            None => svg_viewport(self.intrinsic_size(path)?),
        };
        self.render(path, w, h)
    }
}

/// Round an intrinsic document size up to whole pixels, falling back to
/// [`DEFAULT_SVG_SIZE`] when either axis is zero, negative or not finite.
pub fn svg_viewport((w, h): (f32, f32)) -> (u32, u32) {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(w) || !usable(h) {
        tracing::debug!(w, h, "svg has no usable intrinsic size; using default viewport");
        return DEFAULT_SVG_SIZE;
    }
    ((w.ceil() as u32).max(1), (h.ceil() as u32).max(1))
}

/// SVG rasterizer backed by `usvg` (parsing) and `resvg` (rendering).
///
/// Text is shaped with fonts from the system database (unless disabled) plus any
/// `.ttf`/`.otf`/`.ttc` files next to the document or in a sibling `fonts/`
/// directory. The system database is loaded once per process and shared.
#[derive(Clone, Debug)]
pub struct ResvgRasterizer {
    system_fonts: bool,
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResvgRasterizer {
    /// Rasterizer that loads system fonts for SVG text.
    pub fn new() -> Self {
        Self { system_fonts: true }
    }

    /// Rasterizer that only sees fonts shipped next to the document.
    pub fn without_system_fonts() -> Self {
        Self {
            system_fonts: false,
        }
    }

    fn parse_tree(
        &self,
        bytes: &[u8],
        resources_dir: Option<&Path>,
        default_size: (u32, u32),
    ) -> Result<usvg::Tree, usvg::Error> {
        let mut opts = usvg::Options {
            resources_dir: resources_dir.map(Path::to_path_buf),
            fontdb: self.build_fontdb(resources_dir),
            ..Default::default()
        };
        if let Some(size) = usvg::Size::from_wh(default_size.0 as f32, default_size.1 as f32) {
            opts.default_size = size;
        }
        usvg::Tree::from_data(bytes, &opts)
    }

    /// Parse for a known viewport. A root element with an unusable
    /// `width`/`height` is parsed again with those attributes dropped, so the
    /// document falls back to its `viewBox` or to `viewport`.
    fn parse_for_viewport(
        &self,
        bytes: &[u8],
        resources_dir: Option<&Path>,
        viewport: (u32, u32),
    ) -> RecolorResult<usvg::Tree> {
        match self.parse_tree(bytes, resources_dir, viewport) {
            Err(usvg::Error::InvalidSize) => {
                let stripped = strip_root_size(bytes)
                    .ok_or_else(|| RecolorError::render("parse svg: SVG has an invalid size"))?;
                tracing::debug!(?viewport, "svg root size unusable; dropping width/height");
                self.parse_tree(stripped.as_bytes(), resources_dir, viewport)
                    .map_err(parse_error)
            }
            other => other.map_err(parse_error),
        }
    }

    fn build_fontdb(&self, resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
        let base = if self.system_fonts {
            system_fontdb()
        } else {
            empty_fontdb()
        };
        let local: Vec<PathBuf> = resources_dir
            .map(|dir| {
                let mut files = font_files_in(dir);
                files.extend(font_files_in(&dir.join("fonts")));
                files
            })
            .unwrap_or_default();
        if local.is_empty() {
            return base;
        }

        let mut db = (*base).clone();
        for path in local {
            if let Err(e) = db.load_font_file(&path) {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
            }
        }
        Arc::new(db)
    }
}

impl VectorRasterizer for ResvgRasterizer {
    fn intrinsic_size(&self, path: &Path) -> RecolorResult<(f32, f32)> {
        let bytes = read_svg(path)?;
        match self.parse_tree(&bytes, path.parent(), DEFAULT_SVG_SIZE) {
            Ok(tree) => {
                let size = tree.size();
                Ok((size.width(), size.height()))
            }
            Err(usvg::Error::InvalidSize) => Ok((0.0, 0.0)),
            Err(e) => Err(parse_error(e)),
        }
    }

    #[tracing::instrument(skip(self))]
    fn render(&self, path: &Path, width: u32, height: u32) -> RecolorResult<PixelBuffer> {
        let bytes = read_svg(path)?;
        let tree = self.parse_for_viewport(&bytes, path.parent(), (width, height))?;
        rasterize_tree(&tree, width, height)
    }

    fn render_data(&self, svg: &[u8], width: u32, height: u32) -> RecolorResult<PixelBuffer> {
        let tree = self.parse_for_viewport(svg, None, (width, height))?;
        rasterize_tree(&tree, width, height)
    }

    #[tracing::instrument(skip(self))]
    fn render_fitted(&self, path: &Path, size: Option<(u32, u32)>) -> RecolorResult<PixelBuffer> {
        let bytes = read_svg(path)?;
        let dir = path.parent();
        if let Some((w, h)) = size {
            let tree = self.parse_for_viewport(&bytes, dir, (w, h))?;
            return rasterize_tree(&tree, w, h);
        }

        // One parse serves both the intrinsic size and the render.
        let (tree, (w, h)) = match self.parse_tree(&bytes, dir, DEFAULT_SVG_SIZE) {
            Ok(tree) => {
                let size = tree.size();
                let viewport = svg_viewport((size.width(), size.height()));
                (tree, viewport)
            }
            Err(usvg::Error::InvalidSize) => {
                let viewport = svg_viewport((0.0, 0.0));
                (self.parse_for_viewport(&bytes, dir, viewport)?, viewport)
            }
            Err(e) => return Err(parse_error(e)),
        };
        rasterize_tree(&tree, w, h)
    }
}

fn parse_error(e: usvg::Error) -> RecolorError {
    RecolorError::render(format!("parse svg: {e}"))
}

fn read_svg(path: &Path) -> RecolorResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read svg '{}'", path.display()))
        .map_err(|e| RecolorError::render(format!("{e:#}")))
}

fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

fn empty_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| Arc::new(usvg::fontdb::Database::new()))
        .clone()
}

fn rasterize_tree(tree: &usvg::Tree, width: u32, height: u32) -> RecolorResult<PixelBuffer> {
    if width == 0 || height == 0 || width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
        return Err(RecolorError::render(format!(
            "svg raster size {width}x{height} outside 1..={MAX_RASTER_DIM}"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RecolorError::render("failed to allocate svg pixmap"))?;

    let size = tree.size();
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    PixelBuffer::from_premul_rgba8(width, height, pixmap.take())
        .map_err(|e| RecolorError::render(format!("rasterized svg: {e}")))
}

fn font_files_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext == "ttf" || ext == "otf" || ext == "ttc" {
            out.push(path);
        }
    }
    out.sort();
    out
}

/// Copy of `svg` with the root element's `width` and `height` attributes
/// removed, or `None` when the document is not UTF-8, has no parsable root tag,
/// or declares neither attribute.
fn strip_root_size(svg: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(svg).ok()?;
    let bytes = text.as_bytes();
    let mut i = root_svg_attrs_start(text)?;

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..i]);
    let mut removed = false;
    loop {
        let attr_start = i;
        while bytes.get(i)?.is_ascii_whitespace() {
            i += 1;
        }
        if matches!(bytes[i], b'>' | b'/') {
            out.push_str(&text[attr_start..]);
            break;
        }

        let name_start = i;
        while !matches!(*bytes.get(i)?, b'=' | b'>' | b'/') && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name = &text[name_start..i];

        while bytes.get(i)?.is_ascii_whitespace() {
            i += 1;
        }
        if bytes[i] == b'=' {
            i += 1;
            while bytes.get(i)?.is_ascii_whitespace() {
                i += 1;
            }
            let quote = *bytes.get(i)?;
            if quote != b'"' && quote != b'\'' {
                return None;
            }
            let len = text[i + 1..].find(char::from(quote))?;
            i += len + 2;
        }

        if name == "width" || name == "height" {
            removed = true;
        } else {
            out.push_str(&text[attr_start..i]);
        }
    }
    removed.then_some(out)
}

/// Byte offset just past `<svg` of the first `svg` start tag.
fn root_svg_attrs_start(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = text[from..].find("<svg") {
        let after = from + pos + "<svg".len();
        match text.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(after),
            _ => from = after,
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/raster/svg.rs"]
mod tests;
