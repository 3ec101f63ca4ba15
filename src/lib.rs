//! `recolor` recolors icons and overlays without redrawing them.
//!
//! A PNG or SVG is turned into a premultiplied RGBA8 [`PixelBuffer`], one
//! [`Transform`] is applied, and the result is written back as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `path -> PixelBuffer` via [`load_image`] (PNG decode through `image`,
//!    SVG rasterization through `usvg`/`resvg`)
//! 2. **Transform**: `PixelBuffer -> PixelBuffer` via [`tint_blend`], [`recolor_flat`]
//!    or [`hue_shift`]
//! 3. **Write**: `PixelBuffer -> file` via [`write_atomic`] (temp file + rename)
//!
//! [`run_job`] chains the three for one image; [`run_batch`] runs many
//! independent jobs in parallel.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: every buffer keeps color <= alpha, and
//!   transforms that need straight color un-premultiply and re-premultiply
//!   around their math.
//! - **Strict colors, lenient modes**: malformed hex colors are errors, unknown
//!   blend-mode names quietly mean multiply.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod foundation;
mod inspect;
mod output;
mod pipeline;
mod raster;
mod recolor;

pub use color::key::color_from_key;
pub use color::model::{Color, hsv_to_rgb, normalize_hue, parse_hex_color, rgb_to_hsv};
pub use foundation::core::{PixelBuffer, Rgba8Premul};
pub use foundation::error::{RecolorError, RecolorResult};
pub use inspect::diff::{DiffReport, compare_buffers};
pub use inspect::swatch::{DEFAULT_SWATCH_SIZE, render_swatch, render_swatch_with};
pub use output::writer::{ensure_parent_dir, temp_path_for, write_atomic, write_atomic_with};
pub use pipeline::batch::{BatchReport, run_batch};
pub use pipeline::job::{RecolorJob, run_job};
pub use pipeline::manifest::Manifest;
pub use raster::codec::{PngCodec, RasterCodec};
pub use raster::load::{InputFormat, load_image, load_image_with};
pub use raster::svg::{
    DEFAULT_SVG_SIZE, MAX_RASTER_DIM, ResvgRasterizer, VectorRasterizer, svg_viewport,
};
pub use recolor::blend::BlendMode;
pub use recolor::ops::{Transform, hue_shift, recolor_flat, tint_blend};
