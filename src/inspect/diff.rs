use crate::foundation::core::{PixelBuffer, Rgba8Premul};
use crate::foundation::error::{RecolorError, RecolorResult};

/// Result of [`compare_buffers`].
#[derive(Clone, Debug)]
pub struct DiffReport {
    /// Pixels where some channel moved by more than the tolerance.
    pub pixels_changed: u64,
    /// Largest per-channel difference seen anywhere, tolerance ignored.
    pub max_channel_delta: u8,
    /// Same size as the inputs: opaque red where changed, transparent elsewhere.
    pub diff: PixelBuffer,
}

impl DiffReport {
    /// `true` when no pixel exceeded the tolerance.
    pub fn is_identical(&self) -> bool {
        self.pixels_changed == 0
    }
}

/// Compare two premultiplied buffers pixel by pixel.
///
/// A pixel counts as changed when any of its four channels differs by more
/// than `tolerance`. Buffers of different sizes are a
/// [`RecolorError::DimensionMismatch`]; strides may differ.
pub fn compare_buffers(
    a: &PixelBuffer,
    b: &PixelBuffer,
    tolerance: u8,
) -> RecolorResult<DiffReport> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(RecolorError::dimension(format!(
            "cannot compare {}x{} with {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    let mut diff = PixelBuffer::new_transparent(a.width(), a.height())?;
    let marker = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let mut pixels_changed = 0u64;
    let mut max_channel_delta = 0u8;

    for y in 0..a.height() {
        let rows = a.row(y).chunks_exact(4).zip(b.row(y).chunks_exact(4));
        for (x, (pa, pb)) in rows.enumerate() {
            let delta = pa
                .iter()
                .zip(pb)
                .map(|(ca, cb)| ca.abs_diff(*cb))
                .max()
                .unwrap_or(0);
            max_channel_delta = max_channel_delta.max(delta);
            if delta > tolerance {
                pixels_changed += 1;
                diff.set_pixel(x as u32, y, marker)?;
            }
        }
    }

    tracing::debug!(pixels_changed, max_channel_delta, "compared buffers");
    Ok(DiffReport {
        pixels_changed,
        max_channel_delta,
        diff,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/inspect/diff.rs"]
mod tests;
