use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{RecolorError, RecolorResult};
use crate::raster::codec::{PngCodec, RasterCodec};

/// Encode `buf` as PNG and atomically replace `path` with it.
pub fn write_atomic(buf: &PixelBuffer, path: &Path) -> RecolorResult<()> {
    write_atomic_with(&PngCodec, buf, path)
}

/// [`write_atomic`] with an explicit codec.
///
/// The image is fully encoded in memory before the filesystem is touched, so an
/// encode failure leaves `path` (or its absence) exactly as it was and creates
/// no temporary file. The bytes then go to `<path>.tmp`, are synced, and the
/// temp file is renamed over `path`; readers see either the old or the new file.
///
/// If the final rename fails the temp file is left in place and its location is
/// reported in the [`RecolorError::Write`] message. Cleaning it up is the
/// caller's call.
#[tracing::instrument(skip(codec, buf), fields(width = buf.width(), height = buf.height()))]
pub fn write_atomic_with(
    codec: &dyn RasterCodec,
    buf: &PixelBuffer,
    path: &Path,
) -> RecolorResult<()> {
    let bytes = codec.encode(buf).map_err(|e| match e {
        RecolorError::Write(_) => e,
        other => RecolorError::write(format!("encode '{}': {other}", path.display())),
    })?;

    ensure_parent_dir(path)?;

    let tmp = temp_path_for(path);
    tracing::debug!(tmp = %tmp.display(), bytes = bytes.len(), "writing temp file");
    let mut guard = TempFileGuard(Some(tmp.clone()));
    write_synced(&tmp, &bytes)
        .map_err(|e| RecolorError::write(format!("write '{}': {e}", tmp.display())))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        guard.disarm();
        return Err(RecolorError::write(format!(
            "rename '{}' -> '{}': {e} (temp file left at '{}')",
            tmp.display(),
            path.display(),
            tmp.display()
        )));
    }
    guard.disarm();
    Ok(())
}

/// Sibling temp path used while writing `path`: `out.png` -> `out.png.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Create `path`'s parent directory if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> RecolorResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            RecolorError::write(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = std::fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Removes the temp file on drop unless disarmed.
struct TempFileGuard(Option<PathBuf>);

impl TempFileGuard {
    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/writer.rs"]
mod tests;
