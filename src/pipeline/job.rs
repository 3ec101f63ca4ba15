use std::path::PathBuf;

use crate::foundation::error::{RecolorError, RecolorResult};
use crate::output::writer::write_atomic;
use crate::raster::load::load_image;
use crate::recolor::ops::Transform;

/// One load -> transform -> write invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RecolorJob {
    /// `.png` or `.svg` input.
    pub input: PathBuf,
    /// PNG output, replaced atomically.
    pub output: PathBuf,
    /// Recoloring step to apply.
    pub transform: Transform,
    /// SVG viewport `(width, height)`; `None` uses the document's own size.
    pub size: Option<(u32, u32)>,
}

impl RecolorJob {
    /// Reject sizes the rasterizer can never honor.
    pub fn validate(&self) -> RecolorResult<()> {
        if let Some((w, h)) = self.size
            && (w == 0 || h == 0)
        {
            return Err(RecolorError::validation(format!(
                "job '{}': width and height must be > 0 (got {w}x{h})",
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Run `job` to completion. Stages run strictly in order and each hands its
/// buffer to the next; nothing is retried.
#[tracing::instrument(skip(job), fields(input = %job.input.display(), output = %job.output.display()))]
pub fn run_job(job: &RecolorJob) -> RecolorResult<()> {
    job.validate()?;
    let src = load_image(&job.input, job.size)?;
    let out = job.transform.apply(&src)?;
    write_atomic(&out, &job.output)?;
    tracing::info!(width = out.width(), height = out.height(), "recolored");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
