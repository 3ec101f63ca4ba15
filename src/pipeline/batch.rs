use std::path::PathBuf;

use rayon::prelude::*;

use crate::foundation::error::{RecolorError, RecolorResult};
use crate::pipeline::job::{RecolorJob, run_job};

/// Outcome of [`run_batch`], in job order.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Outputs that were written.
    pub succeeded: Vec<PathBuf>,
    /// `(input, error message)` for every job that failed.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// `true` when every job succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run independent jobs in parallel.
///
/// Each job owns its buffers end to end, so images are processed concurrently
/// while every single job stays sequential. A failing job does not stop the
/// others; its error lands in [`BatchReport::failed`].
#[tracing::instrument(skip(jobs), fields(jobs = jobs.len()))]
pub fn run_batch(jobs: &[RecolorJob], threads: Option<usize>) -> RecolorResult<BatchReport> {
    let pool = build_thread_pool(threads)?;
    let results = pool.install(|| {
        jobs.par_iter()
            .map(|job| (job, run_job(job)))
            .collect::<Vec<_>>()
    });

    let mut report = BatchReport::default();
    for (job, result) in results {
        match result {
            Ok(()) => report.succeeded.push(job.output.clone()),
            Err(e) => {
                tracing::warn!(input = %job.input.display(), error = %e, "job failed");
                report.failed.push((job.input.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> RecolorResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RecolorError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RecolorError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
