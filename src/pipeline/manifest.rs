use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::color::key::color_from_key;
use crate::color::model::{Color, parse_hex_color};
use crate::foundation::error::{RecolorError, RecolorResult};
use crate::pipeline::job::RecolorJob;
use crate::recolor::blend::BlendMode;
use crate::recolor::ops::Transform;

/// A batch of jobs read from JSON.
///
/// ```json
/// {
///   "threads": 4,
///   "jobs": [
///     { "input": "icons/play.svg", "output": "out/play.png", "width": 64, "height": 64,
///       "transform": { "tint": { "color": "#e0403a", "mode": "overlay" } } },
///     { "input": "icons/stop.png", "output": "out/stop.png",
///       "transform": { "flat": { "color": "status:error" } } },
///     { "input": "icons/rec.png", "output": "out/rec.png",
///       "transform": { "hue_shift": { "degrees": 40 } } }
///   ]
/// }
/// ```
///
/// Colors accept hex or any key (see [`color_from_key`]), but a value starting
/// with `#` must be valid hex. Mode names resolve leniently through
/// [`BlendMode::from_name`]. Relative paths resolve against the manifest's
/// directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    /// Worker threads for [`run_batch`](crate::run_batch); `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Jobs in manifest order.
    pub jobs: Vec<RecolorJob>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDef {
    #[serde(default)]
    threads: Option<usize>,
    jobs: Vec<JobDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobDef {
    input: PathBuf,
    output: PathBuf,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    transform: TransformDef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
enum TransformDef {
    Tint {
        color: String,
        #[serde(default)]
        mode: Option<String>,
    },
    Flat {
        color: String,
    },
    HueShift {
        degrees: f64,
    },
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> RecolorResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&text, base)
    }

    /// Parse manifest JSON, resolving relative paths against `base_dir`.
    pub fn from_json_str(text: &str, base_dir: &Path) -> RecolorResult<Self> {
        let def: ManifestDef = serde_json::from_str(text)
            .map_err(|e| RecolorError::validation(format!("manifest json: {e}")))?;
        if def.threads == Some(0) {
            return Err(RecolorError::validation(
                "manifest 'threads' must be >= 1 when set",
            ));
        }

        let jobs = def
            .jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| job.into_job(i, base_dir))
            .collect::<RecolorResult<Vec<_>>>()?;
        Ok(Self {
            threads: def.threads,
            jobs,
        })
    }
}

impl JobDef {
    fn into_job(self, index: usize, base_dir: &Path) -> RecolorResult<RecolorJob> {
        let size = match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w, h)),
            (None, None) => None,
            _ => {
                return Err(RecolorError::validation(format!(
                    "job {index}: 'width' and 'height' must be given together"
                )));
            }
        };
        let transform = match self.transform {
            TransformDef::Tint { color, mode } => Transform::Tint {
                color: manifest_color(index, &color)?,
                mode: mode.as_deref().map(BlendMode::from_name).unwrap_or_default(),
            },
            TransformDef::Flat { color } => Transform::Flat {
                color: manifest_color(index, &color)?,
            },
            TransformDef::HueShift { degrees } => {
                if !degrees.is_finite() {
                    return Err(RecolorError::validation(format!(
                        "job {index}: hue shift must be finite"
                    )));
                }
                Transform::HueShift { degrees }
            }
        };

        let job = RecolorJob {
            input: base_dir.join(self.input),
            output: base_dir.join(self.output),
            transform,
            size,
        };
        job.validate()?;
        Ok(job)
    }
}

/// Anything starting with `#` must be a valid hex color; other keys hash.
fn manifest_color(index: usize, text: &str) -> RecolorResult<Color> {
    if text.starts_with('#') {
        return parse_hex_color(text)
            .map_err(|e| RecolorError::validation(format!("job {index}: {e}")));
    }
    Ok(color_from_key(text))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/manifest.rs"]
mod tests;
