use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::colorize::colorize;
use crate::composite::composite;
use crate::error::Result;
use crate::helper::force_png_path;
use crate::image_io::{load_base, load_mask, save_png};
use crate::manifest::{Job, Manifest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

/// Tint one job's mask and, when it has a base, composite onto it.
///
/// Writes `<name>_mask.png` and `<name>.png` under `output_folder`.
pub fn run_job(job: &Job, output_folder: &Path) -> Result<Vec<PathBuf>> {
    let mask = load_mask(&job.mask)?;
    let tinted = colorize(&mask, job.color)?;

    // Fail before writing anything if the base does not fit.
    let composited = match &job.base {
        Some(base_path) => Some(composite(&load_base(base_path)?, &tinted)?),
        None => None,
    };

    let mut written = Vec::with_capacity(2);
    let mask_path = force_png_path(output_folder, &format!("{}_mask", job.name));
    save_png(&tinted, &mask_path)?;
    written.push(mask_path);

    if let Some(composited) = composited {
        let path = force_png_path(output_folder, &job.name);
        save_png(&composited, &path)?;
        written.push(path);
    }

    Ok(written)
}

/// Run every job of the manifest in parallel.
///
/// The manifest is validated first so no two workers write the same file.
/// A failing job is recorded in [`BatchReport::skipped`] and never stops the
/// others. `progress` is called with `(done, total)` after each job.
pub fn run_batch<F>(manifest: &Manifest, progress: F) -> Result<BatchReport>
where
    F: Fn(usize, usize) + Sync,
{
    manifest.validate()?;
    let total = manifest.jobs.len();
    let done = AtomicUsize::new(0);
    info!(total, output = %manifest.output_folder.display(), "running batch");

    let outcomes: Vec<_> = manifest
        .jobs
        .par_iter()
        .map(|job| {
            let outcome = run_job(job, &manifest.output_folder);
            progress(done.fetch_add(1, Ordering::Relaxed) + 1, total);
            (job, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (job, outcome) in outcomes {
        match outcome {
            Ok(paths) => report.written.extend(paths),
            Err(e) => {
                warn!(job = %job.name, error = %e, "skipping job");
                report.skipped.push(Skipped {
                    name: job.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}
