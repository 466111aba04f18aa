use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use mask_tint::batch::run_batch;
use mask_tint::helper::resolve_full_path;
use mask_tint::manifest::Manifest;

#[derive(Args)]
pub struct BatchArgs {
    /// JSON manifest listing the jobs
    pub manifest: PathBuf,

    /// Override the manifest's output folder
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let manifest_path = resolve_full_path(&args.manifest);
    let mut manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;
    if let Some(ref output) = args.output {
        manifest.output_folder = resolve_full_path(output);
    }

    // Serialize progress writes coming from the rayon workers
    let stdout = Mutex::new(std::io::stdout());
    let report = run_batch(&manifest, |done, total| {
        let percentage = (done as f64 / total as f64) * 100.0;
        if let Ok(mut out) = stdout.lock() {
            let _ = write!(out, "\rProcessing job #{} / {} ({:.2}%)", done, total, percentage);
            let _ = out.flush();
        }
    })?;

    // Finish progress line
    println!("\n{}", "Processing complete!".green());
    println!(
        "Wrote {} file(s) to {}",
        report.written.len(),
        manifest.output_folder.display()
    );

    if !report.skipped.is_empty() {
        println!("{}", "Skipped jobs:".red());
        for s in &report.skipped {
            println!(" - {}: {}", s.name, s.reason);
        }
        println!(
            "{}",
            "-> Check that the manifest paths exist and that each mask matches its base size"
                .magenta()
        );
    }

    Ok(())
}
