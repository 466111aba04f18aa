use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use mask_tint::ColorChoice;
use mask_tint::colorize::colorize;
use mask_tint::composite::composite;
use mask_tint::helper::resolve_full_path;
use mask_tint::image_io::{DEFAULT_COMPOSITE_OUTPUT, load_base, load_mask, save_png};

#[derive(Args)]
pub struct CompositeArgs {
    /// Grayscale image with alpha; its alpha drives the blend
    pub mask: PathBuf,

    /// Base image, same dimensions as the mask
    pub base: PathBuf,

    /// Tint color: "#RRGGBB", "r,g,b" or a preset name such as "orange"
    #[arg(short, long, default_value = "128,128,128")]
    pub color: ColorChoice,

    /// Also save the tinted mask to this path
    #[arg(long)]
    pub mask_output: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_COMPOSITE_OUTPUT)]
    pub output: PathBuf,
}

pub fn run(args: &CompositeArgs) -> Result<()> {
    let mask_path = resolve_full_path(&args.mask);
    let base_path = resolve_full_path(&args.base);

    let mask = load_mask(&mask_path)
        .with_context(|| format!("Failed to load mask {}", mask_path.display()))?;
    let base = load_base(&base_path)
        .with_context(|| format!("Failed to load base {}", base_path.display()))?;
    println!(
        "Loaded {}x{} mask and {}x{} base",
        mask.width(),
        mask.height(),
        base.width(),
        base.height()
    );

    let tinted = colorize(&mask, args.color).context("Failed to colorize mask")?;
    let composited = composite(&base, &tinted).context("Failed to apply mask")?;

    if let Some(ref mask_output) = args.mask_output {
        save_png(&tinted, mask_output)?;
        println!("{} tinted mask to {}", "Saved".green(), mask_output.display());
    }
    save_png(&composited, &args.output)?;
    println!(
        "{} masked base ({}) to {}",
        "Saved".green(),
        args.color,
        args.output.display()
    );
    Ok(())
}
