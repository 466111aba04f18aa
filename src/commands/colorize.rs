use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use mask_tint::ColorChoice;
use mask_tint::colorize::colorize;
use mask_tint::helper::resolve_full_path;
use mask_tint::image_io::{DEFAULT_MASK_OUTPUT, load_mask, save_png};

#[derive(Args)]
pub struct ColorizeArgs {
    /// Grayscale image with alpha (other color modes are converted)
    pub mask: PathBuf,

    /// Tint color: "#RRGGBB", "r,g,b" or a preset name such as "orange"
    #[arg(short, long, default_value = "128,128,128")]
    pub color: ColorChoice,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_MASK_OUTPUT)]
    pub output: PathBuf,
}

pub fn run(args: &ColorizeArgs) -> Result<()> {
    let mask_path = resolve_full_path(&args.mask);
    let mask = load_mask(&mask_path)
        .with_context(|| format!("Failed to load mask {}", mask_path.display()))?;
    println!("Loaded {}x{} mask", mask.width(), mask.height());

    let tinted = colorize(&mask, args.color).context("Failed to colorize mask")?;
    save_png(&tinted, &args.output)?;

    println!(
        "{} tinted mask ({}) to {}",
        "Saved".green(),
        args.color,
        args.output.display()
    );
    Ok(())
}
