mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mask-tint", about = "Tint grayscale masks and blend them onto base images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tint a grayscale+alpha mask and save it as PNG
    Colorize(commands::colorize::ColorizeArgs),
    /// Tint a mask and blend it onto a base image
    Composite(commands::composite::CompositeArgs),
    /// Process every job of a JSON manifest
    Batch(commands::batch::BatchArgs),
    /// Read line commands from stdin and recompute after each change
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Colorize(args) => commands::colorize::run(args),
        Commands::Composite(args) => commands::composite::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Session => commands::session::run(),
    }
}
