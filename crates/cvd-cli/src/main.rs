//! cvd-colors - CVD-safe color set and color cycle generator
//!
//! Front end for `cvd-gen`: builds a catalog, runs a generator and writes
//! the result to a text file named after its parameters.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "cvd-colors")]
#[command(author, version, about = "CVD-safe color set and color cycle generator")]
#[command(long_about = "
Generates sets of 8-bit sRGB colors that stay distinguishable for normal
vision and for simulated protanomaly, deuteranomaly and tritanomaly, and
maximally distinct color cycles starting from white.

Examples:
  cvd-colors sets                             # 10000 sets of 8 colors
  cvd-colors sets -n 6 --num-sets 100 -o out  # smaller run into out/
  cvd-colors sets --legacy-gamut              # reproduce the wrapped sampling
  cvd-colors sets --config sets.yaml -j 8     # settings from YAML, 8 threads
  cvd-colors cycle -n 11 --cvd-severity 100   # color cycle
  cvd-colors cycle --universe palette.txt     # restrict to listed colors
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate color sets with minimum perceptual distance
    #[command(visible_alias = "s")]
    Sets(SetsArgs),

    /// Generate a maximally distinct color cycle
    #[command(visible_alias = "c")]
    Cycle(CycleArgs),
}

/// Options shared by both generators.
#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// YAML file with generator settings (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of colors
    #[arg(short = 'n', long)]
    num_colors: Option<usize>,

    /// CVD simulation severity in percent (0-100)
    #[arg(long)]
    cvd_severity: Option<u8>,

    /// Minimum color lightness (J')
    #[arg(long)]
    min_j: Option<f64>,

    /// Maximum color lightness (J')
    #[arg(long)]
    max_j: Option<f64>,

    /// File of whitespace-separated hex colors to draw from instead of all
    /// 8-bit colors
    #[arg(long)]
    universe: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SetsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Minimum perceptual color distance (including for CVD)
    #[arg(long)]
    min_color_dist: Option<f64>,

    /// Minimum lightness distance (for grayscale conversion)
    #[arg(long)]
    min_light_dist: Option<f64>,

    /// Number of sets to generate
    #[arg(long)]
    num_sets: Option<usize>,

    /// Seed of the master PRNG
    #[arg(long)]
    seed: Option<u64>,

    /// Rejection-sampling draws per pick before falling back to the pool
    #[arg(long)]
    max_draws: Option<u32>,

    /// Truncate and wrap out-of-gamut samples as the survey sets did
    #[arg(long, alias = "include-bug")]
    legacy_gamut: bool,
}

#[derive(Args, Debug)]
struct CycleArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let path = match cli.command {
        Commands::Sets(args) => commands::sets::run(args)?,
        Commands::Cycle(args) => commands::cycle::run(args)?,
    };
    println!("{}", path.display());
    Ok(())
}
