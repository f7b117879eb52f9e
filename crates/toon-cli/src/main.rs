//! toonify - turn a portrait photo into a cartoon
//!
//! Smooths colors with repeated bilateral filtering, extracts bold edges
//! with an adaptive threshold and draws them over the flattened colors.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use toon_io::WriteOptions;
use toon_ops::{BilateralParams, CartoonParams, EdgeParams};

mod logging;
mod pipeline;

const PORTRAIT: CartoonParams = CartoonParams::PORTRAIT;

#[derive(Parser, Debug)]
#[command(name = "toonify")]
#[command(author, version, about = "Turn a portrait photo into a cartoon")]
#[command(long_about = "
Turn a portrait photo into a cartoon: flat color patches outlined in black.

Without arguments, reads IMAGE_FILE/portrait.jpg and writes
cartoonified_portrait.jpg, then shows both images until a key is pressed.

Examples:
  toonify                                   # Default portrait
  toonify me.png -o me_toon.png --no-preview
  toonify me.jpg --passes 4 --sigma-color 150
  toonify me.jpg --block-size 15 --threshold-c 5 -vv
")]
struct Cli {
    /// Input image (PNG or JPEG)
    #[arg(default_value = "IMAGE_FILE/portrait.jpg")]
    input: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "cartoonified_portrait.jpg")]
    output: PathBuf,

    /// Number of bilateral filter passes
    #[arg(long, default_value_t = PORTRAIT.passes)]
    passes: u32,

    /// Bilateral color sigma
    #[arg(long, default_value_t = PORTRAIT.bilateral.sigma_color, allow_negative_numbers = true)]
    sigma_color: f64,

    /// Bilateral spatial sigma
    #[arg(long, default_value_t = PORTRAIT.bilateral.sigma_space, allow_negative_numbers = true)]
    sigma_space: f64,

    /// Bilateral neighbourhood diameter (<= 0 derives it from the spatial sigma)
    #[arg(long, default_value_t = PORTRAIT.bilateral.diameter, allow_negative_numbers = true)]
    diameter: i32,

    /// Median blur kernel size (odd)
    #[arg(long, default_value_t = PORTRAIT.edges.median_ksize)]
    median_ksize: u32,

    /// Adaptive threshold block size (odd, > 1)
    #[arg(long, default_value_t = PORTRAIT.edges.block_size)]
    block_size: u32,

    /// Constant subtracted from the local mean
    #[arg(long = "threshold-c", default_value_t = PORTRAIT.edges.c, allow_negative_numbers = true)]
    threshold_c: f64,

    /// JPEG output quality
    #[arg(short, long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Do not open preview windows
    #[arg(long)]
    no_preview: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn params(&self) -> CartoonParams {
        CartoonParams {
            passes: self.passes,
            bilateral: BilateralParams::new(self.diameter, self.sigma_color, self.sigma_space),
            edges: EdgeParams::new(self.median_ksize, self.block_size, self.threshold_c),
        }
    }

    fn run_options(&self) -> pipeline::RunOptions {
        pipeline::RunOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            params: self.params(),
            write: WriteOptions {
                jpeg_quality: self.quality,
            },
            preview: !self.no_preview,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    pipeline::run(&cli.run_options())
}
