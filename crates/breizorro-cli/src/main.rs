//! breizorro - build a noise-based mask for a FITS image
//!
//! Reads the first plane of the input image, runs the mask pipeline and
//! writes the mask (and optionally the noise map) as copies of the input
//! file with the plane data replaced.

use anyhow::{Context, Result, bail};
use breizorro::io::{read_fits_plane, write_fits_plane, write_mask_plane};
use breizorro::{LogObserver, MaskOptions, MaskPipeline};
use clap::Parser;
use flexi_logger::{DeferredNow, Logger, TS_DASHES_BLANK_COLONS_DOT_BLANK};
use log::Record;
use std::io::Write;
use std::path::PathBuf;

const FITS_SUFFIX: &str = ".fits";

#[derive(Parser, Debug)]
#[command(name = "breizorro")]
#[command(about = "Create a binary mask from a restored radio image using a local noise estimate")]
#[command(version)]
struct Args {
    /// Restored image (FITS) to mask
    restored_image: String,

    /// Sigma threshold for masking
    #[arg(long, default_value_t = 6.5)]
    threshold: f32,

    /// Box size over which to compute stats
    #[arg(long, default_value_t = 50)]
    boxsize: u32,

    /// Number of iterations of binary dilation
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    dilate: i64,

    /// Fill holes (i.e. entirely closed regions) in mask
    #[arg(long)]
    fill_holes: bool,

    /// Export the noise image as a FITS file
    #[arg(long)]
    savenoise: bool,

    /// Mask output path (default: <input>.mask.fits)
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Log level (e.g. info, debug), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        w,
        "breizorro - {} {} - {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        record.level(),
        record.args()
    )
}

/// Input path with trailing separators removed
fn input_path(arg: &str) -> &str {
    let trimmed = arg.trim_end_matches('/');
    if trimmed.is_empty() { arg } else { trimmed }
}

/// Replace a trailing `.fits` with `suffix`, or append `suffix`.
fn derived_path(input: &str, suffix: &str) -> PathBuf {
    let stem = input.strip_suffix(FITS_SUFFIX).unwrap_or(input);
    PathBuf::from(format!("{}{}", stem, suffix))
}

fn mask_path(input: &str) -> PathBuf {
    derived_path(input, ".mask.fits")
}

fn noise_path(input: &str) -> PathBuf {
    derived_path(input, ".noise.fits")
}

fn mask_options(args: &Args) -> Result<MaskOptions> {
    if args.dilate < 0 {
        bail!("--dilate must be zero or positive, got {}", args.dilate);
    }
    let dilate = u32::try_from(args.dilate)
        .with_context(|| format!("--dilate {} is too large", args.dilate))?;
    Ok(MaskOptions::default()
        .with_threshold(args.threshold)
        .with_boxsize(args.boxsize)
        .with_dilate(dilate)
        .with_fill_holes(args.fill_holes))
}

fn run(args: &Args) -> Result<()> {
    // Options are checked before the image is touched
    let pipeline = MaskPipeline::new(mask_options(args)?)?;

    let input = input_path(&args.restored_image);
    log::info!("Reading {}", input);
    let plane =
        read_fits_plane(input).with_context(|| format!("failed to read image {}", input))?;

    log::info!("Generating noise map");
    let estimate = pipeline.noise_map(&plane.image, &mut LogObserver)?;

    if args.savenoise {
        let path = noise_path(input);
        log::info!("Writing {}", path.display());
        write_fits_plane(input, &path, &estimate.noise)
            .with_context(|| format!("failed to write noise map {}", path.display()))?;
    }

    let mask = pipeline.mask_from_noise(&plane.image, &estimate, &mut LogObserver)?;

    let path = args.outfile.clone().unwrap_or_else(|| mask_path(input));
    log::info!("Writing {}", path.display());
    write_mask_plane(input, &path, &mask)
        .with_context(|| format!("failed to write mask {}", path.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)
        .context("invalid log level")?
        .log_to_stderr()
        .format(log_format)
        .start()
        .context("logger initialization failed")?;

    log::info!("Welcome to breizorro");
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    run(&args)?;

    log::info!("Done");
    Ok(())
}
