// ============================================================================
// inpainter CLI: fill the masked region of an image from the command line
// ============================================================================
//
// Usage examples:
//   inpainter exemplar --radius 4 photo.png scratches.png repaired.png
//   inpainter e -r 2 --max-passes 5000 photo.png mask.png out.jpg --quality 95
//   inpainter adaptive photo.png mask.png out.png
//
// The mask marks damage through its alpha channel: any pixel with non-zero
// alpha is synthesized, everything else is kept. Processing is synchronous
// on the current thread.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::io::{IoError, SaveFormat, load_mask, load_rgba, save_image};
use crate::ops::{
    AdaptiveConfig, ExemplarConfig, InpaintError, InpaintReport, adaptive_inpaint,
    exemplar_inpaint,
};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Image inpainting: synthesize the damaged region of an image from its
/// undamaged surroundings.
#[derive(Parser, Debug)]
#[command(
    name = "inpainter",
    about = "Fill the masked region of an image",
    long_about = "Fill the region of SOURCE marked by MASK (non-zero alpha = damaged)\n\
                  using either exemplar-based patch propagation or adaptive\n\
                  local-mean interpolation, and write the result to OUTPUT.\n\n\
                  Example:\n  \
                  inpainter exemplar --radius 4 photo.png mask.png repaired.png\n  \
                  inpainter adaptive photo.png mask.png repaired.png"
)]
pub struct CliArgs {
    /// Mirror per-pass progress (DEBUG records) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Session log file. Defaults to the platform data directory.
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exemplar-based patch propagation.
    #[command(visible_alias = "e")]
    Exemplar {
        /// Patch radius; patches are (2r+1) x (2r+1).
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        radius: u32,

        /// Give up after this many fill passes.
        #[arg(long, value_name = "N")]
        max_passes: Option<usize>,

        /// Still write OUTPUT if the fill stops early, for inspection.
        #[arg(long)]
        keep_partial: bool,

        #[command(flatten)]
        files: FileArgs,
    },
    /// Adaptive local-mean interpolation.
    #[command(visible_alias = "a")]
    Adaptive {
        #[command(flatten)]
        files: FileArgs,
    },
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Image to repair.
    pub source: PathBuf,

    /// Damage mask, same size as SOURCE.
    pub mask: PathBuf,

    /// Where to write the repaired image.
    pub output: PathBuf,

    /// Output format: png, jpeg, bmp, tga, tiff.
    /// When omitted, the format is inferred from OUTPUT's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1-100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100",
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Inpaint(#[from] InpaintError),
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run the selected algorithm and return an OS exit code.
/// `0` = output written and the region fully filled, `1` = anything else.
/// With `--keep-partial` a failed fill still leaves its partial OUTPUT on disk.
pub fn run(args: CliArgs) -> ExitCode {
    let start = Instant::now();
    let files = match &args.command {
        Command::Exemplar { files, .. } | Command::Adaptive { files } => files,
    };

    match run_one(&args.command) {
        Ok(report) => {
            log::info!(
                "wrote {} ({} passes, {} pixels filled, {:.0}ms)",
                files.output.display(),
                report.passes,
                report.filled_pixels,
                start.elapsed().as_secs_f64() * 1000.0
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Per-invocation pipeline
// ============================================================================

fn run_one(command: &Command) -> Result<InpaintReport, CliError> {
    match command {
        Command::Exemplar {
            radius,
            max_passes,
            keep_partial,
            files,
        } => {
            let (mut src, mask) = load_inputs(files)?;
            let config = ExemplarConfig {
                patch_radius: *radius,
                max_passes: *max_passes,
            };
            match exemplar_inpaint(&mut src, mask, &config) {
                Ok(report) => {
                    write_output(&src, files)?;
                    Ok(report)
                }
                Err(e) => {
                    if *keep_partial && !e.is_precondition() {
                        log::warn!("writing partial result to {}", files.output.display());
                        write_output(&src, files)?;
                    }
                    Err(e.into())
                }
            }
        }
        Command::Adaptive { files } => {
            let (mut src, mask) = load_inputs(files)?;
            let report = adaptive_inpaint(&mut src, &mask, &AdaptiveConfig::default())?;
            write_output(&src, files)?;
            Ok(report)
        }
    }
}

fn load_inputs(files: &FileArgs) -> Result<(image::RgbaImage, crate::ops::DamageMask), CliError> {
    log::info!(
        "source {}, mask {}",
        files.source.display(),
        files.mask.display()
    );
    let src = load_rgba(&files.source)?;
    let mask = load_mask(&files.mask)?;
    Ok((src, mask))
}

fn write_output(image: &image::RgbaImage, files: &FileArgs) -> Result<(), CliError> {
    let format = parse_format(files.format.as_deref(), &files.output);
    save_image(image, &files.output, format, files.quality)?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Choose the [`SaveFormat`] from the `--format` string or infer it from the
/// output file extension. Defaults to PNG when neither is known.
pub fn parse_format(format_arg: Option<&str>, output: &Path) -> SaveFormat {
    if let Some(f) = format_arg {
        return SaveFormat::from_name(f).unwrap_or(SaveFormat::Png);
    }
    output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(SaveFormat::from_name)
        .unwrap_or(SaveFormat::Png)
}
