//! roiconv - convert images between PNG, PPM and ROI
//!
//! Exit code 0 on success, 1 on any failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use roiconv::{Converter, Limits};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roiconv")]
#[command(author, version, about = "Convert images between PNG, PPM and ROI")]
#[command(after_help = "\
Examples:
  roiconv input.png output.roi
  roiconv input.roi output.png
  roiconv input.ppm output.roi

Inputs: .png .ppm .roi    Outputs: .png .roi")]
struct Cli {
    /// Input image (.png, .ppm or .roi)
    input: PathBuf,

    /// Output image (.png or .roi)
    output: PathBuf,

    /// Verbose output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Reject inputs wider than this
    #[arg(long, value_name = "PIXELS")]
    max_width: Option<u64>,

    /// Reject inputs taller than this
    #[arg(long, value_name = "PIXELS")]
    max_height: Option<u64>,

    /// Reject inputs with more pixels than this
    #[arg(long, value_name = "PIXELS")]
    max_pixels: Option<u64>,

    /// Reject inputs whose decoded buffer exceeds this many bytes
    #[arg(long = "max-memory", value_name = "BYTES")]
    max_memory_bytes: Option<u64>,
}

impl Cli {
    fn limits(&self) -> Limits {
        Limits {
            max_width: self.max_width,
            max_height: self.max_height,
            max_pixels: self.max_pixels,
            max_memory_bytes: self.max_memory_bytes,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let report = Converter::new()
        .with_limits(cli.limits())
        .convert(&cli.input, &cli.output)
        .with_context(|| {
            format!(
                "Couldn't convert {} to {}",
                cli.input.display(),
                cli.output.display()
            )
        })?;

    if cli.verbose > 0 {
        println!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
