//! pixelscan - Measures how many image pixels live under each directory.
//!
//! Usage:
//!   pixelscan DIR...                 Report pixel area per root and per child directory
//!   pixelscan -u side DIR...         Print areas as the side of an equivalent square
//!   pixelscan -f json DIR...         Emit JSON instead of text
//!   pixelscan --help                 Show help

mod render;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{Level, debug, warn};

use pixelscan_core::{DEFAULT_EXTENSION, DEFAULT_HIGH_THRESHOLD, DecodePolicy, ScanConfig};
use pixelscan_report::ReportBuilder;

use crate::render::{TextRenderer, Theme, Units, render_json};

#[derive(Parser)]
#[command(
    name = "pixelscan",
    version,
    about = "Measures how many image pixels live under each directory",
    long_about = "pixelscan sums width × height of every image below each given directory \
                  and ranks the immediate subdirectories by their share of that total."
)]
struct Cli {
    /// Directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Extension of the image files to measure
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Match the extension case-insensitively
    #[arg(short, long)]
    ignore_case: bool,

    /// Share of the root total (0.0 - 1.0) at which a subdirectory is highlighted
    #[arg(short, long, default_value_t = DEFAULT_HIGH_THRESHOLD)]
    threshold: f64,

    /// What to do with images whose dimensions cannot be read
    #[arg(long, value_enum, default_value_t = OnDecodeError::Abort)]
    on_decode_error: OnDecodeError,

    /// Do not follow symbolic links
    #[arg(long)]
    no_follow_links: bool,

    /// Number of scan threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// How to print pixel areas
    #[arg(short, long, value_enum, default_value_t)]
    units: Units,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnDecodeError {
    /// Fail the whole directory
    Abort,
    /// Warn and count the image as zero pixels
    Skip,
}

impl From<OnDecodeError> for DecodePolicy {
    fn from(value: OnDecodeError) -> Self {
        match value {
            OnDecodeError::Abort => DecodePolicy::Abort,
            OnDecodeError::Skip => DecodePolicy::Skip,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = ScanConfig::builder()
        .extension(cli.extension.clone())
        .case_sensitive(!cli.ignore_case)
        .high_threshold(cli.threshold)
        .decode_policy(DecodePolicy::from(cli.on_decode_error))
        .follow_symlinks(!cli.no_follow_links)
        .threads(cli.threads)
        .build()
        .wrap_err("Invalid configuration")?;

    let cancel = CancellationToken::new();
    let builder = ReportBuilder::with_config(config)
        .wrap_err("Cannot set up scanner")?
        .with_cancellation(cancel.clone());

    let theme = if cli.no_color || !io::stdout().is_terminal() {
        Theme::plain()
    } else {
        Theme::monokai()
    };
    let renderer = TextRenderer::new(theme, cli.units);

    if matches!(cli.format, OutputFormat::Text) {
        renderer.render_pending(&mut io::stderr().lock(), &cli.paths)?;
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling scan");
            cancel.cancel();
        }
    });

    let mut progress_rx = builder.subscribe();
    tokio::spawn(async move {
        loop {
            match progress_rx.recv().await {
                Ok(progress) => debug!(
                    path = %progress.current_path.display(),
                    images = progress.images_measured,
                    pixels = progress.pixels_counted,
                    "{:.0} files/s",
                    progress.files_per_second()
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    let paths = cli.paths.clone();
    let outcomes = tokio::task::spawn_blocking(move || builder.build_reports(&paths))
        .await
        .wrap_err("Scan task failed")?;

    let mut stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Text => renderer.render(&mut stdout, &outcomes)?,
        OutputFormat::Json => writeln!(stdout, "{}", render_json(&outcomes)?)?,
    }
    stdout.flush()?;

    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    if failed > 0 {
        warn!("{failed} of {} director(ies) failed", outcomes.len());
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Install the stderr log subscriber.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
