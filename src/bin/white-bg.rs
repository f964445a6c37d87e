use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::EnvFilter;

use white_background_removal::host::{HeadlessHost, Host};
use white_background_removal::{
    is_supported_image, remove_background_with, Error, ProgressSink, RemovalOptions,
    RemovalReport, Result, Threshold, DEFAULT_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "white-bg",
    about = "Make near-white backgrounds transparent and save the result as PNG",
    version,
    after_help = "Simple usage: white-bg  (pick a file in a dialog)\n\
                  Headless usage: white-bg photo.jpg --no-open\n\n\
                  The output is written next to the input as {name}_transparencia.png."
)]
struct Cli {
    /// Input image; opens a file dialog when omitted
    input: Option<PathBuf>,

    /// Per-channel brightness cutoff (0-255); pixels brighter on all of R, G and B become transparent
    #[arg(short, long, default_value_t = i64::from(DEFAULT_THRESHOLD), allow_negative_numbers = true)]
    threshold: i64,

    /// Output file (default: {name}_transparencia.png next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not open the result in the default image viewer
    #[arg(long)]
    no_open: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Row progress drawn to stdout.
struct RowProgress(ProgressBar);

impl RowProgress {
    fn new(quiet: bool) -> Self {
        let target = if quiet {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stdout()
        };
        let bar = ProgressBar::with_draw_target(None, target);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("Removing background");
        Self(bar)
    }
}

impl ProgressSink for RowProgress {
    fn start(&self, total_rows: u32) {
        self.0.set_length(u64::from(total_rows));
    }

    fn advance(&self, rows: u32) {
        self.0.inc(u64::from(rows));
    }

    fn finish(&self) {
        self.0.finish();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(report) => print_report(&report, &cli),
        Err(Error::NoInputSelected) => {
            if !cli.quiet {
                eprintln!("No image selected, nothing to do.");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<RemovalReport> {
    let threshold = Threshold::new(cli.threshold)?;
    let input = resolve_input(cli)?;

    if !is_supported_image(&input) {
        tracing::warn!(
            input = %input.display(),
            "unrecognized extension, trying to decode anyway"
        );
    }

    let opts = RemovalOptions {
        threshold,
        output: cli.output.clone(),
    };
    let progress = RowProgress::new(cli.quiet);
    let report = remove_background_with(&input, &opts, &progress)?;

    if let Err(e) = viewer(cli.no_open).open_in_viewer(&report.output) {
        tracing::warn!("{e}");
    }

    Ok(report)
}

fn resolve_input(cli: &Cli) -> Result<PathBuf> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }

    #[cfg(feature = "desktop")]
    let picked = white_background_removal::host::DesktopHost.pick_file();
    #[cfg(not(feature = "desktop"))]
    let picked = HeadlessHost.pick_file();

    picked.ok_or(Error::NoInputSelected)
}

fn viewer(no_open: bool) -> Box<dyn Host> {
    if no_open {
        return Box::new(HeadlessHost);
    }

    #[cfg(feature = "desktop")]
    let host: Box<dyn Host> = Box::new(white_background_removal::host::DesktopHost);
    #[cfg(not(feature = "desktop"))]
    let host: Box<dyn Host> = Box::new(HeadlessHost);

    host
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_report(report: &RemovalReport, cli: &Cli) {
    if cli.quiet {
        return;
    }

    eprintln!("[OK] Saved as: {}", report.output.display());
    if cli.verbose > 0 {
        eprintln!(
            "  -> {}x{}, {} pixels made transparent (threshold {})",
            report.width, report.height, report.masked_pixels, cli.threshold
        );
    }
}
