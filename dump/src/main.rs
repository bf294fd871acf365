//! A CLI tool for inspecting the contents of a DICOM file
//! by printing its element tree in a human readable format.
use clap::Parser;
use dcmtree_dump::{dump_segments, ColorMode, DumpOptions};
use dcmtree_object::{OpenFileOptions, ReadOutcome, Writer};
use snafu::{ensure_whatever, Report, ResultExt, Whatever};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, Level};

/// Exit code for when a file could not be read.
const ERROR_READ: i32 = -2;
/// Exit code for when an error emerged while dumping the file.
const ERROR_PRINT: i32 = -3;
/// Exit code for when re-encoding the file failed.
const ERROR_WRITE: i32 = -4;

/// Dump the contents of DICOM files
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The DICOM file(s) to read
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Read the data set with this transfer syntax UID
    /// instead of the one in the file meta group
    #[arg(long = "transfer-syntax", value_name = "UID")]
    transfer_syntax: Option<String>,
    /// The maximum nesting depth of sequences and items
    #[arg(long = "max-depth", default_value = "64")]
    max_depth: usize,
    /// Write the parsed object back to this file
    /// (only with a single input file)
    #[arg(long = "rewrite", value_name = "OUT")]
    rewrite: Option<PathBuf>,
    /// Report how the object would be split
    /// into segments of at most this many bytes
    #[arg(long = "segments", value_name = "N")]
    segments: Option<usize>,
    /// The width of the display
    #[arg(short = 'w', long = "width", default_value = "120")]
    width: u32,
    /// Print all values to the end
    #[arg(long = "no-limit")]
    no_limit: bool,
    /// The color mode
    #[arg(long = "color", default_value = "auto")]
    color: ColorMode,
    /// Print debugging information
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    run().unwrap_or_else(|e| {
        eprintln!("{}", Report::from_error(e));
        std::process::exit(-1);
    });
}

fn run() -> Result<(), Whatever> {
    let App {
        files,
        transfer_syntax,
        max_depth,
        rewrite,
        segments,
        width,
        no_limit,
        color,
        verbose,
    } = App::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if verbose { Level::DEBUG } else { Level::ERROR })
            .with_writer(std::io::stderr)
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    ensure_whatever!(
        rewrite.is_none() || files.len() == 1,
        "--rewrite takes a single input file"
    );

    let mut options = DumpOptions::new();
    options.width(width).no_limit(no_limit).color_mode(color);

    let mut exit_code = 0;
    for file in &files {
        println!("{}: ", file.display());
        let mut open = OpenFileOptions::new().max_depth(max_depth);
        if let Some(uid) = &transfer_syntax {
            open = open.transfer_syntax(uid);
        }
        let outcome = open.open_file(file);

        if let Err(e) = options.dump_outcome(&outcome) {
            if e.kind() != ErrorKind::BrokenPipe {
                error!("{}", Report::from_error(e));
                exit_code = ERROR_PRINT;
            }
            continue;
        }
        if !outcome.success {
            exit_code = ERROR_READ;
            continue;
        }

        if let Some(max) = segments {
            report_segments(&outcome, max)?;
        }
        if let Some(out) = &rewrite {
            if !rewrite_file(&outcome, out) {
                exit_code = ERROR_WRITE;
            }
        }
    }

    std::process::exit(exit_code);
}

fn report_segments(outcome: &ReadOutcome, max: usize) -> Result<(), Whatever> {
    let segmented = Writer::new()
        .encode_segments(&outcome.object, max)
        .whatever_context("Could not segment the object")?;
    println!();
    dump_segments(&mut std::io::stdout(), max, &segmented.output)
        .whatever_context("Could not print segments")
}

fn rewrite_file(outcome: &ReadOutcome, out: &Path) -> bool {
    let written = Writer::new().write_file(&outcome.object, out);
    for d in &written.diagnostics {
        error!("{}", d);
    }
    if written.success {
        println!("Written to {}", out.display());
    }
    written.success
}
