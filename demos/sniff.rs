//! Command-line MIME type sniffer.
//!
//! Prints the detected MIME type for each input file.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example sniff -- report.pdf photo unknown.bin
//! ```
//!
//! Show how each type was resolved:
//! ```sh
//! cargo run --example sniff -- --source downloads/*
//! ```
//!
//! Enable debug logs with `RUST_LOG=mimesniff=debug`.

use clap::Parser;
use mimesniff::{DetectOptions, Detector};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Detect MIME types from file extensions and magic numbers
#[derive(Parser, Debug)]
#[command(name = "sniff", version)]
struct Args {
    /// Files to inspect
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Match extensions case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Never read file contents; unknown extensions report the default type
    #[arg(long)]
    no_sniff: bool,

    /// Print how each result was found (extension, signature, fallback)
    #[arg(short, long)]
    source: bool,

    /// Print only the MIME type
    #[arg(short, long)]
    brief: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = DetectOptions::new()
        .with_fold_extension_case(!args.case_sensitive)
        .with_sniff_on_extension_miss(!args.no_sniff);
    let detector = Detector::with_options(options);

    for path in &args.files {
        let detection = detector.classify(path);
        match (args.brief, args.source) {
            (true, _) => println!("{}", detection.mime),
            (false, true) => println!(
                "{}: {} ({:?})",
                path.display(),
                detection.mime,
                detection.source
            ),
            (false, false) => println!("{}: {}", path.display(), detection.mime),
        }
    }
}
