//! ba-core — bundle-analysis container decoder.
//!
//! Scans a build directory for `.bundle-analysis` containers, derives the
//! relational views (modules, module edges, sources, chunk parts, output
//! files, route summaries), and writes one JSONL file per category.

use ba_core::driver;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Decode bundle-analysis containers into JSONL category files
#[derive(Parser)]
#[command(name = "ba-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan for .bundle-analysis container files
    input: PathBuf,

    /// Directory receiving the JSONL category files
    #[arg(long, short = 'o', default_value = "bundle-analysis-out")]
    out: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, env = "BA_LOG_JSON")]
    log_json: bool,
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout stays clean for anything piping the category files around;
    // all logging goes to stderr.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    match driver::process_all(&cli.input, &cli.out) {
        Ok(report) => {
            if report.routes_ok == 0 && !report.routes_failed.is_empty() {
                std::process::exit(1);
            }
        }
        Err(error) => {
            tracing::error!(%error, "Analysis run aborted");
            std::process::exit(1);
        }
    }
}
