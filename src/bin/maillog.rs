//! CLI binary for pdf-maillog.
//!
//! A thin shim over the library crate that maps subcommand flags to the
//! driver functions and prints the run counts. Flags fall back to the
//! `PDF_DIR` / `CSV_FILE` / `MD_FILE` environment variables so existing
//! operator scripts keep working; the library itself never reads the
//! environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_maillog::{extract_dir_to_csv, render_csv_to_file, ExtractConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract every PDF in exports/ into emails.csv
  maillog extract --pdf-dir exports/ --csv-file emails.csv

  # Same, configured through the environment
  PDF_DIR=exports/ CSV_FILE=emails.csv maillog extract

  # Render the CSV as a Markdown correspondence log
  maillog format --csv-file emails.csv --md-file correspondence.md

  # Machine-readable run counts
  maillog extract --pdf-dir exports/ --csv-file emails.csv --json

ENVIRONMENT VARIABLES:
  PDF_DIR    Source directory of *.pdf files (extract)
  CSV_FILE   CSV path: output of extract, input of format
  MD_FILE    Markdown output path (format)

NOTES:
  Files without a parsable From/To/Sent header triplet are skipped with a
  warning; only the final counts report them. Dates that resist parsing are
  kept verbatim, which can place them out of order in the sorted CSV.
"#;

/// Convert PDF-exported email records to CSV and Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "maillog",
    version,
    about = "Convert PDF-exported email records to CSV and a Markdown correspondence log",
    long_about = "Extract email header fields (From, To, Sent, Subject) and body text from \
PDF-exported email records into a CSV table, then render the CSV as a Markdown \
correspondence log. The two stages are independent and communicate only through the CSV.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "MAILLOG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "MAILLOG_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract email records from a directory of PDFs into a CSV file.
    Extract {
        /// Source directory containing *.pdf files.
        #[arg(long, env = "PDF_DIR")]
        pdf_dir: PathBuf,

        /// Output CSV path.
        #[arg(long, env = "CSV_FILE")]
        csv_file: PathBuf,

        /// Print run counts as JSON instead of the summary line.
        #[arg(long)]
        json: bool,
    },

    /// Render a CSV of email records as a Markdown correspondence log.
    Format {
        /// Input CSV path (as written by `extract`).
        #[arg(long, env = "CSV_FILE")]
        csv_file: PathBuf,

        /// Output Markdown path.
        #[arg(long, env = "MD_FILE")]
        md_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Extract {
            pdf_dir,
            csv_file,
            json,
        } => {
            let config = ExtractConfig::default();
            let stats = extract_dir_to_csv(&pdf_dir, &csv_file, &config)
                .context("Extraction failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
                );
            } else if !cli.quiet {
                println!(
                    "Parsed {} emails into {}",
                    stats.parsed_records,
                    csv_file.display()
                );
                if stats.skipped_files > 0 {
                    eprintln!(
                        "  {} of {} files skipped (no header triplet)",
                        stats.skipped_files, stats.scanned_files
                    );
                }
            }
        }

        Command::Format { csv_file, md_file } => {
            let count =
                render_csv_to_file(&csv_file, &md_file).context("Formatting failed")?;
            if !cli.quiet {
                println!("Wrote {} messages to {}", count, md_file.display());
            }
        }
    }

    Ok(())
}
