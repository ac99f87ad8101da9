//! Command-line interface for the extractor.
//!
//! Status output goes to stderr so that `extract` can stream YAML on stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DEFAULT_INDEX_FILE, DEFAULT_PAGE_PATTERN};
use crate::consistency::{check_consistency, read_index, ConsistencyReport};
use crate::error::{ExtractorError, Result};
use crate::scanner::{ScanOptions, TrailingRecord};
use crate::types::PersonRecord;
use crate::walker::CorpusWalker;
use crate::yaml::{generate_yaml, save_yaml};

/// Family Extractor - Read person records from legacy family pages.
#[derive(Parser)]
#[command(name = "family-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract people from family pages and dump them as YAML.
    Extract {
        /// Glob pattern of family pages
        #[arg(default_value = DEFAULT_PAGE_PATTERN)]
        pattern: String,

        /// Directory the pattern is relative to
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Write YAML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop a person still open when a page ends without its marker
        #[arg(long)]
        drop_trailing: bool,
    },

    /// Check extracted families against the family index.
    Check {
        /// Glob pattern of family pages
        #[arg(default_value = DEFAULT_PAGE_PATTERN)]
        pattern: String,

        /// Directory the pattern is relative to
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Family index file (default: gendex.txt in --dir)
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            pattern,
            dir,
            output,
            drop_trailing,
        } => {
            let options = ScanOptions {
                trailing_record: if drop_trailing {
                    TrailingRecord::Drop
                } else {
                    TrailingRecord::Emit
                },
            };
            extract_command(&pattern, dir.as_deref(), output.as_deref(), options)
        }
        Commands::Check {
            pattern,
            dir,
            index,
        } => {
            let index = index.unwrap_or_else(|| {
                dir.as_deref()
                    .unwrap_or(Path::new("."))
                    .join(DEFAULT_INDEX_FILE)
            });
            check_command(&pattern, dir.as_deref(), &index)
        }
    }
}

fn open_walker(pattern: &str, dir: Option<&Path>) -> Result<CorpusWalker> {
    match dir {
        Some(dir) => CorpusWalker::in_dir(dir, pattern),
        None => CorpusWalker::new(pattern),
    }
}

/// Walk the corpus behind a spinner, reporting skipped pages and warnings.
fn collect_people(mut walker: CorpusWalker) -> Vec<PersonRecord> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut people = Vec::new();
    for person in walker.by_ref() {
        people.push(person);
        pb.set_message(format!("Scanned {} people...", people.len()));
    }
    pb.finish_and_clear();

    for warning in walker.warnings() {
        eprintln!("  {} {warning}", style("Warning:").yellow().bold());
    }
    for skipped in walker.skipped() {
        eprintln!("  {} {}", style("Skipped:").red().bold(), skipped.error);
    }

    people
}

/// Execute the extract command.
fn extract_command(
    pattern: &str,
    dir: Option<&Path>,
    output: Option<&Path>,
    options: ScanOptions,
) -> Result<()> {
    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "{} {}",
        style("Extracting").bold(),
        style(pattern).cyan()
    );

    let walker = open_walker(pattern, dir)?.with_options(options);
    let people = collect_people(walker);
    eprintln!("  People: {}", style(people.len()).green());

    match output {
        Some(path) => {
            save_yaml(&people, path)?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => {
            let yaml = generate_yaml(&people)?;
            std::io::stdout().lock().write_all(yaml.as_bytes())?;
        }
    }

    Ok(())
}

/// Execute the check command.
fn check_command(pattern: &str, dir: Option<&Path>, index: &Path) -> Result<()> {
    eprintln!(
        "{} {} against {}",
        style("Checking").bold(),
        style(pattern).cyan(),
        style(index.display()).cyan()
    );

    let walker = open_walker(pattern, dir)?;
    let people = collect_people(walker);
    let indexed = read_index(index)?;
    let report = check_consistency(&people, indexed);

    print_report(&report);
    if report.is_consistent() {
        eprintln!(
            "{} {} people match the index",
            style("OK:").green().bold(),
            people.len()
        );
        Ok(())
    } else {
        Err(ExtractorError::Inconsistent {
            mismatches: report.mismatches(),
        })
    }
}

/// Print each mismatched identifier with its signed count (corpus - index).
fn print_report(report: &ConsistencyReport) {
    for (family, count) in &report.extra_in_corpus {
        println!("{family}\t+{count}");
    }
    for (family, count) in &report.extra_in_index {
        println!("{family}\t-{count}");
    }
}
