//! dupfolders - Find shared folders that hold the same duplicate content.
//!
//! Usage:
//!   dupfolders analyze REPORT     Group folders by shared duplicate content
//!   dupfolders summary REPORT     Show counts for a duplicate report
//!   dupfolders --help             Show help

mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use dupfolders_analyze::{AnalysisReport, FolderAnalyzer, FolderGroup};
use dupfolders_core::{AnalyzerConfig, DEFAULT_VOLUME_ROOT, DuplicateRecord, ReportConfig};
use dupfolders_report::{ReportReader, ReportSummary, summarize};

#[derive(Parser)]
#[command(
    name = "dupfolders",
    version,
    about = "Find shared folders that hold the same duplicate content",
    long_about = "dupfolders reads the duplicate file report of a NAS storage analyzer \
                  and shows which shared folders overlap, merging folders that are \
                  nested inside one another."
)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Group folders by shared duplicate content
    Analyze {
        #[command(flatten)]
        report: ReportArgs,

        /// Minimum shared size for a folder group (e.g., "50MB", "1GiB", "1500")
        #[arg(short, long, default_value = "50MB")]
        min_size: String,

        /// Do not merge groups whose folders are nested
        #[arg(long)]
        no_compact: bool,

        /// Maximum number of folder groups to show (0 = all)
        #[arg(short = 'n', long, default_value = "0")]
        top: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show counts for a duplicate report
    Summary {
        #[command(flatten)]
        report: ReportArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Duplicate report CSV file
    path: PathBuf,

    /// Root segment preceding the shared folder in file paths
    #[arg(long, default_value = DEFAULT_VOLUME_ROOT)]
    volume_root: String,

    /// Derive folder names from file paths instead of the folder column
    #[arg(long)]
    derive_folders: bool,

    /// Accept paths outside the volume root
    #[arg(long)]
    no_path_check: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a ReportSummary,
    analysis: &'a AnalysisReport,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    match cli.command {
        Command::Analyze {
            report,
            min_size,
            no_compact,
            top,
            format,
        } => {
            run_analyze(&report, &min_size, !no_compact, top, format)?;
        }
        Command::Summary { report, format } => {
            run_summary(&report, format)?;
        }
    }

    Ok(())
}

/// Run the folder analysis and print the groups.
fn run_analyze(
    args: &ReportArgs,
    min_size: &str,
    compact: bool,
    top_n: usize,
    format: OutputFormat,
) -> Result<()> {
    let min_group_size = parse_size(min_size)?;
    let (records, summary) = load_report(args)?;

    info!(min_group_size, compact, "analyzing folder groups");

    let config = AnalyzerConfig::builder()
        .min_group_size(min_group_size)
        .compact_nested(compact)
        .max_groups(top_n)
        .build()
        .context("Invalid analyzer configuration")?;

    let analysis = FolderAnalyzer::with_config(config).analyze(records);

    match format {
        OutputFormat::Text => print_analysis(&analysis, min_group_size),
        OutputFormat::Json => {
            let output = JsonOutput {
                report: &summary,
                analysis: &analysis,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Print counts for a duplicate report.
fn run_summary(args: &ReportArgs, format: OutputFormat) -> Result<()> {
    let (_, summary) = load_report(args)?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(" {}", args.path.display());
            println!("{}", "─".repeat(60));
            println!(" {} file copies", summary.records);
            println!(" {} duplicate groups", summary.clusters);
            println!(" {} shared folders", summary.folders);
            println!(" {} total", format_size(summary.total_bytes));
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Read and validate the report named on the command line.
fn load_report(args: &ReportArgs) -> Result<(Vec<DuplicateRecord>, ReportSummary)> {
    let config = ReportConfig::builder()
        .volume_root(args.volume_root.as_str())
        .derive_folder_from_path(args.derive_folders)
        .validate_paths(!args.no_path_check)
        .build()
        .context("Invalid report configuration")?;

    let reader = ReportReader::with_config(config)?;
    let records = reader
        .read(&args.path)
        .with_context(|| format!("Failed to read duplicate report {}", args.path.display()))?;
    let summary = summarize(&records);

    info!(
        records = summary.records,
        clusters = summary.clusters,
        folders = summary.folders,
        "report loaded"
    );

    Ok((records, summary))
}

/// Print folder groups as text.
fn print_analysis(analysis: &AnalysisReport, min_group_size: u64) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" Folder Overlap Report");
    println!("{}", "─".repeat(70));
    println!();

    if !analysis.has_groups() {
        println!(
            " No folder groups share at least {}.",
            format_size(min_group_size)
        );
        println!();
        return;
    }

    println!(
        " Found {} folder groups in {} records",
        analysis.group_count(),
        analysis.records_analyzed
    );
    println!(
        " Total shared: {}, wasted: {}",
        format_size(analysis.total_shared_size),
        format_size(analysis.total_wasted_space)
    );
    println!();

    for (i, group) in analysis.groups.iter().enumerate() {
        print_group(i + 1, group);
    }
}

fn print_group(index: usize, group: &FolderGroup) {
    println!(
        " Group {} ({} shared, {} wasted, {} duplicate sets, {} files)",
        index,
        format_size(group.total_shared_size()),
        format_size(group.wasted_space()),
        group.cluster_count(),
        group.file_count()
    );
    for folder in group.sorted_folders() {
        println!("   {folder}");
    }
    println!();
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::DECIMAL)
}

/// Parse a size string (e.g., "1500", "50MB", "1.5GB", "512KiB").
///
/// `KB`/`MB`/`GB`/`TB` are decimal, `KiB`/`MiB`/`GiB`/`TiB` are binary.
fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);

    let num: f64 = num
        .parse()
        .with_context(|| format!("Invalid size: {s:?}"))?;

    let multiplier: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" => 1_000,
        "m" | "mb" => 1_000_000,
        "g" | "gb" => 1_000_000_000,
        "t" | "tb" => 1_000_000_000_000,
        "kib" => 1 << 10,
        "mib" => 1 << 20,
        "gib" => 1 << 30,
        "tib" => 1 << 40,
        other => bail!("Unknown size unit {other:?} in {s:?}"),
    };

    Ok((num * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1500").unwrap(), 1500);
        assert_eq!(parse_size("50MB").unwrap(), 50_000_000);
        assert_eq!(parse_size("50mb").unwrap(), 50_000_000);
        assert_eq!(parse_size("1.5GB").unwrap(), 1_500_000_000);
        assert_eq!(parse_size("2 KiB").unwrap(), 2048);
        assert_eq!(parse_size("1GiB").unwrap(), 1 << 30);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("MB").is_err());
        assert!(parse_size("10XB").is_err());
        assert!(parse_size("-5").is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "dupfolders",
            "analyze",
            "report.csv",
            "--min-size",
            "1MB",
            "--no-compact",
            "-f",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze {
                report,
                min_size,
                no_compact,
                format,
                ..
            } => {
                assert_eq!(report.path, PathBuf::from("report.csv"));
                assert_eq!(report.volume_root, "/volume1");
                assert_eq!(min_size, "1MB");
                assert!(no_compact);
                assert!(matches!(format, OutputFormat::Json));
            }
            Command::Summary { .. } => panic!("expected analyze"),
        }
    }
}
