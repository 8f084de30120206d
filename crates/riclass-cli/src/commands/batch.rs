//! Batch processing command for multiple balance exports.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use riclass_core::report::BalanceReport;
use riclass_core::statement::rules::format_amount;

use super::process::{self, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Custom taxonomy mapping (JSON)
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessOutcome {
    path: PathBuf,
    report: Option<BalanceReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = process::load_config(config_path)?;
    let taxonomy = process::load_taxonomy(args.taxonomy.as_deref())?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "csv" | "json" | "pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("no matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = process::build_report(&path, &config, &taxonomy);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(report) => {
                outcomes.push(ProcessOutcome {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("failed to process {}: {}", path.display(), message);
                    outcomes.push(ProcessOutcome {
                        path,
                        report: None,
                        error: Some(message),
                        processing_time_ms,
                    });
                } else {
                    error!("failed to process {}: {}", path.display(), message);
                    anyhow::bail!("processing failed: {message}");
                }
            }
        }

        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    // Write per-file outputs
    for outcome in &outcomes {
        if let (Some(report), Some(output_dir)) = (&outcome.report, &args.output_dir) {
            let stem = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("bilancio");
            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let out_path = output_dir.join(format!("{stem}.{extension}"));
            fs::write(&out_path, process::render(report, args.format)?)?;
            debug!("wrote output to {}", out_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.report.is_some()).count();
    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, outcomes: &[ProcessOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    wtr.write_record([
        "filename",
        "status",
        "company",
        "fiscal_year",
        "total_assets",
        "total_liabilities",
        "balance_gap",
        "unclassified",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(report) = &outcome.report {
            wtr.write_record([
                filename,
                "success",
                report.company.company_name.as_deref().unwrap_or(""),
                report.company.fiscal_year.as_deref().unwrap_or(""),
                &format_amount(report.totals.assets),
                &format_amount(report.totals.liabilities),
                &format_amount(report.totals.balance_gap),
                &report.unclassified_count.to_string(),
                &outcome.processing_time_ms.to_string(),
                &processed_at,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &outcome.processing_time_ms.to_string(),
                &processed_at,
                outcome.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
