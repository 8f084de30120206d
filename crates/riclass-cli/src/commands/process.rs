//! Process command - reclassify a single balance export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use riclass_core::adapters::adapter_for_extension;
use riclass_core::report::BalanceReport;
use riclass_core::statement::rules::format_amount;
use riclass_core::taxonomy::Taxonomy;
use riclass_core::RiclassConfig;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (CSV, JSON or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Custom taxonomy mapping (JSON)
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Structured report (taxonomy-shaped tree plus totals)
    Json,
    /// Flat section/code/description/amount rows
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let taxonomy = load_taxonomy(args.taxonomy.as_deref())?;
    let report = build_report(&args.input, &config, &taxonomy)?;

    for warning in report.cross_check() {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
    if report.unclassified_count > 0 {
        eprintln!(
            "{} {} records could not be classified",
            style("!").yellow(),
            report.unclassified_count
        );
    }

    let output = render(&report, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            println!(
                "{} Report written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{output}"),
    }

    debug!("total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Load pipeline configuration, falling back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<RiclassConfig> {
    match path {
        Some(p) => Ok(RiclassConfig::from_file(Path::new(p))?),
        None => Ok(RiclassConfig::default()),
    }
}

/// Load the taxonomy mapping, falling back to the built-in CEE scheme.
pub fn load_taxonomy(path: Option<&Path>) -> anyhow::Result<Taxonomy> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p)?;
            Ok(Taxonomy::from_json(&text)?)
        }
        None => Ok(Taxonomy::default_mapping()),
    }
}

/// Dispatch by extension, parse and classify one file.
pub fn build_report(
    input: &Path,
    config: &RiclassConfig,
    taxonomy: &Taxonomy,
) -> anyhow::Result<BalanceReport> {
    let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    let adapter = adapter_for_extension(extension, config)?;

    info!("processing {}", input.display());
    let data = fs::read(input)?;
    let parsed = adapter.parse(&data)?;
    Ok(BalanceReport::build(parsed, taxonomy))
}

/// Render a report in the requested output format.
pub fn render(report: &BalanceReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_csv(report: &BalanceReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["section", "code", "description", "amount"])?;
    for row in report.rows() {
        wtr.write_record([
            row.section.as_str(),
            row.code.as_str(),
            row.description.as_str(),
            &format!("{:.2}", row.amount),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn render_text(report: &BalanceReport) -> String {
    let mut out = String::new();

    out.push_str("BILANCIO RICLASSIFICATO CEE\n");
    if let Some(name) = &report.company.company_name {
        out.push_str(&format!("Società: {name}\n"));
    }
    if let Some(year) = &report.company.fiscal_year {
        out.push_str(&format!("Esercizio: {year}\n"));
    }
    if let Some(vat) = &report.company.vat_number {
        out.push_str(&format!("P.IVA: {vat}\n"));
    }
    out.push('\n');

    for row in report.rows() {
        out.push_str(&format!(
            "{:<44} {:<12} {:<40} {:>15}\n",
            row.section,
            row.code,
            row.description,
            format_amount(row.amount)
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{:<44} {:>15}\n",
        "TOTALE ATTIVO",
        format_amount(report.totals.assets)
    ));
    out.push_str(&format!(
        "{:<44} {:>15}\n",
        "TOTALE PASSIVO",
        format_amount(report.totals.liabilities)
    ));
    out.push_str(&format!(
        "{:<44} {:>15}\n",
        "QUADRATURA",
        format_amount(report.totals.balance_gap)
    ));
    if report.unclassified_count > 0 {
        out.push_str(&format!(
            "Conti non classificati: {}\n",
            report.unclassified_count
        ));
    }

    out
}
