// Pipeline main entry point
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pipeline::config::settings::PipelineSettings;
use pipeline::report::{self, RegionFilter};
use pipeline::services::SalesPipeline;
use pipeline::storage::{FsFileStore, SalesFileStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sales-pipeline", version, about = "Cleans raw sales exports into one consolidated CSV")]
struct Cli {
    /// JSON settings file; flags given on the command line take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repair, filter and aggregate every export in the input directory
    Process(ProcessArgs),
    /// Print daily sales from the consolidated file and compare around the price increase
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct ProcessArgs {
    #[arg(long)]
    input_dir: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
    /// Product to keep (compared case-insensitively)
    #[arg(long)]
    product: Option<String>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Consolidated file to read; defaults to the configured output file
    #[arg(long)]
    input: Option<PathBuf>,
    /// all, north, east, south or west
    #[arg(long, default_value = "all")]
    region: RegionFilter,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            tracing::error!(error = %message, "Run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => PipelineSettings::load_from_file(path)?,
        None => PipelineSettings::default(),
    };

    match cli.command {
        Command::Process(args) => process(settings, args),
        Command::Summary(args) => summary(settings, args),
    }
}

fn process(mut settings: PipelineSettings, args: ProcessArgs) -> Result<()> {
    if let Some(dir) = args.input_dir {
        settings.input_dir = dir;
    }
    if let Some(output) = args.output {
        settings.output_file = output;
    }
    if let Some(product) = args.product {
        settings.target_product = product;
    }

    let pipeline = SalesPipeline::new(FsFileStore, settings)?;
    let report = pipeline.run().context("sales pipeline run failed")?;

    info!(
        files = report.files.len(),
        rows = report.rows_written,
        output = %report.output_file.display(),
        "Done"
    );
    Ok(())
}

fn summary(settings: PipelineSettings, args: SummaryArgs) -> Result<()> {
    let path = args.input.unwrap_or_else(|| settings.output_file.clone());
    let text = FsFileStore
        .read_to_string(&path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;

    let records = report::read_sales_file(&path, &text)?;
    let daily = report::daily_totals(&records, args.region);
    let change = report::price_change_summary(&daily, settings.price_increase_date);

    println!("Daily sales of {} (region: {})", settings.target_product, args.region);
    for day in &daily {
        println!("{}  {:>12.2}", day.date, day.sales);
    }

    let describe = |label: &str, period: &report::PeriodTotals| match period.average_daily_sales() {
        Some(avg) => println!(
            "{} {}: {} days, total {:.2}, average {:.2}/day",
            label, change.change_date, period.days, period.total_sales, avg
        ),
        None => println!("{} {}: no data", label, change.change_date),
    };
    describe("Before", &change.before);
    describe("From", &change.after);

    match change.sales_higher_after() {
        Some(true) => println!("Sales were higher after the price increase."),
        Some(false) => println!("Sales were higher before the price increase."),
        None => println!("Not enough data on both sides of the price increase to compare."),
    }
    Ok(())
}
