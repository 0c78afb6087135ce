mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use kpi_trends::config::{DEFAULT_ORDERS_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_PAYMENTS_PATH};
use kpi_trends::KpiPipeline;

#[derive(Parser)]
#[command(
    name = "kpi-trends",
    version,
    about = "Data-quality checks and monthly KPIs from order and payment exports"
)]
struct Cli {
    /// Orders table (CSV, parquet or JSON)
    #[arg(long, default_value = DEFAULT_ORDERS_PATH)]
    orders: PathBuf,

    /// Payments table (CSV, parquet or JSON)
    #[arg(long, default_value = DEFAULT_PAYMENTS_PATH)]
    payments: PathBuf,

    /// Directory for data_quality_checks.csv and monthly_kpis.csv
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    let pipeline = KpiPipeline::builder()
        .orders_path(&cli.orders)
        .payments_path(&cli.payments)
        .output_dir(&cli.output_dir)
        .build();

    let run = pipeline
        .run()
        .with_context(|| format!("KPI run failed for {}", pipeline))?;

    println!(
        "Saved {} and {}",
        run.artifacts.quality_checks.display(),
        run.artifacts.monthly_kpis.display()
    );
    println!("metric,value");
    for (name, value) in run.output.quality.metrics() {
        println!("{},{}", name, value);
    }

    Ok(())
}
