//! Monthly KPI and data-quality reporting for order and payment exports.
//!
//! Orders and payments are loaded into an in-memory DuckDB database, typed
//! row by row, and run through a fixed pipeline: quality checks, payment
//! deduplication, a left join of payment totals onto orders, and a monthly
//! group-by on channel and product line. Both reports are written only after
//! every step has succeeded.
//!
//! # Quick start
//!
//! ```no_run
//! use kpi_trends::KpiPipeline;
//!
//! let pipeline = KpiPipeline::builder()
//!     .orders_path("data/orders.csv")
//!     .payments_path("data/payments.csv")
//!     .output_dir("docs")
//!     .build();
//!
//! let run = pipeline.run().unwrap();
//! println!("{} KPI rows", run.output.kpis.len());
//! ```

pub mod config;
pub mod connection;
pub mod dedup;
pub mod error;
pub mod join;
pub mod kpi;
pub mod models;
pub mod pipeline;
pub mod quality;
pub mod sink;
pub mod source;

pub use config::PipelineConfig;
pub use connection::Connection;
pub use error::{KpiError, Result};
pub use pipeline::PipelineOutput;
pub use sink::{CsvDirSink, ReportSink, WrittenArtifacts};
pub use source::{FileSource, MemorySource, TableSource};

use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// KpiPipelineBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`KpiPipeline`].
///
/// Every path defaults to the locations in [`config`], so
/// `KpiPipeline::builder().build()` reads `data/` and writes `docs/`.
#[derive(Debug, Default)]
pub struct KpiPipelineBuilder {
    config: PipelineConfig,
}

impl KpiPipelineBuilder {
    /// Set the orders input file.
    pub fn orders_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.orders_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the payments input file.
    pub fn payments_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.payments_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the directory both reports are written into.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn build(self) -> KpiPipeline {
        KpiPipeline {
            config: self.config,
        }
    }
}

// ---------------------------------------------------------------------------
// KpiPipeline
// ---------------------------------------------------------------------------

/// A configured file-to-file pipeline run.
pub struct KpiPipeline {
    config: PipelineConfig,
}

/// Result of [`KpiPipeline::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PipelineOutput,
    pub artifacts: WrittenArtifacts,
}

impl KpiPipeline {
    /// Create a new builder for configuring the pipeline.
    pub fn builder() -> KpiPipelineBuilder {
        KpiPipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured inputs and compute the reports without writing them.
    pub fn compute(&self) -> Result<PipelineOutput> {
        let source = FileSource::open(&self.config.orders_path, &self.config.payments_path)?;
        pipeline::compute(&source)
    }

    /// Load, compute, and write both reports into the output directory.
    ///
    /// On any failure neither report is left behind.
    pub fn run(&self) -> Result<RunReport> {
        tracing::info!(
            orders = %self.config.orders_path.display(),
            payments = %self.config.payments_path.display(),
            "starting KPI run"
        );
        let source = FileSource::open(&self.config.orders_path, &self.config.payments_path)?;
        let sink = CsvDirSink::new(&self.config.output_dir);
        let (output, artifacts) = pipeline::run(&source, &sink)?;
        Ok(RunReport { output, artifacts })
    }
}

impl fmt::Display for KpiPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KpiPipeline(orders={}, payments={}, output_dir={})",
            self.config.orders_path.display(),
            self.config.payments_path.display(),
            self.config.output_dir.display()
        )
    }
}
