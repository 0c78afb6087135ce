//! Output artifacts.
//!
//! [`CsvDirSink`] stages both files next to their final location and only
//! moves them into place once both are fully written.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::{KPI_COLUMNS, MONTHLY_KPIS_FILE, QUALITY_CHECKS_FILE, QUALITY_COLUMNS};
use crate::error::{KpiError, Result};
use crate::models::{KpiRow, QualityReport};

/// Paths of the artifacts a sink produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub quality_checks: PathBuf,
    pub monthly_kpis: PathBuf,
}

/// Consumes the final results of a run.
pub trait ReportSink {
    fn write(&self, report: &QualityReport, kpis: &[KpiRow]) -> Result<WrittenArtifacts>;
}

// ---------------------------------------------------------------------------
// CsvDirSink
// ---------------------------------------------------------------------------

/// Writes `data_quality_checks.csv` and `monthly_kpis.csv` into a directory.
pub struct CsvDirSink {
    dir: PathBuf,
}

impl CsvDirSink {
    /// Create a sink for `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn stage<T: Serialize>(&self, header: &[&str], rows: &[T]) -> Result<NamedTempFile> {
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        write_csv(staged.as_file_mut(), header, rows)?;
        staged.as_file().sync_all()?;
        Ok(staged)
    }
}

impl ReportSink for CsvDirSink {
    fn write(&self, report: &QualityReport, kpis: &[KpiRow]) -> Result<WrittenArtifacts> {
        fs::create_dir_all(&self.dir)?;

        let quality_staged = self.stage(QUALITY_COLUMNS, std::slice::from_ref(report))?;
        let kpis_staged = self.stage(KPI_COLUMNS, kpis)?;

        let artifacts = WrittenArtifacts {
            quality_checks: self.dir.join(QUALITY_CHECKS_FILE),
            monthly_kpis: self.dir.join(MONTHLY_KPIS_FILE),
        };

        persist(quality_staged, &artifacts.quality_checks)?;
        if let Err(e) = persist(kpis_staged, &artifacts.monthly_kpis) {
            // Never leave one artifact without the other
            let _ = fs::remove_file(&artifacts.quality_checks);
            return Err(e);
        }

        tracing::info!(
            dir = %self.dir.display(),
            kpi_rows = kpis.len(),
            "wrote artifacts"
        );
        Ok(artifacts)
    }
}

fn persist(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged.persist(dest).map_err(|e| KpiError::Persist {
        path: dest.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Write a header row followed by one serialized row per item.
///
/// The header is written explicitly so an empty table still gets one.
pub fn write_csv<W: Write, T: Serialize>(writer: W, header: &[&str], rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
