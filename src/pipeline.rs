//! The ordered pipeline steps, independent of where data comes from or goes.

use crate::dedup::dedup_payments;
use crate::error::Result;
use crate::join::{join_payments, paid_by_order};
use crate::kpi::monthly_kpis;
use crate::models::{JoinedOrder, KpiRow, QualityReport};
use crate::quality;
use crate::sink::{ReportSink, WrittenArtifacts};
use crate::source::TableSource;

/// Everything one run derives from its inputs.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub quality: QualityReport,
    pub joined: Vec<JoinedOrder>,
    pub kpis: Vec<KpiRow>,
    /// Deduplicated payments whose order_id matched no order.
    pub orphan_payments: usize,
}

/// Load both tables and compute the quality report and monthly KPIs.
///
/// Nothing is written; any load or typing error aborts the whole run.
pub fn compute<S: TableSource + ?Sized>(source: &S) -> Result<PipelineOutput> {
    let orders = source.orders()?;
    let payments = source.payments()?;

    let deduped = dedup_payments(&payments);
    let report = quality::report(&orders, payments.len(), deduped.len());
    tracing::info!(
        orders = report.orders_total_rows,
        payments = report.payments_total_rows,
        duplicates = report.payments_duplicate_rows,
        "quality checks complete"
    );

    let orphan_payments = quality::orphan_payments(&orders, &deduped);
    if orphan_payments > 0 {
        tracing::warn!(
            rows = orphan_payments,
            "payments reference unknown order ids and are excluded from collected revenue"
        );
    }

    let paid = paid_by_order(&deduped)?;
    let joined = join_payments(&orders, &paid);
    let kpis = monthly_kpis(&joined)?;
    tracing::info!(kpi_rows = kpis.len(), "monthly KPIs aggregated");

    Ok(PipelineOutput {
        quality: report,
        joined,
        kpis,
        orphan_payments,
    })
}

/// Compute everything, then hand both artifacts to `sink` in one call.
pub fn run<S, K>(source: &S, sink: &K) -> Result<(PipelineOutput, WrittenArtifacts)>
where
    S: TableSource + ?Sized,
    K: ReportSink + ?Sized,
{
    let output = compute(source)?;
    let artifacts = sink.write(&output.quality, &output.kpis)?;
    Ok((output, artifacts))
}
