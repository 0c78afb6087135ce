use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// QualityReport — Data-quality metrics for one run
// ---------------------------------------------------------------------------

/// Field order is the column order of the written report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub orders_total_rows: usize,
    pub orders_unique_order_id: usize,
    pub orders_missing_region_pct: Decimal,
    pub payments_total_rows: usize,
    pub payments_dedup_rows: usize,
    pub payments_duplicate_rows: usize,
}

impl QualityReport {
    /// Metric name/value pairs in report order.
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("orders_total_rows", self.orders_total_rows.to_string()),
            ("orders_unique_order_id", self.orders_unique_order_id.to_string()),
            (
                "orders_missing_region_pct",
                self.orders_missing_region_pct.to_string(),
            ),
            ("payments_total_rows", self.payments_total_rows.to_string()),
            ("payments_dedup_rows", self.payments_dedup_rows.to_string()),
            (
                "payments_duplicate_rows",
                self.payments_duplicate_rows.to_string(),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// KpiRow — Monthly aggregate for one channel and product line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRow {
    /// First day of the calendar month.
    pub month: NaiveDate,
    pub channel: String,
    pub product_line: String,
    pub orders_total: usize,
    pub completed_orders: usize,
    pub gross_revenue: Decimal,
    pub collected_revenue: Decimal,
    pub late_arriving_orders: usize,
}
