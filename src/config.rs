use std::path::PathBuf;

pub const DEFAULT_ORDERS_PATH: &str = "data/orders.csv";
pub const DEFAULT_PAYMENTS_PATH: &str = "data/payments.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

pub const QUALITY_CHECKS_FILE: &str = "data_quality_checks.csv";
pub const MONTHLY_KPIS_FILE: &str = "monthly_kpis.csv";

pub const ORDERS_TABLE: &str = "orders";
pub const PAYMENTS_TABLE: &str = "payments";

/// Status value counted by `completed_orders`. Matched exactly.
pub const COMPLETED_STATUS: &str = "Completed";

/// Text values read as a missing region, besides blank. Same set a pandas
/// `read_csv` treats as NA by default.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub const ORDER_COLUMNS: &[&str] = &[
    "order_id",
    "order_date",
    "ingestion_date",
    "region",
    "channel",
    "product_line",
    "status",
    "gross_amount",
];

pub const PAYMENT_COLUMNS: &[&str] = &[
    "order_id",
    "payment_date",
    "payment_method",
    "payment_amount",
];

/// Resolved locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub orders_path: PathBuf,
    pub payments_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            orders_path: PathBuf::from(DEFAULT_ORDERS_PATH),
            payments_path: PathBuf::from(DEFAULT_PAYMENTS_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Header of the quality-check artifact.
pub const QUALITY_COLUMNS: &[&str] = &[
    "orders_total_rows",
    "orders_unique_order_id",
    "orders_missing_region_pct",
    "payments_total_rows",
    "payments_dedup_rows",
    "payments_duplicate_rows",
];

/// Header of the monthly KPI artifact.
pub const KPI_COLUMNS: &[&str] = &[
    "month",
    "channel",
    "product_line",
    "orders_total",
    "completed_orders",
    "gross_revenue",
    "collected_revenue",
    "late_arriving_orders",
];
