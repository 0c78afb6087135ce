use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Order — One row of the orders export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Compared as text, so `007` and `7` are different orders.
    pub order_id: String,
    pub order_date: NaiveDate,
    /// Date the order reached the warehouse; may trail `order_date`.
    pub ingestion_date: NaiveDate,
    pub region: Option<String>,
    pub channel: String,
    pub product_line: String,
    pub status: String,
    pub gross_amount: Decimal,
}

impl Order {
    /// True when the order was ingested strictly after its business date.
    pub fn is_late_arriving(&self) -> bool {
        self.ingestion_date > self.order_date
    }

    pub fn is_completed(&self) -> bool {
        self.status == crate::config::COMPLETED_STATUS
    }
}

// ---------------------------------------------------------------------------
// JoinedOrder — Order with its collected payment total
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedOrder {
    #[serde(flatten)]
    pub order: Order,
    /// Sum of deduplicated payments for the order, zero when none matched.
    pub paid_amount: Decimal,
}

// ---------------------------------------------------------------------------
// RawOrder — Text row as read from the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub ingestion_date: Option<String>,
    pub region: Option<String>,
    pub channel: Option<String>,
    pub product_line: Option<String>,
    pub status: Option<String>,
    pub gross_amount: Option<String>,
}
