use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Payment — One row of the payments export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: String,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub payment_amount: Decimal,
}

/// Fields that identify one payment event. Rows equal on all four are duplicates.
pub type PaymentKey<'a> = (&'a str, NaiveDate, &'a str, Decimal);

impl Payment {
    pub fn dedup_key(&self) -> PaymentKey<'_> {
        (
            &self.order_id,
            self.payment_date,
            &self.payment_method,
            self.payment_amount,
        )
    }
}

// ---------------------------------------------------------------------------
// RawPayment — Text row as read from the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RawPayment {
    pub order_id: Option<String>,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub payment_amount: Option<String>,
}
