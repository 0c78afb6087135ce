//! Tabular inputs for the pipeline.
//!
//! [`FileSource`] loads order and payment exports through DuckDB and types
//! each row; [`MemorySource`] hands over records that are already typed.

use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::config::{
    NULL_TOKENS, ORDERS_TABLE, ORDER_COLUMNS, PAYMENTS_TABLE, PAYMENT_COLUMNS,
};
use crate::connection::Connection;
use crate::error::{KpiError, Result};
use crate::models::{Order, Payment, RawOrder, RawPayment};

// ---------------------------------------------------------------------------
// TableSource
// ---------------------------------------------------------------------------

/// Supplies the two input tables for one run.
pub trait TableSource {
    fn orders(&self) -> Result<Vec<Order>>;
    fn payments(&self) -> Result<Vec<Payment>>;
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// Reads orders and payments from files (CSV, parquet or JSON).
///
/// Both files are registered when the source is opened, so a missing file or
/// column fails the run before any rows are typed.
pub struct FileSource {
    conn: Connection,
}

impl FileSource {
    pub fn open(orders_path: &Path, payments_path: &Path) -> Result<Self> {
        let conn = Connection::new()?;

        conn.register_table_from_file(ORDERS_TABLE, orders_path)?;
        conn.register_table_from_file(PAYMENTS_TABLE, payments_path)?;
        conn.require_columns(ORDERS_TABLE, ORDER_COLUMNS)?;
        conn.require_columns(PAYMENTS_TABLE, PAYMENT_COLUMNS)?;

        Ok(Self { conn })
    }
}

impl TableSource for FileSource {
    fn orders(&self) -> Result<Vec<Order>> {
        let raw: Vec<RawOrder> = self.conn.select_text(ORDERS_TABLE, ORDER_COLUMNS)?;
        let orders = raw
            .into_iter()
            .enumerate()
            .map(|(i, row)| parse_order(row, i + 1))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(rows = orders.len(), "loaded orders");
        Ok(orders)
    }

    fn payments(&self) -> Result<Vec<Payment>> {
        let raw: Vec<RawPayment> = self.conn.select_text(PAYMENTS_TABLE, PAYMENT_COLUMNS)?;
        let payments = raw
            .into_iter()
            .enumerate()
            .map(|(i, row)| parse_payment(row, i + 1))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(rows = payments.len(), "loaded payments");
        Ok(payments)
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Already-typed tables, e.g. built by a caller or a test.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub orders: Vec<Order>,
    pub payments: Vec<Payment>,
}

impl MemorySource {
    pub fn new(orders: Vec<Order>, payments: Vec<Payment>) -> Self {
        Self { orders, payments }
    }
}

impl TableSource for MemorySource {
    fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.clone())
    }

    fn payments(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.clone())
    }
}

// ---------------------------------------------------------------------------
// Row typing
// ---------------------------------------------------------------------------

/// Where a field came from, for error messages.
struct Cell {
    table: &'static str,
    row: usize,
    column: &'static str,
}

impl Cell {
    fn invalid(&self, value: &str, reason: impl Into<String>) -> KpiError {
        KpiError::InvalidValue {
            table: self.table.to_string(),
            row: self.row,
            column: self.column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn required(&self, value: Option<String>) -> Result<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(self.invalid("", "value is required")),
        }
    }

    fn date(&self, value: Option<String>) -> Result<NaiveDate> {
        let text = self.required(value)?;
        parse_date(&text).ok_or_else(|| self.invalid(&text, "expected YYYY-MM-DD"))
    }

    fn decimal(&self, value: Option<String>) -> Result<Decimal> {
        let text = self.required(value)?;
        parse_decimal(&text).ok_or_else(|| self.invalid(&text, "expected a decimal number"))
    }
}

fn parse_order(raw: RawOrder, row: usize) -> Result<Order> {
    let cell = |column: &'static str| Cell {
        table: ORDERS_TABLE,
        row,
        column,
    };

    Ok(Order {
        order_id: cell("order_id").required(raw.order_id)?,
        order_date: cell("order_date").date(raw.order_date)?,
        ingestion_date: cell("ingestion_date").date(raw.ingestion_date)?,
        region: raw.region.filter(|r| !is_null_token(r)),
        channel: cell("channel").required(raw.channel)?,
        product_line: cell("product_line").required(raw.product_line)?,
        status: cell("status").required(raw.status)?,
        gross_amount: cell("gross_amount").decimal(raw.gross_amount)?,
    })
}

fn parse_payment(raw: RawPayment, row: usize) -> Result<Payment> {
    let cell = |column: &'static str| Cell {
        table: PAYMENTS_TABLE,
        row,
        column,
    };

    Ok(Payment {
        order_id: cell("order_id").required(raw.order_id)?,
        payment_date: cell("payment_date").date(raw.payment_date)?,
        payment_method: cell("payment_method").required(raw.payment_method)?,
        payment_amount: cell("payment_amount").decimal(raw.payment_amount)?,
    })
}

/// True for blank text or a conventional null marker such as `NA` or `null`.
pub fn is_null_token(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || NULL_TOKENS.contains(&text)
}

/// Parse a calendar date, accepting a plain date or an ISO date-time whose
/// date part is kept.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a decimal amount in plain or scientific notation.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
