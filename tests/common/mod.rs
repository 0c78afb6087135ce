//! Shared fixtures for the integration tests.
//!
//! Provides typed record constructors and helpers that write small order and
//! payment exports into a temporary directory.

#![allow(dead_code)]

use chrono::NaiveDate;
use kpi_trends::models::{Order, Payment};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

pub const ORDERS_HEADER: &str =
    "order_id,order_date,ingestion_date,region,channel,product_line,status,gross_amount";
pub const PAYMENTS_HEADER: &str = "order_id,payment_date,payment_method,payment_amount";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn order(
    id: &str,
    order_date: &str,
    ingestion_date: &str,
    channel: &str,
    product_line: &str,
    status: &str,
    gross: Decimal,
) -> Order {
    Order {
        order_id: id.to_string(),
        order_date: date(order_date),
        ingestion_date: date(ingestion_date),
        region: Some("US".to_string()),
        channel: channel.to_string(),
        product_line: product_line.to_string(),
        status: status.to_string(),
        gross_amount: gross,
    }
}

pub fn payment(order_id: &str, payment_date: &str, method: &str, amount: Decimal) -> Payment {
    Payment {
        order_id: order_id.to_string(),
        payment_date: date(payment_date),
        payment_method: method.to_string(),
        payment_amount: amount,
    }
}

/// Write `header` plus `rows` as a CSV file under `dir` and return its path.
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut body = String::from(header);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(&path, body).unwrap();
    path
}

/// A small, realistic export pair: two months, two channels, one duplicate
/// payment, one order without payments, one missing region, one late order.
///
/// Returns `(tempdir, orders_path, payments_path)`. Keep the `TempDir` alive
/// for the duration of the test.
pub fn sample_exports() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let orders = write_csv(
        tmp.path(),
        "orders.csv",
        ORDERS_HEADER,
        &[
            "1001,2024-01-05,2024-01-05,US,web,Widgets,Completed,100.00",
            "1002,2024-01-20,2024-01-22,EU,web,Widgets,Cancelled,50.25",
            "1003,2024-01-31,2024-01-31,,store,Gadgets,Completed,80.10",
            "1004,2024-02-01,2024-02-01,US,web,Widgets,completed,19.99",
            "1005,2024-02-14,2024-02-15,APAC,store,Gadgets,Completed,200.005",
        ],
    );
    let payments = write_csv(
        tmp.path(),
        "payments.csv",
        PAYMENTS_HEADER,
        &[
            "1001,2024-01-06,card,100.00",
            "1001,2024-01-06,card,100.00",
            "1002,2024-01-21,paypal,20.00",
            "1002,2024-01-25,paypal,30.25",
            "1004,2024-02-02,card,19.99",
            "1005,2024-02-15,card,100.00",
            "1005,2024-02-16,card,100.00",
            "9999,2024-02-16,card,5.00",
        ],
    );
    (tmp, orders, payments)
}
