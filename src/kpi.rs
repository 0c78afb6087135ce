//! Monthly KPI aggregation over joined orders.
//!
//! Rows are bucketed by `(month, channel, product_line)`, where month is the
//! first day of the order's calendar month. Buckets come out sorted by that
//! key so identical input always yields identical output.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{KpiError, Result};
use crate::models::{JoinedOrder, KpiRow};

/// First day of the month containing `date`.
pub fn month_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Round to two decimal places (half-to-even) and pin the scale at 2.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded
}

#[derive(Default)]
struct Bucket {
    orders_total: usize,
    completed_orders: usize,
    gross_revenue: Decimal,
    collected_revenue: Decimal,
    late_arriving_orders: usize,
}

impl Bucket {
    fn add(&mut self, row: &JoinedOrder) -> Result<()> {
        self.orders_total += 1;
        if row.order.is_completed() {
            self.completed_orders += 1;
        }
        self.gross_revenue = checked_sum(self.gross_revenue, row.order.gross_amount, "gross_revenue")?;
        self.collected_revenue = checked_sum(self.collected_revenue, row.paid_amount, "collected_revenue")?;
        if row.order.is_late_arriving() {
            self.late_arriving_orders += 1;
        }
        Ok(())
    }
}

fn checked_sum(total: Decimal, value: Decimal, what: &str) -> Result<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| KpiError::Overflow(what.to_string()))
}

/// Aggregate joined orders into one [`KpiRow`] per `(month, channel, product_line)`.
///
/// Fails with [`KpiError::Overflow`] if a revenue sum leaves the decimal range.
pub fn monthly_kpis(joined: &[JoinedOrder]) -> Result<Vec<KpiRow>> {
    let mut buckets: BTreeMap<(NaiveDate, &str, &str), Bucket> = BTreeMap::new();

    for row in joined {
        let key = (
            month_of(row.order.order_date),
            row.order.channel.as_str(),
            row.order.product_line.as_str(),
        );
        buckets.entry(key).or_default().add(row)?;
    }

    let rows = buckets
        .into_iter()
        .map(|((month, channel, product_line), b)| KpiRow {
            month,
            channel: channel.to_string(),
            product_line: product_line.to_string(),
            orders_total: b.orders_total,
            completed_orders: b.completed_orders,
            gross_revenue: round_money(b.gross_revenue),
            collected_revenue: round_money(b.collected_revenue),
            late_arriving_orders: b.late_arriving_orders,
        })
        .collect();
    Ok(rows)
}
