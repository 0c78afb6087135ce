//! Data-quality metrics over the raw input tables.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::dedup::dedup_payments;
use crate::kpi::round_money;
use crate::models::{Order, Payment, QualityReport};

/// Compute the quality report for raw (not yet deduplicated) inputs.
pub fn check(orders: &[Order], payments: &[Payment]) -> QualityReport {
    let dedup_rows = dedup_payments(payments).len();
    report(orders, payments.len(), dedup_rows)
}

/// Build the report when the deduplicated payment count is already known.
pub(crate) fn report(orders: &[Order], payments_total: usize, payments_dedup: usize) -> QualityReport {
    let unique_ids: HashSet<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();

    QualityReport {
        orders_total_rows: orders.len(),
        orders_unique_order_id: unique_ids.len(),
        orders_missing_region_pct: missing_region_pct(orders),
        payments_total_rows: payments_total,
        payments_dedup_rows: payments_dedup,
        payments_duplicate_rows: payments_total - payments_dedup,
    }
}

/// Share of orders with no region, as a percentage rounded to 2 places.
pub fn missing_region_pct(orders: &[Order]) -> Decimal {
    if orders.is_empty() {
        return round_money(Decimal::ZERO);
    }
    let missing = orders.iter().filter(|o| o.region.is_none()).count();
    round_money(Decimal::from(missing) * Decimal::ONE_HUNDRED / Decimal::from(orders.len()))
}

/// Count payments whose `order_id` matches no order.
///
/// These rows vanish in the left join, so they are reported separately.
pub fn orphan_payments(orders: &[Order], payments: &[Payment]) -> usize {
    let ids: HashSet<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
    payments
        .iter()
        .filter(|p| !ids.contains(p.order_id.as_str()))
        .count()
}
