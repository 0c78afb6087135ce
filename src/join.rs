//! Per-order payment totals and the left join onto orders.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{KpiError, Result};
use crate::models::{JoinedOrder, Order, Payment};

/// Sum `payment_amount` per `order_id`.
///
/// Expects deduplicated payments; duplicates would be counted twice.
/// Fails with [`KpiError::Overflow`] if a total leaves the decimal range.
pub fn paid_by_order(payments: &[Payment]) -> Result<HashMap<String, Decimal>> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for p in payments {
        let total = totals.entry(p.order_id.clone()).or_default();
        *total = total
            .checked_add(p.payment_amount)
            .ok_or_else(|| KpiError::Overflow(format!("payments for order {}", p.order_id)))?;
    }
    Ok(totals)
}

/// Left-join payment totals onto orders, keeping order input order.
///
/// Orders without payments get a zero `paid_amount`. Totals for order ids
/// that are not in `orders` are dropped.
pub fn join_payments(orders: &[Order], paid: &HashMap<String, Decimal>) -> Vec<JoinedOrder> {
    orders
        .iter()
        .map(|order| JoinedOrder {
            paid_amount: paid.get(&order.order_id).copied().unwrap_or(Decimal::ZERO),
            order: order.clone(),
        })
        .collect()
}
