//! Payment deduplication on the `(order_id, payment_date, payment_method,
//! payment_amount)` key.

use std::collections::HashSet;

use crate::models::Payment;

/// Keep the first row seen for each payment key, in input order.
///
/// Amounts compare by value, so `100.0` and `100.00` collapse together.
pub fn dedup_payments(payments: &[Payment]) -> Vec<Payment> {
    let mut seen = HashSet::with_capacity(payments.len());
    let mut kept = Vec::with_capacity(payments.len());
    for payment in payments {
        if seen.insert(payment.dedup_key()) {
            kept.push(payment.clone());
        }
    }
    kept
}
