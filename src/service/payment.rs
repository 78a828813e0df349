//! Paid/unpaid transition for invoices.

use chrono::{DateTime, Utc};

/// Compute the `paid_date` an invoice should carry after an update.
///
/// - unpaid -> paid: stamped with `now`
/// - anything -> unpaid: cleared
/// - paid -> paid: the existing stamp is kept
pub fn next_paid_date(
    current: Option<DateTime<Utc>>,
    paid: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (current, paid) {
        (_, false) => None,
        (None, true) => Some(now),
        (Some(existing), true) => Some(existing),
    }
}
