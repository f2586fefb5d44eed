//! Calculation engine
//!
//! Pure derivation of tip, total and per-person amounts from a `BillInput`.

use tip_split_sdk::{BillInput, BillResult};
use tracing::debug;

/// Derive the split for one bill snapshot.
///
/// Returns `None` when the snapshot is not computable (see
/// [`BillInput::is_computable`]). With `round_total` set, the total is rounded
/// to the nearest whole unit and the tip is re-derived from it, so rounding
/// never touches the bill itself. A tip pushed below zero by rounding is
/// clamped to zero; the total keeps its rounded value.
#[must_use]
pub fn calculate(input: &BillInput) -> Option<BillResult> {
    if !input.is_computable() {
        debug!(?input, "bill input not computable");
        return None;
    }

    let raw_tip = input.bill_amount * (input.tip_percentage / 100.0);
    let raw_total = input.bill_amount + raw_tip;

    let (total_amount, tip_amount) = if input.round_total {
        let total = round_to_unit(raw_total);
        (total, total - input.bill_amount)
    } else {
        (raw_total, raw_tip)
    };
    let tip_amount = tip_amount.max(0.0);

    let amount_per_person = total_amount / f64::from(input.party_size);

    debug!(tip_amount, total_amount, amount_per_person, "bill split calculated");

    Some(BillResult {
        tip_amount,
        total_amount,
        amount_per_person,
    })
}

/// Round to the nearest whole unit. Ties go away from zero, which is upward
/// for the positive totals that reach this point.
fn round_to_unit(value: f64) -> f64 {
    value.round()
}
