//! Public models for the tip-split module.
//!
//! These are transport-agnostic data structures shared by the calculation
//! engine, the suggestion client and their consumers.

use serde::{Deserialize, Serialize};

/// One snapshot of the bill form, ready for calculation.
///
/// `tip_percentage` uses the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    pub bill_amount: f64,
    pub tip_percentage: f64,
    pub party_size: u32,
    pub round_total: bool,
}

impl BillInput {
    #[must_use]
    pub fn new(bill_amount: f64, tip_percentage: f64, party_size: u32, round_total: bool) -> Self {
        Self {
            bill_amount,
            tip_percentage,
            party_size,
            round_total,
        }
    }

    /// Whether every field is inside its domain.
    ///
    /// The bill must be finite and positive, the tip finite and non-negative,
    /// and the party must have at least one person.
    #[must_use]
    pub fn is_computable(&self) -> bool {
        self.bill_amount.is_finite()
            && self.bill_amount > 0.0
            && self.tip_percentage.is_finite()
            && self.tip_percentage >= 0.0
            && self.party_size >= 1
    }
}

/// Derived amounts for one `BillInput`. Values carry full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResult {
    pub tip_amount: f64,
    pub total_amount: f64,
    pub amount_per_person: f64,
}

/// Payload sent to the suggestion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub service_quality: String,
    pub bill_amount: f64,
}

impl SuggestionRequest {
    #[must_use]
    pub fn new(service_quality: impl Into<String>, bill_amount: f64) -> Self {
        Self {
            service_quality: service_quality.into(),
            bill_amount,
        }
    }
}

/// Suggestion returned by the service.
///
/// `suggested_tip_percentage` uses the 0-1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub suggested_tip_percentage: f64,
    pub reasoning: String,
}

impl SuggestionResult {
    /// Whether the percentage is a finite value in `[0, 1]`.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        self.suggested_tip_percentage.is_finite()
            && (0.0..=1.0).contains(&self.suggested_tip_percentage)
    }

    /// The suggestion on the 0-100 input scale, rounded to two decimals.
    ///
    /// Rounds the 0-100 value itself, judging ties on its exact decimal
    /// expansion and rounding them upward, so `0.00195` (which scales to
    /// `0.19499...`) stays at `0.19`.
    #[must_use]
    pub fn as_tip_percentage(&self) -> f64 {
        let percent = self.suggested_tip_percentage * 100.0;
        // hi + lo is exactly percent * 100.
        let hi = percent * 100.0;
        let lo = percent.mul_add(100.0, -hi);
        let whole = hi.floor();
        let hundredths = if (hi - whole) - 0.5 >= -lo {
            whole + 1.0
        } else {
            whole
        };
        hundredths / 100.0
    }

    /// The suggestion as a whole percent, for display.
    #[must_use]
    pub fn whole_percent(&self) -> f64 {
        (self.suggested_tip_percentage * 100.0).round()
    }
}
