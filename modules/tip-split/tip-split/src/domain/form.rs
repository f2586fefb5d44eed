//! Raw bill form state.

use tip_split_sdk::{BillInput, BillResult};

use super::engine;

/// Tip percentage pre-filled in a fresh form.
pub const DEFAULT_TIP_PERCENTAGE: f64 = 15.0;

/// Party size pre-filled in a fresh form.
pub const DEFAULT_PARTY_SIZE: u32 = 1;

/// Form fields as entered. `None` means the field is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BillForm {
    pub bill_amount: Option<f64>,
    pub tip_percentage: Option<f64>,
    pub party_size: Option<u32>,
    pub service_quality: String,
    pub round_total: bool,
}

impl Default for BillForm {
    fn default() -> Self {
        Self {
            bill_amount: None,
            tip_percentage: Some(DEFAULT_TIP_PERCENTAGE),
            party_size: Some(DEFAULT_PARTY_SIZE),
            service_quality: String::new(),
            round_total: false,
        }
    }
}

impl BillForm {
    /// Fresh form with custom pre-filled tip percentage and party size.
    #[must_use]
    pub fn with_defaults(tip_percentage: f64, party_size: u32) -> Self {
        Self {
            tip_percentage: Some(tip_percentage),
            party_size: Some(party_size),
            ..Self::default()
        }
    }

    /// Snapshot the form for calculation, or `None` if a field is empty or out of domain.
    #[must_use]
    pub fn to_input(&self) -> Option<BillInput> {
        let input = BillInput::new(
            self.bill_amount?,
            self.tip_percentage?,
            self.party_size?,
            self.round_total,
        );
        input.is_computable().then_some(input)
    }

    #[must_use]
    pub fn calculate(&self) -> Option<BillResult> {
        self.to_input().as_ref().and_then(engine::calculate)
    }
}
