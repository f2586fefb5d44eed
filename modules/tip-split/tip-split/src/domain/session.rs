//! Tip-split session
//!
//! Owns the current form, the derived result and the last suggestion. Every
//! field change recomputes the result synchronously. Suggestion requests are
//! split into `begin_suggestion` / `complete_suggestion` so the busy flag is
//! held across the outbound call.

use tip_split_sdk::{
    BillResult, SuggestionRequest, SuggestionResult, TipSplitError, TipSuggestionClientV1,
};
use tracing::{debug, info, warn};

use super::error::{FormField, SuggestionError};
use super::form::BillForm;

const SERVICE_QUALITY_REQUIRED: &str = "Please describe the service quality.";
const BILL_AMOUNT_REQUIRED: &str = "Please enter a valid bill amount first.";
const SUGGESTION_FAILED: &str = "Could not get AI tip suggestion. Please try again.";

/// User-facing notification produced by a suggestion action.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionNotice {
    /// A suggestion arrived; `percent` is on the 0-100 scale.
    Ready { percent: f64 },
    /// The suggestion could not be obtained.
    Failed,
    /// The held suggestion was applied as the new tip percentage.
    TipUpdated { percent: f64 },
}

impl SuggestionNotice {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "AI Suggestion Ready!",
            Self::Failed => "AI Error",
            Self::TipUpdated { .. } => "Tip Updated",
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Ready { percent } => format!("Suggested Tip: {percent:.0}%."),
            Self::Failed => SUGGESTION_FAILED.to_owned(),
            Self::TipUpdated { percent } => format!("Tip percentage set to {percent:.0}%."),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Proof that a suggestion request passed validation and holds the busy flag.
///
/// Hand it back to [`TipSession::complete_suggestion`] once the call finishes.
/// A ticket that is never handed back keeps the session busy; use
/// [`TipSession::request_suggestion`] when the call may be cancelled.
#[derive(Debug)]
#[must_use = "an unfinished ticket leaves the session busy"]
pub struct SuggestionTicket {
    request: SuggestionRequest,
}

impl SuggestionTicket {
    #[must_use]
    pub fn request(&self) -> &SuggestionRequest {
        &self.request
    }
}

/// Releases the busy flag when a suggestion call is abandoned mid-flight.
struct PendingSuggestion<'a> {
    session: &'a mut TipSession,
}

impl Drop for PendingSuggestion<'_> {
    fn drop(&mut self) {
        if self.session.busy {
            debug!("tip suggestion abandoned");
            self.session.busy = false;
        }
    }
}

/// Single-owner bill-splitting session.
#[derive(Debug, Clone)]
pub struct TipSession {
    defaults: BillForm,
    form: BillForm,
    result: Option<BillResult>,
    suggestion: Option<SuggestionResult>,
    busy: bool,
}

impl Default for TipSession {
    fn default() -> Self {
        Self::with_defaults(BillForm::default())
    }
}

impl TipSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose fresh and cleared form is `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: BillForm) -> Self {
        let result = defaults.calculate();
        Self {
            form: defaults.clone(),
            defaults,
            result,
            suggestion: None,
            busy: false,
        }
    }

    #[must_use]
    pub fn form(&self) -> &BillForm {
        &self.form
    }

    #[must_use]
    pub fn result(&self) -> Option<&BillResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&SuggestionResult> {
        self.suggestion.as_ref()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_bill_amount(&mut self, value: Option<f64>) {
        self.form.bill_amount = value;
        self.recompute();
    }

    pub fn set_tip_percentage(&mut self, value: Option<f64>) {
        self.form.tip_percentage = value;
        self.recompute();
    }

    pub fn set_party_size(&mut self, value: Option<u32>) {
        self.form.party_size = value;
        self.recompute();
    }

    pub fn set_round_total(&mut self, value: bool) {
        self.form.round_total = value;
        self.recompute();
    }

    pub fn set_service_quality(&mut self, value: impl Into<String>) {
        self.form.service_quality = value.into();
    }

    /// Validate the form for a suggestion request and take the busy flag.
    ///
    /// Clears any previously held suggestion.
    ///
    /// # Errors
    /// `SuggestionError::Busy` while another request is outstanding;
    /// `SuggestionError::FieldInvalid` when the service description is blank
    /// or the bill amount is missing or not positive.
    pub fn begin_suggestion(&mut self) -> Result<SuggestionTicket, SuggestionError> {
        if self.busy {
            return Err(SuggestionError::Busy);
        }

        let service_quality = self.form.service_quality.trim();
        if service_quality.is_empty() {
            return Err(SuggestionError::field_invalid(
                FormField::ServiceQuality,
                SERVICE_QUALITY_REQUIRED,
            ));
        }

        let bill_amount = self
            .form
            .bill_amount
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| {
                SuggestionError::field_invalid(FormField::BillAmount, BILL_AMOUNT_REQUIRED)
            })?;

        self.busy = true;
        self.suggestion = None;
        debug!(bill_amount, "tip suggestion started");

        Ok(SuggestionTicket {
            request: SuggestionRequest::new(self.form.service_quality.clone(), bill_amount),
        })
    }

    /// Release the busy flag and record the outcome of a suggestion call.
    ///
    /// On failure the tip percentage is left untouched.
    pub fn complete_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        outcome: Result<SuggestionResult, TipSplitError>,
    ) -> SuggestionNotice {
        let SuggestionTicket { request } = ticket;
        self.busy = false;
        debug!(bill_amount = request.bill_amount, "tip suggestion finished");

        match outcome {
            Ok(suggestion) => {
                let percent = suggestion.whole_percent();
                info!(percent, "tip suggestion ready");
                self.suggestion = Some(suggestion);
                SuggestionNotice::Ready { percent }
            }
            Err(e) => {
                warn!(error = %e, "tip suggestion failed");
                SuggestionNotice::Failed
            }
        }
    }

    /// Request a suggestion from `client`: validate, call once, record the outcome.
    ///
    /// Dropping the returned future while the call is pending releases the
    /// busy flag. The form is untouched and no suggestion is held.
    ///
    /// # Errors
    /// Returns `SuggestionError` when the request is refused before the call.
    /// Service failures are not errors here; they yield `SuggestionNotice::Failed`.
    pub async fn request_suggestion(
        &mut self,
        client: &dyn TipSuggestionClientV1,
    ) -> Result<SuggestionNotice, SuggestionError> {
        let ticket = self.begin_suggestion()?;
        let mut pending = PendingSuggestion { session: self };
        let outcome = client.suggest(ticket.request()).await;
        Ok(pending.session.complete_suggestion(ticket, outcome))
    }

    /// Overwrite the tip percentage with the held suggestion, if any.
    pub fn apply_suggestion(&mut self) -> Option<SuggestionNotice> {
        let suggestion = self.suggestion.as_ref()?;
        let tip_percentage = suggestion.as_tip_percentage();
        let percent = suggestion.whole_percent();
        self.set_tip_percentage(Some(tip_percentage));
        info!(tip_percentage, "tip suggestion applied");
        Some(SuggestionNotice::TipUpdated { percent })
    }

    /// Reset the form to its defaults and drop the suggestion.
    ///
    /// The result is recomputed from the defaults, which carry no bill amount,
    /// so it is cleared as well.
    pub fn clear_all(&mut self) {
        self.form = self.defaults.clone();
        self.suggestion = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = self.form.calculate();
    }
}
