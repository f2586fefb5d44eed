#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Tip-split module
//!
//! - `domain::engine` derives tip, total and per-person amounts from a bill snapshot
//! - `domain::session` owns the form, recomputes on every change and gates
//!   suggestion requests behind a busy flag
//! - `infra::llm` asks a Gemini-compatible model for a tip percentage

pub mod config;
pub mod domain;
pub mod infra;

pub use config::{ApiKey, SuggestionConfig};
pub use domain::engine::calculate;
pub use domain::error::{FormField, SuggestionError};
pub use domain::form::BillForm;
pub use domain::session::{SuggestionNotice, SuggestionTicket, TipSession};
pub use infra::llm::GeminiSuggestionClient;
