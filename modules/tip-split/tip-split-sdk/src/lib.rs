#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Tip-split SDK
//!
//! This crate provides the public contract of the tip-split module:
//! - Bill models (`BillInput`, `BillResult`)
//! - Suggestion boundary models (`SuggestionRequest`, `SuggestionResult`)
//! - Suggestion client trait (`TipSuggestionClientV1`)
//! - Error type (`TipSplitError`)
//!
//! ## Usage
//!
//! ```ignore
//! use tip_split_sdk::{SuggestionRequest, TipSuggestionClientV1};
//!
//! let request = SuggestionRequest::new("Attentive and friendly", 84.20);
//! let suggestion = client.suggest(&request).await?;
//! println!("{:.0}%", suggestion.suggested_tip_percentage * 100.0);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::TipSuggestionClientV1;
pub use error::TipSplitError;
pub use models::{BillInput, BillResult, SuggestionRequest, SuggestionResult};
