//! Domain error types for the tip-split module.

use std::fmt;

use thiserror::Error;

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BillAmount,
    ServiceQuality,
}

impl FormField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BillAmount => "billAmount",
            Self::ServiceQuality => "serviceQuality",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a suggestion request is refused before reaching the service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// Another suggestion request is still outstanding.
    #[error("a tip suggestion is already in progress")]
    Busy,

    /// A form field fails the request preconditions.
    #[error("{field}: {message}")]
    FieldInvalid { field: FormField, message: String },
}

impl SuggestionError {
    /// Creates a `FieldInvalid` error.
    #[must_use]
    pub fn field_invalid(field: FormField, message: impl Into<String>) -> Self {
        Self::FieldInvalid {
            field,
            message: message.into(),
        }
    }
}
