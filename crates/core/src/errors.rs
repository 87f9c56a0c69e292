//! Validation errors

use thiserror::Error;

/// Errors produced while validating a booking submission.
///
/// Every variant is user-correctable and safe to surface verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or malformed.
    #[error("invalid or missing field: {field}")]
    InvalidInput {
        /// Name of the first offending field.
        field: &'static str,
    },

    /// The booking date is before the current calendar day.
    #[error("booking date has already passed")]
    PastDate,

    /// The booking is for today at a time that has already passed.
    #[error("booking time has already passed")]
    PastTime,

    /// An identical submission was received moments ago.
    #[error("a booking for this email, date and time was just submitted")]
    DuplicateSubmission,
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidInput`].
    #[must_use]
    pub const fn invalid(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }
}
