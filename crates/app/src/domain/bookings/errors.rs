//! Bookings service errors.

use bounce::errors::ValidationError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    /// The submission failed validation; safe to surface verbatim.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness constraint fired on insert.
    #[error("duplicate booking")]
    AlreadyExists,

    /// Every booking-number candidate collided with an existing record.
    #[error("could not allocate a unique booking number")]
    BookingNumberExhausted,

    #[error("failed to encode waiver")]
    WaiverEncoding(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}
