//! Errors

use tracing::error;

use bounce::errors::ValidationError;
use bounce_app::domain::bookings::BookingsServiceError;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: BookingsServiceError) -> ApiError {
    match error {
        BookingsServiceError::Validation(ValidationError::DuplicateSubmission) => {
            ApiError::conflict(ValidationError::DuplicateSubmission.to_string())
        }
        BookingsServiceError::Validation(validation) => {
            ApiError::bad_request(validation.to_string())
        }
        BookingsServiceError::AlreadyExists => {
            ApiError::conflict("a matching booking was just submitted")
        }
        BookingsServiceError::BookingNumberExhausted => {
            error!("booking number allocation exhausted");

            ApiError::internal()
        }
        BookingsServiceError::WaiverEncoding(source) => {
            error!("failed to encode waiver: {source}");

            ApiError::internal()
        }
        BookingsServiceError::Sql(source) => {
            error!("failed to persist booking: {source}");

            ApiError::internal()
        }
    }
}
