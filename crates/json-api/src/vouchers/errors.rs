//! Errors

use tracing::error;

use bounce_app::domain::vouchers::VouchersServiceError;

use crate::response::ApiError;

pub(crate) fn into_api_error(error: VouchersServiceError) -> ApiError {
    match error {
        VouchersServiceError::InvalidCode => ApiError::not_found("invalid voucher code"),
        VouchersServiceError::NotApplicable(issue) => ApiError::unprocessable(issue.to_string()),
        VouchersServiceError::AlreadyExists => ApiError::conflict("voucher code already exists"),
        VouchersServiceError::Sql(source) => {
            error!("voucher lookup failed: {source}");

            ApiError::internal()
        }
    }
}
