//! Validate Voucher Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, response::ApiError, state::State, vouchers::errors::into_api_error};

/// Validate Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateVoucherRequest {
    pub code: String,
    /// Proposed order subtotal, rupees.
    pub order_amount: f64,
}

/// Voucher Quote Response
///
/// Advisory only; vouchers are re-validated when the booking is created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoucherQuoteResponse {
    pub success: bool,
    /// Discount the voucher would grant on this order, rupees.
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub discount: Decimal,
    /// `PERCENTAGE` or `FIXED`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The configured discount value (percentage points or rupees).
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub value: Decimal,
}

/// Validate Voucher Handler
#[endpoint(
    tags("vouchers"),
    summary = "Validate Voucher",
    responses(
        (status_code = StatusCode::OK, description = "Voucher applies to the order"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateVoucherRequest>,
    depot: &mut Depot,
) -> Result<Json<VoucherQuoteResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let order_amount = Decimal::try_from(request.order_amount)
        .map_err(|_ignored| ApiError::bad_request("orderAmount must be a valid amount"))?;

    let quote = state
        .app
        .vouchers
        .validate_voucher(request.code, order_amount, Timestamp::now())
        .await
        .map_err(into_api_error)?;

    Ok(Json(VoucherQuoteResponse {
        success: true,
        discount: quote.discount,
        kind: quote.discount_type.to_string(),
        value: quote.value,
    }))
}
