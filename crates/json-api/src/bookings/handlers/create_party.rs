//! Create Party Booking Handler

use std::sync::Arc;

use jiff::Zoned;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bounce::booking::PartyRequest;

use crate::{bookings::errors::into_api_error, extensions::*, response::ApiError, state::State};

/// Create Party Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePartyRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Party date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Slot start time, `HH:MM`.
    pub time: String,
    pub participants: u32,
    pub spectators: u32,
    pub child_name: String,
    pub child_age: u8,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl From<CreatePartyRequest> for PartyRequest {
    fn from(request: CreatePartyRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: request.date,
            time: request.time,
            participants: request.participants,
            spectators: request.spectators,
            child_name: request.child_name,
            child_age: request.child_age,
            special_requests: request.special_requests,
        }
    }
}

/// Party Booking Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartyCreatedResponse {
    pub success: bool,
    /// Created booking UUID
    pub booking_id: Uuid,
    /// Human-facing booking number, `NIP-YYYYMMDD-XXXX`.
    pub booking_number: String,
    /// Total amount including GST, rupees.
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub amount: Decimal,
    /// 50% deposit due to confirm the slot, rupees.
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub deposit_amount: Decimal,
}

/// Create Party Booking Handler
#[endpoint(
    tags("bookings"),
    summary = "Create Party Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Party booking created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePartyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PartyCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let confirmation = state
        .app
        .bookings
        .create_party_booking(json.into_inner().into(), Zoned::now())
        .await
        .map_err(into_api_error)?;

    res.add_header(
        LOCATION,
        format!("/party-bookings/{}", confirmation.booking_id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(PartyCreatedResponse {
        success: true,
        booking_id: confirmation.booking_id,
        booking_number: confirmation.booking_number,
        amount: confirmation.amount,
        deposit_amount: confirmation.deposit_amount,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bounce::errors::ValidationError;
    use bounce_app::domain::bookings::{MockBookingsService, models::PartyConfirmation};

    use crate::{response::ErrorBody, test_helpers::bookings_service};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("party-bookings").post(handler))
    }

    fn request_body() -> serde_json::Value {
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "date": "2026-10-03",
            "time": "11:00",
            "participants": 12,
            "spectators": 15,
            "childName": "Veer",
            "childAge": 7,
        })
    }

    #[tokio::test]
    async fn test_create_party_booking_success() -> TestResult {
        let booking_id = Uuid::now_v7();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_party_booking()
            .once()
            .withf(|request, _now| {
                request.participants == 12 && request.child_name == "Veer"
            })
            .return_once(move |_, _| {
                Ok(PartyConfirmation {
                    booking_id,
                    booking_number: "NIP-20261003-0917".to_string(),
                    amount: Decimal::new(21830, 0),
                    deposit_amount: Decimal::new(10915, 0),
                })
            });

        let mut res = TestClient::post("http://example.com/party-bookings")
            .json(&request_body())
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: PartyCreatedResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.booking_id, booking_id);
        assert_eq!(body.amount, Decimal::from(21830));
        assert_eq!(body.deposit_amount, Decimal::from(10915));

        Ok(())
    }

    #[test]
    fn amounts_serialize_as_json_numbers() -> TestResult {
        let body = serde_json::to_value(PartyCreatedResponse {
            success: true,
            booking_id: Uuid::nil(),
            booking_number: "NIP-20261003-0917".to_string(),
            amount: Decimal::new(21830, 0),
            deposit_amount: Decimal::new(10915, 0),
        })?;

        assert!(body["amount"].is_number(), "got {body}");
        assert_eq!(body["amount"], serde_json::json!(21830.0));
        assert_eq!(body["depositAmount"], serde_json::json!(10915.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_mobile_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_party_booking()
            .once()
            .return_once(|_, _| Err(ValidationError::invalid("phone").into()));

        let mut res = TestClient::post("http://example.com/party-bookings")
            .json(&request_body())
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "invalid or missing field: phone");

        Ok(())
    }
}
