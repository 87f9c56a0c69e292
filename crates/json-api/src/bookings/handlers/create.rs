//! Create Booking Handler

use std::sync::Arc;

use jiff::Zoned;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bounce::booking::{AdultGuestInput, BookingRequest, Duration, MinorInput};

use crate::{bookings::errors::into_api_error, extensions::*, response::ApiError, state::State};

/// Session length accepted on the wire, minutes as a string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) enum DurationBody {
    #[serde(rename = "60")]
    Standard,
    #[serde(rename = "120")]
    Extended,
}

impl From<DurationBody> for Duration {
    fn from(duration: DurationBody) -> Self {
        match duration {
            DurationBody::Standard => Self::Standard,
            DurationBody::Extended => Self::Extended,
        }
    }
}

/// A minor listed on the waiver.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MinorBody {
    pub name: String,
    /// Date of birth, ISO `YYYY-MM-DD`.
    pub dob: String,
}

/// An accompanying adult listed on the waiver.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdultGuestBody {
    pub name: String,
}

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Booking date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Slot start time, `HH:MM`.
    pub time: String,
    pub duration: DurationBody,
    pub adults: u32,
    pub kids: u32,
    pub spectators: u32,
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub minors: Vec<MinorBody>,
    #[serde(default)]
    pub adult_guests: Vec<AdultGuestBody>,
    /// Signer's date of birth, ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(request: CreateBookingRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: request.date,
            time: request.time,
            duration: request.duration.into(),
            adults: request.adults,
            kids: request.kids,
            spectators: request.spectators,
            voucher_code: request.voucher_code,
            minors: request
                .minors
                .into_iter()
                .map(|minor| MinorInput {
                    name: minor.name,
                    dob: minor.dob,
                })
                .collect(),
            adult_guests: request
                .adult_guests
                .into_iter()
                .map(|guest| AdultGuestInput { name: guest.name })
                .collect(),
            date_of_birth: request.date_of_birth,
        }
    }
}

/// Booking Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingCreatedResponse {
    pub success: bool,
    /// Created booking UUID
    pub booking_id: Uuid,
    /// Human-facing booking number, `NIP-YYYYMMDD-XXXX`.
    pub booking_number: String,
}

/// Create Booking Handler
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let confirmation = state
        .app
        .bookings
        .create_booking(json.into_inner().into(), Zoned::now())
        .await
        .map_err(into_api_error)?;

    res.add_header(
        LOCATION,
        format!("/bookings/{}", confirmation.booking_id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(BookingCreatedResponse {
        success: true,
        booking_id: confirmation.booking_id,
        booking_number: confirmation.booking_number,
    }))
}
