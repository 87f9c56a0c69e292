//! Booking QR codes
//!
//! Renders the check-in payload as a PNG data URL. Attachment to the booking
//! row is a best-effort follow-up write; see the bookings service.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Luma};
use jiff::civil::{Date, Time};
use qrcode::{EcLevel, QrCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Check-in payload embedded in the QR image.
#[derive(Debug, Serialize)]
struct QrPayload<'a> {
    id: Uuid,
    name: &'a str,
    date: Date,
    time: Time,
    guests: u64,
}

#[derive(Debug, Error)]
pub enum QrError {
    #[error("failed to encode QR payload")]
    Payload(#[from] serde_json::Error),

    #[error("failed to build QR code")]
    Encode(#[from] qrcode::types::QrError),

    #[error("failed to render QR image")]
    Image(#[from] image::ImageError),
}

/// Render a booking's check-in QR code as a `data:image/png;base64,…` URL.
///
/// Error-correction level H, at least 300px on a side, with a quiet zone.
///
/// # Errors
///
/// Returns a [`QrError`] when payload serialisation, QR encoding or PNG
/// rendering fails.
pub fn booking_qr_data_url(
    id: Uuid,
    name: &str,
    date: Date,
    time: Time,
    guests: u64,
) -> Result<String, QrError> {
    let payload = serde_json::to_string(&QrPayload { id, name, date, time, guests })?;

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(300, 300)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();

    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn renders_a_png_data_url() -> TestResult {
        let url = booking_qr_data_url(
            Uuid::now_v7(),
            "Asha Rao",
            date(2026, 3, 8),
            time(15, 30, 0, 0),
            4,
        )?;

        let encoded = url
            .strip_prefix("data:image/png;base64,")
            .ok_or("missing data URL prefix")?;

        let bytes = STANDARD.decode(encoded)?;

        assert_eq!(bytes.get(..4), Some(&b"\x89PNG"[..]), "PNG magic bytes");

        Ok(())
    }
}
