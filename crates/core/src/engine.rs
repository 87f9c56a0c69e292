//! Pricing & validation engine
//!
//! Turns an untrusted submission into a validated, fully priced booking intent.
//! Pure by construction: the clock and any candidate voucher are inputs, and the
//! only non-determinism is the random booking-number suffix.

use jiff::Zoned;
use rust_decimal::Decimal;

use crate::{
    booking::{
        AdultGuest, BookingRequest, Minor, PartyRequest, PricedBooking, PricedParty,
        booking_number,
    },
    errors::ValidationError,
    money::{gst_on, round_money},
    pricing::{party_subtotal, session_subtotal},
    sanitize::sanitize_text,
    validate::{check_schedule, is_valid_email, is_valid_mobile, parse_date, parse_time},
    voucher::Voucher,
};

/// Contact fields shared by both entry points, validated and normalised.
struct Contact {
    name: String,
    email: String,
    phone: String,
}

fn validate_contact(name: &str, email: &str, phone: &str) -> Result<Contact, ValidationError> {
    let name = sanitize_text(name);

    if name.is_empty() {
        return Err(ValidationError::invalid("name"));
    }

    let email = email.trim().to_ascii_lowercase();

    if !is_valid_email(&email) {
        return Err(ValidationError::invalid("email"));
    }

    let phone = phone.trim().to_string();

    if !is_valid_mobile(&phone) {
        return Err(ValidationError::invalid("phone"));
    }

    Ok(Contact { name, email, phone })
}

/// Validate and price a session booking.
///
/// `voucher` is the persisted voucher matching the request's code, pre-fetched
/// by the caller; the engine never trusts client-computed discounts. An
/// inapplicable voucher is skipped, not rejected; the booking still succeeds
/// at full price.
///
/// The duplicate-submission guard needs a store lookup and lives with the
/// orchestrator; see [`crate::validate::within_duplicate_window`].
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn price_and_validate(
    request: &BookingRequest,
    voucher: Option<&Voucher>,
    now: &Zoned,
) -> Result<PricedBooking, ValidationError> {
    let contact = validate_contact(&request.name, &request.email, &request.phone)?;

    let date = parse_date(&request.date, "date")?;
    let time = parse_time(&request.time, "time")?;

    let date_of_birth = request
        .date_of_birth
        .as_deref()
        .map(|dob| parse_date(dob, "dateOfBirth"))
        .transpose()?;

    let minors = request
        .minors
        .iter()
        .map(|minor| {
            let name = sanitize_text(&minor.name);

            if name.is_empty() {
                return Err(ValidationError::invalid("minors"));
            }

            Ok(Minor { name, dob: parse_date(&minor.dob, "minors")? })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let adult_guests = request
        .adult_guests
        .iter()
        .map(|guest| {
            let name = sanitize_text(&guest.name);

            if name.is_empty() {
                return Err(ValidationError::invalid("adultGuests"));
            }

            Ok(AdultGuest { name })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_schedule(date, time, now)?;

    let subtotal = session_subtotal(request.adults, request.kids, request.spectators, request.duration);
    let gst = gst_on(subtotal);

    let applicable = voucher.filter(|v| v.check(subtotal, now.timestamp()).is_ok());
    let discount_amount = applicable.map_or(Decimal::ZERO, |v| v.discount_on(subtotal));

    let total_amount = (subtotal + gst - discount_amount).max(Decimal::ZERO);

    Ok(PricedBooking {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        date,
        time,
        duration: request.duration,
        adults: request.adults,
        kids: request.kids,
        spectators: request.spectators,
        minors,
        adult_guests,
        date_of_birth,
        subtotal,
        gst,
        discount_amount,
        total_amount,
        voucher_code: request.voucher_code.as_deref().map(str::trim).map(str::to_string),
        voucher_applied: applicable.is_some(),
        booking_number: booking_number(date, &mut rand::thread_rng()),
    })
}

/// Validate and price a party booking.
///
/// Same validation pipeline as [`price_and_validate`]; party-specific tariff
/// with a free-spectator allowance and a 50% deposit. Vouchers do not apply to
/// party bookings.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn price_party(request: &PartyRequest, now: &Zoned) -> Result<PricedParty, ValidationError> {
    let contact = validate_contact(&request.name, &request.email, &request.phone)?;

    let child_name = sanitize_text(&request.child_name);

    if child_name.is_empty() {
        return Err(ValidationError::invalid("childName"));
    }

    let date = parse_date(&request.date, "date")?;
    let time = parse_time(&request.time, "time")?;

    check_schedule(date, time, now)?;

    let subtotal = party_subtotal(request.participants, request.spectators);
    let gst = gst_on(subtotal);
    let total_amount = subtotal + gst;
    let deposit_amount = round_money(total_amount * Decimal::new(5, 1));

    Ok(PricedParty {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        date,
        time,
        participants: request.participants,
        spectators: request.spectators,
        child_name,
        child_age: request.child_age,
        special_requests: request.special_requests.as_deref().map(sanitize_text),
        subtotal,
        gst,
        total_amount,
        deposit_amount,
        booking_number: booking_number(date, &mut rand::thread_rng()),
    })
}
