//! Structural and temporal validation
//!
//! Pure checks over untrusted submission fields. The current time is always an
//! explicit parameter; nothing here reads a clock.

use jiff::{
    Timestamp, Zoned,
    civil::{Date, Time},
};

use crate::errors::ValidationError;

/// Window within which a repeat (email, date, time) submission is treated as an
/// accidental double-submit.
pub const DUPLICATE_WINDOW_SECS: i64 = 5 * 60;

/// Syntactic email check: one `@`, non-empty local part, dotted domain, no
/// whitespace. Deliverability is not verified.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}

/// Indian mobile number check: exactly ten digits, leading digit 6-9.
#[must_use]
pub fn is_valid_mobile(phone: &str) -> bool {
    let phone = phone.trim();

    phone.len() == 10
        && phone.chars().all(|c| c.is_ascii_digit())
        && phone.starts_with(['6', '7', '8', '9'])
}

/// Parse an ISO `YYYY-MM-DD` date field.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInput`] citing `field` when the value does
/// not parse as a calendar date.
pub fn parse_date(value: &str, field: &'static str) -> Result<Date, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_ignored: jiff::Error| ValidationError::invalid(field))
}

/// Parse an `HH:MM` time field.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidInput`] citing `field` when the value is
/// not a valid 24-hour wall-clock time.
pub fn parse_time(value: &str, field: &'static str) -> Result<Time, ValidationError> {
    let Some((hour, minute)) = value.trim().split_once(':') else {
        return Err(ValidationError::invalid(field));
    };

    let hour: i8 = hour.parse().map_err(|_ignored| ValidationError::invalid(field))?;
    let minute: i8 = minute.parse().map_err(|_ignored| ValidationError::invalid(field))?;

    Time::new(hour, minute, 0, 0).map_err(|_ignored| ValidationError::invalid(field))
}

/// Reject bookings scheduled in the past.
///
/// Dates are compared at day granularity; for same-day bookings the time is
/// compared at minute granularity against the current wall clock.
///
/// # Errors
///
/// - [`ValidationError::PastDate`] when `date` is before today.
/// - [`ValidationError::PastTime`] when `date` is today and `time` has passed.
pub fn check_schedule(date: Date, time: Time, now: &Zoned) -> Result<(), ValidationError> {
    let today = now.date();

    if date < today {
        return Err(ValidationError::PastDate);
    }

    if date == today {
        let current = now.time();

        if (time.hour(), time.minute()) < (current.hour(), current.minute()) {
            return Err(ValidationError::PastTime);
        }
    }

    Ok(())
}

/// Whether a previous identical submission falls inside the duplicate window.
///
/// This is a heuristic double-submit guard, not a strong idempotency key.
#[must_use]
pub fn within_duplicate_window(previous_created_at: Timestamp, now: Timestamp) -> bool {
    now.as_second() - previous_created_at.as_second() < DUPLICATE_WINDOW_SECS
}
