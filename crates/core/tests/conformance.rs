//! Pricing conformance scenarios
//!
//! End-to-end checks of the published tariff and validation behaviour.

use jiff::Zoned;
use rust_decimal::Decimal;
use testresult::TestResult;

use bounce::{
    booking::{BookingRequest, Duration, PartyRequest},
    engine::{price_and_validate, price_party},
    errors::ValidationError,
    money::gst_on,
    pricing::session_subtotal,
    voucher::{Voucher, VoucherDiscount},
};

fn now() -> TestResult<Zoned> {
    Ok("2026-03-07T10:00:00+05:30[Asia/Kolkata]".parse()?)
}

fn session_request() -> BookingRequest {
    BookingRequest {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        date: "2026-03-08".to_string(),
        time: "15:30".to_string(),
        duration: Duration::Standard,
        adults: 2,
        kids: 1,
        spectators: 1,
        voucher_code: None,
        minors: Vec::new(),
        adult_guests: Vec::new(),
        date_of_birth: None,
    }
}

#[test]
fn published_session_scenario() -> TestResult {
    // adults=2, kids=1, spectators=1, 60 minutes, no voucher.
    let priced = price_and_validate(&session_request(), None, &now()?)?;

    assert_eq!(priced.subtotal, Decimal::from(2448));
    assert_eq!(priced.gst, Decimal::new(440_64, 2));
    assert_eq!(priced.total_amount, Decimal::new(2888_64, 2));
    assert_eq!(priced.discount_amount, Decimal::ZERO);

    Ok(())
}

#[test]
fn session_total_formula_holds_across_party_sizes() -> TestResult {
    let now = now()?;

    for (adults, kids, spectators) in [(0, 0, 0), (1, 0, 0), (0, 4, 2), (3, 2, 5), (10, 10, 10)] {
        for duration in [Duration::Standard, Duration::Extended] {
            let mut request = session_request();
            request.adults = adults;
            request.kids = kids;
            request.spectators = spectators;
            request.duration = duration;

            let priced = price_and_validate(&request, None, &now)?;

            let surcharge = match duration {
                Duration::Standard => 0,
                Duration::Extended => (kids + adults) * 500,
            };
            let expected_subtotal =
                Decimal::from(kids * 500 + adults * 899 + spectators * 150 + surcharge);

            assert_eq!(priced.subtotal, expected_subtotal);
            assert_eq!(priced.gst, gst_on(expected_subtotal));
            assert_eq!(priced.total_amount, expected_subtotal + gst_on(expected_subtotal));
        }
    }

    Ok(())
}

#[test]
fn session_total_formula_holds_at_count_extremes() -> TestResult {
    let mut request = session_request();
    request.adults = u32::MAX;
    request.kids = 1;
    request.duration = Duration::Extended;

    let priced = price_and_validate(&request, None, &now()?)?;

    let adults = Decimal::from(u32::MAX);
    let expected_subtotal = Decimal::from(500)
        + adults * Decimal::from(899)
        + Decimal::from(150)
        + (adults + Decimal::ONE) * Decimal::from(500);

    assert_eq!(priced.subtotal, expected_subtotal);
    assert_eq!(priced.subtotal, session_subtotal(u32::MAX, 1, 1, Duration::Extended));
    assert_eq!(priced.total_amount, expected_subtotal + gst_on(expected_subtotal));

    Ok(())
}

#[test]
fn published_party_scenario() -> TestResult {
    let request = PartyRequest {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        date: "2026-03-08".to_string(),
        time: "11:00".to_string(),
        participants: 12,
        spectators: 15,
        child_name: "Veer".to_string(),
        child_age: 7,
        special_requests: None,
    };

    let priced = price_party(&request, &now()?)?;

    assert_eq!(priced.subtotal, Decimal::from(18_500));
    assert_eq!(priced.gst, Decimal::from(3330));
    assert_eq!(priced.total_amount, Decimal::from(21_830));
    assert_eq!(priced.deposit_amount, Decimal::from(10_915));

    Ok(())
}

#[test]
fn percentage_voucher_discounts_subtotal() -> TestResult {
    let voucher = Voucher {
        is_active: true,
        expiry_date: None,
        usage_limit: Some(100),
        used_count: 3,
        min_order_amount: Some(Decimal::from(2000)),
        discount: VoucherDiscount::PercentageOff { percentage: Decimal::from(10) },
    };

    let mut request = session_request();
    request.voucher_code = Some("WELCOME10".to_string());

    let priced = price_and_validate(&request, Some(&voucher), &now()?)?;

    assert!(priced.voucher_applied);
    assert_eq!(priced.discount_amount, Decimal::new(244_80, 2));
    assert_eq!(priced.total_amount, Decimal::new(2888_64, 2) - Decimal::new(244_80, 2));

    Ok(())
}

#[test]
fn oversized_fixed_voucher_cannot_push_total_negative() -> TestResult {
    let voucher = Voucher {
        is_active: true,
        expiry_date: None,
        usage_limit: None,
        used_count: 0,
        min_order_amount: None,
        discount: VoucherDiscount::AmountOff { amount: Decimal::from(1_000_000) },
    };

    let mut request = session_request();
    request.voucher_code = Some("MEGA".to_string());

    let priced = price_and_validate(&request, Some(&voucher), &now()?)?;

    // Discount is capped at the subtotal; GST is still owed.
    assert_eq!(priced.discount_amount, priced.subtotal);
    assert_eq!(priced.total_amount, priced.gst);
    assert!(priced.total_amount >= Decimal::ZERO);

    Ok(())
}

#[test]
fn exhausted_voucher_is_never_applied() -> TestResult {
    let voucher = Voucher {
        is_active: true,
        expiry_date: None,
        usage_limit: Some(5),
        used_count: 5,
        min_order_amount: None,
        discount: VoucherDiscount::PercentageOff { percentage: Decimal::from(50) },
    };

    let mut request = session_request();
    request.voucher_code = Some("HALF".to_string());

    let priced = price_and_validate(&request, Some(&voucher), &now()?)?;

    assert!(!priced.voucher_applied);
    assert_eq!(priced.discount_amount, Decimal::ZERO);

    Ok(())
}

#[test]
fn yesterday_always_fails_with_past_date() -> TestResult {
    let mut request = session_request();
    request.date = "2026-03-06".to_string();

    assert_eq!(
        price_and_validate(&request, None, &now()?),
        Err(ValidationError::PastDate),
    );

    Ok(())
}

#[test]
fn same_day_time_boundaries() -> TestResult {
    let now = now()?; // 10:00 local

    let mut request = session_request();
    request.date = "2026-03-07".to_string();

    request.time = "09:59".to_string();
    assert_eq!(price_and_validate(&request, None, &now), Err(ValidationError::PastTime));

    request.time = "10:01".to_string();
    assert!(price_and_validate(&request, None, &now).is_ok());

    Ok(())
}

#[test]
fn booking_number_matches_pattern_for_booking_date() -> TestResult {
    let priced = price_and_validate(&session_request(), None, &now()?)?;

    // NIP-YYYYMMDD-XXXX, dated with the booking date (not today).
    let mut parts = priced.booking_number.split('-');

    assert_eq!(parts.next(), Some("NIP"));
    assert_eq!(parts.next(), Some("20260308"));

    let suffix = parts.next().unwrap_or_default();

    assert_eq!(suffix.len(), 4, "4-digit zero-padded suffix");
    assert!(suffix.chars().all(|c| c.is_ascii_digit()), "numeric suffix");

    Ok(())
}

#[test]
fn subtotal_helper_matches_engine() -> TestResult {
    let priced = price_and_validate(&session_request(), None, &now()?)?;

    assert_eq!(priced.subtotal, session_subtotal(2, 1, 1, Duration::Standard));

    Ok(())
}
