//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use bounce_app::{
    context::AppContext,
    domain::{bookings::MockBookingsService, vouchers::MockVouchersService},
};

use crate::state::State;

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_booking().never();
    bookings.expect_create_party_booking().never();

    bookings
}

fn strict_vouchers_mock() -> MockVouchersService {
    let mut vouchers = MockVouchersService::new();

    vouchers.expect_validate_voucher().never();
    vouchers.expect_create_voucher().never();
    vouchers.expect_list_vouchers().never();

    vouchers
}

pub(crate) fn state_with_bookings(bookings: MockBookingsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        bookings: Arc::new(bookings),
        vouchers: Arc::new(strict_vouchers_mock()),
    }))
}

pub(crate) fn state_with_vouchers(vouchers: MockVouchersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        bookings: Arc::new(strict_bookings_mock()),
        vouchers: Arc::new(vouchers),
    }))
}

pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_bookings(bookings)))
            .push(route),
    )
}

pub(crate) fn vouchers_service(vouchers: MockVouchersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_vouchers(vouchers)))
            .push(route),
    )
}
