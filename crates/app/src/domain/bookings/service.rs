//! Bookings Service
//!
//! Orchestrates the pricing engine against the store: duplicate suppression,
//! voucher redemption, booking-number allocation, persistence and the
//! best-effort QR follow-up. The orchestration is generic over a
//! [`BookingsStore`] so its branches are unit-testable without a database.

use async_trait::async_trait;
use bounce::{
    booking::{BookingRequest, PartyRequest, PricedBooking, booking_number},
    engine::{price_and_validate, price_party},
    errors::ValidationError,
    validate::within_duplicate_window,
};
use jiff::{Timestamp, Zoned, civil::Date, civil::Time};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        bookings::{
            BookingsServiceError,
            models::{BookingConfirmation, PartyConfirmation, Waiver},
            qr::booking_qr_data_url,
            repository::{NewPartyBookingRow, NewSessionBookingRow, PgBookingsRepository},
        },
        vouchers::{PgVouchersRepository, models::VoucherRecord},
    },
};

/// Attempts at drawing an unused random booking-number suffix before giving up.
const BOOKING_NUMBER_ATTEMPTS: usize = 5;

/// Storage operations the booking orchestration runs against, including the
/// transaction boundary.
#[automock(type Tx = ();)]
#[async_trait]
pub(crate) trait BookingsStore: Send + Sync {
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, BookingsServiceError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), BookingsServiceError>;

    async fn find_voucher(
        &self,
        tx: &mut Self::Tx,
        code: &str,
    ) -> Result<Option<VoucherRecord>, BookingsServiceError>;

    /// Conditionally increment the voucher's `used_count`; returns the number
    /// of rows updated.
    async fn redeem_voucher(
        &self,
        tx: &mut Self::Tx,
        voucher: Uuid,
    ) -> Result<u64, BookingsServiceError>;

    async fn latest_submission_at(
        &self,
        tx: &mut Self::Tx,
        email: &str,
        date: Date,
        time: Time,
    ) -> Result<Option<Timestamp>, BookingsServiceError>;

    async fn booking_number_exists(
        &self,
        tx: &mut Self::Tx,
        booking_number: &str,
    ) -> Result<bool, BookingsServiceError>;

    async fn insert_session_booking<'a>(
        &self,
        tx: &mut Self::Tx,
        row: NewSessionBookingRow<'a>,
    ) -> Result<(), BookingsServiceError>;

    async fn insert_party_booking<'a>(
        &self,
        tx: &mut Self::Tx,
        row: NewPartyBookingRow<'a>,
    ) -> Result<(), BookingsServiceError>;

    /// Runs outside the booking transaction; the row is already committed.
    async fn set_qr_code(&self, id: Uuid, qr_code: &str) -> Result<(), BookingsServiceError>;
}

/// Reject a repeat (email, date, time) submission inside the duplicate window.
/// Heuristic double-submit suppression, not a strong dedup key.
async fn check_duplicate<S: BookingsStore>(
    store: &S,
    tx: &mut S::Tx,
    email: &str,
    date: Date,
    time: Time,
    now: &Zoned,
) -> Result<(), BookingsServiceError> {
    let previous = store.latest_submission_at(tx, email, date, time).await?;

    if previous.is_some_and(|created_at| within_duplicate_window(created_at, now.timestamp())) {
        return Err(ValidationError::DuplicateSubmission.into());
    }

    Ok(())
}

/// Draw booking-number candidates until one is unused in the store.
async fn allocate_booking_number<S: BookingsStore>(
    store: &S,
    tx: &mut S::Tx,
    date: Date,
    first_candidate: &str,
) -> Result<String, BookingsServiceError> {
    let mut candidate = first_candidate.to_string();

    for _attempt in 0..BOOKING_NUMBER_ATTEMPTS {
        if !store.booking_number_exists(tx, &candidate).await? {
            return Ok(candidate);
        }

        candidate = booking_number(date, &mut rand::thread_rng());
    }

    Err(BookingsServiceError::BookingNumberExhausted)
}

/// Render and attach the QR image after commit. Failures are logged and never
/// fail the booking.
async fn attach_qr_code<S: BookingsStore>(
    store: &S,
    id: Uuid,
    name: &str,
    date: Date,
    time: Time,
    guests: u64,
) {
    match booking_qr_data_url(id, name, date, time, guests) {
        Ok(data_url) => {
            if let Err(error) = store.set_qr_code(id, &data_url).await {
                warn!(booking_id = %id, "failed to attach QR code: {error}");
            }
        }
        Err(error) => {
            warn!(booking_id = %id, "failed to render QR code: {error}");
        }
    }
}

async fn create_booking_with<S: BookingsStore>(
    store: &S,
    request: BookingRequest,
    now: Zoned,
) -> Result<BookingConfirmation, BookingsServiceError> {
    let mut tx = store.begin().await?;

    // Re-fetch the voucher server-side; client-computed discounts are never
    // trusted.
    let voucher = match request.voucher_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => store.find_voucher(&mut tx, code).await?,
        _ => None,
    };

    let mut priced =
        price_and_validate(&request, voucher.as_ref().map(|record| &record.voucher), &now)?;

    check_duplicate(store, &mut tx, &priced.email, priced.date, priced.time, &now).await?;

    // Redeem inside the booking transaction. Zero rows means the voucher lost
    // a concurrent race on its usage limit; fall back to full price rather
    // than failing the booking.
    let mut voucher_id = None;

    if priced.voucher_applied
        && let Some(record) = &voucher
    {
        if store.redeem_voucher(&mut tx, record.id).await? == 0 {
            priced = price_and_validate(&request, None, &now)?;
        } else {
            voucher_id = Some(record.id);
        }
    }

    let number =
        allocate_booking_number(store, &mut tx, priced.date, &priced.booking_number).await?;

    let waiver = Waiver {
        date_of_birth: priced.date_of_birth,
        minors: priced.minors.clone(),
        adult_guests: priced.adult_guests.clone(),
    };

    let waiver_json =
        serde_json::to_string(&waiver).map_err(BookingsServiceError::WaiverEncoding)?;

    let id = Uuid::now_v7();

    store
        .insert_session_booking(
            &mut tx,
            NewSessionBookingRow {
                id,
                booking_number: &number,
                priced: &priced,
                voucher_id,
                waiver: &waiver_json,
                waiver_status: waiver.status(),
            },
        )
        .await?;

    store.commit(tx).await?;

    attach_qr_code(store, id, &priced.name, priced.date, priced.time, guest_count(&priced)).await;

    info!(booking_number = %number, "created session booking");

    Ok(BookingConfirmation { booking_id: id, booking_number: number })
}

async fn create_party_booking_with<S: BookingsStore>(
    store: &S,
    request: PartyRequest,
    now: Zoned,
) -> Result<PartyConfirmation, BookingsServiceError> {
    let mut tx = store.begin().await?;

    let priced = price_party(&request, &now)?;

    check_duplicate(store, &mut tx, &priced.email, priced.date, priced.time, &now).await?;

    let number =
        allocate_booking_number(store, &mut tx, priced.date, &priced.booking_number).await?;

    let id = Uuid::now_v7();

    store
        .insert_party_booking(
            &mut tx,
            NewPartyBookingRow { id, booking_number: &number, priced: &priced },
        )
        .await?;

    store.commit(tx).await?;

    let guests = u64::from(priced.participants) + u64::from(priced.spectators);

    attach_qr_code(store, id, &priced.name, priced.date, priced.time, guests).await;

    info!(booking_number = %number, "created party booking");

    Ok(PartyConfirmation {
        booking_id: id,
        booking_number: number,
        amount: priced.total_amount,
        deposit_amount: priced.deposit_amount,
    })
}

fn guest_count(priced: &PricedBooking) -> u64 {
    u64::from(priced.adults) + u64::from(priced.kids) + u64::from(priced.spectators)
}

#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings: PgBookingsRepository,
    vouchers: PgVouchersRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            bookings: PgBookingsRepository::new(),
            vouchers: PgVouchersRepository::new(),
        }
    }
}

#[async_trait]
impl BookingsStore for PgBookingsService {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, BookingsServiceError> {
        Ok(self.db.begin().await?)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), BookingsServiceError> {
        Ok(tx.commit().await?)
    }

    async fn find_voucher(
        &self,
        tx: &mut Self::Tx,
        code: &str,
    ) -> Result<Option<VoucherRecord>, BookingsServiceError> {
        Ok(self.vouchers.find_by_code(tx, code).await?)
    }

    async fn redeem_voucher(
        &self,
        tx: &mut Self::Tx,
        voucher: Uuid,
    ) -> Result<u64, BookingsServiceError> {
        Ok(self.vouchers.redeem(tx, voucher).await?)
    }

    async fn latest_submission_at(
        &self,
        tx: &mut Self::Tx,
        email: &str,
        date: Date,
        time: Time,
    ) -> Result<Option<Timestamp>, BookingsServiceError> {
        Ok(self.bookings.latest_submission_at(tx, email, date, time).await?)
    }

    async fn booking_number_exists(
        &self,
        tx: &mut Self::Tx,
        booking_number: &str,
    ) -> Result<bool, BookingsServiceError> {
        Ok(self.bookings.booking_number_exists(tx, booking_number).await?)
    }

    async fn insert_session_booking<'a>(
        &self,
        tx: &mut Self::Tx,
        row: NewSessionBookingRow<'a>,
    ) -> Result<(), BookingsServiceError> {
        Ok(self.bookings.create_session_booking(tx, row).await?)
    }

    async fn insert_party_booking<'a>(
        &self,
        tx: &mut Self::Tx,
        row: NewPartyBookingRow<'a>,
    ) -> Result<(), BookingsServiceError> {
        Ok(self.bookings.create_party_booking(tx, row).await?)
    }

    async fn set_qr_code(&self, id: Uuid, qr_code: &str) -> Result<(), BookingsServiceError> {
        Ok(self.bookings.set_qr_code(self.db.pool(), id, qr_code).await?)
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, request, now),
        fields(
            email = %request.email.trim().to_ascii_lowercase(),
            date = %request.date,
            time = %request.time,
        ),
        err
    )]
    async fn create_booking(
        &self,
        request: BookingRequest,
        now: Zoned,
    ) -> Result<BookingConfirmation, BookingsServiceError> {
        create_booking_with(self, request, now).await
    }

    #[tracing::instrument(
        name = "bookings.service.create_party_booking",
        skip(self, request, now),
        fields(
            email = %request.email.trim().to_ascii_lowercase(),
            date = %request.date,
            time = %request.time,
        ),
        err
    )]
    async fn create_party_booking(
        &self,
        request: PartyRequest,
        now: Zoned,
    ) -> Result<PartyConfirmation, BookingsServiceError> {
        create_party_booking_with(self, request, now).await
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Validate, price and persist a session booking.
    async fn create_booking(
        &self,
        request: BookingRequest,
        now: Zoned,
    ) -> Result<BookingConfirmation, BookingsServiceError>;

    /// Validate, price and persist a party booking (50% deposit pending).
    async fn create_party_booking(
        &self,
        request: PartyRequest,
        now: Zoned,
    ) -> Result<PartyConfirmation, BookingsServiceError>;
}

#[cfg(test)]
mod tests {
    use bounce::{
        booking::Duration,
        voucher::{Voucher, VoucherDiscount},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn fixed_now() -> TestResult<Zoned> {
        Ok("2026-03-07T10:00:00+05:30[Asia/Kolkata]".parse()?)
    }

    fn session_request(voucher_code: Option<&str>) -> BookingRequest {
        BookingRequest {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            date: "2026-09-12".to_string(),
            time: "15:30".to_string(),
            duration: Duration::Standard,
            adults: 2,
            kids: 1,
            spectators: 1,
            voucher_code: voucher_code.map(str::to_string),
            minors: Vec::new(),
            adult_guests: Vec::new(),
            date_of_birth: None,
        }
    }

    fn party_request() -> PartyRequest {
        PartyRequest {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            date: "2026-10-03".to_string(),
            time: "11:00".to_string(),
            participants: 12,
            spectators: 15,
            child_name: "Veer".to_string(),
            child_age: 7,
            special_requests: None,
        }
    }

    fn ten_percent_voucher() -> VoucherRecord {
        VoucherRecord {
            id: Uuid::now_v7(),
            code: "SUMMER10".to_string(),
            voucher: Voucher {
                is_active: true,
                expiry_date: None,
                usage_limit: Some(100),
                used_count: 0,
                min_order_amount: None,
                discount: VoucherDiscount::PercentageOff { percentage: Decimal::TEN },
            },
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn lost_redemption_race_falls_back_to_full_price() -> TestResult {
        let record = ten_percent_voucher();
        let voucher_id = record.id;

        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_find_voucher()
            .once()
            .withf(|_tx, code| code == "SUMMER10")
            .return_once(move |_, _| Ok(Some(record)));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store
            .expect_redeem_voucher()
            .once()
            .withf(move |_tx, voucher| *voucher == voucher_id)
            .return_once(|_, _| Ok(0));
        store
            .expect_booking_number_exists()
            .once()
            .return_once(|_, _| Ok(false));
        store
            .expect_insert_session_booking()
            .once()
            .withf(|_tx, row| {
                row.voucher_id.is_none()
                    && row.priced.discount_amount == Decimal::ZERO
                    && row.priced.total_amount == Decimal::new(2888_64, 2)
            })
            .return_once(|_, _| Ok(()));
        store.expect_commit().once().return_once(|_| Ok(()));
        store.expect_set_qr_code().once().return_once(|_, _| Ok(()));

        let confirmation =
            create_booking_with(&store, session_request(Some("SUMMER10")), fixed_now()?).await?;

        assert!(
            confirmation.booking_number.starts_with("NIP-20260912-"),
            "got {}",
            confirmation.booking_number
        );

        Ok(())
    }

    #[tokio::test]
    async fn won_redemption_records_voucher_and_discount() -> TestResult {
        let record = ten_percent_voucher();
        let voucher_id = record.id;

        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_find_voucher()
            .once()
            .return_once(move |_, _| Ok(Some(record)));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store.expect_redeem_voucher().once().return_once(|_, _| Ok(1));
        store
            .expect_booking_number_exists()
            .once()
            .return_once(|_, _| Ok(false));
        store
            .expect_insert_session_booking()
            .once()
            .withf(move |_tx, row| {
                // 10% of the 2448 subtotal, off the GST-inclusive total.
                row.voucher_id == Some(voucher_id)
                    && row.priced.discount_amount == Decimal::new(2448, 1)
                    && row.priced.total_amount == Decimal::new(2643_84, 2)
            })
            .return_once(|_, _| Ok(()));
        store.expect_commit().once().return_once(|_| Ok(()));
        store.expect_set_qr_code().once().return_once(|_, _| Ok(()));

        create_booking_with(&store, session_request(Some("SUMMER10")), fixed_now()?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn recent_identical_submission_is_rejected_in_the_transaction() -> TestResult {
        let now = fixed_now()?;
        let previous = Timestamp::from_second(now.timestamp().as_second() - 60)?;

        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store.expect_find_voucher().never();
        store
            .expect_latest_submission_at()
            .once()
            .withf(|_tx, email, date, time| {
                email == "asha@example.com"
                    && *date == jiff::civil::date(2026, 9, 12)
                    && *time == jiff::civil::time(15, 30, 0, 0)
            })
            .return_once(move |_, _, _, _| Ok(Some(previous)));
        store.expect_insert_session_booking().never();
        store.expect_commit().never();

        let result = create_booking_with(&store, session_request(None), now).await;

        assert!(
            matches!(
                result,
                Err(BookingsServiceError::Validation(ValidationError::DuplicateSubmission))
            ),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn taken_booking_number_is_retried_with_a_fresh_draw() -> TestResult {
        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store.expect_booking_number_exists().times(1).returning(|_, _| Ok(true));
        store.expect_booking_number_exists().times(1).returning(|_, _| Ok(false));
        store
            .expect_insert_session_booking()
            .once()
            .withf(|_tx, row| {
                row.booking_number.starts_with("NIP-20260912-") && row.booking_number.len() == 17
            })
            .return_once(|_, _| Ok(()));
        store.expect_commit().once().return_once(|_| Ok(()));
        store.expect_set_qr_code().once().return_once(|_, _| Ok(()));

        create_booking_with(&store, session_request(None), fixed_now()?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn exhausted_booking_number_draws_fail_the_booking() -> TestResult {
        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store
            .expect_booking_number_exists()
            .times(BOOKING_NUMBER_ATTEMPTS)
            .returning(|_, _| Ok(true));
        store.expect_insert_session_booking().never();
        store.expect_commit().never();

        let result = create_booking_with(&store, session_request(None), fixed_now()?).await;

        assert!(
            matches!(result, Err(BookingsServiceError::BookingNumberExhausted)),
            "got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn party_booking_persists_deposit_and_attaches_qr() -> TestResult {
        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store
            .expect_booking_number_exists()
            .once()
            .return_once(|_, _| Ok(false));
        store
            .expect_insert_party_booking()
            .once()
            .withf(|_tx, row| {
                row.priced.total_amount == Decimal::from(21830)
                    && row.priced.deposit_amount == Decimal::from(10915)
            })
            .return_once(|_, _| Ok(()));
        store.expect_commit().once().return_once(|_| Ok(()));
        store
            .expect_set_qr_code()
            .once()
            .withf(|_id, data_url| data_url.starts_with("data:image/png;base64,"))
            .return_once(|_, _| Ok(()));

        let confirmation = create_party_booking_with(&store, party_request(), fixed_now()?).await?;

        assert_eq!(confirmation.amount, Decimal::from(21830));
        assert_eq!(confirmation.deposit_amount, Decimal::from(10915));

        Ok(())
    }

    #[tokio::test]
    async fn qr_failure_never_fails_the_booking() -> TestResult {
        let mut store = MockBookingsStore::new();

        store.expect_begin().once().return_once(|| Ok(()));
        store
            .expect_latest_submission_at()
            .once()
            .return_once(|_, _, _, _| Ok(None));
        store
            .expect_booking_number_exists()
            .once()
            .return_once(|_, _| Ok(false));
        store.expect_insert_session_booking().once().return_once(|_, _| Ok(()));
        store.expect_commit().once().return_once(|_| Ok(()));
        store
            .expect_set_qr_code()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::Sql(sqlx::Error::PoolClosed)));

        let confirmation = create_booking_with(&store, session_request(None), fixed_now()?).await;

        assert!(confirmation.is_ok(), "got {confirmation:?}");

        Ok(())
    }

    #[test]
    fn guest_count_survives_full_range_counts() -> TestResult {
        let mut request = session_request(None);
        request.adults = u32::MAX;
        request.kids = u32::MAX;
        request.spectators = u32::MAX;

        let priced = price_and_validate(&request, None, &fixed_now()?)?;

        assert_eq!(guest_count(&priced), 3 * u64::from(u32::MAX));

        Ok(())
    }
}
