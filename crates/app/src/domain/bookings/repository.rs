//! Bookings Repository

use bounce::booking::{PricedBooking, PricedParty};
use jiff::{Timestamp, civil::Date, civil::Time};
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{PgPool, Postgres, Transaction, query, query_scalar};
use uuid::Uuid;

use crate::domain::bookings::models::{BookingStatus, PaymentStatus, WaiverStatus};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const CREATE_PARTY_BOOKING_SQL: &str = include_str!("sql/create_party_booking.sql");
const LATEST_SUBMISSION_SQL: &str = include_str!("sql/latest_submission.sql");
const BOOKING_NUMBER_EXISTS_SQL: &str = include_str!("sql/booking_number_exists.sql");
const SET_BOOKING_QR_CODE_SQL: &str = include_str!("sql/set_booking_qr_code.sql");

/// A session booking row ready for insert.
pub(crate) struct NewSessionBookingRow<'a> {
    pub id: Uuid,
    pub booking_number: &'a str,
    pub priced: &'a PricedBooking,
    pub voucher_id: Option<Uuid>,
    /// JSON-encoded waiver payload.
    pub waiver: &'a str,
    pub waiver_status: WaiverStatus,
}

/// A party booking row ready for insert.
pub(crate) struct NewPartyBookingRow<'a> {
    pub id: Uuid,
    pub booking_number: &'a str,
    pub priced: &'a PricedParty,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// When the most recent booking with the same normalised email, date and
    /// time was submitted, if any.
    pub(crate) async fn latest_submission_at(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        date: Date,
        time: Time,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let created_at = query_scalar::<Postgres, SqlxTimestamp>(LATEST_SUBMISSION_SQL)
            .bind(email)
            .bind(SqlxDate::from(date))
            .bind(SqlxTime::from(time))
            .fetch_optional(&mut **tx)
            .await?;

        Ok(created_at.map(SqlxTimestamp::to_jiff))
    }

    pub(crate) async fn booking_number_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking_number: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(BOOKING_NUMBER_EXISTS_SQL)
            .bind(booking_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_session_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: NewSessionBookingRow<'_>,
    ) -> Result<(), sqlx::Error> {
        let priced = row.priced;

        query(CREATE_BOOKING_SQL)
            .bind(row.id)
            .bind(row.booking_number)
            .bind(&priced.name)
            .bind(&priced.email)
            .bind(&priced.phone)
            .bind(SqlxDate::from(priced.date))
            .bind(SqlxTime::from(priced.time))
            .bind(i64::from(priced.duration.minutes()))
            .bind(i64::from(priced.adults))
            .bind(i64::from(priced.kids))
            .bind(i64::from(priced.spectators))
            .bind(priced.subtotal)
            .bind(priced.gst)
            .bind(priced.discount_amount)
            .bind(priced.total_amount)
            .bind(priced.voucher_code.as_deref())
            .bind(row.voucher_id)
            .bind(BookingStatus::Confirmed.to_str())
            .bind(PaymentStatus::Pending.to_str())
            .bind(row.waiver_status.to_str())
            .bind(row.waiver)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_party_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: NewPartyBookingRow<'_>,
    ) -> Result<(), sqlx::Error> {
        let priced = row.priced;

        query(CREATE_PARTY_BOOKING_SQL)
            .bind(row.id)
            .bind(row.booking_number)
            .bind(&priced.name)
            .bind(&priced.email)
            .bind(&priced.phone)
            .bind(SqlxDate::from(priced.date))
            .bind(SqlxTime::from(priced.time))
            .bind(i64::from(priced.participants))
            .bind(i64::from(priced.spectators))
            .bind(&priced.child_name)
            .bind(i64::from(priced.child_age))
            .bind(priced.special_requests.as_deref())
            .bind(priced.subtotal)
            .bind(priced.gst)
            .bind(priced.total_amount)
            .bind(priced.deposit_amount)
            .bind(BookingStatus::Pending.to_str())
            .bind(PaymentStatus::Pending.to_str())
            .bind(WaiverStatus::Pending.to_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Attach the rendered QR image outside any transaction; the booking is
    /// already committed when this runs.
    pub(crate) async fn set_qr_code(
        &self,
        pool: &PgPool,
        id: Uuid,
        qr_code: &str,
    ) -> Result<(), sqlx::Error> {
        query(SET_BOOKING_QR_CODE_SQL)
            .bind(id)
            .bind(qr_code)
            .execute(pool)
            .await?;

        Ok(())
    }
}
