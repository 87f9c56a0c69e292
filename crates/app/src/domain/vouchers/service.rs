//! Vouchers Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::vouchers::{
        VouchersServiceError,
        models::{NewVoucher, VoucherQuote, VoucherRecord},
        repository::PgVouchersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgVouchersService {
    db: Db,
    vouchers: PgVouchersRepository,
}

impl PgVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            vouchers: PgVouchersRepository::new(),
        }
    }
}

#[async_trait]
impl VouchersService for PgVouchersService {
    #[tracing::instrument(name = "vouchers.service.validate_voucher", skip(self), err)]
    async fn validate_voucher(
        &self,
        code: String,
        order_amount: Decimal,
        now: Timestamp,
    ) -> Result<VoucherQuote, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .vouchers
            .find_by_code(&mut tx, code.trim())
            .await?
            .ok_or(VouchersServiceError::InvalidCode)?;

        tx.commit().await?;

        record
            .voucher
            .check(order_amount, now)
            .map_err(VouchersServiceError::NotApplicable)?;

        Ok(VoucherQuote {
            discount: record.voucher.discount_on(order_amount),
            discount_type: record.voucher.discount.to_str(),
            value: record.voucher.discount.value(),
        })
    }

    #[tracing::instrument(name = "vouchers.service.create_voucher", skip(self, voucher), err)]
    async fn create_voucher(
        &self,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.vouchers.create(&mut tx, voucher).await?;

        tx.commit().await?;

        info!(code = %record.code, "created voucher");

        Ok(record)
    }

    #[tracing::instrument(name = "vouchers.service.list_vouchers", skip(self), err)]
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.vouchers.list(&mut tx).await?;

        tx.commit().await?;

        Ok(records)
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Advisory quote for a voucher code against a proposed order amount.
    ///
    /// Must not be trusted for final pricing; bookings re-validate server-side
    /// at creation time.
    async fn validate_voucher(
        &self,
        code: String,
        order_amount: Decimal,
        now: Timestamp,
    ) -> Result<VoucherQuote, VouchersServiceError>;

    /// Create a voucher.
    async fn create_voucher(
        &self,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError>;

    /// All vouchers, newest first.
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError>;
}
