//! Vouchers Repository

use bounce::voucher::{Voucher, VoucherDiscount};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::vouchers::models::{NewVoucher, VoucherRecord};

const FIND_VOUCHER_BY_CODE_SQL: &str = include_str!("sql/find_voucher_by_code.sql");
const REDEEM_VOUCHER_SQL: &str = include_str!("sql/redeem_voucher.sql");
const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const LIST_VOUCHERS_SQL: &str = include_str!("sql/list_vouchers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVouchersRepository;

impl PgVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<VoucherRecord>, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(FIND_VOUCHER_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Increment `used_count`, bounded by the usage limit in the same
    /// statement. Returns the number of rows updated: 0 means the voucher lost
    /// a concurrent redemption race (or was deactivated meanwhile).
    pub(crate) async fn redeem(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REDEEM_VOUCHER_SQL)
            .bind(voucher)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, sqlx::Error> {
        let usage_limit = voucher.usage_limit.map(i64::from);

        query_as::<Postgres, VoucherRecord>(CREATE_VOUCHER_SQL)
            .bind(Uuid::now_v7())
            .bind(&voucher.code)
            .bind(voucher.is_active)
            .bind(voucher.expiry_date.map(SqlxTimestamp::from))
            .bind(usage_limit)
            .bind(voucher.min_order_amount)
            .bind(voucher.discount.to_str())
            .bind(voucher.discount.value())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<VoucherRecord>, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(LIST_VOUCHERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_value: Decimal = row.try_get("discount_value")?;
        let discount_type: String = row.try_get("discount_type")?;

        let discount = match discount_type.as_str() {
            "PERCENTAGE" => VoucherDiscount::PercentageOff { percentage: discount_value },
            "FIXED" => VoucherDiscount::AmountOff { amount: discount_value },
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "discount_type".to_string(),
                    source: format!("unknown discount type: {other}").into(),
                });
            }
        };

        Ok(Self {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            voucher: Voucher {
                is_active: row.try_get("is_active")?,
                expiry_date: row
                    .try_get::<Option<SqlxTimestamp>, _>("expiry_date")?
                    .map(SqlxTimestamp::to_jiff),
                usage_limit: row
                    .try_get::<Option<i64>, _>("usage_limit")?
                    .map(|limit| try_into_count(limit, "usage_limit"))
                    .transpose()?,
                used_count: try_into_count(row.try_get("used_count")?, "used_count")?,
                min_order_amount: row.try_get("min_order_amount")?,
                discount,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

fn try_into_count(value: i64, col: &str) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
