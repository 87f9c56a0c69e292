//! Voucher Models

use bounce::voucher::{Voucher, VoucherDiscount};
use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A persisted voucher row: identity plus the pure redemption rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherRecord {
    pub id: Uuid,
    pub code: String,
    pub voucher: Voucher,
    pub created_at: Timestamp,
}

/// New Voucher Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    pub code: String,
    pub discount: VoucherDiscount,
    pub is_active: bool,
    pub expiry_date: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub min_order_amount: Option<Decimal>,
}

/// Advisory quote for a voucher against a proposed order amount.
///
/// Pre-check only; creation-time re-validation is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherQuote {
    pub discount: Decimal,
    /// Wire tag of the discount type (`PERCENTAGE` or `FIXED`).
    pub discount_type: &'static str,
    /// The configured discount value (percentage points or rupees).
    pub value: Decimal,
}
