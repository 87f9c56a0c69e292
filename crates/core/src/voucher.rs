//! Voucher discounts
//!
//! Applicability rules and discount arithmetic shared by the booking engine and
//! the advisory validation endpoint. The engine silently skips an inapplicable
//! voucher; the advisory endpoint reports the reason.

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::round_money;

/// Discount carried by a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherDiscount {
    /// Percentage off the subtotal.
    PercentageOff {
        /// Percentage points, e.g. `10` for 10% off.
        percentage: Decimal,
    },

    /// Fixed amount off the subtotal.
    AmountOff {
        /// Flat discount, rupees.
        amount: Decimal,
    },
}

impl VoucherDiscount {
    /// Storage/wire tag for this discount type.
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "PERCENTAGE",
            Self::AmountOff { .. } => "FIXED",
        }
    }

    /// The configured discount value (percentage points or rupees).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        match self {
            Self::PercentageOff { percentage } => *percentage,
            Self::AmountOff { amount } => *amount,
        }
    }
}

/// A voucher's redemption constraints, as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    pub is_active: bool,
    /// Latest instant at which the voucher may still be redeemed.
    pub expiry_date: Option<Timestamp>,
    /// Maximum number of redemptions; `None` means unlimited.
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    /// Minimum order subtotal for the voucher to apply.
    pub min_order_amount: Option<Decimal>,
    pub discount: VoucherDiscount,
}

/// Why a voucher does not apply to an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoucherIssue {
    #[error("voucher is not active")]
    Inactive,

    #[error("voucher has expired")]
    Expired,

    #[error("voucher usage limit reached")]
    UsageLimitReached,

    #[error("minimum order amount of {minimum} not met")]
    MinOrderNotMet {
        /// The voucher's minimum order subtotal.
        minimum: Decimal,
    },
}

impl Voucher {
    /// Check every applicability rule against an order subtotal at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule as a [`VoucherIssue`].
    pub fn check(&self, order_amount: Decimal, now: Timestamp) -> Result<(), VoucherIssue> {
        if !self.is_active {
            return Err(VoucherIssue::Inactive);
        }

        if self.expiry_date.is_some_and(|expiry| expiry < now) {
            return Err(VoucherIssue::Expired);
        }

        if self.usage_limit.is_some_and(|limit| self.used_count >= limit) {
            return Err(VoucherIssue::UsageLimitReached);
        }

        if let Some(minimum) = self.min_order_amount
            && order_amount < minimum
        {
            return Err(VoucherIssue::MinOrderNotMet { minimum });
        }

        Ok(())
    }

    /// The discount this voucher grants on `subtotal`, capped at the subtotal
    /// (pre-GST) and never negative.
    #[must_use]
    pub fn discount_on(&self, subtotal: Decimal) -> Decimal {
        let raw = match self.discount {
            VoucherDiscount::PercentageOff { percentage } => {
                round_money(subtotal * percentage / Decimal::from(100))
            }
            VoucherDiscount::AmountOff { amount } => round_money(amount),
        };

        raw.clamp(Decimal::ZERO, subtotal)
    }
}
