//! Voucher Handlers

pub(crate) mod validate;
