//! Bounce
//!
//! Bounce is the booking pricing and validation engine for an inflatable adventure
//! park: tiered session pricing, party pricing with deposits, GST, voucher
//! discounts and temporal validation. The engine is pure: the current time and
//! any voucher under consideration are passed in by the caller.

pub mod booking;
pub mod engine;
pub mod errors;
pub mod money;
pub mod pricing;
pub mod sanitize;
pub mod validate;
pub mod voucher;
