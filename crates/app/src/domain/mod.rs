//! Domain modules

pub mod bookings;
pub mod vouchers;
