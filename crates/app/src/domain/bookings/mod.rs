//! Bookings

mod errors;
pub mod models;
pub mod qr;
mod repository;
pub mod service;

pub use errors::BookingsServiceError;
pub use service::*;
