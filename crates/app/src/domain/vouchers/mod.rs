//! Vouchers

mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgVouchersRepository;

pub use errors::VouchersServiceError;
pub use service::*;
