//! Core utilities: configuration, errors, logging, validation, payment link

pub mod config;
pub mod error;
pub mod logging;
pub mod payment_link;
pub mod validation;

pub use error::{AppError, AppResult};
pub use logging::init_logger;
