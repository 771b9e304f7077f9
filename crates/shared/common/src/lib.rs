//! Common utilities shared across the catalog crates.
//!
//! This crate provides:
//! - Unified error handling (`AppError`, `AppResult`)
//! - The `{success}`/`{error}` action envelope
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{first_validation_message, AppError, AppResult, OptionExt};
pub use response::ActionResult;
