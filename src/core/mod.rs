//! Shared error type and naming helpers.

pub mod error;
pub mod utils;

pub use error::{Error, Result};
