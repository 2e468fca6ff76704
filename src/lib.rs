//! openworld SDK generator
//!
//! Drives `openapi-generator-cli` to emit an openworld Python SDK project from
//! a base64-encoded zip archive holding an OpenAPI spec.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod spec;

pub use crate::core::{Error, Result, error, utils};
