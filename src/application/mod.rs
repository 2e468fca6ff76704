//! Application layer - orchestrates the SDK generation use case

pub mod generate_sdk;

pub use generate_sdk::*;
