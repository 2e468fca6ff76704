//! Generation domain module - configures and drives the external engine
//!
//! This module turns SDK coordinates into an engine configuration, hands it
//! to a [`GenerationEngine`], and tidies the generated Python package.

pub mod config;
pub mod engine;
pub mod imports;

pub use config::*;
pub use engine::*;
pub use imports::add_missing_imports;
