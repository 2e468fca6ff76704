//! Input spec handling

pub mod materializer;

pub use materializer::{MaterializedSpec, materialize};
