//! Utility functions

pub mod paths;

pub use paths::{normalize, resolve, resolve_from};
