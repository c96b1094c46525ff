//! Core data models for extension loading

pub mod manifest;
pub mod extension;
pub mod file;

pub use manifest::*;
pub use extension::*;
pub use file::*;
