//! Marker storage

pub mod marker;

pub use marker::{JsonMarkerStore, MarkerRecords, MarkerStore};
