//! Station reference data and resolution.
//!
//! The catalog is loaded once from CSV and shared read-only. Text is
//! resolved with a word-order-insensitive fuzzy match; coordinates are
//! resolved to the nearest geo-located station.

mod catalog;
mod error;
mod geo;
mod matcher;
pub mod similarity;

pub use catalog::{StationCatalog, StationEntry};
pub use error::CatalogError;
pub use geo::{EARTH_RADIUS_KM, haversine_km};
pub use matcher::{DEFAULT_MIN_SCORE, StationMatch, StationMatcher};
