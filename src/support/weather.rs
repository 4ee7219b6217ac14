//! Hourly weather input for bin simulations.
//!
//! A [`WeatherSeries`] is the normalized table every simulation consumes:
//! one record per hour with ambient air temperature (`temp`, °C), solar
//! irradiance (`sun`, W/m²), and any number of named shallow-soil
//! temperature columns (°C). Construction validates the table so that
//! downstream models can rely on it being non-empty, rectangular, finite,
//! and spaced at exactly one hour.
//!
//! Series can be built from column vectors or read from a CSV file whose
//! header contains `timestamp`, `temp`, and `sun`. Every other CSV column is
//! treated as a soil column:
//!
//! ```
//! use wigglebin_models::support::weather::WeatherSeries;
//!
//! let csv = "\
//! timestamp,temp,sun,soil_0_7
//! 2024-07-01T00:00:00,18.5,0,16.0
//! 2024-07-01T01:00:00,17.9,0,15.8
//! ";
//!
//! let series = WeatherSeries::from_csv_reader(csv.as_bytes()).unwrap();
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.soil("soil_0_7").unwrap(), &[16.0, 15.8]);
//! ```
//!
//! The [`convert`] module holds the unit conversions needed to turn climate
//! archive fields into this normalized form.

pub mod convert;

mod csv;
mod error;
mod series;

pub use error::WeatherError;
pub use series::{WeatherRecord, WeatherSeries};

/// Column name for ambient air temperature (°C).
pub const AIR_COLUMN: &str = "temp";

/// Column name for solar irradiance (W/m²).
pub const SUN_COLUMN: &str = "sun";

/// Column name for the timestamp index.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Soil column used when a configuration does not name one.
pub const DEFAULT_SOIL_COLUMN: &str = "soil_0_7";
