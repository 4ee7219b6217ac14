//! Unit conversions for climate archive fields.
//!
//! Reanalysis archives typically store air and soil temperature in kelvin and
//! solar radiation as energy accumulated over the archive interval (J/m²).
//! These helpers turn such fields into the °C and W/m² values a
//! [`WeatherSeries`](super::WeatherSeries) holds.

use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::{degree_celsius, kelvin},
    time::second,
};

/// Converts an absolute temperature in kelvin to °C.
#[must_use]
pub fn kelvin_to_celsius(value: f64) -> f64 {
    ThermodynamicTemperature::new::<kelvin>(value).get::<degree_celsius>()
}

/// Converts radiation accumulated over `interval` (J/m²) to mean irradiance (W/m²).
///
/// Archives occasionally report tiny negative accumulations from numerical
/// noise at night; these are clamped to zero so the result is a valid
/// irradiance.
#[must_use]
pub fn accumulated_to_irradiance(accumulated: f64, interval: Time) -> f64 {
    (accumulated / interval.get::<second>()).max(0.0)
}
