use std::collections::BTreeMap;

use jiff::{
    SignedDuration,
    civil::{Date, DateTime},
};

use super::{AIR_COLUMN, SUN_COLUMN, WeatherError};

const ONE_HOUR: SignedDuration = SignedDuration::from_hours(1);

/// A validated, hourly-regular weather table.
///
/// Invariants upheld by every constructor:
///
/// - At least one record.
/// - Every column has exactly one value per timestamp.
/// - Timestamps increase by exactly one hour.
/// - All values are finite and irradiance is non-negative.
///
/// The series is immutable once built, so a single instance can be shared
/// across any number of concurrent simulations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSeries {
    timestamps: Vec<DateTime>,
    air: Vec<f64>,
    sun: Vec<f64>,
    soil: BTreeMap<String, Vec<f64>>,
}

/// One hour of weather, borrowed from a [`WeatherSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRecord {
    pub timestamp: DateTime,
    /// Ambient air temperature in °C.
    pub air: f64,
    /// Solar irradiance in W/m².
    pub sun: f64,
}

impl WeatherRecord {
    /// Hour of day in `0..24`.
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.timestamp.hour().unsigned_abs()
    }

    /// Calendar date of the record.
    #[must_use]
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }
}

impl WeatherSeries {
    /// Builds a series from its required columns.
    ///
    /// Soil columns are attached afterwards with [`WeatherSeries::with_soil`].
    ///
    /// # Errors
    ///
    /// Returns a [`WeatherError`] if the series is empty, the columns differ
    /// in length, the timestamps are not hourly, or any value is invalid.
    pub fn new(timestamps: Vec<DateTime>, air: Vec<f64>, sun: Vec<f64>) -> Result<Self, WeatherError> {
        if timestamps.is_empty() {
            return Err(WeatherError::Empty);
        }

        check_hourly(&timestamps)?;
        check_column(AIR_COLUMN, &air, timestamps.len())?;
        check_column(SUN_COLUMN, &sun, timestamps.len())?;

        if let Some((index, &value)) = sun.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(WeatherError::NegativeIrradiance { index, value });
        }

        Ok(Self {
            timestamps,
            air,
            sun,
            soil: BTreeMap::new(),
        })
    }

    /// Attaches a named soil temperature column (°C).
    ///
    /// # Errors
    ///
    /// Returns a [`WeatherError`] if the name is already taken, the column
    /// length does not match, or a value is not finite.
    pub fn with_soil(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, WeatherError> {
        let name = name.into();
        if self.soil.contains_key(&name) {
            return Err(WeatherError::DuplicateColumn(name));
        }
        check_column(&name, &values, self.len())?;
        self.soil.insert(name, values);
        Ok(self)
    }

    /// Number of hourly records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always `false`; an empty series cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[DateTime] {
        &self.timestamps
    }

    /// Ambient air temperatures in °C.
    #[must_use]
    pub fn air(&self) -> &[f64] {
        &self.air
    }

    /// Solar irradiance in W/m².
    #[must_use]
    pub fn sun(&self) -> &[f64] {
        &self.sun
    }

    /// Returns the named soil column, if present.
    #[must_use]
    pub fn soil(&self, name: &str) -> Option<&[f64]> {
        self.soil.get(name).map(Vec::as_slice)
    }

    /// Names of all attached soil columns, in sorted order.
    pub fn soil_columns(&self) -> impl Iterator<Item = &str> {
        self.soil.keys().map(String::as_str)
    }

    /// Iterates over the records in time order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = WeatherRecord> + '_ {
        self.timestamps
            .iter()
            .zip(&self.air)
            .zip(&self.sun)
            .map(|((&timestamp, &air), &sun)| WeatherRecord { timestamp, air, sun })
    }
}

fn check_hourly(timestamps: &[DateTime]) -> Result<(), WeatherError> {
    for (i, pair) in timestamps.windows(2).enumerate() {
        let gap = pair[1].duration_since(pair[0]);
        if gap != ONE_HOUR {
            return Err(WeatherError::NotHourly { index: i + 1, gap });
        }
    }
    Ok(())
}

fn check_column(column: &str, values: &[f64], expected: usize) -> Result<(), WeatherError> {
    if values.len() != expected {
        return Err(WeatherError::LengthMismatch {
            column: column.to_owned(),
            expected,
            found: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(WeatherError::NotFinite {
            column: column.to_owned(),
            index,
        });
    }
    Ok(())
}
