use jiff::SignedDuration;
use thiserror::Error;

/// Errors that can occur while building a [`WeatherSeries`](super::WeatherSeries).
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The series has no records.
    #[error("weather series is empty")]
    Empty,

    /// A column does not have one value per timestamp.
    #[error("column `{column}` has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Consecutive timestamps are not exactly one hour apart.
    #[error("timestamp at index {index} is {gap:?} after its predecessor, expected 1h")]
    NotHourly { index: usize, gap: SignedDuration },

    /// A value is NaN or infinite.
    #[error("column `{column}` has a non-finite value at index {index}")]
    NotFinite { column: String, index: usize },

    /// Solar irradiance is below zero.
    #[error("irradiance at index {index} is negative: {value} W/m²")]
    NegativeIrradiance { index: usize, value: f64 },

    /// A soil column with the same name already exists.
    #[error("duplicate soil column `{0}`")]
    DuplicateColumn(String),

    /// A required column is missing from a CSV header.
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp {value:?} on row {row}")]
    Timestamp {
        row: usize,
        value: String,
        #[source]
        source: jiff::Error,
    },

    /// A numeric field could not be parsed.
    #[error("invalid number {value:?} in column `{column}` on row {row}")]
    Value {
        column: String,
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The underlying CSV reader failed.
    #[error("failed to read weather csv")]
    Csv(#[from] ::csv::Error),
}
