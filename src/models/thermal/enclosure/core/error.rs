use thiserror::Error;

use super::config::ConfigError;

/// Errors that can occur before a bin simulation starts.
///
/// A run either fails with one of these before producing output or returns
/// a complete trace. An empty weather series cannot reach the simulator:
/// [`WeatherSeries`](crate::support::weather::WeatherSeries) refuses to
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulateError {
    /// The configuration failed validation.
    #[error("invalid simulation configuration")]
    Config(#[from] ConfigError),

    /// Soil ambient was selected but the series lacks the configured column.
    #[error("soil column `{0}` not found in weather series")]
    MissingSoilColumn(String),
}
