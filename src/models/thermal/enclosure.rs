//! Outdoor worm and compost bin model.
//!
//! [`Enclosure`] is the [`twine_core::Model`] adapter: it holds a validated
//! [`SimulationConfig`] and maps a [`WeatherSeries`] to a temperature
//! [`Trace`]. The computational core lives in the internal `core` module;
//! its building blocks ([`step`], [`EnergyBalance`], [`PcmBuffer`], ...) are
//! re-exported for callers that want to drive or inspect individual steps.
//!
//! ```
//! use jiff::civil::date;
//! use twine_core::Model;
//! use wigglebin_models::models::thermal::enclosure::{Enclosure, SimulationConfig};
//! use wigglebin_models::support::weather::WeatherSeries;
//!
//! let noon = date(2024, 7, 1).at(12, 0, 0, 0);
//! let weather = WeatherSeries::new(vec![noon], vec![24.0], vec![700.0]).unwrap();
//!
//! let bin = Enclosure::new(SimulationConfig {
//!     in_shade: true,
//!     ..SimulationConfig::default()
//! })
//! .unwrap();
//!
//! let trace = bin.call(&weather).unwrap();
//! assert_eq!(trace.len(), 1);
//! assert!(trace.celsius()[0] > 24.0);
//! ```

mod core;

pub use self::core::{
    AmbientSource, BinColor, BinProperties, BinState, ConfigError, EnergyBalance, PcmBuffer,
    PcmExchange, Shading, SimulateError, SimulationConfig, StepInput, StepReport, SunlightWindow,
    Trace, TraceSummary, Venting, simulate, simulate_detailed, step,
};

use twine_core::Model;

use crate::support::weather::WeatherSeries;

/// A bin design variant, ready to simulate against any weather series.
#[derive(Debug, Clone, PartialEq)]
pub struct Enclosure {
    config: SimulationConfig,
}

impl Enclosure {
    /// Wraps a configuration after validating it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Model for Enclosure {
    type Input = WeatherSeries;
    type Output = Trace;
    type Error = SimulateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        simulate(input, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn adapter_matches_free_function() {
        let start = date(2024, 7, 1).at(10, 0, 0, 0);
        let weather = WeatherSeries::new(
            vec![start, start.checked_add(jiff::SignedDuration::from_hours(1)).unwrap()],
            vec![21.0, 23.5],
            vec![450.0, 620.0],
        )
        .unwrap();
        let config = SimulationConfig {
            color: BinColor::Other,
            insulation: true,
            ..SimulationConfig::default()
        };

        let bin = Enclosure::new(config.clone()).unwrap();
        assert_eq!(bin.call(&weather).unwrap(), simulate(&weather, &config).unwrap());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimulationConfig {
            sunlight_hours: SunlightWindow { start: 10, end: 30 },
            ..SimulationConfig::default()
        };
        assert!(Enclosure::new(config).is_err());
    }
}
