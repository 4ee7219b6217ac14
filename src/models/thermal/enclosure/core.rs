//! Lumped energy-balance integration of a bin's temperature.
//!
//! The bin is a single thermal mass. Each hour the simulator evaluates the
//! competing gain terms (sun, compost, solar panel) and loss terms
//! (convection, radiation, venting, fan, ice packs) at the current
//! temperature, lets the phase-change buffer damp the temperature, then
//! applies the net energy over the bin's heat capacity.
//!
//! Runs are a sequential fold over the weather series. The only state is a
//! [`BinState`] value threaded through [`step`], so independent runs share
//! nothing but the read-only input.

mod config;
mod constants;
mod error;
mod pcm;
mod properties;
mod shade;
mod step;
mod terms;
mod trace;

pub use config::{AmbientSource, BinColor, ConfigError, SimulationConfig, SunlightWindow, Venting};
pub use error::SimulateError;
pub use pcm::{PcmBuffer, PcmExchange};
pub use properties::BinProperties;
pub use shade::Shading;
pub use step::{BinState, StepInput, StepReport, step};
pub use terms::EnergyBalance;
pub use trace::{Trace, TraceSummary};

use tracing::{debug, trace};

use crate::support::weather::WeatherSeries;

/// Simulates a bin configured by `config` over `series`.
///
/// The bin starts at the first ambient reading. The returned trace has one
/// temperature per record in `series`.
///
/// # Errors
///
/// Returns a [`SimulateError`] if the configuration is invalid or the
/// configured soil column is missing from `series`.
pub fn simulate(series: &WeatherSeries, config: &SimulationConfig) -> Result<Trace, SimulateError> {
    run(series, config, |_| {})
}

/// Like [`simulate`], but also returns the per-step energy breakdown.
///
/// # Errors
///
/// See [`simulate`].
pub fn simulate_detailed(
    series: &WeatherSeries,
    config: &SimulationConfig,
) -> Result<(Trace, Vec<StepReport>), SimulateError> {
    let mut reports = Vec::with_capacity(series.len());
    let trace = run(series, config, |report| reports.push(report))?;
    Ok((trace, reports))
}

fn run(
    series: &WeatherSeries,
    config: &SimulationConfig,
    mut observe: impl FnMut(StepReport),
) -> Result<Trace, SimulateError> {
    config.validate()?;

    let ambient = ambient_column(series, config)?;
    let props = BinProperties::from_config(config);
    let shading = Shading::new(config, series);

    // Never empty: `WeatherSeries` rejects empty input.
    let mut state = BinState::initial(ambient[0], config.pcm_capacity());
    let mut peak_latent = state.pcm.latent_used();
    let mut trace = Trace::with_capacity(series.len());

    debug!(
        steps = series.len(),
        ambient = ?config.ambient,
        initial_temp = state.temperature,
        "starting bin simulation"
    );

    for (record, &ambient) in series.records().zip(ambient) {
        let input = StepInput {
            hour: record.hour(),
            ambient,
            irradiance: shading.effective_irradiance(&record),
        };

        let (next, report) = step(config, &props, state, &input);

        trace!(
            timestamp = %record.timestamp,
            temp = next.temperature,
            net_j = ?report.balance.net(),
            pcm_j = ?report.pcm_energy,
            "step"
        );

        if report.pcm_latent_used > peak_latent {
            peak_latent = report.pcm_latent_used;
        }
        trace.push(next.temperature);
        observe(report);
        state = next;
    }

    debug!(
        final_temp = state.temperature,
        peak_pcm_latent = ?peak_latent,
        "finished bin simulation"
    );

    Ok(trace)
}

fn ambient_column<'s>(
    series: &'s WeatherSeries,
    config: &SimulationConfig,
) -> Result<&'s [f64], SimulateError> {
    match config.ambient {
        AmbientSource::Air => Ok(series.air()),
        AmbientSource::Soil => series
            .soil(&config.soil_column)
            .ok_or_else(|| SimulateError::MissingSoilColumn(config.soil_column.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use jiff::{
        SignedDuration,
        civil::{DateTime, date},
    };
    use uom::si::{f64::Mass, mass::kilogram};

    fn hourly(n: usize) -> Vec<DateTime> {
        let start = date(2024, 6, 1).at(0, 0, 0, 0);
        (0..n)
            .map(|h| {
                start
                    .checked_add(SignedDuration::from_hours(i64::try_from(h).unwrap()))
                    .unwrap()
            })
            .collect()
    }

    fn series(air: Vec<f64>, sun: Vec<f64>) -> WeatherSeries {
        WeatherSeries::new(hourly(air.len()), air, sun).unwrap()
    }

    #[test]
    fn single_record_without_forcing() {
        let weather = series(vec![20.0], vec![0.0]);
        let trace = simulate(&weather, &SimulationConfig::default()).unwrap();

        assert_eq!(trace.len(), 1);
        assert_relative_eq!(trace.celsius()[0], 20.0);
    }

    #[test]
    fn starts_from_soil_when_selected() {
        let weather = series(vec![25.0; 3], vec![0.0; 3])
            .with_soil("soil_0_7", vec![12.0; 3])
            .unwrap();
        let config = SimulationConfig::default().with_soil_ambient();

        let trace = simulate(&weather, &config).unwrap();
        for &t in trace.celsius() {
            assert_relative_eq!(t, 12.0);
        }
    }

    #[test]
    fn missing_soil_column() {
        let weather = series(vec![25.0], vec![0.0]);
        let config = SimulationConfig {
            soil_column: "soil_7_28".into(),
            ..SimulationConfig::default().with_soil_ambient()
        };

        assert_eq!(
            simulate(&weather, &config),
            Err(SimulateError::MissingSoilColumn("soil_7_28".into()))
        );
    }

    #[test]
    fn soil_column_ignored_for_air() {
        let weather = series(vec![25.0], vec![0.0]);
        let config = SimulationConfig {
            soil_column: "nope".into(),
            ..SimulationConfig::default()
        };
        assert!(simulate(&weather, &config).is_ok());
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let weather = series(vec![25.0], vec![0.0]);
        let config = SimulationConfig {
            pcm_mass: Mass::new::<kilogram>(-1.0),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            simulate(&weather, &config),
            Err(SimulateError::Config(_))
        ));
    }

    #[test]
    fn detailed_reports_match_trace() {
        let weather = series(
            vec![18.0, 22.0, 27.0, 31.0, 26.0, 19.0],
            vec![0.0, 150.0, 600.0, 800.0, 300.0, 0.0],
        );
        let config = SimulationConfig {
            pcm_mass: Mass::new::<kilogram>(0.5),
            fan_active: true,
            ..SimulationConfig::default()
        };

        let (trace, reports) = simulate_detailed(&weather, &config).unwrap();
        assert_eq!(reports.len(), trace.len());
        for (report, &t) in reports.iter().zip(trace.celsius()) {
            assert_eq!(report.temperature, t);
        }
        assert_eq!(simulate(&weather, &config).unwrap(), trace);
    }
}
