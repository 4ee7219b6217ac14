use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;

use crate::support::weather::{WeatherRecord, WeatherSeries};

use super::{
    config::SimulationConfig,
    constants::{HOT_DAY_THRESHOLD, SHADE_FACTOR},
};

/// Resolves how much of the raw irradiance reaches the bin at each hour.
///
/// Hot-day shading is decided per calendar date from the peak air
/// temperature of the whole date, including hours after the one being
/// simulated. A morning can therefore already be shaded because of an
/// afternoon that has not happened yet in the run.
#[derive(Debug, Clone)]
pub struct Shading<'a> {
    config: &'a SimulationConfig,
    hot_days: BTreeSet<Date>,
}

impl<'a> Shading<'a> {
    /// Prepares shading for a run of `config` over `series`.
    #[must_use]
    pub fn new(config: &'a SimulationConfig, series: &WeatherSeries) -> Self {
        let hot_days = if config.shade_on_hot_days {
            hot_days(series)
        } else {
            BTreeSet::new()
        };
        Self { config, hot_days }
    }

    /// Returns `true` if the bin is in full shade on `date`.
    #[must_use]
    pub fn fully_shaded(&self, date: Date) -> bool {
        if self.config.shade_on_hot_days && self.hot_days.contains(&date) {
            return true;
        }
        self.config.in_shade
    }

    /// Irradiance (W/m²) reaching the bin during `record`.
    #[must_use]
    pub fn effective_irradiance(&self, record: &WeatherRecord) -> f64 {
        let outside_window =
            self.config.partial_shade && !self.config.sunlight_hours.contains(record.hour());

        if self.fully_shaded(record.date()) || outside_window {
            record.sun * SHADE_FACTOR
        } else {
            record.sun
        }
    }
}

/// Dates whose peak air temperature exceeds the hot-day threshold.
fn hot_days(series: &WeatherSeries) -> BTreeSet<Date> {
    let mut daily_max: BTreeMap<Date, f64> = BTreeMap::new();
    for record in series.records() {
        daily_max
            .entry(record.date())
            .and_modify(|max| *max = max.max(record.air))
            .or_insert(record.air);
    }
    daily_max
        .into_iter()
        .filter(|&(_, max)| max > HOT_DAY_THRESHOLD)
        .map(|(date, _)| date)
        .collect()
}
