//! Batch runs of named bin designs.
//!
//! A [`ScenarioSet`] is a list of named [`SimulationConfig`]s, usually read
//! from a TOML file:
//!
//! ```toml
//! soil_variants = true
//!
//! [[scenario]]
//! name = "black"
//!
//! [[scenario]]
//! name = "white_insulated"
//! color = "other"
//! insulation = true
//! ```
//!
//! [`run`] simulates every scenario against one weather series and gathers
//! the traces into a [`ScenarioTable`]. With `soil_variants` enabled each
//! scenario is run twice, as `<name>_air` against air and `<name>_soil`
//! against the configured soil column.
//!
//! Scenarios are independent, so they run in parallel on the rayon thread
//! pool. Column order always follows the scenario order.

mod error;
mod table;

pub use error::ScenarioError;
pub use table::ScenarioTable;

use std::{collections::HashSet, fs, path::Path};

use rayon::prelude::*;
use serde::{Deserialize, Serialize, de};
use tracing::info;

use crate::{
    models::thermal::enclosure::{AmbientSource, SimulationConfig, simulate},
    support::weather::WeatherSeries,
};

/// A named bin design.
///
/// In a scenario file the configuration keys sit next to `name` in the same
/// table. Any key that is neither `name` nor a [`SimulationConfig`] field is
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "toml::Table")]
pub struct Scenario {
    pub name: String,

    #[serde(flatten)]
    pub config: SimulationConfig,
}

impl TryFrom<toml::Table> for Scenario {
    type Error = toml::de::Error;

    fn try_from(mut table: toml::Table) -> Result<Self, Self::Error> {
        let name = table
            .remove("name")
            .ok_or_else(|| <toml::de::Error as de::Error>::missing_field("name"))?;

        Ok(Self {
            name: String::deserialize(name)?,
            config: SimulationConfig::deserialize(toml::Value::Table(table))?,
        })
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>, config: SimulationConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// An ordered collection of scenarios to run together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSet {
    /// Run every scenario against both air and soil.
    #[serde(default)]
    pub soil_variants: bool,

    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    #[must_use]
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            soil_variants: false,
            scenarios,
        }
    }

    #[must_use]
    pub fn with_soil_variants(mut self, soil_variants: bool) -> Self {
        self.soil_variants = soil_variants;
        self
    }

    /// Parses a scenario set from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the document is not a valid scenario set.
    pub fn from_toml_str(source: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads a scenario set from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the file cannot be read or parsed.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// The scenarios that [`run`] will simulate, with soil variants expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::DuplicateName`] if two expanded scenarios share a name.
    pub fn expand(&self) -> Result<Vec<Scenario>, ScenarioError> {
        let expanded: Vec<Scenario> = if self.soil_variants {
            self.scenarios
                .iter()
                .flat_map(|s| {
                    [
                        (AmbientSource::Air, "air"),
                        (AmbientSource::Soil, "soil"),
                    ]
                    .map(|(ambient, suffix)| {
                        Scenario::new(
                            format!("{}_{suffix}", s.name),
                            SimulationConfig {
                                ambient,
                                ..s.config.clone()
                            },
                        )
                    })
                })
                .collect()
        } else {
            self.scenarios.clone()
        };

        let mut seen = HashSet::new();
        if let Some(dup) = expanded.iter().find(|s| !seen.insert(s.name.as_str())) {
            return Err(ScenarioError::DuplicateName(dup.name.clone()));
        }

        Ok(expanded)
    }
}

/// Simulates every scenario in `set` over `series`.
///
/// # Errors
///
/// Returns a [`ScenarioError`] if scenario names collide or any simulation
/// fails. No partial table is returned.
pub fn run(series: &WeatherSeries, set: &ScenarioSet) -> Result<ScenarioTable, ScenarioError> {
    let scenarios = set.expand()?;

    info!(
        scenarios = scenarios.len(),
        steps = series.len(),
        "running bin scenarios"
    );

    let columns = scenarios
        .par_iter()
        .map(|scenario| {
            simulate(series, &scenario.config)
                .map(|trace| (scenario.name.clone(), trace))
                .map_err(|source| ScenarioError::Simulate {
                    name: scenario.name.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScenarioTable::new(series.timestamps().to_vec(), columns))
}
