use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    energy::joule,
    f64::{Area, AvailableEnergy, Energy, Mass, Power},
    mass::kilogram,
    power::watt,
};

use crate::support::{
    constraint::{ConstraintError, NonNegative, StrictlyPositive},
    weather::DEFAULT_SOIL_COLUMN,
};

/// Exterior finish of the bin, which sets its solar absorptivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinColor {
    #[default]
    Black,
    /// Any lighter finish (white, green, terracotta, ...).
    Other,
}

impl BinColor {
    /// Fraction of incident irradiance absorbed by the bin surface.
    #[must_use]
    pub fn absorptivity(self) -> f64 {
        match self {
            Self::Black => 0.9,
            Self::Other => 0.3,
        }
    }
}

/// Which weather column the bin exchanges heat with.
///
/// Deserializes from `"air"` or `"soil"`, or from the boolean
/// `use_soil_as_ambient` flag where `true` means soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "AmbientKey")]
pub enum AmbientSource {
    /// Ambient air temperature (`temp`).
    #[default]
    Air,
    /// A shallow-soil temperature column, for bins sunk into the ground.
    Soil,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmbientKey {
    SoilFlag(bool),
    Named(AmbientName),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum AmbientName {
    Air,
    Soil,
}

impl From<AmbientKey> for AmbientSource {
    fn from(key: AmbientKey) -> Self {
        match key {
            AmbientKey::SoilFlag(true) | AmbientKey::Named(AmbientName::Soil) => Self::Soil,
            AmbientKey::SoilFlag(false) | AmbientKey::Named(AmbientName::Air) => Self::Air,
        }
    }
}

/// Hours of direct sun reaching a partially shaded bin, as `[start, end)`.
///
/// The window must not wrap past midnight: [`SimulationConfig::validate`]
/// rejects `start > end` and `end > 24`. A bin that should never see direct
/// sun is configured with `in_shade` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunlightWindow {
    pub start: u8,
    pub end: u8,
}

impl SunlightWindow {
    #[must_use]
    pub fn contains(self, hour: u8) -> bool {
        self.start <= hour && hour < self.end
    }
}

impl Default for SunlightWindow {
    fn default() -> Self {
        Self { start: 10, end: 15 }
    }
}

/// Lid venting strategy resolved from the two venting flags.
///
/// Smart venting takes priority over auto venting when both are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venting {
    Closed,
    /// Opens whenever the bin is above the overheat threshold.
    Auto,
    /// Opens at night whenever the bin is warmer than ambient.
    Smart,
}

/// Design variant of a bin, fixed for the duration of a simulation.
///
/// Every field has a default, so scenario files only need to name the
/// fields they change. Unknown keys are rejected. Physical quantities are
/// (de)serialized in SI base units (W, m², kg, J/kg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub color: BinColor,
    pub insulation: bool,

    /// Bin sits in full shade all day.
    pub in_shade: bool,

    /// Bin only receives direct sun during [`sunlight_hours`](Self::sunlight_hours).
    pub partial_shade: bool,
    pub sunlight_hours: SunlightWindow,

    /// Fully shade the bin on any calendar day whose peak air temperature
    /// exceeds 30 °C.
    pub shade_on_hot_days: bool,

    #[serde(alias = "use_soil_as_ambient")]
    pub ambient: AmbientSource,

    /// Soil column used when [`ambient`](Self::ambient) is [`AmbientSource::Soil`].
    pub soil_column: String,

    pub include_compost_heat: bool,

    /// Constant heat released by decomposing compost.
    pub compost_heat_rate: Power,

    pub solar_heating_panel: bool,

    /// Collector area of the solar heating panel.
    pub panel_area: Area,

    pub fan_active: bool,
    pub include_ice_packs: bool,
    pub auto_venting_lid: bool,
    pub smart_venting_lid: bool,

    /// Mass of phase-change material; zero disables buffering.
    #[serde(rename = "pcm_mass_kg")]
    pub pcm_mass: Mass,
    pub pcm_latent_heat: AvailableEnergy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            color: BinColor::Black,
            insulation: false,
            in_shade: false,
            partial_shade: false,
            sunlight_hours: SunlightWindow::default(),
            shade_on_hot_days: false,
            ambient: AmbientSource::Air,
            soil_column: DEFAULT_SOIL_COLUMN.to_owned(),
            include_compost_heat: false,
            compost_heat_rate: Power::new::<watt>(5.0),
            solar_heating_panel: false,
            panel_area: Area::new::<square_meter>(0.3 * 0.5),
            fan_active: false,
            include_ice_packs: false,
            auto_venting_lid: false,
            smart_venting_lid: false,
            pcm_mass: Mass::new::<kilogram>(0.0),
            pcm_latent_heat: AvailableEnergy::new::<joule_per_kilogram>(334_000.0),
        }
    }
}

impl SimulationConfig {
    /// Checks that all physical parameters are within their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = |field: &'static str| move |source| ConfigError::Invalid { field, source };

        NonNegative::new(self.compost_heat_rate).map_err(field("compost_heat_rate"))?;
        NonNegative::new(self.panel_area).map_err(field("panel_area"))?;
        NonNegative::new(self.pcm_mass).map_err(field("pcm_mass_kg"))?;
        StrictlyPositive::new(self.pcm_latent_heat).map_err(field("pcm_latent_heat"))?;

        let SunlightWindow { start, end } = self.sunlight_hours;
        if start > end || end > 24 {
            return Err(ConfigError::SunlightWindow { start, end });
        }

        Ok(())
    }

    /// Resolves the venting flags into a single strategy.
    #[must_use]
    pub fn venting(&self) -> Venting {
        if self.smart_venting_lid {
            Venting::Smart
        } else if self.auto_venting_lid {
            Venting::Auto
        } else {
            Venting::Closed
        }
    }

    /// Total latent energy the phase-change material can store.
    #[must_use]
    pub fn pcm_capacity(&self) -> Energy {
        Energy::new::<joule>(
            self.pcm_mass.get::<kilogram>() * self.pcm_latent_heat.get::<joule_per_kilogram>(),
        )
    }

    /// Returns a copy of this configuration that exchanges heat with soil.
    #[must_use]
    pub fn with_soil_ambient(&self) -> Self {
        Self {
            ambient: AmbientSource::Soil,
            ..self.clone()
        }
    }
}

/// Errors raised by [`SimulationConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A physical parameter is outside its valid range.
    #[error("invalid `{field}`")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The sunlight window is reversed or extends past midnight.
    #[error("invalid sunlight window [{start}, {end})")]
    SunlightWindow { start: u8, end: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.color.absorptivity(), 0.9);
        assert_eq!(config.soil_column, "soil_0_7");
        assert_relative_eq!(config.panel_area.get::<square_meter>(), 0.15);
        assert_eq!(config.pcm_capacity(), Energy::new::<joule>(0.0));
        assert_eq!(config.venting(), Venting::Closed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn smart_venting_wins() {
        let config = SimulationConfig {
            auto_venting_lid: true,
            smart_venting_lid: true,
            ..SimulationConfig::default()
        };
        assert_eq!(config.venting(), Venting::Smart);

        let config = SimulationConfig {
            auto_venting_lid: true,
            ..SimulationConfig::default()
        };
        assert_eq!(config.venting(), Venting::Auto);
    }

    #[test]
    fn pcm_capacity() {
        let config = SimulationConfig {
            pcm_mass: Mass::new::<kilogram>(2.0),
            ..SimulationConfig::default()
        };
        assert_relative_eq!(config.pcm_capacity().get::<joule>(), 668_000.0);
    }

    #[test]
    fn rejects_invalid_values() {
        let config = SimulationConfig {
            pcm_mass: Mass::new::<kilogram>(-1.0),
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "pcm_mass_kg",
                source: ConstraintError::Negative,
            })
        );

        let config = SimulationConfig {
            pcm_latent_heat: AvailableEnergy::new::<joule_per_kilogram>(0.0),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "pcm_latent_heat", .. })
        ));

        let config = SimulationConfig {
            sunlight_hours: SunlightWindow { start: 16, end: 9 },
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SunlightWindow { start: 16, end: 9 })
        );
    }

    #[test]
    fn deserializes_sparse_toml() {
        let config: SimulationConfig = toml::from_str(
            r#"
            color = "other"
            ambient = "soil"
            pcm_mass_kg = 1.5
            compost_heat_rate = 8.0
            sunlight_hours = { start = 9, end = 17 }
            "#,
        )
        .unwrap();

        assert_eq!(config.color, BinColor::Other);
        assert_eq!(config.ambient, AmbientSource::Soil);
        assert_relative_eq!(config.pcm_mass.get::<kilogram>(), 1.5);
        assert_relative_eq!(config.compost_heat_rate.get::<watt>(), 8.0);
        assert!(config.sunlight_hours.contains(16));
        assert!(!config.sunlight_hours.contains(17));
        assert!(!config.insulation);
    }

    #[test]
    fn soil_flag_selects_ambient() {
        let config: SimulationConfig = toml::from_str("use_soil_as_ambient = true").unwrap();
        assert_eq!(config.ambient, AmbientSource::Soil);

        let config: SimulationConfig = toml::from_str("use_soil_as_ambient = false").unwrap();
        assert_eq!(config.ambient, AmbientSource::Air);

        let both = "ambient = \"air\"\nuse_soil_as_ambient = true";
        assert!(toml::from_str::<SimulationConfig>(both).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = toml::from_str::<SimulationConfig>("insulaton = true").unwrap_err();
        assert!(err.to_string().contains("insulaton"));
    }

    #[test]
    fn soil_variant() {
        let config = SimulationConfig {
            insulation: true,
            ..SimulationConfig::default()
        };
        let soil = config.with_soil_ambient();
        assert_eq!(soil.ambient, AmbientSource::Soil);
        assert!(soil.insulation);
    }
}
