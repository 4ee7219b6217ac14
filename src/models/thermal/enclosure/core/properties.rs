use uom::si::{f64::HeatCapacity, heat_capacity::joule_per_kelvin};

use super::{
    config::{AmbientSource, SimulationConfig},
    constants::EMISSIVITY,
};

/// Lumped thermal properties of a bin, derived once from its configuration.
///
/// Coupling to soil is weaker than coupling to open air: a buried bin sees
/// less direct sun, exchanges less heat by convection and radiation, and
/// vents less effectively. Those effects are folded into the coefficients
/// here so the per-step energy terms stay branch-light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinProperties {
    /// Heat needed to raise the bin by one degree.
    pub heat_capacity: HeatCapacity,

    pub absorptivity: f64,

    /// Share of the computed solar gain that actually reaches the bin.
    pub solar_fraction: f64,

    /// Convective coefficient in W/(m²·K).
    pub convection_coeff: f64,

    /// Effective emissivity for net radiative exchange with ambient.
    pub emissivity: f64,

    /// Auto-venting coefficient in W/(m²·K).
    pub auto_vent_coeff: f64,
}

impl BinProperties {
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        let soil = config.ambient == AmbientSource::Soil;
        let insulated = config.insulation;

        let convection_coeff = match (soil, insulated) {
            (true, true) => 1.5,
            (true, false) => 3.0,
            (false, true) => 2.0,
            (false, false) => 5.0,
        };

        Self {
            heat_capacity: HeatCapacity::new::<joule_per_kelvin>(if insulated { 1e5 } else { 5e4 }),
            absorptivity: config.color.absorptivity(),
            solar_fraction: if soil { 0.2 } else { 1.0 },
            convection_coeff,
            emissivity: if soil { EMISSIVITY * 0.5 } else { EMISSIVITY },
            auto_vent_coeff: if soil { 10.0 } else { 20.0 },
        }
    }

    /// Heat capacity in J/°C.
    #[must_use]
    pub fn joules_per_degree(&self) -> f64 {
        self.heat_capacity.get::<joule_per_kelvin>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::thermal::enclosure::core::config::BinColor;

    fn props(ambient: AmbientSource, insulation: bool) -> BinProperties {
        BinProperties::from_config(&SimulationConfig {
            ambient,
            insulation,
            ..SimulationConfig::default()
        })
    }

    #[test]
    fn convection_table() {
        assert_eq!(props(AmbientSource::Soil, true).convection_coeff, 1.5);
        assert_eq!(props(AmbientSource::Soil, false).convection_coeff, 3.0);
        assert_eq!(props(AmbientSource::Air, true).convection_coeff, 2.0);
        assert_eq!(props(AmbientSource::Air, false).convection_coeff, 5.0);
    }

    #[test]
    fn soil_weakens_coupling() {
        let air = props(AmbientSource::Air, false);
        let soil = props(AmbientSource::Soil, false);

        assert_eq!(air.solar_fraction, 1.0);
        assert_eq!(soil.solar_fraction, 0.2);
        assert_eq!(air.emissivity, 0.95);
        assert_eq!(soil.emissivity, 0.475);
        assert_eq!(air.auto_vent_coeff, 20.0);
        assert_eq!(soil.auto_vent_coeff, 10.0);
    }

    #[test]
    fn insulation_adds_mass() {
        assert_eq!(props(AmbientSource::Air, true).joules_per_degree(), 1e5);
        assert_eq!(props(AmbientSource::Air, false).joules_per_degree(), 5e4);
    }

    #[test]
    fn color_sets_absorptivity() {
        let light = BinProperties::from_config(&SimulationConfig {
            color: BinColor::Other,
            ..SimulationConfig::default()
        });
        assert_eq!(light.absorptivity, 0.3);
    }
}
