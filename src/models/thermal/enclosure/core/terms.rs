//! Per-step heat gain and loss terms.
//!
//! Each term is a pure function of the configuration, the bin temperature at
//! the start of the step, and the step's weather. Gains and losses are both
//! returned as energies over one time step, signed so that a positive loss
//! removes heat from the bin. Losses driven by `T - ambient` go negative when
//! the bin is colder than ambient, which turns them into gains.

use uom::{
    ConstZero,
    si::{area::square_meter, energy::joule, f64::Energy, power::watt},
};

use super::{
    config::{SimulationConfig, Venting},
    constants::{
        FAN_COEFF, ICE_PACK_COEFF, ICE_PACK_HOURS, KELVIN_OFFSET, OVERHEAT_THRESHOLD,
        PANEL_EFFICIENCY, SMART_VENT_COEFF, STEFAN_BOLTZMANN, SURFACE_AREA, TIME_STEP,
    },
    properties::BinProperties,
    step::StepInput,
};

/// Solar heat absorbed through the bin shell.
#[must_use]
pub fn solar_absorption(props: &BinProperties, irradiance: f64) -> Energy {
    joules(props.absorptivity * irradiance * SURFACE_AREA * TIME_STEP * props.solar_fraction)
}

/// Constant self-heating of active compost.
#[must_use]
pub fn compost_heat(config: &SimulationConfig) -> Energy {
    if !config.include_compost_heat {
        return Energy::ZERO;
    }
    joules(config.compost_heat_rate.get::<watt>() * TIME_STEP)
}

/// Heat delivered by a solar heating panel.
#[must_use]
pub fn panel_assist(config: &SimulationConfig, props: &BinProperties, irradiance: f64) -> Energy {
    if !config.solar_heating_panel {
        return Energy::ZERO;
    }
    let area = config.panel_area.get::<square_meter>();
    joules(area * irradiance * PANEL_EFFICIENCY * TIME_STEP * props.solar_fraction)
}

/// Convective exchange with ambient.
#[must_use]
pub fn convective_loss(props: &BinProperties, temperature: f64, ambient: f64) -> Energy {
    exchange(props.convection_coeff, temperature, ambient)
}

/// Net longwave radiative exchange with ambient.
#[must_use]
pub fn radiative_loss(props: &BinProperties, temperature: f64, ambient: f64) -> Energy {
    let t_k = temperature + KELVIN_OFFSET;
    let ambient_k = ambient + KELVIN_OFFSET;
    joules(
        props.emissivity
            * STEFAN_BOLTZMANN
            * SURFACE_AREA
            * (t_k.powi(4) - ambient_k.powi(4))
            * TIME_STEP,
    )
}

/// Heat carried out through an open lid.
///
/// Smart venting only opens at night while the bin is warmer than ambient.
/// Auto venting opens whenever the bin overheats, day or night.
#[must_use]
pub fn venting_loss(
    config: &SimulationConfig,
    props: &BinProperties,
    hour: u8,
    temperature: f64,
    ambient: f64,
) -> Energy {
    match config.venting() {
        Venting::Smart if is_night(hour) && temperature > ambient => {
            exchange(SMART_VENT_COEFF, temperature, ambient)
        }
        Venting::Auto if temperature > OVERHEAT_THRESHOLD => {
            exchange(props.auto_vent_coeff, temperature, ambient)
        }
        _ => Energy::ZERO,
    }
}

/// Forced-air cooling from a fan that runs while the bin overheats.
#[must_use]
pub fn fan_loss(config: &SimulationConfig, temperature: f64, ambient: f64) -> Energy {
    if config.fan_active && temperature > OVERHEAT_THRESHOLD {
        exchange(FAN_COEFF, temperature, ambient)
    } else {
        Energy::ZERO
    }
}

/// Cooling from ice packs placed in the bin during the afternoon peak.
#[must_use]
pub fn ice_pack_loss(config: &SimulationConfig, hour: u8, temperature: f64, ambient: f64) -> Energy {
    if config.include_ice_packs && ICE_PACK_HOURS.contains(&hour) && temperature > OVERHEAT_THRESHOLD
    {
        exchange(ICE_PACK_COEFF, temperature, ambient)
    } else {
        Energy::ZERO
    }
}

/// All energy terms of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance {
    pub solar: Energy,
    pub compost: Energy,
    pub panel: Energy,
    pub convection: Energy,
    pub radiation: Energy,
    pub venting: Energy,
    pub fan: Energy,
    pub ice_packs: Energy,
}

impl EnergyBalance {
    /// Evaluates every term at the bin temperature `temperature`.
    #[must_use]
    pub fn evaluate(
        config: &SimulationConfig,
        props: &BinProperties,
        input: &StepInput,
        temperature: f64,
    ) -> Self {
        let StepInput {
            hour,
            ambient,
            irradiance,
        } = *input;

        Self {
            solar: solar_absorption(props, irradiance),
            compost: compost_heat(config),
            panel: panel_assist(config, props, irradiance),
            convection: convective_loss(props, temperature, ambient),
            radiation: radiative_loss(props, temperature, ambient),
            venting: venting_loss(config, props, hour, temperature, ambient),
            fan: fan_loss(config, temperature, ambient),
            ice_packs: ice_pack_loss(config, hour, temperature, ambient),
        }
    }

    #[must_use]
    pub fn gains(&self) -> Energy {
        self.solar + self.compost + self.panel
    }

    #[must_use]
    pub fn losses(&self) -> Energy {
        self.convection + self.radiation + self.venting + self.fan + self.ice_packs
    }

    /// Net energy into the bin over the step.
    #[must_use]
    pub fn net(&self) -> Energy {
        self.solar + self.compost + self.panel
            - self.convection
            - self.radiation
            - self.venting
            - self.fan
            - self.ice_packs
    }
}

fn is_night(hour: u8) -> bool {
    hour < 7 || hour >= 19
}

fn exchange(coeff: f64, temperature: f64, ambient: f64) -> Energy {
    joules(coeff * SURFACE_AREA * (temperature - ambient) * TIME_STEP)
}

fn joules(value: f64) -> Energy {
    Energy::new::<joule>(value)
}
