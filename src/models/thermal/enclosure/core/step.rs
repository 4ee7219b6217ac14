use uom::si::{energy::joule, f64::Energy};

use super::{
    config::SimulationConfig, pcm::PcmBuffer, properties::BinProperties, terms::EnergyBalance,
};

/// Weather seen by the bin during one step, after shading is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// Hour of day in `0..24`.
    pub hour: u8,

    /// Ambient reference temperature in °C (air or soil).
    pub ambient: f64,

    /// Effective irradiance reaching the bin in W/m².
    pub irradiance: f64,
}

/// Everything carried from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinState {
    /// Lumped bin temperature in °C.
    pub temperature: f64,
    pub pcm: PcmBuffer,
}

impl BinState {
    /// Initial state of a bin that starts at `temperature`.
    ///
    /// The phase-change buffer starts empty with its reference set to the
    /// starting temperature.
    #[must_use]
    pub fn initial(temperature: f64, pcm_capacity: Energy) -> Self {
        Self {
            temperature,
            pcm: PcmBuffer::new(pcm_capacity, temperature),
        }
    }
}

/// Diagnostic breakdown of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub balance: EnergyBalance,

    /// Energy moved into the bin by the phase-change buffer.
    pub pcm_energy: Energy,

    /// Latent energy held by the buffer after the step.
    pub pcm_latent_used: Energy,

    /// Bin temperature at the end of the step, in °C.
    pub temperature: f64,
}

/// Advances the bin by one hour.
///
/// Gain and loss terms are evaluated at the temperature the step starts
/// with. The phase-change buffer then adjusts the temperature directly, and
/// the net energy balance is applied on top of that.
#[must_use]
pub fn step(
    config: &SimulationConfig,
    props: &BinProperties,
    state: BinState,
    input: &StepInput,
) -> (BinState, StepReport) {
    let heat_capacity = props.joules_per_degree();
    let balance = EnergyBalance::evaluate(config, props, input, state.temperature);

    let (pcm, exchange) = state.pcm.exchange(state.temperature, heat_capacity);
    let temperature = exchange.temperature + balance.net().get::<joule>() / heat_capacity;

    let next = BinState { temperature, pcm };
    let report = StepReport {
        balance,
        pcm_energy: exchange.energy,
        pcm_latent_used: pcm.latent_used(),
        temperature,
    };
    (next, report)
}
