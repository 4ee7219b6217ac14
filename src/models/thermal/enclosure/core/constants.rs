//! Fixed physical constants of the lumped bin model.

/// Surface emissivity of the bin shell.
pub const EMISSIVITY: f64 = 0.95;

/// Stefan–Boltzmann constant in W/(m²·K⁴).
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Exposed surface area of the bin in m².
pub const SURFACE_AREA: f64 = 0.5;

/// Integration step length in seconds.
pub const TIME_STEP: f64 = 3600.0;

pub const KELVIN_OFFSET: f64 = 273.15;

/// Irradiance multiplier applied when the bin is shaded.
pub const SHADE_FACTOR: f64 = 0.1;

/// Daily peak air temperature (°C) above which hot-day shading kicks in.
pub const HOT_DAY_THRESHOLD: f64 = 30.0;

/// Bin temperature (°C) above which active cooling engages.
pub const OVERHEAT_THRESHOLD: f64 = 30.0;

/// Fraction of panel irradiance delivered into the bin as heat.
pub const PANEL_EFFICIENCY: f64 = 0.6;

/// Heat transfer coefficients of the cooling devices, in W/(m²·K).
pub const SMART_VENT_COEFF: f64 = 30.0;
pub const FAN_COEFF: f64 = 40.0;
pub const ICE_PACK_COEFF: f64 = 200.0;

/// Hours of day (inclusive) during which ice packs are swapped in.
pub const ICE_PACK_HOURS: std::ops::RangeInclusive<u8> = 12..=17;
