use uom::si::{energy::joule, f64::Energy};

/// Latent-heat buffer of the phase-change material in a bin.
///
/// The buffer tracks how much latent energy it currently holds against a
/// fixed reference temperature. When the bin drops below the reference the
/// buffer gives back heat (up to its remaining capacity), and when the bin
/// rises above it the buffer soaks heat up again (up to what it holds),
/// damping swings in both directions.
///
/// The reference temperature is the bin temperature at the start of the run
/// and is not updated afterwards.
///
/// This is a plain value: callers thread it from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcmBuffer {
    latent_used: f64,
    capacity: f64,
    reference: f64,
}

/// Outcome of one [`PcmBuffer::exchange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcmExchange {
    /// Energy moved into the bin; negative when the buffer took heat out.
    pub energy: Energy,

    /// Bin temperature after the exchange, in °C.
    pub temperature: f64,
}

impl PcmBuffer {
    /// Creates an empty buffer with the given capacity and reference temperature (°C).
    #[must_use]
    pub fn new(capacity: Energy, reference: f64) -> Self {
        Self {
            latent_used: 0.0,
            capacity: capacity.get::<joule>(),
            reference,
        }
    }

    /// Latent energy currently accounted to the buffer.
    #[must_use]
    pub fn latent_used(&self) -> Energy {
        Energy::new::<joule>(self.latent_used)
    }

    #[must_use]
    pub fn capacity(&self) -> Energy {
        Energy::new::<joule>(self.capacity)
    }

    /// Reference temperature in °C.
    #[must_use]
    pub fn reference(&self) -> f64 {
        self.reference
    }

    /// A buffer with no capacity never exchanges heat.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.capacity > 0.0
    }

    /// Exchanges heat between the buffer and a bin at `temperature`.
    ///
    /// `heat_capacity` is the bin's heat capacity in J/°C. Returns the updated
    /// buffer along with the energy moved and the resulting bin temperature.
    #[must_use]
    pub fn exchange(self, temperature: f64, heat_capacity: f64) -> (Self, PcmExchange) {
        let unchanged = PcmExchange {
            energy: Energy::new::<joule>(0.0),
            temperature,
        };
        if !self.is_active() {
            return (self, unchanged);
        }

        if temperature < self.reference && self.latent_used < self.capacity {
            let remaining = self.capacity - self.latent_used;
            let energy = remaining.min(heat_capacity * (self.reference - temperature));
            let latent_used = if energy >= remaining {
                self.capacity
            } else {
                self.latent_used + energy
            };
            let buffer = Self {
                latent_used,
                ..self
            };
            let exchange = PcmExchange {
                energy: Energy::new::<joule>(energy),
                temperature: temperature + energy / heat_capacity,
            };
            return (buffer, exchange);
        }

        if temperature > self.reference && self.latent_used > 0.0 {
            let energy = self.latent_used.min(heat_capacity * (temperature - self.reference));
            let buffer = Self {
                latent_used: self.latent_used - energy,
                ..self
            };
            let exchange = PcmExchange {
                energy: Energy::new::<joule>(-energy),
                temperature: temperature - energy / heat_capacity,
            };
            return (buffer, exchange);
        }

        (self, unchanged)
    }
}
