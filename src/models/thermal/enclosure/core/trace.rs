use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// Simulated bin temperatures, one per input hour.
///
/// Values are in °C and index-aligned with the weather series that
/// produced them. A trace only grows during a run; nothing revises a value
/// once it has been pushed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    celsius: Vec<f64>,
}

/// Extremes and mean of a [`Trace`], in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Trace {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            celsius: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn push(&mut self, celsius: f64) {
        self.celsius.push(celsius);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.celsius.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.celsius.is_empty()
    }

    /// Temperatures in °C.
    #[must_use]
    pub fn celsius(&self) -> &[f64] {
        &self.celsius
    }

    /// Temperatures as [`ThermodynamicTemperature`] quantities.
    pub fn temperatures(&self) -> impl ExactSizeIterator<Item = ThermodynamicTemperature> + '_ {
        self.celsius
            .iter()
            .map(|&t| ThermodynamicTemperature::new::<degree_celsius>(t))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.celsius
    }

    /// Summarizes the trace, or `None` if it is empty.
    #[must_use]
    pub fn summary(&self) -> Option<TraceSummary> {
        let first = *self.celsius.first()?;
        let (min, max, sum) = self
            .celsius
            .iter()
            .fold((first, first, 0.0), |(min, max, sum), &t| {
                (min.min(t), max.max(t), sum + t)
            });

        #[allow(clippy::cast_precision_loss)]
        let mean = sum / self.celsius.len() as f64;

        Some(TraceSummary { min, max, mean })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    fn summary() {
        let mut trace = Trace::with_capacity(3);
        assert!(trace.summary().is_none());

        for t in [12.0, 30.0, 18.0] {
            trace.push(t);
        }

        let summary = trace.summary().unwrap();
        assert_eq!(summary.min, 12.0);
        assert_eq!(summary.max, 30.0);
        assert_relative_eq!(summary.mean, 20.0);
    }

    #[test]
    fn quantities() {
        let mut trace = Trace::default();
        trace.push(0.0);

        let t = trace.temperatures().next().unwrap();
        assert_relative_eq!(t.get::<kelvin>(), 273.15, epsilon = 1e-9);
    }
}
