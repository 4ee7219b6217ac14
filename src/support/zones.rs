//! Worm thermal zones.
//!
//! Composting worms tolerate a fairly narrow temperature band. A
//! [`ZoneTable`] partitions the temperature axis into contiguous, labelled,
//! right-open bands `[lower, upper)` so a simulated trace can be summarized as
//! hours spent in each band.
//!
//! Two tables are built in:
//!
//! - [`ZoneTable::productivity`]: the five bands used when shading charts,
//!   spanning −5 °C to 50 °C.
//! - [`ZoneTable::survival`]: six bands covering the whole axis, from
//!   freezing to melting.
//!
//! ```
//! use wigglebin_models::support::zones::ZoneTable;
//!
//! let zones = ZoneTable::survival();
//! let counts = zones.hours_in_zones(&[-2.0, 20.0, 22.0, 36.0]);
//!
//! assert_eq!(counts[0].hours, 1); // Freezing
//! assert_eq!(counts[3].hours, 2); // Productive
//! assert_eq!(counts[5].hours, 1); // Melting
//! ```

use std::cmp::Ordering;

use thiserror::Error;

/// A labelled temperature band `[lower, upper)` in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
}

impl Zone {
    pub fn new(label: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    /// Returns `true` if `celsius` lies within `[lower, upper)`.
    #[must_use]
    pub fn contains(&self, celsius: f64) -> bool {
        self.lower <= celsius && celsius < self.upper
    }
}

/// Hours spent in one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneHours<'a> {
    pub zone: &'a Zone,
    pub hours: usize,
}

/// Errors that can occur while building a [`ZoneTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("zone table has no zones")]
    Empty,
    #[error("zone {index} has lower bound not below its upper bound")]
    Inverted { index: usize },
    #[error("zone {index} does not start where the previous zone ends")]
    NotContiguous { index: usize },
}

/// An ordered, contiguous set of temperature zones.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    /// Builds a table from ascending, contiguous zones.
    ///
    /// # Errors
    ///
    /// Returns a [`ZoneError`] if the list is empty, a zone is inverted or
    /// empty, or a zone's lower bound differs from the previous upper bound.
    pub fn new(zones: Vec<Zone>) -> Result<Self, ZoneError> {
        if zones.is_empty() {
            return Err(ZoneError::Empty);
        }
        for (index, zone) in zones.iter().enumerate() {
            if zone.lower.partial_cmp(&zone.upper) != Some(Ordering::Less) {
                return Err(ZoneError::Inverted { index });
            }
            if index > 0 && zones[index - 1].upper != zone.lower {
                return Err(ZoneError::NotContiguous { index });
            }
        }
        Ok(Self { zones })
    }

    /// Chart bands from dangerous cold to dangerous heat.
    #[must_use]
    pub fn productivity() -> Self {
        Self {
            zones: vec![
                Zone::new("Dangerous Cold", -5.0, 10.0),
                Zone::new("Low Productivity", 10.0, 15.0),
                Zone::new("Peak Productivity", 15.0, 25.0),
                Zone::new("Low Productivity", 25.0, 30.0),
                Zone::new("Dangerous Heat", 30.0, 50.0),
            ],
        }
    }

    /// Survival bands covering every finite temperature.
    #[must_use]
    pub fn survival() -> Self {
        Self {
            zones: vec![
                Zone::new("Freezing (<0°C)", f64::NEG_INFINITY, 0.0),
                Zone::new("Cold (0–10°C)", 0.0, 10.0),
                Zone::new("Suboptimal (10–15°C)", 10.0, 15.0),
                Zone::new("Productive (15–30°C)", 15.0, 30.0),
                Zone::new("Stress (30–35°C)", 30.0, 35.0),
                Zone::new("Melting (>35°C)", 35.0, f64::INFINITY),
            ],
        }
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns the zone containing `celsius`, or `None` if it is outside the table.
    #[must_use]
    pub fn classify(&self, celsius: f64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(celsius))
    }

    /// Counts hourly samples per zone, in table order.
    ///
    /// Every zone appears in the result, including those with zero hours.
    /// Samples outside the table are not counted.
    #[must_use]
    pub fn hours_in_zones(&self, temperatures: &[f64]) -> Vec<ZoneHours<'_>> {
        let mut counts = vec![0; self.zones.len()];
        for &t in temperatures {
            if let Some(idx) = self.zones.iter().position(|zone| zone.contains(t)) {
                counts[idx] += 1;
            }
        }
        self.zones
            .iter()
            .zip(counts)
            .map(|(zone, hours)| ZoneHours { zone, hours })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_right_open() {
        let zones = ZoneTable::survival();
        assert_eq!(zones.classify(15.0).unwrap().label, "Productive (15–30°C)");
        assert_eq!(zones.classify(14.999).unwrap().label, "Suboptimal (10–15°C)");
        assert_eq!(zones.classify(35.0).unwrap().label, "Melting (>35°C)");
        assert!(zones.classify(f64::NAN).is_none());
    }

    #[test]
    fn productivity_is_bounded() {
        let zones = ZoneTable::productivity();
        assert!(zones.classify(-6.0).is_none());
        assert!(zones.classify(50.0).is_none());
        assert_eq!(zones.classify(20.0).unwrap().label, "Peak Productivity");

        let counts = zones.hours_in_zones(&[-10.0, 12.0, 27.0, 29.0, 60.0]);
        let hours: Vec<_> = counts.iter().map(|c| c.hours).collect();
        assert_eq!(hours, [0, 1, 0, 2, 0]);
    }

    #[test]
    fn validates_custom_tables() {
        assert_eq!(ZoneTable::new(vec![]), Err(ZoneError::Empty));
        assert_eq!(
            ZoneTable::new(vec![Zone::new("a", 5.0, 5.0)]),
            Err(ZoneError::Inverted { index: 0 })
        );
        assert_eq!(
            ZoneTable::new(vec![Zone::new("a", 0.0, 5.0), Zone::new("b", 6.0, 9.0)]),
            Err(ZoneError::NotContiguous { index: 1 })
        );

        let table =
            ZoneTable::new(vec![Zone::new("cool", 0.0, 20.0), Zone::new("warm", 20.0, 40.0)])
                .unwrap();
        assert_eq!(table.zones().len(), 2);
    }
}
