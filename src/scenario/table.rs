use std::io;

use jiff::civil::DateTime;

use crate::{
    models::thermal::enclosure::Trace,
    support::zones::{ZoneHours, ZoneTable},
};

use super::ScenarioError;

/// Temperature traces of several scenarios over a shared timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTable {
    timestamps: Vec<DateTime>,
    columns: Vec<(String, Trace)>,
}

impl ScenarioTable {
    pub(super) fn new(timestamps: Vec<DateTime>, columns: Vec<(String, Trace)>) -> Self {
        debug_assert!(columns.iter().all(|(_, t)| t.len() == timestamps.len()));
        Self {
            timestamps,
            columns,
        }
    }

    /// Number of scenario columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> &[DateTime] {
        &self.timestamps
    }

    /// Scenario names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Trace> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, trace)| trace)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Trace)> {
        self.columns.iter().map(|(name, trace)| (name.as_str(), trace))
    }

    /// Hours each scenario spends in each zone of `zones`.
    #[must_use]
    pub fn hours_in_zones<'z>(&self, zones: &'z ZoneTable) -> Vec<(&str, Vec<ZoneHours<'z>>)> {
        self.columns
            .iter()
            .map(|(name, trace)| (name.as_str(), zones.hours_in_zones(trace.celsius())))
            .collect()
    }

    /// Writes the table as CSV: a `timestamp` column followed by one column per scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Csv`] if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ScenarioError> {
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(std::iter::once("timestamp").chain(self.names()))?;
        for (row, timestamp) in self.timestamps.iter().enumerate() {
            let values = self
                .columns
                .iter()
                .map(|(_, trace)| trace.celsius()[row].to_string());
            writer.write_record(std::iter::once(timestamp.to_string()).chain(values))?;
        }

        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{SignedDuration, civil::date};

    use crate::{
        models::thermal::enclosure::{SimulationConfig, simulate},
        support::weather::WeatherSeries,
    };

    fn table() -> ScenarioTable {
        let start = date(2024, 1, 10).at(22, 0, 0, 0);
        let timestamps: Vec<_> = (0..3)
            .map(|h| start.checked_add(SignedDuration::from_hours(h)).unwrap())
            .collect();
        let series =
            WeatherSeries::new(timestamps.clone(), vec![20.0; 3], vec![0.0; 3]).unwrap();
        let trace = simulate(&series, &SimulationConfig::default()).unwrap();

        ScenarioTable::new(timestamps, vec![("still".into(), trace)])
    }

    #[test]
    fn lookup() {
        let table = table();
        assert_eq!(table.len(), 1);
        assert!(table.column("still").is_some());
        assert!(table.column("missing").is_none());
        assert_eq!(table.columns().count(), 1);
    }

    #[test]
    fn csv_layout() {
        let mut out = Vec::new();
        table().write_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "timestamp,still",
                "2024-01-10T22:00:00,20",
                "2024-01-10T23:00:00,20",
                "2024-01-11T00:00:00,20",
            ]
        );
    }

    #[test]
    fn zone_hours_per_scenario() {
        let zones = ZoneTable::survival();
        let table = table();
        let hours = table.hours_in_zones(&zones);

        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].0, "still");
        assert_eq!(hours[0].1[3].hours, 3);
    }
}
