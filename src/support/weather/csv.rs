use std::{fs::File, io, path::Path};

use jiff::civil::DateTime;

use super::{AIR_COLUMN, SUN_COLUMN, TIMESTAMP_COLUMN, WeatherError, WeatherSeries};

impl WeatherSeries {
    /// Reads a normalized weather table from CSV.
    ///
    /// The header must contain `timestamp`, `temp`, and `sun`. Timestamps are
    /// civil ISO 8601 datetimes (e.g. `2024-07-01T13:00:00`). Every other
    /// column is attached as a soil column under its header name.
    ///
    /// # Errors
    ///
    /// Returns a [`WeatherError`] if the CSV is malformed, a required column is
    /// missing, a field cannot be parsed, or the resulting series is invalid.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, WeatherError> {
        let mut reader = ::csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();

        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(WeatherError::MissingColumn(name))
        };
        let ts_idx = position(TIMESTAMP_COLUMN)?;
        let air_idx = position(AIR_COLUMN)?;
        let sun_idx = position(SUN_COLUMN)?;

        let soil_idx: Vec<usize> = (0..headers.len())
            .filter(|i| ![ts_idx, air_idx, sun_idx].contains(i))
            .collect();

        let mut timestamps = Vec::new();
        let mut air = Vec::new();
        let mut sun = Vec::new();
        let mut soil = vec![Vec::new(); soil_idx.len()];

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

            let raw = field(ts_idx);
            let timestamp = raw
                .parse::<DateTime>()
                .map_err(|source| WeatherError::Timestamp {
                    row,
                    value: raw.to_owned(),
                    source,
                })?;
            timestamps.push(timestamp);

            let number = |idx: usize| {
                let raw = field(idx);
                raw.parse::<f64>().map_err(|source| WeatherError::Value {
                    column: headers[idx].trim().to_owned(),
                    row,
                    value: raw.to_owned(),
                    source,
                })
            };
            air.push(number(air_idx)?);
            sun.push(number(sun_idx)?);
            for (column, &idx) in soil.iter_mut().zip(&soil_idx) {
                column.push(number(idx)?);
            }
        }

        let mut series = Self::new(timestamps, air, sun)?;
        for (values, idx) in soil.into_iter().zip(soil_idx) {
            series = series.with_soil(headers[idx].trim(), values)?;
        }
        Ok(series)
    }

    /// Reads a normalized weather table from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// See [`WeatherSeries::from_csv_reader`]. File open failures are reported
    /// as [`WeatherError::Csv`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, WeatherError> {
        let file = File::open(path).map_err(::csv::Error::from)?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn reads_soil_columns_in_any_order() {
        let csv = "\
sun,soil_7_28,timestamp,temp,soil_0_7
0,12.0,2024-01-15T23:00:00,4.5,8.0
0,12.1,2024-01-16T00:00:00,4.0,7.5
";
        let series = WeatherSeries::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.air(), &[4.5, 4.0]);
        assert_eq!(series.soil("soil_0_7").unwrap(), &[8.0, 7.5]);
        assert_eq!(series.soil("soil_7_28").unwrap(), &[12.0, 12.1]);
        assert_eq!(series.timestamps()[1].date(), date(2024, 1, 16));
    }

    #[test]
    fn reports_missing_column() {
        let csv = "timestamp,temp\n2024-01-15T23:00:00,4.5\n";
        let err = WeatherSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingColumn("sun")));
    }

    #[test]
    fn reports_bad_fields() {
        let csv = "timestamp,temp,sun\nyesterday,4.5,0\n";
        let err = WeatherSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, WeatherError::Timestamp { row: 0, .. }));

        let csv = "timestamp,temp,sun\n2024-01-15T23:00:00,warm,0\n";
        let err = WeatherSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, WeatherError::Value { ref column, .. } if column == "temp"));
    }
}
