//! Weather CSV in, scenario table out.

use std::fmt::Write as _;

use wigglebin_models::{
    scenario::{self, ScenarioSet},
    support::{weather::WeatherSeries, zones::ZoneTable},
};

fn weather_csv() -> String {
    let mut csv = String::from("timestamp,temp,sun,soil_0_7\n");
    for hour in 0..24 {
        let air = 14.0 + f64::from(hour.min(14)) * 0.8;
        let sun = if (7..19).contains(&hour) { 600.0 } else { 0.0 };
        writeln!(csv, "2024-06-21T{hour:02}:00:00,{air},{sun},15.5").unwrap();
    }
    csv
}

const SCENARIOS: &str = r#"
    soil_variants = true

    [[scenario]]
    name = "black"

    [[scenario]]
    name = "shaded_pcm"
    in_shade = true
    insulation = true
    pcm_mass_kg = 0.5
"#;

#[test]
fn csv_to_table() {
    let series = WeatherSeries::from_csv_reader(weather_csv().as_bytes()).unwrap();
    let set = ScenarioSet::from_toml_str(SCENARIOS).unwrap();

    let table = scenario::run(&series, &set).unwrap();
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        ["black_air", "black_soil", "shaded_pcm_air", "shaded_pcm_soil"]
    );

    let black = table.column("black_air").unwrap().summary().unwrap();
    let shaded = table.column("shaded_pcm_air").unwrap().summary().unwrap();
    assert!(shaded.max < black.max);

    let zones = ZoneTable::productivity();
    let hours = table.hours_in_zones(&zones);
    for (_, counts) in &hours {
        assert!(counts.iter().map(|z| z.hours).sum::<usize>() <= 24);
    }

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 25);
    assert!(text.starts_with("timestamp,black_air,black_soil,shaded_pcm_air,shaded_pcm_soil\n"));
}
