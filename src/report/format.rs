//! Formatted terminal output: the dashboard grid and per-series summaries.

use crate::data::catalog::{Category, INDICATORS, Indicator};
use crate::domain::{Frequency, LatestValue, ObservationTable, Units};

/// Sentinel shown where a series has no usable reading at this frequency.
pub const MISSING: &str = "---";

/// One dashboard tile: an indicator plus its latest reading.
#[derive(Debug, Clone)]
pub struct Tile {
    pub indicator: Indicator,
    pub latest: LatestValue,
}

/// Render a latest reading as the pair of strings a tile shows.
///
/// Values are year-over-year percent changes, so they carry a `%` suffix;
/// missing readings collapse to the `---`/`---` pair.
pub fn fmt_latest(latest: &LatestValue) -> (String, String) {
    match latest {
        LatestValue::Value { value, date } => (format!("{value:.2}%"), date.to_string()),
        LatestValue::Missing => (MISSING.to_string(), MISSING.to_string()),
    }
}

/// Format the home view: every catalog indicator grouped by category.
pub fn format_dashboard(tiles: &[Tile], frequency: Frequency) -> String {
    let mut out = String::new();
    out.push_str("=== US Economic Dashboard ===\n");
    out.push_str(&format!(
        "YoY% | {} | latest released value per series\n",
        frequency.display_name()
    ));

    for category in Category::ALL {
        let rows: Vec<&Tile> = tiles
            .iter()
            .filter(|t| t.indicator.category == category)
            .collect();
        if rows.is_empty() {
            continue;
        }

        out.push_str(&format!("\n{}\n", category.display_name()));
        for tile in rows {
            let (value, date) = fmt_latest(&tile.latest);
            out.push_str(&format!(
                "  {:<55} {:>9} {:>12}\n",
                truncate(tile.indicator.name, 55),
                value,
                date
            ));
        }
    }

    out
}

/// Build the full tile list by asking `fetch` for each catalog indicator.
///
/// `fetch` is the never-failing latest-value operation, so one broken series
/// renders as a `---` tile instead of aborting the view.
pub fn dashboard_tiles<F>(frequency: Frequency, mut fetch: F) -> Vec<Tile>
where
    F: FnMut(&str, Frequency) -> LatestValue,
{
    INDICATORS
        .iter()
        .map(|indicator| Tile {
            indicator: *indicator,
            latest: fetch(indicator.series_id, frequency),
        })
        .collect()
}

/// Per-series summary printed after a fetch.
pub fn format_series_summary(
    series_id: &str,
    frequency: Frequency,
    units: Units,
    table: &ObservationTable,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {series_id} | {} | {} ===\n",
        frequency.display_name(),
        units.display_name()
    ));

    if table.is_empty() {
        out.push_str("No data available at this frequency.\n");
        return out;
    }

    let missing = table.rows().iter().filter(|o| o.value.is_none()).count();
    out.push_str(&format!("Observations: {} ({missing} missing)\n", table.len()));
    out.push_str(&format!("First data from: {}\n", fmt_opt_date(table.first_date())));
    out.push_str(&format!("Last data from: {}\n", fmt_opt_date(table.last_date())));

    match table.latest_valid() {
        Some((value, date)) => {
            out.push_str(&format!("Latest value: {} ({date})\n", fmt_value(value, units)));
        }
        None => out.push_str("Latest value: ---\n"),
    }

    out
}

fn fmt_value(value: f64, units: Units) -> String {
    match units {
        Units::Level => format!("{value:.2}"),
        Units::Pc1 | Units::Pch => format!("{value:.2}%"),
    }
}

fn fmt_opt_date(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => MISSING.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn missing_tiles_render_the_sentinel_pair() {
        let (value, date) = fmt_latest(&LatestValue::Missing);
        assert_eq!(value, "---");
        assert_eq!(date, "---");
    }

    #[test]
    fn valued_tiles_render_percent_and_date() {
        let latest = LatestValue::Value { value: 3.256, date: d(2024, 2, 1) };
        let (value, date) = fmt_latest(&latest);
        assert_eq!(value, "3.26%");
        assert_eq!(date, "2024-02-01");
    }

    #[test]
    fn dashboard_lists_every_catalog_indicator() {
        let tiles = dashboard_tiles(Frequency::Monthly, |_, _| LatestValue::Missing);
        assert_eq!(tiles.len(), INDICATORS.len());

        let out = format_dashboard(&tiles, Frequency::Monthly);
        for category in Category::ALL {
            assert!(out.contains(category.display_name()));
        }
        assert!(out.contains("---"));
        assert!(out.contains("Monthly"));
    }

    #[test]
    fn summary_reports_window_and_latest() {
        let table = ObservationTable::from_rows(vec![
            Observation { date: d(2000, 1, 1), value: Some(1.0) },
            Observation { date: d(2000, 2, 1), value: None },
            Observation { date: d(2000, 3, 1), value: Some(2.5) },
        ]);

        let out = format_series_summary("TCU", Frequency::Monthly, Units::Pc1, &table);
        assert!(out.contains("Observations: 3 (1 missing)"));
        assert!(out.contains("First data from: 2000-01-01"));
        assert!(out.contains("Last data from: 2000-03-01"));
        assert!(out.contains("Latest value: 2.50% (2000-03-01)"));
    }

    #[test]
    fn summary_of_empty_table_says_so() {
        let out = format_series_summary(
            "CUUS0000SAH31",
            Frequency::Monthly,
            Units::Pc1,
            &ObservationTable::default(),
        );
        assert!(out.contains("No data available at this frequency."));
    }
}
