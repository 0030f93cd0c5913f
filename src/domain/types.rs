//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - used as cache keys (requests are `Eq + Hash`)
//! - exported to CSV/XLSX
//! - rendered by the terminal report layer

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DashError;

/// Reporting frequency accepted by the FRED observations endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Frequency {
    /// Short code understood by the API (`frequency=` query parameter).
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Monthly => "m",
            Frequency::Quarterly => "q",
            Frequency::Semiannual => "sa",
            Frequency::Annual => "a",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannual => "Semiannual",
            Frequency::Annual => "Annual",
        }
    }

    /// Translate a human-readable frequency name.
    ///
    /// Unrecognized names fall back to `Monthly`, so display layers can pass
    /// user input through without per-call validation.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Monthly" => Frequency::Monthly,
            "Quarterly" => Frequency::Quarterly,
            "Semiannual" => Frequency::Semiannual,
            "Annual" => Frequency::Annual,
            _ => Frequency::Monthly,
        }
    }
}

/// Units transform applied upstream before values are returned.
///
/// `pc1` (year-over-year percent change) is what the dashboard tiles show;
/// `lin` and `pch` back the per-series detail views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Absolute value (`lin`).
    Level,
    /// Percent change from a year ago (`pc1`).
    Pc1,
    /// Percent change from the prior period (`pch`).
    Pch,
}

impl Units {
    /// Short code understood by the API (`units=` query parameter).
    pub fn code(self) -> &'static str {
        match self {
            Units::Level => "lin",
            Units::Pc1 => "pc1",
            Units::Pch => "pch",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Units::Level => "Absolute value",
            Units::Pc1 => "Percent change from year ago",
            Units::Pch => "Percent change",
        }
    }
}

/// Default start of the fetch window when the caller does not supply one.
pub const DEFAULT_START: NaiveDate = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

/// A date-bounded, frequency- and unit-adjusted request for one series.
///
/// `end_date: None` means "up to the latest available observation"; the
/// client resolves it upstream. The struct doubles as the cache key, so the
/// unresolved form is what gets hashed and a hit skips resolution too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationRequest {
    pub series_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    pub units: Units,
}

impl ObservationRequest {
    /// A request with the dashboard defaults: start at 2000-01-01, end open,
    /// year-over-year percent change.
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            start_date: DEFAULT_START,
            end_date: None,
            frequency: Frequency::Monthly,
            units: Units::Pc1,
        }
    }

    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Enforce the window invariant: start must not come after the end when
    /// both bounds are present.
    pub fn validate(&self) -> Result<(), DashError> {
        if self.series_id.is_empty() {
            return Err(DashError::InvalidArg("series id must not be empty".into()));
        }
        if let Some(end) = self.end_date
            && self.start_date > end
        {
            return Err(DashError::InvalidArg(format!(
                "start date {} is after end date {end}",
                self.start_date
            )));
        }
        Ok(())
    }
}

/// A single dated observation.
///
/// Missing upstream values (the "." sentinel) are `None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A date-indexed observation set.
///
/// Invariant: dates strictly increasing, no duplicates. Constructors enforce
/// this regardless of upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Build a table from rows in any order. Rows are sorted ascending by
    /// date; on duplicate dates the last row wins.
    pub fn from_rows(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|obs| obs.date);
        rows.dedup_by(|next, prev| {
            if next.date == prev.date {
                // `dedup_by` drops `next`; keep its value in the survivor.
                prev.value = next.value;
                true
            } else {
                false
            }
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|obs| obs.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|obs| obs.date)
    }

    /// The most recent row carrying an actual value, if any.
    pub fn latest_valid(&self) -> Option<(f64, NaiveDate)> {
        self.rows
            .iter()
            .rev()
            .find_map(|obs| obs.value.map(|v| (v, obs.date)))
    }
}

/// Latest reading for a dashboard tile.
///
/// `Missing` covers every degraded case, from unsupported frequencies to
/// upstream failures, so display layers never branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatestValue {
    Value { value: f64, date: NaiveDate },
    Missing,
}

impl LatestValue {
    pub fn missing() -> Self {
        LatestValue::Missing
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LatestValue::Missing)
    }
}

impl From<Option<(f64, NaiveDate)>> for LatestValue {
    fn from(latest: Option<(f64, NaiveDate)>) -> Self {
        match latest {
            Some((value, date)) => LatestValue::Value { value, date },
            None => LatestValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn from_rows_sorts_and_dedups() {
        let table = ObservationTable::from_rows(vec![
            Observation { date: d(2024, 3, 1), value: Some(3.0) },
            Observation { date: d(2024, 1, 1), value: Some(1.0) },
            Observation { date: d(2024, 2, 1), value: None },
            Observation { date: d(2024, 1, 1), value: Some(1.5) },
        ]);

        let dates: Vec<NaiveDate> = table.rows().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 2, 1), d(2024, 3, 1)]);
        // Last write wins for the duplicated January date.
        assert_eq!(table.rows()[0].value, Some(1.5));
    }

    #[test]
    fn latest_valid_skips_trailing_missing() {
        let table = ObservationTable::from_rows(vec![
            Observation { date: d(2024, 1, 1), value: Some(2.2) },
            Observation { date: d(2024, 2, 1), value: None },
        ]);
        assert_eq!(table.latest_valid(), Some((2.2, d(2024, 1, 1))));
    }

    #[test]
    fn latest_valid_empty_and_all_missing() {
        assert_eq!(ObservationTable::default().latest_valid(), None);

        let all_missing = ObservationTable::from_rows(vec![
            Observation { date: d(2024, 1, 1), value: None },
        ]);
        assert_eq!(all_missing.latest_valid(), None);
    }

    #[test]
    fn frequency_name_fallback_is_monthly() {
        assert_eq!(Frequency::from_name("Quarterly"), Frequency::Quarterly);
        assert_eq!(Frequency::from_name("Weekly"), Frequency::Monthly);
        assert_eq!(Frequency::from_name(""), Frequency::Monthly);
    }

    #[test]
    fn request_window_invariant() {
        let req = ObservationRequest::new("TCU")
            .start(d(2020, 1, 1))
            .end(d(2010, 1, 1));
        assert!(matches!(req.validate(), Err(DashError::InvalidArg(_))));

        let ok = ObservationRequest::new("TCU").start(d(2010, 1, 1)).end(d(2020, 1, 1));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn wire_codes() {
        assert_eq!(Frequency::Semiannual.code(), "sa");
        assert_eq!(Units::Pc1.code(), "pc1");
        assert_eq!(Units::Level.code(), "lin");
        assert_eq!(Units::Pch.code(), "pch");
    }
}
