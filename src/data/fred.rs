//! FRED API client: latest-date resolution, observation fetch/normalize, and
//! the never-failing latest-value path behind the dashboard tiles.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::cache::ObservationCache;
use crate::data::catalog::FrequencyConstraints;
use crate::domain::{Frequency, LatestValue, Observation, ObservationRequest, ObservationTable};
use crate::error::DashError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Upstream requests block the caller, so a hung connection must not hang the
/// process: every request carries this timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Blocking client for the FRED observations endpoint.
///
/// Owns the response cache and the frequency-restriction registry; both have
/// process lifetime. One instance is meant to be shared by all views.
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
    cache: ObservationCache,
    constraints: FrequencyConstraints,
}

impl FredClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DashError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            cache: ObservationCache::new(),
            constraints: FrequencyConstraints::default(),
        })
    }

    /// Read the API key from `FRED_API_KEY` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, DashError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| DashError::Config("Missing FRED_API_KEY in environment (.env).".into()))?;
        Self::new(api_key)
    }

    /// Point the client at a different observations endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the default frequency-restriction registry.
    pub fn with_constraints(mut self, constraints: FrequencyConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Date of the most recent observation available upstream.
    ///
    /// `Ok(None)` means the series has no observations at all; that is a
    /// data situation, not an error.
    pub fn latest_date(&self, series_id: &str) -> Result<Option<NaiveDate>, DashError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", "1"),
            ])
            .send()?;

        let body = decode(resp)?;
        let Some(obs) = body.observations.first() else {
            debug!(series_id, "series has no observations upstream");
            return Ok(None);
        };
        parse_date(&obs.date).map(Some)
    }

    /// Fetch a normalized observation table for the request.
    ///
    /// A frequency the series does not support yields an empty table: a
    /// valid result meaning "not representable at this frequency", distinct
    /// from `NoObservations` (explicitly bounded window came back empty) and
    /// from upstream failures.
    pub fn observations(&self, request: &ObservationRequest) -> Result<ObservationTable, DashError> {
        request.validate()?;

        if !self.constraints.allows(&request.series_id, request.frequency) {
            debug!(
                series_id = %request.series_id,
                frequency = request.frequency.code(),
                "frequency not supported for series; returning empty table"
            );
            return Ok(ObservationTable::default());
        }

        // Keyed on the unresolved request: a hit also skips the latest-date
        // round trip below.
        if let Some(table) = self.cache.get(request) {
            debug!(series_id = %request.series_id, "cache hit");
            return Ok(table);
        }

        let (end_date, end_was_resolved) = match request.end_date {
            Some(end) => (end, false),
            None => {
                let end = self
                    .latest_date(&request.series_id)?
                    .ok_or_else(|| DashError::no_end_date(&request.series_id))?;
                (end, true)
            }
        };

        debug!(
            series_id = %request.series_id,
            frequency = request.frequency.code(),
            units = request.units.code(),
            %end_date,
            "fetching observations"
        );

        let start = request.start_date.format(DATE_FORMAT).to_string();
        let end = end_date.format(DATE_FORMAT).to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", request.series_id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
                ("frequency", request.frequency.code()),
                ("units", request.units.code()),
            ])
            .send()?;

        let body = decode(resp)?;

        // An empty window the caller bounded explicitly usually means a bad
        // series id or a window outside the data range. When the end date
        // was auto-resolved the series is known to have data, so an empty
        // result is just an empty table.
        if body.observations.is_empty() && !end_was_resolved {
            return Err(DashError::no_observations(&request.series_id));
        }

        let mut rows = Vec::with_capacity(body.observations.len());
        for obs in &body.observations {
            rows.push(Observation {
                date: parse_date(&obs.date)?,
                value: parse_value(&obs.value),
            });
        }
        // Upstream order is ascending today; do not rely on it.
        let table = ObservationTable::from_rows(rows);

        self.cache.put(request.clone(), table.clone());
        Ok(table)
    }

    /// Latest year-over-year reading for a dashboard tile.
    ///
    /// Never fails: any retrieval error is logged and folded into
    /// `LatestValue::Missing`, so one broken series cannot take the whole
    /// dashboard down with it.
    pub fn latest_value(&self, series_id: &str, frequency: Frequency) -> LatestValue {
        let request = ObservationRequest::new(series_id).frequency(frequency);
        match self.observations(&request) {
            Ok(table) => LatestValue::from(table.latest_valid()),
            Err(err) => {
                warn!(series_id, %err, "latest value unavailable");
                LatestValue::missing()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

fn decode(resp: Response) -> Result<ObservationsResponse, DashError> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        return Err(DashError::UpstreamUnavailable { status, body });
    }
    serde_json::from_str(&body).map_err(|e| {
        DashError::malformed(format!("response did not match the observations contract: {e}"))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, DashError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DashError::malformed(format!("invalid observation date '{raw}': {e}")))
}

/// Map the "." sentinel, plus anything else that does not parse as a finite
/// number (the upstream convention for suppressed values), to a missing
/// marker, never to zero.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
