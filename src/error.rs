use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the crate.
///
/// The retrieval layer distinguishes upstream failures that callers may want
/// to match on (`UpstreamUnavailable`, `MalformedUpstreamData`,
/// `NoEndDateAvailable`, `NoObservations`) from ambient failures that are
/// simply propagated (transport, configuration, export I/O).
#[derive(Debug, Error)]
pub enum DashError {
    /// Missing or unusable configuration (e.g. `FRED_API_KEY`).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input argument (bad date window, bad year, unknown series).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The HTTP request itself failed (connect error, timeout, TLS).
    #[error("FRED request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// FRED answered with a non-success status. Carries the raw body so the
    /// upstream diagnostic (bad key, bad series id) is not lost.
    #[error("FRED responded with status {status}: {body}")]
    UpstreamUnavailable { status: StatusCode, body: String },

    /// The response parsed as JSON but violated the expected contract
    /// (unparseable date, missing structural field).
    #[error("malformed FRED payload: {0}")]
    MalformedUpstreamData(String),

    /// A series had zero observations when the end date had to be resolved
    /// upstream, so no fetch window could be formed at all.
    #[error("no end date available for series {series_id}")]
    NoEndDateAvailable { series_id: String },

    /// An explicitly bounded request window came back empty. Usually a
    /// misconfigured series id or a window outside the data range.
    #[error("no observations for series {series_id} in the requested window")]
    NoObservations { series_id: String },

    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook serialization failed.
    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem error while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashError {
    /// Helper: build a `MalformedUpstreamData` error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedUpstreamData(detail.into())
    }

    /// Helper: build a `NoEndDateAvailable` error for a series.
    pub fn no_end_date(series_id: impl Into<String>) -> Self {
        Self::NoEndDateAvailable {
            series_id: series_id.into(),
        }
    }

    /// Helper: build a `NoObservations` error for a series.
    pub fn no_observations(series_id: impl Into<String>) -> Self {
        Self::NoObservations {
            series_id: series_id.into(),
        }
    }

    /// Process exit code for the binary: 2 for input/config/export problems,
    /// 4 for upstream data problems.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::InvalidArg(_) | Self::Csv(_) | Self::Xlsx(_) | Self::Io(_) => 2,
            Self::Transport(_)
            | Self::UpstreamUnavailable { .. }
            | Self::MalformedUpstreamData(_)
            | Self::NoEndDateAvailable { .. }
            | Self::NoObservations { .. } => 4,
        }
    }
}
