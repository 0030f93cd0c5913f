//! Domain types used throughout the retrieval pipeline.
//!
//! This module defines:
//!
//! - request vocabulary (`Frequency`, `Units`, `ObservationRequest`)
//! - normalized observation data (`Observation`, `ObservationTable`)
//! - the dashboard-facing latest reading (`LatestValue`)

pub mod types;

pub use types::*;
