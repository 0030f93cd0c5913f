//! Input/output helpers.
//!
//! - observation table exports (CSV/XLSX) (`export`)

pub mod export;

pub use export::*;
