//! Command-line parsing for the macro dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the retrieval/export code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{Frequency, Units};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mdash", version, about = "US macro dashboard (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the latest year-over-year reading for every catalog indicator.
    Dashboard(DashboardArgs),
    /// Fetch one series, print a summary, and optionally export it.
    Fetch(FetchArgs),
    /// Print the latest value and date for one series.
    Latest(LatestArgs),
}

/// Options for the dashboard view.
#[derive(Debug, Parser, Clone)]
pub struct DashboardArgs {
    /// Reporting frequency applied to all series.
    #[arg(short = 'f', long, value_enum, default_value_t = Frequency::Monthly)]
    pub frequency: Frequency,
}

/// Options for fetching a single series.
#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    /// FRED series identifier (e.g. TCU, CPIAUCSL).
    pub series_id: String,

    /// Start of the observation window (YYYY-MM-DD).
    #[arg(long, default_value = "2000-01-01")]
    pub start: NaiveDate,

    /// End of the observation window (YYYY-MM-DD). Defaults to the latest
    /// available observation upstream.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Reporting frequency.
    #[arg(short = 'f', long, value_enum, default_value_t = Frequency::Monthly)]
    pub frequency: Frequency,

    /// Units transform applied upstream.
    #[arg(short = 'u', long, value_enum, default_value_t = Units::Pc1)]
    pub units: Units,

    /// Export the table to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Export the table to an XLSX workbook.
    #[arg(long, value_name = "PATH")]
    pub xlsx: Option<PathBuf>,
}

/// Options for the single-series latest-value view.
#[derive(Debug, Parser, Clone)]
pub struct LatestArgs {
    /// FRED series identifier.
    pub series_id: String,

    /// Reporting frequency.
    #[arg(short = 'f', long, value_enum, default_value_t = Frequency::Monthly)]
    pub frequency: Frequency,
}
