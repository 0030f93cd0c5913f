//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the FRED client from the environment
//! - runs the requested view
//! - writes optional exports

use chrono::Datelike;
use clap::Parser;

use crate::cli::{Cli, Command, DashboardArgs, FetchArgs, LatestArgs};
use crate::data::fred::FredClient;
use crate::domain::ObservationRequest;
use crate::error::DashError;
use crate::io::export;
use crate::report;

/// Entry point for the `mdash` binary.
pub fn run() -> Result<(), DashError> {
    init_tracing();

    // We want `mdash` and `mdash -f quarterly` to behave like
    // `mdash dashboard ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Dashboard(args) => handle_dashboard(args),
        Command::Fetch(args) => handle_fetch(args),
        Command::Latest(args) => handle_latest(args),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Warnings only by default; `RUST_LOG` overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_dashboard(args: DashboardArgs) -> Result<(), DashError> {
    let client = FredClient::from_env()?;
    let tiles = report::dashboard_tiles(args.frequency, |series_id, frequency| {
        client.latest_value(series_id, frequency)
    });
    println!("{}", report::format_dashboard(&tiles, args.frequency));
    Ok(())
}

fn handle_fetch(args: FetchArgs) -> Result<(), DashError> {
    validate_start_year(args.start.year())?;

    let client = FredClient::from_env()?;
    let mut request = ObservationRequest::new(&args.series_id)
        .start(args.start)
        .frequency(args.frequency)
        .units(args.units);
    if let Some(end) = args.end {
        request = request.end(end);
    }

    let table = client.observations(&request)?;
    println!(
        "{}",
        report::format_series_summary(&args.series_id, args.frequency, args.units, &table)
    );

    if let Some(path) = &args.csv {
        export::write_csv(path, &table)?;
        println!("Wrote CSV export to {}", path.display());
    }
    if let Some(path) = &args.xlsx {
        let sheet = format!("{} Data", args.series_id);
        export::write_xlsx(path, &table, &sheet)?;
        println!("Wrote XLSX export to {}", path.display());
    }

    Ok(())
}

fn handle_latest(args: LatestArgs) -> Result<(), DashError> {
    let client = FredClient::from_env()?;
    let latest = client.latest_value(&args.series_id, args.frequency);
    let (value, date) = report::fmt_latest(&latest);
    println!("{} {value} {date}", args.series_id);
    Ok(())
}

/// Start years outside 1600..=current are rejected before any request goes
/// out; the upstream catalog has nothing there.
fn validate_start_year(year: i32) -> Result<(), DashError> {
    let current = chrono::Local::now().year();
    if year < 1600 {
        return Err(DashError::InvalidArg("minimum start year is 1600".into()));
    }
    if year > current {
        return Err(DashError::InvalidArg(format!(
            "start year can't be later than {current}"
        )));
    }
    Ok(())
}

/// Rewrite argv so `mdash` defaults to `mdash dashboard`.
///
/// Rules:
/// - `mdash`                       -> `mdash dashboard`
/// - `mdash -f quarterly ...`      -> `mdash dashboard -f quarterly ...`
/// - `mdash --help/--version/-h`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("dashboard".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "dashboard" | "fetch" | "latest");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "dashboard flags".
    if arg1.starts_with('-') {
        argv.insert(1, "dashboard".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
