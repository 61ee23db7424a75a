//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments into plain config structs
//! - runs the pipeline and prints the summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{BuildArgs, Cli, Command, PopulationArgs};
use crate::domain::{BuildConfig, PopulationConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `debt` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => handle_build(&args),
        Command::Population(args) => handle_population(&args),
    }
}

/// Logs go to stderr; stdout carries the summary only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be set when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_build(args: &BuildArgs) -> Result<(), AppError> {
    let config = build_config_from_args(args);
    let run = pipeline::run_build(&config)?;
    println!("{}", crate::report::format_run_summary(&run.summary, &config.output));
    Ok(())
}

fn handle_population(args: &PopulationArgs) -> Result<(), AppError> {
    let config = population_config_from_args(args);
    let dataset = pipeline::run_population(&config)?;
    println!(
        "{}",
        crate::report::format_population_summary(&dataset, &config.output)
    );
    Ok(())
}

pub fn build_config_from_args(args: &BuildArgs) -> BuildConfig {
    let mut wide_layout = args.wide_layout.layout();
    if let Some(row) = args.header_row {
        wide_layout.header_row = row;
    }
    if let Some(row) = args.data_start_row {
        wide_layout.data_start_row = row;
    }

    BuildConfig {
        long_csv: args.long_csv.clone(),
        wide_grid: args.wide_grid.clone(),
        wide_sheet: Some(
            args.wide_sheet
                .clone()
                .unwrap_or_else(|| args.wide_layout.sheet_name().to_string()),
        ),
        wide_layout,
        population: args.population.clone(),
        population_steps: args.population_steps,
        output: args.output.clone(),
        pretty: args.pretty,
    }
}

pub fn population_config_from_args(args: &PopulationArgs) -> PopulationConfig {
    PopulationConfig {
        grid: args.grid.clone(),
        sheet: Some(
            args.sheet
                .clone()
                .unwrap_or_else(|| args.layout.sheet_name().to_string()),
        ),
        layout: args.layout.layout(),
        output: args.output.clone(),
        pretty: args.pretty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GridLayout;

    #[test]
    fn row_overrides_apply_to_preset() {
        let cli = Cli::try_parse_from([
            "debt",
            "build",
            "--wide",
            "sheet.csv",
            "--header-row",
            "2",
            "--out",
            "out.json",
        ])
        .unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        let config = build_config_from_args(&args);
        assert_eq!(config.wide_layout.header_row, 2);
        assert_eq!(
            config.wide_layout.data_start_row,
            GridLayout::BIS_QUARTERLY.data_start_row
        );
        assert_eq!(config.output, std::path::PathBuf::from("out.json"));
        assert_eq!(config.wide_sheet.as_deref(), Some("Quarterly Series"));
    }
}
