//! Command-line parsing for the debt dataset builder.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! extraction code. Arguments are resolved into `BuildConfig` /
//! `PopulationConfig` by `app` before anything runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::table::GridLayout;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "debt", version, about = "Per-country debt and GDP time series builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the per-country debt dataset from the long CSV or the wide workbook.
    Build(BuildArgs),
    /// Convert a population sheet (workbook or CSV) into population JSON.
    Population(PopulationArgs),
}

/// Named grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutPreset {
    /// Headers in row 0, data from row 4, dates in column 0.
    Bis,
    /// Years in row 3 from column 4, country names in column 0.
    WorldBank,
}

impl LayoutPreset {
    pub fn layout(self) -> GridLayout {
        match self {
            LayoutPreset::Bis => GridLayout::BIS_QUARTERLY,
            LayoutPreset::WorldBank => GridLayout::WORLD_BANK,
        }
    }

    /// Worksheet holding the data in the published workbook.
    pub fn sheet_name(self) -> &'static str {
        match self {
            LayoutPreset::Bis => "Quarterly Series",
            LayoutPreset::WorldBank => "Data",
        }
    }
}

/// Options for `debt build`.
#[derive(Debug, Parser, Clone)]
pub struct BuildArgs {
    /// Long-format CSV export (one row per series).
    #[arg(long = "csv", value_name = "PATH", env = "DEBT_LONG_CSV")]
    pub long_csv: Option<PathBuf>,

    /// Wide-format workbook (.xlsx/.xls) or its sheet exported as CSV.
    #[arg(long = "wide", value_name = "PATH", env = "DEBT_WIDE_GRID")]
    pub wide_grid: Option<PathBuf>,

    /// Worksheet of the wide workbook [default: the layout's sheet].
    #[arg(long)]
    pub wide_sheet: Option<String>,

    /// Layout of the wide sheet.
    #[arg(long, value_enum, default_value_t = LayoutPreset::Bis)]
    pub wide_layout: LayoutPreset,

    /// Override the header row of the wide sheet (zero-based).
    #[arg(long)]
    pub header_row: Option<usize>,

    /// Override the first data row of the wide sheet (zero-based).
    #[arg(long)]
    pub data_start_row: Option<usize>,

    /// Population JSON (`{ "<country>": [...], "times": [...] }`).
    #[arg(long, value_name = "PATH", env = "DEBT_POPULATION")]
    pub population: Option<PathBuf>,

    /// Sub-steps per population interval (4 turns annual into quarterly).
    #[arg(long, default_value_t = 4)]
    pub population_steps: usize,

    /// Output JSON path.
    #[arg(long = "out", value_name = "PATH", env = "DEBT_OUT", default_value = "data.json")]
    pub output: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Options for `debt population`.
#[derive(Debug, Parser, Clone)]
pub struct PopulationArgs {
    /// Population workbook (.xls/.xlsx) or its sheet exported as CSV.
    #[arg(long, value_name = "PATH", env = "DEBT_POPULATION_GRID")]
    pub grid: PathBuf,

    /// Worksheet of the population workbook [default: the layout's sheet].
    #[arg(long)]
    pub sheet: Option<String>,

    /// Layout of the population sheet.
    #[arg(long, value_enum, default_value_t = LayoutPreset::WorldBank)]
    pub layout: LayoutPreset,

    /// Output JSON path.
    #[arg(long = "out", value_name = "PATH", default_value = "population.json")]
    pub output: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_defaults() {
        let cli = Cli::try_parse_from(["debt", "build", "--csv", "bis.csv"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.long_csv, Some(PathBuf::from("bis.csv")));
        assert_eq!(args.wide_layout, LayoutPreset::Bis);
        assert_eq!(args.population_steps, 4);
        assert!(!args.pretty);
    }

    #[test]
    fn population_requires_grid() {
        assert!(Cli::try_parse_from(["debt", "population"]).is_err());
        let cli = Cli::try_parse_from(["debt", "population", "--grid", "wb.csv", "--pretty"]).unwrap();
        let Command::Population(args) = cli.command else {
            panic!("expected population");
        };
        assert_eq!(args.layout.layout(), GridLayout::WORLD_BANK);
        assert_eq!(args.output, PathBuf::from("population.json"));
        assert!(args.pretty);
    }
}
