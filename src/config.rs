use std::path::PathBuf;

use clap::Parser;

use crate::data::chart::ChartOptions;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "car-eda", version, about = "Car data EDA dashboard")]
pub struct Args {
    /// Dataset to open at startup (.csv, .tsv, .json, .parquet).
    /// Failing to load it aborts startup.
    pub path: Option<PathBuf>,

    /// Rows shown in the dataset preview tables.
    #[arg(long, default_value_t = 10)]
    pub preview_rows: usize,

    /// Categories kept in bar charts.
    #[arg(long, default_value_t = 10)]
    pub top_categories: usize,

    /// Histogram bin count.
    #[arg(long, default_value_t = 20)]
    pub bins: usize,
}

/// Settings the dashboard reads at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub preview_rows: usize,
    pub chart: ChartOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            chart: ChartOptions::default(),
        }
    }
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        Self {
            preview_rows: args.preview_rows,
            chart: ChartOptions {
                bins: args.bins.max(1),
                top_categories: args.top_categories.max(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_conventions() {
        let args = Args::parse_from(["car-eda"]);
        assert_eq!(AppConfig::from(&args), AppConfig::default());
        assert!(args.path.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["car-eda", "cars.csv", "--bins", "0", "--preview-rows", "5"]);
        let config = AppConfig::from(&args);
        assert_eq!(args.path, Some(PathBuf::from("cars.csv")));
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.chart.bins, 1);
        assert_eq!(config.chart.top_categories, 10);
    }
}
