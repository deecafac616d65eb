use std::fmt;

use super::classify::ColumnClasses;
use super::filter::View;
use super::summary::{paired_values, quantile, value_counts};
use crate::error::{ColumnKind, DashboardError, Result};

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Boxplot,
    BarChart,
    ScatterPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Histogram,
        ChartKind::Boxplot,
        ChartKind::BarChart,
        ChartKind::ScatterPlot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Boxplot => "Boxplot",
            ChartKind::BarChart => "Bar Chart",
            ChartKind::ScatterPlot => "Scatter Plot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A chart together with the column(s) it plots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRequest {
    Histogram { column: String },
    Boxplot { column: String },
    BarChart { column: String },
    ScatterPlot { x: String, y: String },
}

/// Knobs for series extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub bins: usize,
    pub top_categories: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            bins: 20,
            top_categories: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart-ready series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Box-and-whisker summary: whiskers reach the furthest values within 1.5 IQR
/// of the quartiles, everything beyond is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Histogram {
        column: String,
        values: Vec<f64>,
        bins: Vec<HistogramBin>,
    },
    Boxplot {
        column: String,
        values: Vec<f64>,
        /// `None` for an empty series.
        summary: Option<BoxSummary>,
    },
    BarChart {
        column: String,
        counts: Vec<(String, usize)>,
    },
    ScatterPlot {
        x: String,
        y: String,
        points: Vec<(f64, f64)>,
    },
}

/// Extract the minimal series a chart needs from the view.
pub fn select_chart_data(
    view: &View<'_>,
    classes: &ColumnClasses,
    request: &ChartRequest,
    options: ChartOptions,
) -> Result<ChartData> {
    let ds = view.dataset();
    let index_of = |name: &str| {
        ds.column_index(name)
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_string()))
    };

    match request {
        ChartRequest::Histogram { column } => {
            classes.require(column, ColumnKind::Numeric)?;
            let values = view.numeric_values(index_of(column.as_str())?);
            let bins = histogram_bins(&values, options.bins);
            Ok(ChartData::Histogram {
                column: column.clone(),
                values,
                bins,
            })
        }
        ChartRequest::Boxplot { column } => {
            classes.require(column, ColumnKind::Numeric)?;
            let values = view.numeric_values(index_of(column.as_str())?);
            let summary = box_summary(&values);
            Ok(ChartData::Boxplot {
                column: column.clone(),
                values,
                summary,
            })
        }
        ChartRequest::BarChart { column } => {
            classes.require_count("Bar chart", ColumnKind::Categorical, 1)?;
            classes.require(column, ColumnKind::Categorical)?;
            let counts = value_counts(view, index_of(column.as_str())?)
                .into_iter()
                .take(options.top_categories)
                .map(|(v, n)| (v.to_string(), n))
                .collect();
            Ok(ChartData::BarChart {
                column: column.clone(),
                counts,
            })
        }
        ChartRequest::ScatterPlot { x, y } => {
            classes.require_count("Scatter plot", ColumnKind::Numeric, 2)?;
            classes.require(x, ColumnKind::Numeric)?;
            classes.require(y, ColumnKind::Numeric)?;
            let points = paired_values(view, index_of(x.as_str())?, index_of(y.as_str())?);
            Ok(ChartData::ScatterPlot {
                x: x.clone(),
                y: y.clone(),
                points,
            })
        }
    }
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
/// A constant series is binned over `[v - 0.5, v + 0.5]`.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let slot = (((v - lo) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let lower_whisker = sorted.iter().copied().find(|v| *v >= lo_fence).unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(lo_fence..=hi_fence).contains(v))
        .collect();

    Some(BoxSummary {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}
