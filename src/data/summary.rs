//! Summary artifacts of a view.
//!
//! Every function here is a pure function of the [`View`] it is given and
//! returns a neutral result on an empty view:
//! - schema report (column → inferred type)
//! - missing-value report and duplicate count
//! - descriptive statistics for numeric and categorical columns
//! - Pearson correlation matrix over numeric columns

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::classify::ColumnClasses;
use super::filter::View;
use super::model::{ColumnType, Value};
use crate::error::{ColumnKind, Result};

// ---------------------------------------------------------------------------
// Schema / missing values / duplicates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEntry {
    pub column: String,
    pub dtype: ColumnType,
}

/// Column name → inferred type, in column order.
pub fn schema_report(view: &View<'_>) -> Vec<SchemaEntry> {
    view.dataset()
        .columns()
        .iter()
        .map(|c| SchemaEntry {
            column: c.name.clone(),
            dtype: c.dtype,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Null counts per column. Only columns with at least one null are listed;
/// an empty vector means the view has no missing values.
pub fn missing_values(view: &View<'_>) -> Vec<MissingCount> {
    view.dataset()
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, col)| {
            let missing = view.column_values(idx).filter(|v| v.is_null()).count();
            (missing > 0).then(|| MissingCount {
                column: col.name.clone(),
                missing,
            })
        })
        .collect()
}

/// Number of rows equal, across all columns, to an earlier row of the view.
pub fn duplicate_count(view: &View<'_>) -> usize {
    let mut seen: HashSet<&[Value]> = HashSet::with_capacity(view.len());
    view.rows().filter(|row| !seen.insert(*row)).count()
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// `describe()` row for a numeric column. Undefined statistics are `None`:
/// everything but `count` on an empty column, `std` with fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                column: column.to_string(),
                count,
                mean: None,
                std: None,
                min: None,
                q1: None,
                median: None,
                q3: None,
                max: None,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(values);
        Self {
            column: column.to_string(),
            count,
            mean: Some(mean),
            std: sample_std(values, mean),
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }
}

/// `describe(include="object")` row for a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: usize,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Quantile of sorted data, linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Statistics for every numeric column of the view.
pub fn describe(view: &View<'_>, classes: &ColumnClasses) -> Vec<NumericSummary> {
    let ds = view.dataset();
    classes
        .numeric
        .iter()
        .filter_map(|name| {
            let idx = ds.column_index(name)?;
            Some(NumericSummary::from_values(name, &view.numeric_values(idx)))
        })
        .collect()
}

/// Count / unique / top / freq for every categorical column of the view.
pub fn describe_categorical(view: &View<'_>, classes: &ColumnClasses) -> Vec<CategoricalSummary> {
    let ds = view.dataset();
    classes
        .categorical
        .iter()
        .filter_map(|name| {
            let idx = ds.column_index(name)?;
            let counts = value_counts(view, idx);
            let count = counts.iter().map(|(_, n)| n).sum::<usize>();
            let top = counts.first();
            Some(CategoricalSummary {
                column: name.clone(),
                count,
                unique: counts.len(),
                top: top.map(|(v, _)| v.to_string()),
                freq: top.map(|(_, n)| *n).unwrap_or(0),
            })
        })
        .collect()
}

/// Frequency of each non-null value of a column, descending by count,
/// ties in first-seen order.
pub fn value_counts<'a>(view: &View<'a>, column: usize) -> Vec<(&'a Value, usize)> {
    let mut slots: HashMap<&'a Value, usize> = HashMap::new();
    let mut counts: Vec<(&'a Value, usize)> = Vec::new();
    for v in view.column_values(column).filter(|v| !v.is_null()) {
        match slots.get(v) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(v, counts.len());
                counts.push((v, 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Symmetric matrix of Pearson coefficients. `None` marks an undefined
/// coefficient (fewer than two complete pairs, or a constant column).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }
}

/// Pearson correlation over pairwise-complete observations.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Row-aligned `(x, y)` pairs, skipping rows where either side is missing.
pub fn paired_values(view: &View<'_>, x: usize, y: usize) -> Vec<(f64, f64)> {
    view.rows()
        .filter_map(|row| Some((row[x].as_f64()?, row[y].as_f64()?)))
        .collect()
}

/// Correlation matrix over the numeric columns.
///
/// Fails with `InsufficientColumns` when fewer than two numeric columns exist.
pub fn correlation(view: &View<'_>, classes: &ColumnClasses) -> Result<CorrelationMatrix> {
    classes.require_count("Correlation matrix", ColumnKind::Numeric, 2)?;

    let ds = view.dataset();
    let cols: Vec<(String, usize)> = classes
        .numeric
        .iter()
        .filter_map(|name| Some((name.clone(), ds.column_index(name)?)))
        .collect();

    let n = cols.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                let diag = paired_values(view, cols[i].1, cols[i].1);
                pearson(&diag).map(|_| 1.0)
            } else {
                pearson(&paired_values(view, cols[i].1, cols[j].1))
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: cols.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Everything the analysis section shows, derived from one view.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
    pub schema: Vec<SchemaEntry>,
    pub missing: Vec<MissingCount>,
    pub duplicates: usize,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
    /// `None` when fewer than two numeric columns exist.
    pub correlation: Option<CorrelationMatrix>,
}

impl AnalysisReport {
    pub fn build(view: &View<'_>, classes: &ColumnClasses) -> Self {
        let correlation = match correlation(view, classes) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                log::debug!("Skipping correlation: {e}");
                None
            }
        };
        Self {
            rows: view.len(),
            columns: view.num_columns(),
            numeric_columns: classes.numeric.len(),
            schema: schema_report(view),
            missing: missing_values(view),
            duplicates: duplicate_count(view),
            numeric: describe(view, classes),
            categorical: describe_categorical(view, classes),
            correlation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::classify;
    use crate::data::filter::{apply_filter, Filter};
    use crate::data::model::Dataset;
    use crate::error::DashboardError;

    const EPS: f64 = 1e-9;

    fn cars() -> Dataset {
        let row = |b: &str, p: i64, m: i64| {
            vec![Value::Text(b.into()), Value::Integer(p), Value::Integer(m)]
        };
        Dataset::from_records(
            ["Brand", "Price", "Mileage"],
            vec![
                row("Toyota", 20000, 15000),
                row("Toyota", 20000, 15000),
                row("Honda", 18000, 12000),
            ],
        )
    }

    #[test]
    fn test_reference_example() {
        let ds = cars();
        let classes = classify(&ds);

        let full = View::full(&ds);
        assert_eq!(duplicate_count(&full), 1);
        assert!(missing_values(&full).is_empty());

        let filter = Filter::new("Brand", Value::Text("Toyota".into()));
        let view = apply_filter(&ds, &classes, Some(&filter)).unwrap();
        assert_eq!(view.len(), 2);

        let stats = describe(&view, &classes);
        let price = &stats[0];
        assert_eq!(price.column, "Price");
        assert_eq!(price.count, 2);
        assert_eq!(price.mean, Some(20000.0));
        assert_eq!(price.min, Some(20000.0));
        assert_eq!(price.max, Some(20000.0));
        assert_eq!(price.std, Some(0.0));
    }

    #[test]
    fn test_missing_report_sums_null_cells() {
        let ds = Dataset::from_records(
            ["Brand", "Price", "Fuel"],
            vec![
                vec![Value::Null, Value::Integer(1), Value::Text("Petrol".into())],
                vec![Value::Text("Kia".into()), Value::Null, Value::Null],
                vec![Value::Null, Value::Integer(3), Value::Text("Diesel".into())],
            ],
        );
        let view = View::full(&ds);
        let report = missing_values(&view);

        assert_eq!(
            report,
            vec![
                MissingCount { column: "Brand".into(), missing: 2 },
                MissingCount { column: "Price".into(), missing: 1 },
                MissingCount { column: "Fuel".into(), missing: 1 },
            ]
        );
        let nulls = view.rows().flatten().filter(|v| v.is_null()).count();
        assert_eq!(report.iter().map(|m| m.missing).sum::<usize>(), nulls);
    }

    #[test]
    fn test_duplicates_equal_rows_minus_distinct() {
        let ds = Dataset::from_records(
            ["A", "B"],
            vec![
                vec![Value::Integer(1), Value::Null],
                vec![Value::Integer(2), Value::Text("x".into())],
                vec![Value::Integer(1), Value::Null],
                vec![Value::Integer(1), Value::Null],
                vec![Value::Integer(2), Value::Text("y".into())],
            ],
        );
        let view = View::full(&ds);
        let distinct: HashSet<&[Value]> = view.rows().collect();
        assert_eq!(duplicate_count(&view), view.len() - distinct.len());
        assert_eq!(duplicate_count(&view), 2);
    }

    #[test]
    fn test_signed_zero_rows_are_duplicates() {
        let ds = Dataset::from_records(
            ["Discount"],
            vec![vec![Value::Float(0.0)], vec![Value::Float(-0.0)]],
        );
        let view = View::full(&ds);
        let distinct: HashSet<&[Value]> = view.rows().collect();
        assert_eq!(distinct.len(), 1);
        assert_eq!(duplicate_count(&view), 1);
    }

    #[test]
    fn test_numeric_summary_matches_pandas_conventions() {
        let s = NumericSummary::from_values("x", &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean.unwrap() - 2.5).abs() < EPS);
        assert!((s.std.unwrap() - 1.2909944487358056).abs() < EPS);
        assert!((s.q1.unwrap() - 1.75).abs() < EPS);
        assert!((s.median.unwrap() - 2.5).abs() < EPS);
        assert!((s.q3.unwrap() - 3.25).abs() < EPS);

        let single = NumericSummary::from_values("x", &[7.0]);
        assert_eq!(single.std, None);
        assert_eq!(single.median, Some(7.0));
    }

    #[test]
    fn test_empty_view_gives_neutral_results() {
        let ds = cars();
        let classes = classify(&ds);
        let filter = Filter::new("Brand", Value::Text("Tesla".into()));
        let view = apply_filter(&ds, &classes, Some(&filter)).unwrap();
        assert!(view.is_empty());

        let report = AnalysisReport::build(&view, &classes);
        assert_eq!(report.rows, 0);
        assert_eq!(report.duplicates, 0);
        assert!(report.missing.is_empty());
        assert!(report.numeric.iter().all(|s| s.count == 0 && s.mean.is_none()));
        assert_eq!(report.categorical[0].top, None);

        let corr = report.correlation.unwrap();
        assert!(corr.values.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_correlation_is_symmetric_with_unit_diagonal() {
        let ds = Dataset::from_records(
            ["Price", "Mileage", "Year", "Brand"],
            vec![
                vec![Value::Integer(20000), Value::Integer(15000), Value::Integer(2018), Value::Text("A".into())],
                vec![Value::Integer(18000), Value::Integer(30000), Value::Integer(2015), Value::Text("B".into())],
                vec![Value::Integer(25000), Value::Integer(5000), Value::Integer(2021), Value::Text("A".into())],
                vec![Value::Integer(9000), Value::Null, Value::Integer(2010), Value::Text("C".into())],
            ],
        );
        let classes = classify(&ds);
        let corr = correlation(&View::full(&ds), &classes).unwrap();

        assert_eq!(corr.columns, vec!["Price", "Mileage", "Year"]);
        for i in 0..3 {
            assert_eq!(corr.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(corr.get(i, j), corr.get(j, i));
            }
        }
        assert!(corr.get(0, 1).unwrap() < -0.9);
        assert!(corr.get(0, 2).unwrap() > 0.9);
    }

    #[test]
    fn test_constant_column_has_undefined_correlation() {
        let ds = Dataset::from_records(
            ["A", "B"],
            vec![
                vec![Value::Integer(1), Value::Integer(5)],
                vec![Value::Integer(2), Value::Integer(5)],
                vec![Value::Integer(3), Value::Integer(5)],
            ],
        );
        let corr = correlation(&View::full(&ds), &classify(&ds)).unwrap();
        assert_eq!(corr.get(0, 0), Some(1.0));
        assert_eq!(corr.get(1, 1), None);
        assert_eq!(corr.get(0, 1), None);
    }

    #[test]
    fn test_correlation_needs_two_numeric_columns() {
        let ds = Dataset::from_records(
            ["Brand", "Price"],
            vec![vec![Value::Text("A".into()), Value::Integer(1)]],
        );
        let result = correlation(&View::full(&ds), &classify(&ds));
        assert!(matches!(
            result,
            Err(DashboardError::InsufficientColumns { required: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_categorical_summary_top_value() {
        let ds = Dataset::from_records(
            ["Fuel"],
            vec![
                vec![Value::Text("Diesel".into())],
                vec![Value::Text("Petrol".into())],
                vec![Value::Text("Petrol".into())],
                vec![Value::Null],
                vec![Value::Text("Diesel".into())],
            ],
        );
        let cats = describe_categorical(&View::full(&ds), &classify(&ds));
        assert_eq!(cats[0].count, 4);
        assert_eq!(cats[0].unique, 2);
        assert_eq!(cats[0].top.as_deref(), Some("Diesel"));
        assert_eq!(cats[0].freq, 2);
    }
}
