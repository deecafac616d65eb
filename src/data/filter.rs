use std::collections::HashSet;

use super::classify::ColumnClasses;
use super::model::{Dataset, Value};
use crate::error::{ColumnKind, DashboardError, Result};

// ---------------------------------------------------------------------------
// Filter predicate: one categorical column pinned to one value
// ---------------------------------------------------------------------------

/// `row[column] == value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// Distinct non-null values of `column`, in first-seen order.
/// Returns an empty list for an unknown column.
pub fn filter_options(dataset: &Dataset, column: &str) -> Vec<Value> {
    let Some(idx) = dataset.column_index(column) else {
        return Vec::new();
    };
    let mut seen: HashSet<&Value> = HashSet::new();
    dataset
        .rows()
        .iter()
        .map(|row| &row[idx])
        .filter(|v| !v.is_null() && seen.insert(*v))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// View – the rows currently selected by the active filter
// ---------------------------------------------------------------------------

/// A read-only projection of a dataset: the dataset plus the indices of the
/// rows that passed the filter, in original order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    /// View of every row.
    pub fn full(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Rebuild a view from indices computed earlier by [`apply_filter`].
    /// Out-of-range indices are dropped.
    pub fn from_indices(dataset: &'a Dataset, mut indices: Vec<usize>) -> Self {
        indices.retain(|&i| i < dataset.len());
        Self { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.dataset.num_columns()
    }

    /// Rows of the view, in order.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Value]> + '_ {
        let ds = self.dataset;
        self.indices.iter().map(move |&i| ds.row(i))
    }

    /// The first `n` rows (the "preview").
    pub fn head(&self, n: usize) -> impl Iterator<Item = &'a [Value]> + '_ {
        self.rows().take(n)
    }

    /// All cells of one column, nulls included, in view order.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &'a Value> + '_ {
        self.rows().map(move |row| &row[column])
    }

    /// Non-missing numeric values of a column.
    pub fn numeric_values(&self, column: usize) -> Vec<f64> {
        self.column_values(column).filter_map(Value::as_f64).collect()
    }
}

/// Apply an optional filter to the dataset.
///
/// * `None` → every row.
/// * `Some(filter)` → rows whose cell equals `filter.value`, original order kept.
///   A `Null` filter value matches nothing.
///
/// The column must be categorical.
pub fn apply_filter<'a>(
    dataset: &'a Dataset,
    classes: &ColumnClasses,
    filter: Option<&Filter>,
) -> Result<View<'a>> {
    let Some(filter) = filter else {
        return Ok(View::full(dataset));
    };

    classes.require(&filter.column, ColumnKind::Categorical)?;
    let idx = dataset
        .column_index(&filter.column)
        .ok_or_else(|| DashboardError::UnknownColumn(filter.column.clone()))?;

    if filter.value.is_null() {
        return Ok(View::from_indices(dataset, Vec::new()));
    }

    let indices = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row[idx] == filter.value)
        .map(|(i, _)| i)
        .collect();

    Ok(View { dataset, indices })
}
