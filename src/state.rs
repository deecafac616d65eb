use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::chart::{select_chart_data, ChartData, ChartKind, ChartRequest};
use crate::data::classify::{classify, ColumnClasses};
use crate::data::filter::{apply_filter, filter_options, Filter, View};
use crate::data::loader::DatasetStore;
use crate::data::model::{Dataset, Value};
use crate::data::summary::AnalysisReport;
use crate::error::{ColumnKind, DashboardError};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Introduction,
    Analysis,
    Dashboard,
    Conclusion,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Introduction,
        Section::Analysis,
        Section::Dashboard,
        Section::Conclusion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Introduction => "Introduction",
            Section::Analysis => "Car Data Analysis",
            Section::Dashboard => "EDA Dashboard",
            Section::Conclusion => "Conclusion",
        }
    }
}

/// Columns picked in the EDA dashboard, one slot per selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSelection {
    pub kind: Option<ChartKind>,
    pub numeric: Option<String>,
    pub categorical: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl ChartSelection {
    /// Defaults: first numeric column, first categorical column, and the first
    /// two numeric columns for the scatter axes.
    fn for_classes(classes: &ColumnClasses) -> Self {
        Self {
            kind: Some(ChartKind::Histogram),
            numeric: classes.numeric.first().cloned(),
            categorical: classes.categorical.first().cloned(),
            x: classes.numeric.first().cloned(),
            y: classes.numeric.get(1).cloned(),
        }
    }

    /// Turn the selectors into a request. `None` when a required selector is empty.
    pub fn request(&self) -> Option<ChartRequest> {
        Some(match self.kind? {
            ChartKind::Histogram => ChartRequest::Histogram {
                column: self.numeric.clone()?,
            },
            ChartKind::Boxplot => ChartRequest::Boxplot {
                column: self.numeric.clone()?,
            },
            ChartKind::BarChart => ChartRequest::BarChart {
                column: self.categorical.clone()?,
            },
            ChartKind::ScatterPlot => ChartRequest::ScatterPlot {
                x: self.x.clone()?,
                y: self.y.clone()?,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Memoized loader; one handle per opened file.
    pub store: DatasetStore,

    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Arc<Dataset>>,

    /// Numeric / categorical partition of the dataset's columns.
    pub classes: ColumnClasses,

    pub section: Section,

    /// Filter column; `None` shows the full dataset.
    pub filter_column: Option<String>,

    /// Filter value for `filter_column`.
    pub filter_value: Option<Value>,

    /// Distinct values offered for the current filter column.
    pub filter_choices: Vec<Value>,

    /// Indices of rows passing the current filter.
    pub visible_indices: Vec<usize>,

    /// Summaries of the current view.
    pub report: Option<AnalysisReport>,

    pub chart: ChartSelection,

    /// Series for the current chart, or the reason there is none.
    pub chart_data: Option<Result<ChartData, DashboardError>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, store: DatasetStore) -> Self {
        Self {
            config,
            store,
            dataset: None,
            classes: ColumnClasses::default(),
            section: Section::default(),
            filter_column: None,
            filter_value: None,
            filter_choices: Vec::new(),
            visible_indices: Vec::new(),
            report: None,
            chart: ChartSelection::default(),
            chart_data: None,
            status_message: None,
        }
    }

    /// Load a file through the store and make it the current dataset.
    pub fn open(&mut self, path: &Path) -> Result<(), DashboardError> {
        let dataset = self.store.open(path)?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a newly loaded dataset, reset filters and chart selectors.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.classes = classify(&dataset);
        self.chart = ChartSelection::for_classes(&self.classes);
        self.filter_column = None;
        self.filter_value = None;
        self.filter_choices.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// The current view, rebuilt from the cached indices.
    pub fn view(&self) -> Option<View<'_>> {
        let ds = self.dataset.as_deref()?;
        Some(View::from_indices(ds, self.visible_indices.clone()))
    }

    /// Active filter, if a column is chosen. A column without any value to
    /// pick filters on `Null`, which matches no row.
    pub fn active_filter(&self) -> Option<Filter> {
        let column = self.filter_column.clone()?;
        Some(Filter::new(
            column,
            self.filter_value.clone().unwrap_or(Value::Null),
        ))
    }

    /// Choose the filter column (or `None` for no filter). The value defaults
    /// to the first distinct value of the column.
    pub fn set_filter_column(&mut self, column: Option<String>) {
        if column == self.filter_column {
            return;
        }
        self.filter_choices = match (&self.dataset, &column) {
            (Some(ds), Some(col)) => filter_options(ds, col),
            _ => Vec::new(),
        };
        self.filter_value = self.filter_choices.first().cloned();
        self.filter_column = column;
        self.refilter();
    }

    pub fn set_filter_value(&mut self, value: Value) {
        if self.filter_value.as_ref() == Some(&value) {
            return;
        }
        self.filter_value = Some(value);
        self.refilter();
    }

    /// Recompute the view and everything derived from it after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };
        let filter = self.active_filter();
        match apply_filter(&ds, &self.classes, filter.as_ref()) {
            Ok(view) => {
                if let Some(f) = &filter {
                    log::info!("Filter {} = {} → {} rows", f.column, f.value, view.len());
                }
                self.report = Some(AnalysisReport::build(&view, &self.classes));
                self.visible_indices = view.indices().to_vec();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Filter failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.visible_indices = (0..ds.len()).collect();
                self.report = Some(AnalysisReport::build(&View::full(&ds), &self.classes));
            }
        }
        self.rebuild_chart();
    }

    /// Recompute the chart series after a selector or filter change.
    pub fn rebuild_chart(&mut self) {
        if self.dataset.is_none() {
            self.chart_data = None;
            return;
        }
        let data = {
            let Some(view) = self.view() else {
                return;
            };
            match self.chart.request() {
                Some(request) => {
                    select_chart_data(&view, &self.classes, &request, self.config.chart)
                }
                None => Err(self.missing_selector_error()),
            }
        };
        if let Err(e) = &data {
            log::debug!("No chart data: {e}");
        }
        self.chart_data = Some(data);
    }

    fn missing_selector_error(&self) -> DashboardError {
        let (purpose, kind, required, found) = match self.chart.kind {
            Some(ChartKind::BarChart) => (
                "Bar chart",
                ColumnKind::Categorical,
                1,
                self.classes.categorical.len(),
            ),
            Some(ChartKind::ScatterPlot) => {
                ("Scatter plot", ColumnKind::Numeric, 2, self.classes.numeric.len())
            }
            _ => ("Chart", ColumnKind::Numeric, 1, self.classes.numeric.len()),
        };
        DashboardError::InsufficientColumns {
            purpose,
            kind,
            required,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnType};

    fn state_with(records: Vec<Vec<Value>>) -> AppState {
        let ds = Dataset::from_records(["Brand", "Price", "Mileage"], records);
        let mut state = AppState::new(AppConfig::default(), DatasetStore::new());
        state.set_dataset(Arc::new(ds));
        state
    }

    fn car(b: &str, p: i64, m: i64) -> Vec<Value> {
        vec![Value::Text(b.into()), Value::Integer(p), Value::Integer(m)]
    }

    #[test]
    fn test_filter_flow_updates_report_and_chart() {
        let mut state = state_with(vec![
            car("Toyota", 20000, 15000),
            car("Toyota", 20000, 15000),
            car("Honda", 18000, 12000),
        ]);
        assert_eq!(state.report.as_ref().unwrap().duplicates, 1);

        state.set_filter_column(Some("Brand".into()));
        assert_eq!(state.filter_value, Some(Value::Text("Toyota".into())));
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.set_filter_value(Value::Text("Honda".into()));
        assert_eq!(state.visible_indices, vec![2]);
        assert_eq!(state.report.as_ref().unwrap().rows, 1);

        match state.chart_data.as_ref().unwrap() {
            Ok(ChartData::Histogram { column, values, .. }) => {
                assert_eq!(column, "Price");
                assert_eq!(values, &vec![18000.0]);
            }
            other => panic!("unexpected chart data: {other:?}"),
        }

        state.set_filter_column(None);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_scatter_defaults_to_first_two_numeric_columns() {
        let mut state = state_with(vec![car("Kia", 1, 10), car("Kia", 2, 20)]);
        state.chart.kind = Some(ChartKind::ScatterPlot);
        state.rebuild_chart();

        match state.chart_data.as_ref().unwrap() {
            Ok(ChartData::ScatterPlot { x, y, points }) => {
                assert_eq!((x.as_str(), y.as_str()), ("Price", "Mileage"));
                assert_eq!(points.len(), 2);
            }
            other => panic!("unexpected chart data: {other:?}"),
        }
    }

    #[test]
    fn test_filter_column_without_values_gives_empty_view() {
        let ds = Dataset::with_schema(
            vec![
                Column { name: "Fuel".into(), dtype: ColumnType::Text },
                Column { name: "Price".into(), dtype: ColumnType::Integer },
            ],
            vec![
                vec![Value::Null, Value::Integer(1)],
                vec![Value::Null, Value::Integer(2)],
            ],
        );
        let mut state = AppState::new(AppConfig::default(), DatasetStore::new());
        state.set_dataset(Arc::new(ds));

        state.set_filter_column(Some("Fuel".into()));
        assert!(state.filter_choices.is_empty());
        assert_eq!(state.filter_value, None);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.report.as_ref().unwrap().rows, 0);
    }

    #[test]
    fn test_successful_refilter_clears_error_status() {
        let mut state = state_with(vec![car("Kia", 1, 10), car("Ford", 2, 20)]);

        // A numeric column cannot be filtered on.
        state.set_filter_column(Some("Price".into()));
        assert!(state.status_message.is_some());

        state.set_filter_column(Some("Brand".into()));
        assert_eq!(state.status_message, None);
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn test_missing_selector_is_informational() {
        let ds = Dataset::from_records(
            ["Brand", "Price"],
            vec![vec![Value::Text("Kia".into()), Value::Integer(1)]],
        );
        let mut state = AppState::new(AppConfig::default(), DatasetStore::new());
        state.set_dataset(Arc::new(ds));
        state.chart.kind = Some(ChartKind::ScatterPlot);
        state.rebuild_chart();

        let err = state.chart_data.as_ref().unwrap().as_ref().unwrap_err();
        assert!(err.is_informational());
    }
}
