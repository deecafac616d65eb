use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::chart::{ChartData, ChartKind};
use crate::state::{AppState, Section};
use crate::ui::{plot, tables};

const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
const WARNING: Color32 = Color32::from_rgb(210, 153, 34);

/// Render the central panel for the selected section.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() && state.section != Section::Conclusion {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore it  (File → Open…)");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.section {
            Section::Introduction => introduction(ui, state),
            Section::Analysis => analysis(ui, state),
            Section::Dashboard => dashboard(ui, state),
            Section::Conclusion => conclusion(ui),
        });
}

fn notice(ui: &mut Ui, color: Color32, text: impl Into<String>) {
    ui.label(RichText::new(text.into()).color(color));
}

// ---------------------------------------------------------------------------
// Introduction
// ---------------------------------------------------------------------------

fn introduction(ui: &mut Ui, state: &AppState) {
    ui.heading("Car Data Exploratory Data Analysis (EDA) Dashboard");
    ui.add_space(6.0);
    ui.label(
        "Explore the structure of the car dataset: data types, missing values and \
         duplicates, descriptive statistics, correlations between numeric features, \
         and the distribution of individual columns.",
    );
    ui.add_space(4.0);
    ui.label("Sections:");
    ui.label("• Car Data Analysis – data types, missing values, duplicates, summary statistics, correlation matrix");
    ui.label("• EDA Dashboard – histogram, boxplot, bar chart and scatter plot");
    ui.label("Use the filter in the left panel to restrict every section to one category.");
    ui.separator();

    let Some(view) = state.view() else {
        return;
    };

    ui.strong(format!("Dataset Preview (Top {} Rows)", state.config.preview_rows));
    tables::preview_table(ui, "intro_preview", &view, state.config.preview_rows);
    ui.add_space(8.0);

    ui.strong("Dataset Size");
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Rows", view.len());
        metric(&mut cols[1], "Total Columns", view.num_columns());
        metric(&mut cols[2], "Numeric Columns", state.classes.numeric.len());
    });
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.label(label);
    ui.label(RichText::new(value.to_string()).size(28.0).strong());
}

// ---------------------------------------------------------------------------
// Car data analysis
// ---------------------------------------------------------------------------

fn analysis(ui: &mut Ui, state: &AppState) {
    ui.heading("Car Data Analysis");
    let Some(report) = &state.report else {
        return;
    };
    if report.rows == 0 {
        notice(ui, WARNING, "The current filter selects no rows.");
    }

    ui.add_space(6.0);
    ui.strong("Columns in Dataset");
    let names: Vec<&str> = report.schema.iter().map(|e| e.column.as_str()).collect();
    ui.label(names.join(", "));

    ui.add_space(6.0);
    ui.strong("Data Types");
    tables::schema_table(ui, &report.schema);

    ui.add_space(6.0);
    ui.strong("Missing Values");
    if report.missing.is_empty() {
        notice(ui, SUCCESS, "No missing values found!");
    } else {
        notice(ui, WARNING, "Missing values found!");
        tables::missing_table(ui, &report.missing);
    }

    ui.add_space(6.0);
    ui.strong("Duplicate Values");
    if report.duplicates == 0 {
        notice(ui, SUCCESS, "No duplicate values found!");
    } else {
        notice(ui, WARNING, format!("Duplicate rows found: {}", report.duplicates));
    }

    ui.add_space(6.0);
    ui.strong("Statistical Summary");
    if report.numeric.is_empty() {
        ui.label("No numeric columns.");
    } else {
        tables::numeric_stats_table(ui, &report.numeric);
    }
    if !report.categorical.is_empty() {
        ui.add_space(4.0);
        tables::categorical_stats_table(ui, &report.categorical);
    }

    ui.add_space(6.0);
    ui.strong("Correlation Matrix");
    match &report.correlation {
        Some(matrix) => tables::correlation_heatmap(ui, matrix),
        None => {
            ui.label("Not enough numeric columns for correlation.");
        }
    }
}

// ---------------------------------------------------------------------------
// EDA dashboard
// ---------------------------------------------------------------------------

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("EDA Dashboard (Visualizations)");
    ui.add_space(6.0);
    ui.strong("Select Features for Analysis");

    let before = state.chart.clone();
    let numeric = state.classes.numeric.clone();
    let categorical = state.classes.categorical.clone();

    ui.horizontal(|ui: &mut Ui| {
        column_combo(ui, "numeric_col", "Numeric Column", &mut state.chart.numeric, &numeric);

        let kind = state.chart.kind.unwrap_or(ChartKind::Histogram);
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for k in ChartKind::ALL {
                    ui.selectable_value(&mut state.chart.kind, Some(k), k.label());
                }
            });
    });

    match state.chart.kind {
        Some(ChartKind::BarChart) if !categorical.is_empty() => {
            column_combo(ui, "cat_col", "Categorical Column", &mut state.chart.categorical, &categorical);
        }
        Some(ChartKind::ScatterPlot) if numeric.len() > 1 => {
            ui.horizontal(|ui: &mut Ui| {
                column_combo(ui, "x_col", "X axis", &mut state.chart.x, &numeric);
                column_combo(ui, "y_col", "Y axis", &mut state.chart.y, &numeric);
            });
        }
        _ => {}
    }

    if state.chart != before {
        state.rebuild_chart();
    }
    ui.separator();

    match &state.chart_data {
        Some(Ok(data)) => {
            ui.strong(chart_title(data));
            ui.allocate_ui(egui::vec2(ui.available_width(), 360.0), |ui: &mut Ui| {
                plot::chart(ui, data);
            });
        }
        Some(Err(e)) if e.is_informational() => notice(ui, WARNING, e.to_string()),
        Some(Err(e)) => notice(ui, Color32::RED, e.to_string()),
        None => {}
    }

    ui.separator();
    ui.strong(format!("Top {} Rows After Filter", state.config.preview_rows));
    if let Some(view) = state.view() {
        tables::preview_table(ui, "dashboard_preview", &view, state.config.preview_rows);
    }
}

fn chart_title(data: &ChartData) -> String {
    match data {
        ChartData::Histogram { column, .. } => format!("Histogram of {column}"),
        ChartData::Boxplot { column, .. } => format!("Boxplot of {column}"),
        ChartData::BarChart { column, .. } => format!("Bar Chart: {column}"),
        ChartData::ScatterPlot { x, y, .. } => format!("Scatter Plot: {x} vs {y}"),
    }
}

fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    selected: &mut Option<String>,
    columns: &[String],
) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.as_deref().unwrap_or("—"))
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                ui.selectable_value(selected, Some(col.clone()), col.as_str());
            }
        });
}

// ---------------------------------------------------------------------------
// Conclusion
// ---------------------------------------------------------------------------

fn conclusion(ui: &mut Ui) {
    ui.heading("Conclusion");
    ui.add_space(6.0);
    ui.strong("Work covered by this dashboard");
    for line in [
        "Loaded and explored the dataset",
        "Checked the dataset shape, columns and data types",
        "Identified missing values and duplicate rows",
        "Generated descriptive statistics for numeric and categorical columns",
        "Built a correlation matrix of the numeric columns",
        "Plotted distributions and relationships between columns",
        "Filtered every view down to a single category",
    ] {
        ui.label(format!("✔ {line}"));
    }
    ui.add_space(6.0);
    ui.strong("Next steps");
    for line in [
        "Feature engineering",
        "Imputation of missing values",
        "Price or mileage prediction models",
    ] {
        ui.label(format!("• {line}"));
    }
    ui.add_space(8.0);
    notice(ui, SUCCESS, "Thank you for using the Car Data EDA Dashboard!");
}
