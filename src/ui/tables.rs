use eframe::egui::{self, Align2, FontId, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{contrast_text, correlation_color};
use crate::data::filter::View;
use crate::data::summary::{
    CategoricalSummary, CorrelationMatrix, MissingCount, NumericSummary, SchemaEntry,
};

// ---------------------------------------------------------------------------
// Generic text table
// ---------------------------------------------------------------------------

/// Striped, resizable table of plain text cells.
fn text_table(ui: &mut Ui, id: &str, headers: &[String], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0), headers.len())
                .header(20.0, |mut header| {
                    for h in headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(h.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    for row in rows {
                        body.row(18.0, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui: &mut Ui| {
                                    ui.label(cell.as_str());
                                });
                            }
                        });
                    }
                });
        });
    });
}

fn fmt_stat(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.3}"),
        None => "NaN".to_string(),
    }
}

fn owned(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Specific tables
// ---------------------------------------------------------------------------

/// First `n` rows of the view.
pub fn preview_table(ui: &mut Ui, id: &str, view: &View<'_>, n: usize) {
    let headers: Vec<String> = view
        .dataset()
        .columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let rows: Vec<Vec<String>> = view
        .head(n)
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    text_table(ui, id, &headers, &rows);
}

pub fn schema_table(ui: &mut Ui, schema: &[SchemaEntry]) {
    let rows: Vec<Vec<String>> = schema
        .iter()
        .map(|e| vec![e.column.clone(), e.dtype.to_string()])
        .collect();
    text_table(ui, "schema", &owned(&["Column", "Data Type"]), &rows);
}

pub fn missing_table(ui: &mut Ui, missing: &[MissingCount]) {
    let rows: Vec<Vec<String>> = missing
        .iter()
        .map(|m| vec![m.column.clone(), m.missing.to_string()])
        .collect();
    text_table(ui, "missing", &owned(&["Column", "Missing Values"]), &rows);
}

/// `describe()` layout: one row per statistic, one column per numeric column.
pub fn numeric_stats_table(ui: &mut Ui, stats: &[NumericSummary]) {
    let mut headers = vec![String::new()];
    headers.extend(stats.iter().map(|s| s.column.clone()));

    type Getter = fn(&NumericSummary) -> String;
    let lines: [(&str, Getter); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| fmt_stat(s.mean)),
        ("std", |s| fmt_stat(s.std)),
        ("min", |s| fmt_stat(s.min)),
        ("25%", |s| fmt_stat(s.q1)),
        ("50%", |s| fmt_stat(s.median)),
        ("75%", |s| fmt_stat(s.q3)),
        ("max", |s| fmt_stat(s.max)),
    ];
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|(label, get)| {
            let mut row = vec![label.to_string()];
            row.extend(stats.iter().map(|s| get(s)));
            row
        })
        .collect();
    text_table(ui, "numeric_stats", &headers, &rows);
}

pub fn categorical_stats_table(ui: &mut Ui, stats: &[CategoricalSummary]) {
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|s| {
            vec![
                s.column.clone(),
                s.count.to_string(),
                s.unique.to_string(),
                s.top.clone().unwrap_or_else(|| "NaN".to_string()),
                s.freq.to_string(),
            ]
        })
        .collect();
    text_table(
        ui,
        "categorical_stats",
        &owned(&["Column", "count", "unique", "top", "freq"]),
        &rows,
    );
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap: one coloured cell per coefficient.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let cell = egui::vec2(72.0, 26.0);
    egui::ScrollArea::horizontal()
        .id_salt("correlation_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("correlation")
                .spacing([2.0, 2.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for name in &matrix.columns {
                        ui.strong(name.as_str());
                    }
                    ui.end_row();

                    for (i, name) in matrix.columns.iter().enumerate() {
                        ui.strong(name.as_str());
                        for j in 0..matrix.columns.len() {
                            let r = matrix.get(i, j);
                            let fill = correlation_color(r);
                            let (rect, _) = ui.allocate_exact_size(cell, Sense::hover());
                            ui.painter().rect_filled(rect, 2.0, fill);
                            ui.painter().text(
                                rect.center(),
                                Align2::CENTER_CENTER,
                                r.map(|r| format!("{r:.2}")).unwrap_or_else(|| "NaN".into()),
                                FontId::monospace(12.0),
                                contrast_text(fill),
                            );
                        }
                        ui.end_row();
                    }
                });
        });
}
