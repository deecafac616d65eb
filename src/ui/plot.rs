use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::chart::{BoxSummary, ChartData, HistogramBin};

const BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Chart dispatch (EDA dashboard)
// ---------------------------------------------------------------------------

/// Render chart-ready series with the plot matching its kind.
pub fn chart(ui: &mut Ui, data: &ChartData) {
    match data {
        ChartData::Histogram { column, bins, .. } => histogram(ui, column, bins),
        ChartData::Boxplot {
            column,
            summary: Some(summary),
            ..
        } => boxplot(ui, column, summary),
        ChartData::Boxplot { column, .. } => {
            ui.label(format!("No values to plot for {column}."));
        }
        ChartData::BarChart { column, counts } => bar_chart(ui, column, counts),
        ChartData::ScatterPlot { x, y, points } => scatter(ui, x, y, points),
    }
}

fn histogram(ui: &mut Ui, column: &str, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.2} – {:.2}", b.start, b.end))
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("histogram")
        .x_axis_label(column.to_string())
        .y_axis_label("Frequency")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column));
        });
}

fn boxplot(ui: &mut Ui, column: &str, summary: &BoxSummary) {
    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
        ),
    )
    .name(column)
    .box_width(0.5)
    .whisker_width(0.3)
    .fill(BAR_COLOR.gamma_multiply(0.5))
    .stroke((1.5, BAR_COLOR));

    let outliers: PlotPoints = summary.outliers.iter().map(|&v| [v, 0.0]).collect();

    Plot::new("boxplot")
        .x_axis_label(column.to_string())
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal().name(column));
            plot_ui.points(
                Points::new(outliers)
                    .radius(3.0)
                    .color(Color32::DARK_GRAY)
                    .name("outliers"),
            );
        });
}

fn bar_chart(ui: &mut Ui, column: &str, counts: &[(String, usize)]) {
    let colors = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((label, count), color))| {
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .name(label)
                .fill(color)
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|(l, _)| l.clone()).collect();

    Plot::new("bar_chart")
        .x_axis_label(column.to_string())
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column));
        });
}

fn scatter(ui: &mut Ui, x: &str, y: &str, points: &[(f64, f64)]) {
    let series: PlotPoints = points.iter().map(|&(px, py)| [px, py]).collect();

    Plot::new("scatter")
        .x_axis_label(x.to_string())
        .y_axis_label(y.to_string())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(series)
                    .radius(2.5)
                    .color(BAR_COLOR)
                    .name(format!("{x} vs {y}")),
            );
        });
}
