use std::path::Path;

use anyhow::{Context, Result};

use super::filter::View;
use super::summary::AnalysisReport;
use crate::error::DashboardError;

/// Write the rows of a view as CSV, header first. Nulls become empty cells.
pub fn export_view_csv(view: &View<'_>, path: &Path) -> std::result::Result<(), DashboardError> {
    write_view_csv(view, path).map_err(|e| export_error(path, e))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

/// Write an analysis report as pretty-printed JSON.
pub fn export_report_json(
    report: &AnalysisReport,
    path: &Path,
) -> std::result::Result<(), DashboardError> {
    write_report_json(report, path).map_err(|e| export_error(path, e))?;
    log::info!("Exported summary to {}", path.display());
    Ok(())
}

fn write_view_csv(view: &View<'_>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer
        .write_record(view.dataset().columns().iter().map(|c| c.name.as_str()))
        .context("writing CSV header")?;
    for row in view.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_text()))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_report_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), report)
        .context("serializing summary")?;
    Ok(())
}

fn export_error(path: &Path, e: anyhow::Error) -> DashboardError {
    DashboardError::Export {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::classify;
    use crate::data::filter::{apply_filter, Filter};
    use crate::data::loader::load_file;
    use crate::data::model::{Dataset, Value};

    fn cars() -> Dataset {
        Dataset::from_records(
            ["Brand", "Price"],
            vec![
                vec![Value::Text("Kia".into()), Value::Integer(9000)],
                vec![Value::Text("Ford".into()), Value::Null],
                vec![Value::Text("Kia".into()), Value::Integer(9500)],
            ],
        )
    }

    #[test]
    fn test_exported_view_reloads_to_same_rows() {
        let ds = cars();
        let classes = classify(&ds);
        let filter = Filter::new("Brand", Value::Text("Kia".into()));
        let view = apply_filter(&ds, &classes, Some(&filter)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kia.csv");
        export_view_csv(&view, &path).unwrap();

        let reloaded = load_file(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.row(1)[1], Value::Integer(9500));
    }

    #[test]
    fn test_report_json_contains_duplicates_and_missing() {
        let ds = cars();
        let classes = classify(&ds);
        let report = AnalysisReport::build(&View::full(&ds), &classes);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        export_report_json(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["rows"], 3);
        assert_eq!(json["duplicates"], 0);
        assert_eq!(json["missing"][0]["column"], "Price");
        assert!(json["correlation"].is_null());
    }
}
