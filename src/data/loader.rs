use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{coerce, infer_type, Column, ColumnType, Dataset, Value};
use crate::error::DashboardError;

/// Cell texts read as missing, following the Pandas `read_csv` defaults.
pub const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row with column names, one record per line
/// * `.json`         – `[{ "Brand": "...", "Price": 123, ... }, ...]`
/// * `.parquet`      – any flat table; column types come from the Arrow schema
pub fn load_file(path: &Path) -> std::result::Result<Dataset, DashboardError> {
    if !path.is_file() {
        return Err(DashboardError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" => load_csv(path, b','),
        "tsv" => load_csv(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DashboardError::UnsupportedFormat(other.to_string())),
    };

    parsed.map_err(|e| DashboardError::Parse {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })
}

// ---------------------------------------------------------------------------
// DatasetStore – one shared, immutable handle per file
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets by canonical path. Owned by the application
/// and passed to whoever needs to open files.
#[derive(Debug, Default)]
pub struct DatasetStore {
    loaded: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, reading the file only the first time.
    pub fn open(&mut self, path: &Path) -> std::result::Result<Arc<Dataset>, DashboardError> {
        let key = path
            .canonicalize()
            .map_err(|_| DashboardError::FileNotFound(path.to_path_buf()))?;

        if let Some(ds) = self.loaded.get(&key) {
            log::debug!("Reusing cached dataset for {}", key.display());
            return Ok(Arc::clone(ds));
        }

        let dataset = Arc::new(load_file(&key)?);
        log::info!(
            "Loaded {} rows × {} columns from {}",
            dataset.len(),
            dataset.num_columns(),
            key.display()
        );
        self.loaded.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one record per line.
/// Cell types are guessed per cell, then unified per column. Columns that end
/// up as text keep the raw cell text.
fn load_csv(path: &Path, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut raw: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        raw.push(cells);
    }

    let guessed: Vec<Vec<Value>> = raw
        .iter()
        .map(|row| row.iter().map(|s| guess_value(s)).collect())
        .collect();

    let columns: Vec<Column> = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Column {
            name,
            dtype: infer_type(guessed.iter().map(|r| &r[idx])),
        })
        .collect();

    let rows = raw
        .into_iter()
        .zip(guessed)
        .map(|(raw_row, guessed_row)| {
            raw_row
                .into_iter()
                .zip(guessed_row)
                .zip(&columns)
                .map(|((text, value), col)| match (col.dtype, value) {
                    (_, Value::Null) => Value::Null,
                    (ColumnType::Text, _) => Value::Text(text),
                    (dtype, value) => coerce(value, dtype),
                })
                .collect()
        })
        .collect();

    Ok(Dataset::with_schema(columns, rows))
}

fn guess_value(s: &str) -> Value {
    let t = s.trim();
    if NULL_TOKENS.contains(&t) {
        return Value::Null;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = t.parse::<f64>() {
        return Value::Float(f);
    }
    if t.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if t.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Brand": "Toyota", "Price": 20000, "Mileage": 15000 },
///   ...
/// ]
/// ```
///
/// Column order is the order in which keys are first seen.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = vec![Value::Null; names.len()];
        for (key, val) in obj {
            let col = *index.entry(key.clone()).or_insert_with(|| {
                names.push(key.clone());
                names.len() - 1
            });
            if col >= row.len() {
                row.resize(col + 1, Value::Null);
            }
            row[col] = json_to_value(val);
        }
        rows.push(row);
    }

    Ok(Dataset::from_records(names, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Integer, float, boolean and string columns map onto the matching
/// [`ColumnType`]; anything else is rendered as text.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column {
            name: f.name().clone(),
            dtype: arrow_column_type(f.data_type()),
        })
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_value(col.as_ref(), row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {row}"))?;
            rows.push(cells);
        }
    }

    Ok(Dataset::with_schema(columns, rows))
}

// -- Parquet / Arrow helpers --

fn arrow_column_type(dtype: &DataType) -> ColumnType {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => ColumnType::Integer,
        DataType::UInt64 | DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            ColumnType::Float
        }
        DataType::Boolean => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &dyn Array, row: usize) -> Result<Value> {
    if col.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match col.data_type() {
        DataType::Int8 => Value::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => Value::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => Value::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => Value::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => Value::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => Value::Float(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float16 => Value::Float(col.as_primitive::<Float16Type>().value(row).to_f64()),
        DataType::Float32 => Value::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Value::Bool(col.as_boolean().value(row)),
        DataType::Utf8 => Value::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::Text(col.as_string::<i64>().value(row).to_string()),
        _ => Value::Text(
            array_value_to_string(col, row).context("formatting parquet cell")?,
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_csv_types_and_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "cars.csv",
            "Brand,Price,Engine,Automatic,Code\n\
             Toyota,20000,1.8,true,007\n\
             Honda,,2.0,false,A12\n\
             NA,18000,NaN,true,15\n",
        );

        let ds = load_file(&path).unwrap();
        let types: Vec<ColumnType> = ds.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Boolean,
                ColumnType::Text,
            ]
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.row(1)[1], Value::Null);
        assert_eq!(ds.row(2)[0], Value::Null);
        assert_eq!(ds.row(2)[2], Value::Null);
        assert_eq!(ds.row(0)[4], Value::Text("007".into()));
    }

    #[test]
    fn test_json_records_keep_first_seen_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "cars.json",
            r#"[{"Price":9000,"Brand":"Kia"},{"Price":9500.5,"Fuel":"Diesel"}]"#,
        );

        let ds = load_file(&path).unwrap();
        let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Price", "Brand", "Fuel"]);
        assert_eq!(ds.column("Price").unwrap().dtype, ColumnType::Float);
        assert_eq!(ds.row(0)[1], Value::Text("Kia".into()));
        assert_eq!(ds.row(0)[2], Value::Null);
        assert_eq!(ds.row(1)[1], Value::Null);
    }

    #[test]
    fn test_parquet_types_follow_arrow_schema() {
        use arrow::array::{
            ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, StringArray,
            UInt64Array,
        };
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Year", DataType::Int32, true),
            Field::new("Mileage", DataType::UInt64, true),
            Field::new("Engine", DataType::Float32, false),
            Field::new("Automatic", DataType::Boolean, false),
            Field::new("Brand", DataType::Utf8, false),
            Field::new("Rating", DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int32Array::from(vec![Some(2018), None])),
            Arc::new(UInt64Array::from(vec![Some(15000), None])),
            Arc::new(Float32Array::from(vec![1.5, 2.0])),
            Arc::new(BooleanArray::from(vec![true, false])),
            Arc::new(StringArray::from(vec!["Kia", "Ford"])),
            Arc::new(Float64Array::new_null(2)),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        let types: Vec<ColumnType> = ds.columns().iter().map(|c| c.dtype).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Integer,
                ColumnType::Float,
                ColumnType::Float,
                ColumnType::Boolean,
                ColumnType::Text,
                ColumnType::Float,
            ]
        );
        assert_eq!(
            ds.row(0),
            &[
                Value::Integer(2018),
                Value::Float(15000.0),
                Value::Float(1.5),
                Value::Bool(true),
                Value::Text("Kia".into()),
                Value::Null,
            ]
        );
        assert_eq!(
            ds.row(1),
            &[
                Value::Null,
                Value::Null,
                Value::Float(2.0),
                Value::Bool(false),
                Value::Text("Ford".into()),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_load_errors_by_kind() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            load_file(&missing),
            Err(DashboardError::FileNotFound(_))
        ));

        let xlsx = write_file(&dir, "cars.xlsx", "binary");
        assert!(matches!(
            load_file(&xlsx),
            Err(DashboardError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));

        let broken = write_file(&dir, "broken.json", "{ not json");
        assert!(matches!(
            load_file(&broken),
            Err(DashboardError::Parse { .. })
        ));
    }

    #[test]
    fn test_store_returns_same_handle_for_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cars.csv", "Brand,Price\nKia,1\n");

        let mut store = DatasetStore::new();
        let first = store.open(&path).unwrap();

        // Rewriting the file must not be observed: the cached handle wins.
        write_file(&dir, "cars.csv", "Brand,Price\nKia,1\nFord,2\n");
        let second = store.open(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }
}
