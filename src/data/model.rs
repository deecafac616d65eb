use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the common Pandas dtypes.
/// Rows are hashed for duplicate detection, so `Value` must be `Eq + Hash`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord/Hash so rows can go into hash sets and sorted containers --
//
// All three agree on floats: NaN equals itself and `-0.0` equals `0.0`.

/// `-0.0` folded onto `0.0`.
fn canonical_float(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical_float(*a).total_cmp(&canonical_float(*b)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => canonical_float(*f).to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Numeric view of the value, used by statistics and charts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text rendering used when a column is coerced to `Text`, and by CSV export.
    /// Unlike `Display`, a null renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred storage type of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Pandas-style dtype label shown in the schema table.
    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Infer a column's type from its cells.
///
/// * only integers → `Integer`
/// * integers and floats → `Float`
/// * only booleans → `Boolean`
/// * nothing but nulls → `Float`
/// * anything else → `Text`
pub fn infer_type<'a>(cells: impl IntoIterator<Item = &'a Value>) -> ColumnType {
    let (mut ints, mut floats, mut bools, mut texts) = (false, false, false, false);
    for cell in cells {
        match cell {
            Value::Null => {}
            Value::Integer(_) => ints = true,
            Value::Float(_) => floats = true,
            Value::Bool(_) => bools = true,
            Value::Text(_) => texts = true,
        }
    }
    match (ints, floats, bools, texts) {
        (_, _, _, true) => ColumnType::Text,
        (true, false, false, false) => ColumnType::Integer,
        (_, _, false, false) => ColumnType::Float,
        (false, false, true, false) => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

/// Convert a cell to the column's inferred type. NaN floats become `Null`,
/// `-0.0` becomes `0.0`. A cell that cannot live in a numeric or boolean
/// column is dropped to `Null`.
pub fn coerce(value: Value, dtype: ColumnType) -> Value {
    match (value, dtype) {
        (Value::Null, _) => Value::Null,
        (Value::Float(v), _) if v.is_nan() => Value::Null,
        (v @ Value::Text(_), ColumnType::Text) => v,
        (v, ColumnType::Text) => Value::Text(v.to_text()),
        (Value::Integer(i), ColumnType::Float) => Value::Float(i as f64),
        (Value::Float(v), ColumnType::Integer | ColumnType::Float) => {
            Value::Float(canonical_float(v))
        }
        (v @ Value::Integer(_), ColumnType::Integer) => v,
        (v @ Value::Bool(_), ColumnType::Boolean) => v,
        (v, dtype) => {
            log::debug!("Dropping {v:?} from {dtype} column");
            Value::Null
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Dataset
// ---------------------------------------------------------------------------

/// A named column with its inferred type, fixed for the dataset's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// The full parsed table. Each row is aligned with `columns`.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from raw row records: infer every column's type and
    /// coerce the cells to it. Short rows are padded with `Null`, extra cells dropped.
    pub fn from_records<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        records: Vec<Vec<Value>>,
    ) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let width = names.len();

        let mut rows: Vec<Vec<Value>> = records
            .into_iter()
            .map(|mut r| {
                r.resize(width, Value::Null);
                r
            })
            .collect();

        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                name,
                dtype: infer_type(rows.iter().map(|r| &r[idx])),
            })
            .collect();

        for row in &mut rows {
            for (cell, col) in row.iter_mut().zip(&columns) {
                *cell = coerce(std::mem::replace(cell, Value::Null), col.dtype);
            }
        }

        Dataset { columns, rows }
    }

    /// Build a dataset whose column types are already known (e.g. from an Arrow schema).
    pub fn with_schema(columns: Vec<Column>, records: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = records
            .into_iter()
            .map(|mut r| {
                r.resize(width, Value::Null);
                r.into_iter()
                    .zip(&columns)
                    .map(|(v, c)| coerce(v, c.dtype))
                    .collect()
            })
            .collect();
        Dataset { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> &[Value] {
        &self.rows[idx]
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
