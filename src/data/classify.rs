use super::model::Dataset;
use crate::error::{ColumnKind, DashboardError, Result};

/// Partition of a dataset's columns into numeric and categorical names,
/// each list in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClasses {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// A column is numeric iff its inferred type is a number type.
pub fn classify(dataset: &Dataset) -> ColumnClasses {
    let mut classes = ColumnClasses::default();
    for col in dataset.columns() {
        if col.dtype.is_numeric() {
            classes.numeric.push(col.name.clone());
        } else {
            classes.categorical.push(col.name.clone());
        }
    }
    classes
}

impl ColumnClasses {
    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.iter().any(|c| c == column)
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical.iter().any(|c| c == column)
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.is_numeric(column) {
            Some(ColumnKind::Numeric)
        } else if self.is_categorical(column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Check that `column` exists and belongs to `expected`.
    pub fn require(&self, column: &str, expected: ColumnKind) -> Result<()> {
        match self.kind_of(column) {
            None => Err(DashboardError::UnknownColumn(column.to_string())),
            Some(kind) if kind != expected => Err(DashboardError::WrongColumnKind {
                column: column.to_string(),
                expected,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Check that at least `required` columns of `kind` exist.
    pub fn require_count(
        &self,
        purpose: &'static str,
        kind: ColumnKind,
        required: usize,
    ) -> Result<()> {
        let found = match kind {
            ColumnKind::Numeric => self.numeric.len(),
            ColumnKind::Categorical => self.categorical.len(),
        };
        if found < required {
            return Err(DashboardError::InsufficientColumns {
                purpose,
                kind,
                required,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    fn sample() -> Dataset {
        Dataset::from_records(
            ["Brand", "Price", "Automatic", "Mileage", "Fuel"],
            vec![vec![
                Value::Text("Toyota".into()),
                Value::Integer(20000),
                Value::Bool(true),
                Value::Float(15000.5),
                Value::Null,
            ]],
        )
    }

    #[test]
    fn test_partition_covers_all_columns_without_overlap() {
        let ds = sample();
        let classes = classify(&ds);

        assert_eq!(classes.numeric, vec!["Price", "Mileage", "Fuel"]);
        assert_eq!(classes.categorical, vec!["Brand", "Automatic"]);
        assert_eq!(
            classes.numeric.len() + classes.categorical.len(),
            ds.num_columns()
        );
        assert!(classes.numeric.iter().all(|c| !classes.is_categorical(c)));
    }

    #[test]
    fn test_require_reports_kind_problems() {
        let classes = classify(&sample());

        assert!(classes.require("Brand", ColumnKind::Categorical).is_ok());
        assert!(matches!(
            classes.require("Brand", ColumnKind::Numeric),
            Err(DashboardError::WrongColumnKind { .. })
        ));
        assert!(matches!(
            classes.require("Colour", ColumnKind::Numeric),
            Err(DashboardError::UnknownColumn(_))
        ));
        assert!(matches!(
            classes.require_count("Test", ColumnKind::Categorical, 3),
            Err(DashboardError::InsufficientColumns { found: 2, .. })
        ));
    }
}
