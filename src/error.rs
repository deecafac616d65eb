use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of the column partition an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Errors raised by loading, filtering, summarising and exporting.
///
/// `FileNotFound`, `Parse` and `UnsupportedFormat` are fatal at startup.
/// `InsufficientColumns` is an informational signal: nothing was computed.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("{purpose} needs at least {required} {kind} column(s), found {found}")]
    InsufficientColumns {
        purpose: &'static str,
        kind: ColumnKind,
        required: usize,
        found: usize,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{column}' is not {expected}")]
    WrongColumnKind { column: String, expected: ColumnKind },

    #[error("Export to {} failed: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

impl DashboardError {
    /// Non-fatal signals the UI shows as an informational notice.
    pub fn is_informational(&self) -> bool {
        matches!(self, DashboardError::InsufficientColumns { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
