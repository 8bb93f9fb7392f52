use serde::{Serialize, Serializer};
use std::fmt::Display;

/// A single constraint that a column or cell can fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    ColumnPresent,
    NotNullable,
    Integer,
    GreaterThanOrEqual(i64),
    LessThanOrEqual(i64),
    IsIn(Vec<String>),
    NonEmpty,
    Unique,
    DateCoercion,
    DateAfter(chrono::NaiveDate),
}

impl Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::ColumnPresent => write!(f, "column_in_dataframe"),
            Check::NotNullable => write!(f, "not_nullable"),
            Check::Integer => write!(f, "dtype('int64')"),
            Check::GreaterThanOrEqual(min) => write!(f, "greater_than_or_equal_to({})", min),
            Check::LessThanOrEqual(max) => write!(f, "less_than_or_equal_to({})", max),
            Check::IsIn(allowed) => write!(f, "isin([{}])", allowed.join(", ")),
            Check::NonEmpty => write!(f, "str_length(min=1)"),
            Check::Unique => write!(f, "field_uniqueness"),
            Check::DateCoercion => write!(f, "coerce_dtype('datetime64[s]')"),
            Check::DateAfter(floor) => write!(f, "greater_than({})", floor),
        }
    }
}

impl Serialize for Check {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One instance of a column or cell failing one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Zero-based data row, `None` for column-level failures
    pub row: Option<usize>,
    pub column: String,
    pub check: Check,
    /// Offending cell content, `None` when the cell was null
    pub value: Option<String>,
}

impl Violation {
    pub fn column(column: &str, check: Check) -> Self {
        Self {
            row: None,
            column: column.to_string(),
            check,
            value: None,
        }
    }

    pub fn cell(row: usize, column: &str, check: Check, value: Option<&str>) -> Self {
        Self {
            row: Some(row),
            column: column.to_string(),
            check,
            value: value.map(str::to_string),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(
                f,
                "column '{}' failed {} at row {} (value: {})",
                self.column,
                self.check,
                row,
                self.value.as_deref().unwrap_or("null")
            ),
            None => write!(f, "column '{}' failed {}", self.column, self.check),
        }
    }
}
