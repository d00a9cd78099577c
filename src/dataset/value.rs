// src/dataset/value.rs

use serde_json::{Number, Value};
use tracing::debug;

/// Cell text that counts as missing, in addition to the empty string.
/// Matches the default NA markers of common dataframe CSV readers.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Trim a raw cell; `None` when it is empty or an NA marker.
pub fn clean_cell(raw: &str) -> Option<&str> {
    let s = raw.trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s)
    }
}

/// Type shared by every non-missing cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
}

impl ColumnKind {
    /// Kind of a single cleaned cell.
    pub fn of_cell(s: &str) -> Self {
        if matches!(s, "true" | "True" | "TRUE" | "false" | "False" | "FALSE") {
            Self::Bool
        } else if s.parse::<i64>().is_ok() {
            Self::Int
        } else if s.parse::<f64>().is_ok_and(f64::is_finite) {
            Self::Float
        } else {
            Self::Text
        }
    }

    /// Smallest kind able to hold both `self` and `other`.
    fn widen(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            _ => Self::Text,
        }
    }

    /// Derive a column's kind from its cleaned cells, ignoring missing ones.
    /// A column with no values at all is text.
    pub fn derive<'a>(name: &str, cells: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut kind: Option<Self> = None;
        for cell in cells.into_iter().flatten() {
            let next = Self::of_cell(cell);
            let widened = kind.map_or(next, |k| k.widen(next));
            if widened == Self::Text {
                if kind.is_some_and(|k| k != Self::Text) {
                    debug!(column = name, "mixed values, keeping column as text");
                }
                return Self::Text;
            }
            kind = Some(widened);
        }
        kind.unwrap_or(Self::Text)
    }

    /// Convert a cleaned cell of a column of this kind.
    pub fn to_value(self, cell: Option<&str>) -> Value {
        let Some(s) = cell else {
            return Value::Null;
        };
        match self {
            Self::Bool => Value::Bool(s.eq_ignore_ascii_case("true")),
            Self::Int => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(s.to_string())),
            Self::Float => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(s.to_string())),
            Self::Text => Value::String(s.to_string()),
        }
    }
}

/// A cell counts as present unless it is empty or an explicit `false`.
pub fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Textual form of a cell, used for equality and substring matching.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
