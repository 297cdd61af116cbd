//! Cell value model
//!
//! A raw cell as read from the source file. Delimited text only ever yields
//! `Text` and `Empty`; workbooks keep their native numeric and boolean types.

use std::fmt;

/// A raw cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent cell (missing, blank, or beyond a ragged row's end)
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Whether the cell carries no value at all
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Canonical string form used for display, decryption and export
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => format_float(*n, f),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

// Plain decimal form, never locale-formatted; -0 prints as 0
fn format_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{}", n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
