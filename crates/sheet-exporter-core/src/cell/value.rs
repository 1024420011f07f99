//! Values a cell can hold

use std::fmt;

/// Content of one worksheet cell
///
/// Formulas are kept as the text the caller wrote (`"=SUM(A1:A3)"`) and
/// are never evaluated here.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    String(String),
    Formula(String),
}

impl CellValue {
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text content of a string cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Renders the value the way it would appear in a text export.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(text) | CellValue::Formula(text) => f.write_str(text),
        }
    }
}

macro_rules! number_conversions {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    CellValue::Number(f64::from(n))
                }
            }
        )*
    };
}

number_conversions!(i8, i16, i32, u8, u16, u32, f32, f64);

// i64/u64 are not losslessly representable; they round like any spreadsheet number
impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::String(s.clone())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(7u8), CellValue::Number(7.0));
        assert_eq!(CellValue::from(3_000_000_000i64), CellValue::Number(3e9));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("x")).as_str(), Some("x"));
        assert_eq!(CellValue::from(&"owned".to_string()).as_str(), Some("owned"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(-0.25).to_string(), "-0.25");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::formula("=A1*2").to_string(), "=A1*2");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(CellValue::Boolean(true).as_number(), None);
        assert_eq!(CellValue::string("1.5").as_number(), None);
        assert_eq!(CellValue::Number(1.5).as_str(), None);
        assert!(CellValue::default().is_empty());
    }
}
