//! Value binders
//!
//! A binder decides how a raw value becomes a typed cell when rows are
//! loaded in bulk at generation time.

use sheet_exporter_core::CellValue;

/// How buffered values are typed when they are loaded into a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueBinder {
    /// Store values as given, except `=`-prefixed strings, which become formulas
    Default,
    /// Like [`ValueBinder::Default`], and also detect booleans, numbers and
    /// percentages written as strings. Used unless configured otherwise.
    #[default]
    Advanced,
}

impl ValueBinder {
    /// Bind one value
    pub fn bind(self, value: CellValue) -> CellValue {
        match value {
            CellValue::String(text) => self.bind_text(text),
            other => other,
        }
    }

    fn bind_text(self, text: String) -> CellValue {
        if text.len() > 1 && text.starts_with('=') {
            return CellValue::Formula(text);
        }

        if self == ValueBinder::Advanced {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                return CellValue::Boolean(true);
            }
            if trimmed.eq_ignore_ascii_case("false") {
                return CellValue::Boolean(false);
            }
            if let Some(number) = parse_number(trimmed) {
                return CellValue::Number(number);
            }
            if let Some(percent) = trimmed.strip_suffix('%').and_then(|p| parse_number(p.trim_end())) {
                return CellValue::Number(percent / 100.0);
            }
        }

        CellValue::String(text)
    }
}

/// Parse plain decimal notation.
///
/// Strings with a leading zero before further digits ("007", zip codes) and
/// the spelled-out specials `inf`/`NaN` stay text.
fn parse_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let first = digits.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') && !digits[1..].starts_with(['.', 'e', 'E']) {
        return None;
    }
    if !digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
