use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Column holding the year a salary was paid.
pub const WORK_YEAR: &str = "work_year";
/// Column holding the salary converted to USD.
pub const SALARY_IN_USD: &str = "salary_in_usd";
/// Column holding the job title.
pub const JOB_TITLE: &str = "job_title";

// ---------------------------------------------------------------------------
// CellValue – a single loosely typed cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as produced by parsing untyped tabular input.
/// Numeric-looking text becomes a number, everything else stays text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "null"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell.
    ///
    /// Empty cells become `Null`; non-finite spellings such as `NaN` or `inf`
    /// stay text.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Whether the value counts as "present": null, `false`, zero, NaN and the
    /// empty string do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Integer(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0 && !f.is_nan(),
            CellValue::String(s) => !s.is_empty(),
        }
    }

    /// Loose numeric coercion: null and blank text count as `0`, booleans as
    /// `0`/`1`, other text only when it is a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Null => Some(0.0),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Float(_) => None,
            CellValue::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Some(0.0);
                }
                s.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
    }

    /// Coerce a year cell to an integer by its leading digits, so `2021`,
    /// `2021.0` and `"2021"` all resolve to the same year.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.abs() < i64::MAX as f64 => {
                Some(v.trunc() as i64)
            }
            CellValue::String(s) => leading_integer(s),
            _ => None,
        }
    }
}

/// Parse the optional sign and leading decimal digits of `s`.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the input file
// ---------------------------------------------------------------------------

/// One row of input data as parsed. The three columns the viewer reads are
/// named fields (`Null` when the column is missing); every other column is
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub work_year: CellValue,
    pub salary_in_usd: CellValue,
    pub job_title: CellValue,
    pub extra: BTreeMap<String, CellValue>,
}

impl Default for SalaryRecord {
    fn default() -> Self {
        Self {
            work_year: CellValue::Null,
            salary_in_usd: CellValue::Null,
            job_title: CellValue::Null,
            extra: BTreeMap::new(),
        }
    }
}

impl SalaryRecord {
    /// Build a record from `(column, value)` pairs, routing the known columns
    /// to their fields.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        let mut record = SalaryRecord::default();
        for (column, value) in cells {
            match column.as_str() {
                WORK_YEAR => record.work_year = value,
                SALARY_IN_USD => record.salary_in_usd = value,
                JOB_TITLE => record.job_title = value,
                _ => {
                    record.extra.insert(column, value);
                }
            }
        }
        record
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All records of one loaded file, in file order.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    /// Column names in file order.
    pub column_names: Vec<String>,
}

impl SalaryDataset {
    pub fn new(records: Vec<SalaryRecord>, column_names: Vec<String>) -> Self {
        SalaryDataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Per-year statistics. `average_salary` is kept unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i64,
    pub total_jobs: usize,
    pub average_salary: f64,
}

/// Number of records with a given job title within one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub job_title: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_dynamic_typing() {
        assert_eq!(CellValue::from_text(""), CellValue::Null);
        assert_eq!(CellValue::from_text("2021"), CellValue::Integer(2021));
        assert_eq!(CellValue::from_text("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::from_text("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::from_text("Data Scientist"),
            CellValue::String("Data Scientist".into())
        );
        assert_eq!(CellValue::from_text("NaN"), CellValue::String("NaN".into()));
    }

    #[test]
    fn test_truthiness() {
        assert!(!CellValue::Null.is_truthy());
        assert!(!CellValue::Integer(0).is_truthy());
        assert!(!CellValue::Float(f64::NAN).is_truthy());
        assert!(!CellValue::String(String::new()).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(CellValue::Integer(2020).is_truthy());
        assert!(CellValue::String("abc".into()).is_truthy());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::Integer(5).as_f64(), Some(5.0));
        assert_eq!(CellValue::String(" 12.5 ".into()).as_f64(), Some(12.5));
        assert_eq!(CellValue::String("abc".into()).as_f64(), None);
        assert_eq!(CellValue::String("inf".into()).as_f64(), None);
        assert_eq!(CellValue::String("   ".into()).as_f64(), Some(0.0));
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), Some(0.0));
        assert_eq!(CellValue::Bool(true).as_f64(), Some(1.0));
        assert_eq!(CellValue::Bool(false).as_f64(), Some(0.0));
    }

    #[test]
    fn test_null_displays_as_null() {
        assert_eq!(CellValue::Null.to_string(), "null");
    }

    #[test]
    fn test_year_coercion() {
        assert_eq!(CellValue::Integer(2021).as_year(), Some(2021));
        assert_eq!(CellValue::Float(2021.7).as_year(), Some(2021));
        assert_eq!(CellValue::String("2021".into()).as_year(), Some(2021));
        assert_eq!(CellValue::String(" 2021-06".into()).as_year(), Some(2021));
        assert_eq!(CellValue::String("FY2021".into()).as_year(), None);
        assert_eq!(CellValue::Bool(true).as_year(), None);
    }

    #[test]
    fn test_record_routes_known_columns() {
        let record = SalaryRecord::from_cells(vec![
            (WORK_YEAR.to_string(), CellValue::Integer(2022)),
            ("company_size".to_string(), CellValue::String("M".into())),
            (JOB_TITLE.to_string(), CellValue::String("ML Engineer".into())),
        ]);
        assert_eq!(record.work_year, CellValue::Integer(2022));
        assert_eq!(record.salary_in_usd, CellValue::Null);
        assert_eq!(record.job_title, CellValue::String("ML Engineer".into()));
        assert_eq!(
            record.extra.get("company_size"),
            Some(&CellValue::String("M".into()))
        );
        assert!(!record.extra.contains_key(WORK_YEAR));
    }
}
