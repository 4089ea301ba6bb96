use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use super::model::YearSummary;

// ---------------------------------------------------------------------------
// Sort keys and directions
// ---------------------------------------------------------------------------

/// Summary column used as sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Year,
    TotalJobs,
    AverageSalary,
}

impl SortKey {
    /// All keys in table column order.
    pub const ALL: [SortKey; 3] = [SortKey::Year, SortKey::TotalJobs, SortKey::AverageSalary];

    pub fn column_index(self) -> usize {
        match self {
            SortKey::Year => 0,
            SortKey::TotalJobs => 1,
            SortKey::AverageSalary => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Year => "Year",
            SortKey::TotalJobs => "Total Jobs",
            SortKey::AverageSalary => "Average Salary (USD)",
        }
    }

    fn compare(self, a: &YearSummary, b: &YearSummary) -> Ordering {
        match self {
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::TotalJobs => a.total_jobs.cmp(&b.total_jobs),
            SortKey::AverageSalary => a.average_salary.total_cmp(&b.average_salary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortKeyError {
    #[error("no summary column at index {0} (expected 0, 1 or 2)")]
    UnknownColumn(usize),
}

impl TryFrom<usize> for SortKey {
    type Error = SortKeyError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        SortKey::ALL
            .get(index)
            .copied()
            .ok_or(SortKeyError::UnknownColumn(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⬆",
            SortDirection::Descending => "⬇",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Reorder `summary` in place. The sort is stable and equal keys keep
/// their current relative order.
pub fn sort_summaries(summary: &mut [YearSummary], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => summary.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Descending => summary.sort_by(|a, b| key.compare(b, a)),
    }
}

// ---------------------------------------------------------------------------
// Per-column toggles
// ---------------------------------------------------------------------------

/// Independent ascending/descending toggle for each summary column.
///
/// A column that was never activated sorts ascending first; every further
/// activation of the same column flips its direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortToggles {
    directions: [Option<SortDirection>; 3],
}

impl SortToggles {
    /// Flip the toggle for `key` and return the direction to sort by.
    pub fn activate(&mut self, key: SortKey) -> SortDirection {
        let slot = &mut self.directions[key.column_index()];
        let next = match *slot {
            None => SortDirection::Ascending,
            Some(dir) => dir.flipped(),
        };
        *slot = Some(next);
        next
    }

    /// Direction the column was last sorted in, if ever.
    pub fn current(&self, key: SortKey) -> Option<SortDirection> {
        self.directions[key.column_index()]
    }
}
