use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::YearSummary;
use super::summary::format_average;

/// One exported line; the average is written the way the table shows it.
#[derive(Serialize)]
struct SummaryLine {
    year: i64,
    total_jobs: usize,
    average_salary: String,
}

impl From<&YearSummary> for SummaryLine {
    fn from(s: &YearSummary) -> Self {
        SummaryLine {
            year: s.year,
            total_jobs: s.total_jobs,
            average_salary: format_average(s.average_salary),
        }
    }
}

/// Write the summary rows, in the given order, as CSV.
pub fn write_summary<W: Write>(writer: W, summary: &[YearSummary]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in summary {
        out.serialize(SummaryLine::from(row))
            .with_context(|| format!("writing summary row for {}", row.year))?;
    }
    out.flush().context("flushing summary CSV")?;
    Ok(())
}

/// Write the summary to a CSV file at `path`.
pub fn write_summary_csv(path: &Path, summary: &[YearSummary]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_summary(file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<YearSummary> {
        vec![
            YearSummary {
                year: 2021,
                total_jobs: 1,
                average_salary: 200_000.0,
            },
            YearSummary {
                year: 2020,
                total_jobs: 3,
                average_salary: 100_000.0 / 3.0,
            },
        ]
    }

    #[test]
    fn test_summary_csv_layout() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &rows()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "year,total_jobs,average_salary\n2021,1,200000.00\n2020,3,33333.33\n"
        );
    }

    #[test]
    fn test_write_summary_csv_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &rows()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("year,total_jobs,average_salary\n2021,"));
    }

    #[test]
    fn test_empty_summary_writes_nothing() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
