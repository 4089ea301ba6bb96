use std::collections::{BTreeMap, HashMap};

use super::model::{DetailRow, SalaryRecord, YearSummary};

// ---------------------------------------------------------------------------
// Aggregation: records → per-year summary
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct YearTally {
    total_jobs: usize,
    total_salary: f64,
}

/// Group valid records by year and compute job count and mean salary.
///
/// Records whose year does not resolve to an integer are skipped, and a
/// summary whose average is not finite is never emitted. The result is
/// ordered by ascending year.
pub fn aggregate<'a, I>(records: I) -> Vec<YearSummary>
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    let mut tallies: BTreeMap<i64, YearTally> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let (Some(year), Some(salary)) =
            (record.work_year.as_year(), record.salary_in_usd.as_f64())
        else {
            skipped += 1;
            continue;
        };
        let tally = tallies.entry(year).or_default();
        tally.total_jobs += 1;
        tally.total_salary += salary;
    }

    if skipped > 0 {
        log::debug!("aggregate: skipped {skipped} records without a usable year");
    }

    tallies
        .into_iter()
        .map(|(year, tally)| YearSummary {
            year,
            total_jobs: tally.total_jobs,
            average_salary: tally.total_salary / tally.total_jobs as f64,
        })
        .filter(|s| s.total_jobs > 0 && s.average_salary.is_finite())
        .collect()
}

// ---------------------------------------------------------------------------
// Drill-down: job titles within one year
// ---------------------------------------------------------------------------

/// Count records per job title for `year`, scanning every loaded record
/// (including ones the validity filter rejects). Rows follow the order in
/// which each title first appears.
pub fn job_title_counts(records: &[SalaryRecord], year: i64) -> Vec<DetailRow> {
    let mut rows: Vec<DetailRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records
        .iter()
        .filter(|r| r.work_year.as_year() == Some(year))
    {
        let title = record.job_title.to_string();
        match index.get(&title) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(title.clone(), rows.len());
                rows.push(DetailRow {
                    job_title: title,
                    count: 1,
                });
            }
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Chart input
// ---------------------------------------------------------------------------

/// Parallel label/value sequences for the trend chart, one point per summary
/// row in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<i64>,
    pub values: Vec<usize>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn chart_series(summary: &[YearSummary]) -> ChartSeries {
    ChartSeries {
        labels: summary.iter().map(|s| s.year).collect(),
        values: summary.iter().map(|s| s.total_jobs).collect(),
    }
}

/// Display form of an average salary: two decimals.
pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_valid;
    use crate::data::model::CellValue;

    fn record(year: CellValue, salary: CellValue, title: &str) -> SalaryRecord {
        SalaryRecord {
            work_year: year,
            salary_in_usd: salary,
            job_title: CellValue::String(title.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<SalaryRecord> {
        vec![
            record(CellValue::Integer(2020), CellValue::Integer(100_000), "A"),
            record(CellValue::Integer(2020), CellValue::Integer(150_000), "B"),
            record(CellValue::Integer(2021), CellValue::Integer(200_000), "A"),
        ]
    }

    #[test]
    fn test_end_to_end_example() {
        let records = sample();
        let summary = aggregate(filter_valid(&records));
        assert_eq!(
            summary,
            vec![
                YearSummary {
                    year: 2020,
                    total_jobs: 2,
                    average_salary: 125_000.0
                },
                YearSummary {
                    year: 2021,
                    total_jobs: 1,
                    average_salary: 200_000.0
                },
            ]
        );

        let details = job_title_counts(&records, 2020);
        assert_eq!(
            details,
            vec![
                DetailRow {
                    job_title: "A".into(),
                    count: 1
                },
                DetailRow {
                    job_title: "B".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_malformed_row_never_contributes() {
        let mut records = sample();
        records.push(record(CellValue::Null, CellValue::Integer(50_000), "C"));
        let summary = aggregate(filter_valid(&records));
        let total: usize = summary.iter().map(|s| s.total_jobs).sum();
        assert_eq!(total, 3);
        assert_eq!(summary[0].average_salary, 125_000.0);
    }

    #[test]
    fn test_job_count_matches_input_length() {
        let records: Vec<SalaryRecord> = (0..50)
            .map(|i| {
                record(
                    CellValue::Integer(2020 + (i % 4)),
                    CellValue::Float(1000.0 + i as f64 * 17.5),
                    "X",
                )
            })
            .collect();
        let valid = filter_valid(&records);
        let summary = aggregate(valid.iter().copied());
        let total: usize = summary.iter().map(|s| s.total_jobs).sum();
        assert_eq!(total, valid.len());
        assert!(summary.iter().all(|s| s.total_jobs >= 1));
    }

    #[test]
    fn test_average_is_not_rounded() {
        let records = vec![
            record(CellValue::Integer(2022), CellValue::Integer(1), "A"),
            record(CellValue::Integer(2022), CellValue::Integer(2), "A"),
            record(CellValue::Integer(2022), CellValue::Integer(2), "A"),
        ];
        let summary = aggregate(filter_valid(&records));
        assert_eq!(summary[0].average_salary, 5.0 / 3.0);
        assert_eq!(format_average(summary[0].average_salary), "1.67");
    }

    #[test]
    fn test_blank_salary_counts_as_zero() {
        let ds = crate::data::loader::parse_csv_reader(
            "work_year,salary_in_usd,job_title\n2020,100000,A\n2020,,B\n2021,true,C\n".as_bytes(),
        )
        .unwrap();
        let summary = aggregate(filter_valid(&ds.records));
        assert_eq!(
            summary,
            vec![
                YearSummary {
                    year: 2020,
                    total_jobs: 2,
                    average_salary: 50_000.0
                },
                YearSummary {
                    year: 2021,
                    total_jobs: 1,
                    average_salary: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_missing_title_is_listed_as_null() {
        let records = vec![SalaryRecord {
            work_year: CellValue::Integer(2020),
            ..Default::default()
        }];
        assert_eq!(job_title_counts(&records, 2020)[0].job_title, "null");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(
            aggregate(filter_valid(&records)),
            aggregate(filter_valid(&reversed))
        );
    }

    #[test]
    fn test_unparseable_year_is_dropped_after_filter() {
        let records = vec![
            record(CellValue::String("unknown".into()), CellValue::Integer(10), "A"),
            record(CellValue::Integer(2023), CellValue::Integer(20), "B"),
        ];
        let valid = filter_valid(&records);
        assert_eq!(valid.len(), 2);
        let summary = aggregate(valid);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].year, 2023);
    }

    #[test]
    fn test_text_and_numeric_years_share_a_summary() {
        let records = vec![
            record(CellValue::String("2021".into()), CellValue::Integer(10), "A"),
            record(CellValue::Integer(2021), CellValue::Integer(30), "B"),
        ];
        let summary = aggregate(filter_valid(&records));
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_jobs, 2);
        assert_eq!(summary[0].average_salary, 20.0);
        assert_eq!(job_title_counts(&records, 2021).len(), 2);
    }

    #[test]
    fn test_details_use_unfiltered_records() {
        let mut records = sample();
        records.push(record(CellValue::Integer(2020), CellValue::Null, "A"));
        records.push(record(CellValue::Integer(2020), CellValue::Null, "C"));

        let details = job_title_counts(&records, 2020);
        let titles: Vec<&str> = details.iter().map(|d| d.job_title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(details[0].count, 2);

        let total: usize = details.iter().map(|d| d.count).sum();
        let expected = records
            .iter()
            .filter(|r| r.work_year.as_year() == Some(2020))
            .count();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_details_for_unknown_year_are_empty() {
        assert!(job_title_counts(&sample(), 1999).is_empty());
    }

    #[test]
    fn test_chart_series_follows_display_order() {
        let mut summary = aggregate(filter_valid(&sample()));
        summary.reverse();
        let series = chart_series(&summary);
        assert_eq!(series.labels, vec![2021, 2020]);
        assert_eq!(series.values, vec![1, 2]);
        assert_eq!(series.labels.len(), summary.len());
    }
}
