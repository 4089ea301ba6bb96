use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One generated row. Year and salary are text so malformed rows can be
/// written as-is.
#[derive(Serialize)]
struct Row {
    work_year: String,
    experience_level: &'static str,
    job_title: &'static str,
    salary_in_usd: String,
    company_size: &'static str,
}

const YEARS: [i64; 4] = [2020, 2021, 2022, 2023];
const TITLES: [(&str, f64); 5] = [
    ("Data Scientist", 120_000.0),
    ("Data Engineer", 115_000.0),
    ("ML Engineer", 140_000.0),
    ("Data Analyst", 85_000.0),
    ("Research Scientist", 150_000.0),
];
const LEVELS: [(&str, f64); 4] = [("EN", 0.7), ("MI", 1.0), ("SE", 1.3), ("EX", 1.7)];
const SIZES: [&str; 3] = ["S", "M", "L"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for (year_idx, &year) in YEARS.iter().enumerate() {
        // More postings and higher pay every year.
        let postings = 40 + year_idx * 25;
        let growth = 1.0 + 0.06 * year_idx as f64;
        for _ in 0..postings {
            let &(title, base) = rng.pick(&TITLES);
            let &(level, factor) = rng.pick(&LEVELS);
            let salary = rng.gauss(base * factor * growth, 12_000.0).max(20_000.0);
            rows.push(Row {
                work_year: year.to_string(),
                experience_level: level,
                job_title: title,
                salary_in_usd: format!("{salary:.0}"),
                company_size: *rng.pick(&SIZES),
            });
        }
    }

    // A few rows the viewer is expected to ignore.
    rows.push(Row {
        work_year: String::new(),
        experience_level: "MI",
        job_title: "Data Scientist",
        salary_in_usd: "50000".into(),
        company_size: "M",
    });
    rows.push(Row {
        work_year: "2022".into(),
        experience_level: "SE",
        job_title: "Data Engineer",
        salary_in_usd: "n/a".into(),
        company_size: "L",
    });

    write_csv("sample_salaries.csv", &rows)?;
    write_parquet("sample_salaries.parquet", &rows)?;

    println!(
        "Wrote {} salary records to sample_salaries.csv and sample_salaries.parquet",
        rows.len()
    );
    Ok(())
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let years: Int64Array = rows.iter().map(|r| r.work_year.parse::<i64>().ok()).collect();
    let salaries: Float64Array = rows
        .iter()
        .map(|r| r.salary_in_usd.parse::<f64>().ok())
        .collect();
    let levels = StringArray::from(rows.iter().map(|r| r.experience_level).collect::<Vec<_>>());
    let titles = StringArray::from(rows.iter().map(|r| r.job_title).collect::<Vec<_>>());
    let sizes = StringArray::from(rows.iter().map(|r| r.company_size).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("work_year", DataType::Int64, true),
        Field::new("experience_level", DataType::Utf8, false),
        Field::new("job_title", DataType::Utf8, false),
        Field::new("salary_in_usd", DataType::Float64, true),
        Field::new("company_size", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(years) as ArrayRef,
            Arc::new(levels),
            Arc::new(titles),
            Arc::new(salaries),
            Arc::new(sizes),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
