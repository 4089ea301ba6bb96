/// Data layer: core types, loading, and the derived summary views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalaryDataset (raw records)
///   └──────────┘
///        │                                  │
///        ▼                                  │
///   ┌──────────┐                            │
///   │  filter   │  drop records without     │
///   └──────────┘  year / numeric salary     │
///        │                                  ▼
///        ▼                          ┌────────────────┐
///   ┌──────────┐                    │ job_title_counts│  drill-down on
///   │ aggregate │  → Vec<YearSummary>└────────────────┘  one year
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  reorder in place by column
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod summary;
