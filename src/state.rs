use std::path::Path;

use crate::data::export::write_summary_csv;
use crate::data::filter::filter_valid;
use crate::data::loader::load_file;
use crate::data::model::{DetailRow, SalaryDataset, YearSummary};
use crate::data::sort::{sort_summaries, SortDirection, SortKey, SortKeyError, SortToggles};
use crate::data::summary::{aggregate, chart_series, job_title_counts, ChartSeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` and `summary` are replaced together on every load; between
/// loads only [`AppState::sort_by`] touches `summary`, and only in place.
#[derive(Default)]
pub struct AppState {
    /// Records of the loaded file, unfiltered (None until a file is loaded).
    pub dataset: Option<SalaryDataset>,

    /// Per-year summary in display order.
    pub summary: Vec<YearSummary>,

    /// Ascending/descending toggle per summary column.
    pub sort_toggles: SortToggles,

    /// Column and direction of the last sort, for the header indicator.
    pub active_sort: Option<(SortKey, SortDirection)>,

    /// Year whose job titles are shown in the detail view.
    pub selected_year: Option<i64>,

    /// Job-title breakdown for `selected_year`.
    pub details: Vec<DetailRow>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset: rebuild the summary and hide the
    /// detail view.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        let valid = filter_valid(&dataset.records);
        log::debug!(
            "{} of {} records are usable",
            valid.len(),
            dataset.len()
        );
        self.summary = aggregate(valid);
        log::info!("Summarised {} years", self.summary.len());

        self.active_sort = None;
        self.selected_year = None;
        self.details.clear();

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load `path` and ingest it. On failure the previous data stays in
    /// place and the error goes to the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?} from {}",
                    dataset.len(),
                    dataset.column_names,
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Sort the summary by `key`, flipping that column's direction.
    pub fn sort_by(&mut self, key: SortKey) -> SortDirection {
        let direction = self.sort_toggles.activate(key);
        sort_summaries(&mut self.summary, key, direction);
        self.active_sort = Some((key, direction));
        log::debug!("Sorted summary by {} ({direction})", key.label());
        direction
    }

    /// Same as [`AppState::sort_by`] for a zero-based table column.
    pub fn sort_by_column(&mut self, index: usize) -> Result<SortDirection, SortKeyError> {
        let key = SortKey::try_from(index)?;
        Ok(self.sort_by(key))
    }

    /// Show the job-title breakdown of `year`. Recomputed on every call.
    pub fn select_year(&mut self, year: i64) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.details = job_title_counts(&ds.records, year);
        self.selected_year = Some(year);
        log::debug!("Year {year}: {} distinct job titles", self.details.len());
    }

    pub fn details_visible(&self) -> bool {
        self.selected_year.is_some()
    }

    pub fn chart_series(&self) -> ChartSeries {
        chart_series(&self.summary)
    }

    /// Write the summary, in display order, to `path`.
    pub fn export_summary(&mut self, path: &Path) {
        match write_summary_csv(path, &self.summary) {
            Ok(()) => {
                log::info!("Exported {} summary rows to {}", self.summary.len(), path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
