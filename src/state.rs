use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{init_filter_spec, FilterSpec};
use crate::data::loader::{DataLoadError, DatasetCache};
use crate::data::model::SalesDataset;
use crate::data::pipeline::{self, SalesSummary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Memoized loader; hit on repeated loads of the same path.
    cache: DatasetCache,

    /// Path of the currently loaded file (None until the user opens one).
    pub source_path: Option<PathBuf>,

    /// Loaded dataset, shared with the cache.
    pub dataset: Option<Arc<SalesDataset>>,

    /// Per-dimension filter selections.
    pub filters: FilterSpec,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// KPIs and chart tables for the current filters (cached).
    pub summary: SalesSummary,

    /// Category colours for the bar chart and filter swatches.
    pub colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load (or fetch from cache) the file at `path` and make it current.
    pub fn open_path(&mut self, path: &Path) -> Result<(), DataLoadError> {
        let dataset = self.cache.load(path)?;
        log::info!(
            "loaded {} orders across {} states / {} categories from {}",
            dataset.len(),
            dataset.states.len(),
            dataset.categories.len(),
            path.display()
        );
        self.source_path = Some(path.to_path_buf());
        self.set_dataset(dataset);
        Ok(())
    }

    /// Drop the cache entry and re-read the current file from storage.
    pub fn reload(&mut self) -> Result<(), DataLoadError> {
        let Some(path) = self.source_path.clone() else {
            return Ok(());
        };
        self.cache.invalidate();
        self.open_path(&path)
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    fn set_dataset(&mut self, dataset: Arc<SalesDataset>) {
        self.filters = init_filter_spec(&dataset);
        self.colors = Some(ColorMap::new(&dataset.categories));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Re-run the filter-aggregate pipeline after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let (indices, summary) = pipeline::apply(ds, &self.filters);
            self.visible_indices = indices;
            self.summary = summary;
        } else {
            self.visible_indices = Vec::new();
            self.summary = SalesSummary::default();
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dimension: &str, value: &str) {
        let allowed = self.filters.entry(dimension.to_string()).or_default();
        if !allowed.remove(value) {
            allowed.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dimension: &str) {
        if let Some(ds) = &self.dataset {
            if let Some(all_vals) = ds.unique_values(dimension) {
                self.filters.insert(dimension.to_string(), all_vals.clone());
                self.refilter();
            }
        }
    }

    /// Deselect all values of a dimension (hides every record).
    pub fn select_none(&mut self, dimension: &str) {
        self.filters.insert(dimension.to_string(), BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{DIM_CATEGORY, DIM_STATE};

    const SAMPLE: &str = "\
Date,State,Category,Sale Amount
2023-01-05,CA,Electronics,100
2023-01-20,CA,Books,50
2023-02-10,NY,Electronics,75
";

    fn state_with_sample(name: &str) -> (AppState, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "salesboard_state_{name}_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();
        let mut state = AppState::default();
        state.open_path(&path).unwrap();
        (state, path)
    }

    #[test]
    fn opening_a_file_initialises_filters_and_summary() {
        let (state, path) = state_with_sample("open");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summary.total_orders, 3);
        assert_eq!(state.summary.total_sales, 225.0);
        assert_eq!(state.filters[DIM_STATE].len(), 2);
        assert_eq!(state.filters[DIM_CATEGORY].len(), 2);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn toggling_a_value_rebuilds_the_summary() {
        let (mut state, path) = state_with_sample("toggle");
        state.toggle_filter_value(DIM_STATE, "NY");
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.summary.total_sales, 150.0);

        state.toggle_filter_value(DIM_STATE, "NY");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn select_none_hides_everything() {
        let (mut state, path) = state_with_sample("select_none");
        state.select_none(DIM_CATEGORY);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary.top_category_label(), "N/A");

        state.select_all(DIM_CATEGORY);
        assert_eq!(state.visible_indices.len(), 3);
        std::fs::remove_file(path).unwrap();
    }
}
