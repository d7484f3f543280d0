use iris_explorer::data::Dataset;
use iris_explorer::data::filter::{FilterState, filtered_indices, init_filter_state};
use iris_explorer::report::{Page, Report};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; replaced only through File → Open….
    pub dataset: Option<Dataset>,

    /// Label column used when opening files.
    pub label_field: String,

    /// Selected labels.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Which dashboard is shown.
    pub page: Page,

    /// Report for `page` over the visible records (cached).
    pub report: Option<Report>,

    /// Label colours, fixed per dataset so filtering keeps colours stable.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(page: Page, label_field: String) -> Self {
        Self {
            dataset: None,
            label_field,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            page,
            report: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colour.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.color_map = Some(ColorMap::new(dataset.labels()));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_report();
    }

    /// Recompute `visible_indices` and the report after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
        self.rebuild_report();
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.rebuild_report();
        }
    }

    fn rebuild_report(&mut self) {
        self.report = self.dataset.as_ref().map(|ds| {
            let view = ds.subset(&self.visible_indices);
            log::debug!(
                "building {:?} report over {} of {} records",
                self.page,
                view.len(),
                ds.len()
            );
            self.page.build(&view)
        });
    }

    /// Toggle a single label in the filter.
    pub fn toggle_label(&mut self, label: &str) {
        if !self.filters.remove(label) {
            self.filters.insert(label.to_string());
        }
        self.refilter();
    }

    /// Select all labels.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters = init_filter_state(ds);
            self.refilter();
        }
    }

    /// Deselect all labels.
    pub fn select_none(&mut self) {
        self.filters.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_explorer::data::loader::load_bundled;

    fn state() -> AppState {
        let mut state = AppState::new(Page::Explorer, "species".into());
        state.set_dataset(load_bundled().unwrap());
        state
    }

    #[test]
    fn test_set_dataset_selects_everything() {
        let state = state();
        assert_eq!(state.visible_indices.len(), 150);
        assert_eq!(state.filters.len(), 3);
        assert!(state.report.is_some());
    }

    #[test]
    fn test_toggle_label_refilters() {
        let mut state = state();
        state.toggle_label("setosa");
        assert_eq!(state.visible_indices.len(), 100);
        state.toggle_label("setosa");
        assert_eq!(state.visible_indices.len(), 150);
        state.select_none();
        assert!(state.visible_indices.is_empty());
        state.select_all();
        assert_eq!(state.visible_indices.len(), 150);
    }

    #[test]
    fn test_switching_page_rebuilds_report() {
        let mut state = state();
        state.set_page(Page::EdaReport);
        assert_eq!(
            state.report.as_ref().map(|r| r.title.as_str()),
            Some(Page::EdaReport.title())
        );
    }
}
