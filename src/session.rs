use crate::cpv::{CpvIndex, CpvPath};
use crate::errors::{AppError, AppResult};
use crate::filter::{apply_filters, AwardModeFilter, FilterState, KindFilter};
use crate::models::{CpvNode, Record};
use crate::view::ResultsView;
use std::collections::BTreeSet;
use tracing::debug;

/// Owning controller for one browsing session.
///
/// Holds the immutable record set and taxonomy index together with the mutable
/// filter, path, and view state, so nothing lives in ambient globals. Every
/// filter mutation re-runs the filter engine and resets the view window;
/// `load_more` only grows the window.
#[derive(Debug)]
pub struct BrowseSession {
    records: Vec<Record>,
    index: CpvIndex,
    path: CpvPath,
    filters: FilterState,
    view: ResultsView,
    filtered: Vec<Record>,
    locations: Vec<String>,
}

impl BrowseSession {
    pub fn new(records: Vec<Record>, nodes: Vec<CpvNode>, page_size: usize) -> Self {
        let index = CpvIndex::build(&nodes);
        let locations = distinct_locations(&records);
        debug!(
            records = records.len(),
            cpv_nodes = index.len(),
            locations = locations.len(),
            "Browse session assembled"
        );

        let mut session = Self {
            records,
            index,
            path: CpvPath::new(),
            filters: FilterState::default(),
            view: ResultsView::new(page_size),
            filtered: Vec::new(),
            locations,
        };
        session.refresh();
        session
    }

    /// Reapplies the filters and snaps the view back to the first page.
    fn refresh(&mut self) {
        self.filtered = apply_filters(&self.records, &self.filters);
        self.view.reset();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.refresh();
    }

    pub fn set_award_mode(&mut self, mode: AwardModeFilter) {
        self.filters.award_mode = mode;
        self.refresh();
    }

    pub fn set_kind(&mut self, kind: KindFilter) {
        self.filters.kind = kind;
        self.refresh();
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.filters.location = location.filter(|l| !l.trim().is_empty());
        self.refresh();
    }

    /// Drills one level down the taxonomy; the code must be among the current
    /// options.
    pub fn cpv_descend(&mut self, code: &str) -> AppResult<()> {
        self.path.descend(&self.index, code)?;
        self.filters.cpv = self.path.current().cloned();
        self.refresh();
        Ok(())
    }

    /// Goes one level back up; a no-op at the root.
    pub fn cpv_ascend(&mut self) {
        if self.path.ascend().is_some() {
            self.filters.cpv = self.path.current().cloned();
            self.refresh();
        }
    }

    /// Clears the taxonomy selection entirely.
    pub fn cpv_top(&mut self) {
        if !self.path.is_empty() {
            self.path.reset();
            self.filters.cpv = None;
            self.refresh();
        }
    }

    /// Selects a node directly by code, independent of the drill-down path.
    /// Used by the one-shot CLI where walking the tree level by level would be
    /// pointless; matching only ever depends on the selected node.
    pub fn select_cpv_code(&mut self, code: &str) -> AppResult<()> {
        let node = self
            .index
            .get(code)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown CPV code: {code}")))?
            .clone();
        self.path.reset();
        self.filters.cpv = Some(node);
        self.refresh();
        Ok(())
    }

    pub fn load_more(&mut self) {
        self.view.load_more();
    }

    // Read accessors

    pub fn records_len(&self) -> usize {
        self.records.len()
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn visible(&self) -> &[Record] {
        self.view.visible(&self.filtered)
    }

    pub fn has_more(&self) -> bool {
        self.view.has_more(self.filtered.len())
    }

    pub fn next_batch(&self) -> usize {
        self.view.next_batch(self.filtered.len())
    }

    /// Distinct trimmed NUTS labels present in the dataset, sorted.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn cpv_options(&self) -> Vec<&CpvNode> {
        self.path.options(&self.index)
    }

    pub fn cpv_breadcrumb(&self) -> String {
        self.path.breadcrumb()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }
}

/// The location selector options: every distinct non-empty trimmed
/// `nuts_label` in the dataset, sorted.
fn distinct_locations(records: &[Record]) -> Vec<String> {
    let labels: BTreeSet<String> = records
        .iter()
        .map(|r| r.location.nuts_label.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    labels.into_iter().collect()
}
