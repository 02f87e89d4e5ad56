use crate::constants::DEFAULT_PAGE_SIZE;
use crate::models::Record;

/// How much of the filtered result list is materialized for display.
///
/// Two transitions: [`ResultsView::reset`] on any filter change, and
/// [`ResultsView::load_more`] on the "load more" trigger. `visible_count`
/// never decreases except through `reset`, and rendering always shows
/// `min(visible_count, filtered.len())` items. Nothing persists across runs.
#[derive(Debug, Clone, Copy)]
pub struct ResultsView {
    page_size: usize,
    visible_count: usize,
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResultsView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            visible_count: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Back to the first page. Called whenever filters are reapplied.
    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
    }

    /// Grows the window by one page.
    pub fn load_more(&mut self) {
        self.visible_count += self.page_size;
    }

    /// The currently visible slice of the filtered list.
    pub fn visible<'a>(&self, filtered: &'a [Record]) -> &'a [Record] {
        &filtered[..self.visible_count.min(filtered.len())]
    }

    /// How many filtered results are not yet visible.
    pub fn remaining(&self, filtered_len: usize) -> usize {
        filtered_len.saturating_sub(self.visible_count)
    }

    /// Size of the next "load more" batch, capped by what is left.
    pub fn next_batch(&self, filtered_len: usize) -> usize {
        self.page_size.min(self.remaining(filtered_len))
    }

    pub fn has_more(&self, filtered_len: usize) -> bool {
        self.remaining(filtered_len) > 0
    }
}
