use crate::models::{CountSource, Resource};

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// In-memory state of one list view. Created empty on mount and dropped
/// with the view.
#[derive(Debug, Clone)]
pub struct ListState {
    /// Last successful fetch, in server order.
    pub items: Vec<Resource>,
    /// Always stored lower-cased.
    pub search_term: String,
    pub page: usize,
    pub rows_per_page: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub total_items: Option<usize>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            loading: false,
            error: None,
            total_items: None,
        }
    }
}

impl ListState {
    pub fn filtered(&self) -> Vec<&Resource> {
        filter_items(&self.items, &self.search_term)
    }

    /// Rows on the current page, after filtering.
    pub fn visible(&self) -> Vec<&Resource> {
        let filtered = self.filtered();
        page_slice(&filtered, self.page, self.rows_per_page).to_vec()
    }

    pub fn count(&self, source: CountSource) -> usize {
        match (source, self.total_items) {
            (CountSource::ServerTotal, Some(total)) => total,
            _ => self.filtered().len(),
        }
    }

    /// Removes the first item whose id matches. Returns whether one was found.
    pub fn remove_item(&mut self, id_field: &str, id: &str) -> bool {
        let position = self
            .items
            .iter()
            .position(|item| item.id(id_field).as_deref() == Some(id));
        match position {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Items whose lower-cased concatenated field values contain `term`.
/// An empty term keeps everything.
pub fn filter_items<'a>(items: &'a [Resource], term: &str) -> Vec<&'a Resource> {
    let term = term.to_lowercase();
    if term.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.search_text().contains(&term))
        .collect()
}

/// `[page * rows_per_page, page * rows_per_page + rows_per_page)`, clipped to
/// the input. Out-of-range pages give an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(rows_per_page).min(items.len());
    &items[start..end]
}
