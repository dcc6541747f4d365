use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::client::{ListPage, ResourceApi};
use crate::error::AppError;
use crate::models::{Resource, ResourceDescriptor};
use crate::view::state::{ListState, ROWS_PER_PAGE_OPTIONS};
use crate::view::table::{PaginationControl, TableRow, TableView};

/// Searchable, paginated table of one resource with row-level delete.
///
/// The view owns its state exclusively. Dropping the view is the unmount:
/// fetches started with [`ResourceListView::spawn_fetch`] only hold a weak
/// reference and discard their response once the view is gone.
pub struct ResourceListView {
    descriptor: &'static ResourceDescriptor,
    api: Arc<dyn ResourceApi>,
    state: Arc<Mutex<ListState>>,
}

impl ResourceListView {
    pub fn new(descriptor: &'static ResourceDescriptor, api: Arc<dyn ResourceApi>) -> Self {
        Self {
            descriptor,
            api,
            state: Arc::new(Mutex::new(ListState::default())),
        }
    }

    /// Creates the view and runs the initial fetch.
    pub async fn mount(descriptor: &'static ResourceDescriptor, api: Arc<dyn ResourceApi>) -> Self {
        let view = Self::new(descriptor, api);
        view.fetch_all().await;
        view
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        self.descriptor
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        lock_state(&self.state)
    }

    pub fn snapshot(&self) -> ListState {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<Resource> {
        self.lock().items.clone()
    }

    /// Loads the collection and returns the items held afterwards. On failure
    /// the error is recorded and the previous items are kept.
    pub async fn fetch_all(&self) -> Vec<Resource> {
        if !begin_fetch(&self.state, self.descriptor) {
            return self.items();
        }
        let _loading = LoadingGuard(Arc::downgrade(&self.state));
        let result = self.api.list(self.descriptor).await;
        let mut state = self.lock();
        apply_fetch(&mut state, self.descriptor, result);
        state.items.clone()
    }

    /// Starts a fetch in the background. The response is dropped if the view
    /// no longer exists when it arrives.
    pub fn spawn_fetch(&self) -> JoinHandle<()> {
        let started = begin_fetch(&self.state, self.descriptor);
        let weak = Arc::downgrade(&self.state);
        // Created outside the task so an abort before the first poll still resets.
        let loading = started.then(|| LoadingGuard(weak.clone()));
        let api = self.api.clone();
        let descriptor = self.descriptor;

        tokio::spawn(async move {
            let Some(_loading) = loading else {
                return;
            };
            let result = api.list(descriptor).await;
            match weak.upgrade() {
                Some(state) => apply_fetch(&mut lock_state(&state), descriptor, result),
                None => debug!("{} list view was dropped before its fetch completed", descriptor.name),
            }
        })
    }

    /// Sets the filter term and returns the matching items. Goes back to the
    /// first page.
    pub fn search(&self, term: &str) -> Vec<Resource> {
        let mut state = self.lock();
        state.search_term = term.to_lowercase();
        state.page = 0;
        state.filtered().into_iter().cloned().collect()
    }

    pub fn set_page(&self, page: usize) {
        self.lock().page = page;
    }

    pub fn set_rows_per_page(&self, rows_per_page: usize) -> Result<(), AppError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(AppError::Validation(format!(
                "rows per page must be one of {:?}, got {}",
                ROWS_PER_PAGE_OPTIONS, rows_per_page
            )));
        }
        let mut state = self.lock();
        state.rows_per_page = rows_per_page;
        state.page = 0;
        Ok(())
    }

    /// Deletes one row on the server and drops it locally without a refetch.
    /// Failures are logged and leave the list untouched.
    pub async fn delete(&self, id: &str) -> bool {
        match self.api.delete(self.descriptor, id).await {
            Ok(()) => {
                let mut state = self.lock();
                if state.remove_item(self.descriptor.id_field, id) {
                    state.total_items = state.total_items.map(|n| n.saturating_sub(1));
                }
                info!("Deleted {} {}", self.descriptor.name, id);
                true
            }
            Err(e) => {
                error!("Failed to delete {} {}: {}", self.descriptor.name, id, e);
                false
            }
        }
    }

    pub fn render(&self) -> TableView {
        let state = self.lock();
        let descriptor = self.descriptor;

        let rows = if state.loading {
            Vec::new()
        } else {
            state
                .visible()
                .into_iter()
                .map(|item| TableRow {
                    id: item.id(descriptor.id_field).unwrap_or_default(),
                    cells: descriptor
                        .columns
                        .iter()
                        .map(|c| item.display_value(c.key))
                        .collect(),
                })
                .collect()
        };

        TableView {
            title: descriptor.label.to_string(),
            columns: descriptor.columns.iter().map(|c| c.label.to_string()).collect(),
            rows,
            loading: state.loading,
            error: state.error.clone(),
            pagination: PaginationControl {
                count: state.count(descriptor.count_source),
                page: state.page,
                rows_per_page: state.rows_per_page,
                options: ROWS_PER_PAGE_OPTIONS.to_vec(),
            },
        }
    }
}

fn lock_state(state: &Mutex<ListState>) -> MutexGuard<'_, ListState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the view as loading. Returns `false` if a fetch is already running.
fn begin_fetch(state: &Mutex<ListState>, descriptor: &ResourceDescriptor) -> bool {
    let mut state = lock_state(state);
    if state.loading {
        debug!("{} fetch already in flight", descriptor.name);
        return false;
    }
    state.loading = true;
    true
}

/// Clears `loading` when a fetch ends, including when its future is dropped
/// mid-request (timeout, `select!`, aborted task).
struct LoadingGuard(Weak<Mutex<ListState>>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(state) = self.0.upgrade() {
            lock_state(&state).loading = false;
        }
    }
}

fn apply_fetch(state: &mut ListState, descriptor: &ResourceDescriptor, result: Result<ListPage, AppError>) {
    state.loading = false;
    match result {
        Ok(page) => {
            info!("Fetched {} {}", page.items.len(), descriptor.name);
            state.items = page.items;
            state.total_items = page.total_items;
            state.error = None;
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", descriptor.name, e);
            state.error = Some(format!("Failed to load {}: {}", descriptor.label, e.user_message()));
        }
    }
}
