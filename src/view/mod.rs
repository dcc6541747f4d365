pub mod list;
pub mod state;
pub mod table;

pub use list::ResourceListView;
pub use state::{DEFAULT_ROWS_PER_PAGE, ListState, ROWS_PER_PAGE_OPTIONS, filter_items, page_slice};
pub use table::{PaginationControl, TableRow, TableView};
