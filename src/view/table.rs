use std::fmt;

use serde::Serialize;

/// Everything a list view shows at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: PaginationControl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationControl {
    pub count: usize,
    pub page: usize,
    pub rows_per_page: usize,
    pub options: Vec<usize>,
}

impl PaginationControl {
    /// `from-to of count`, 1-based and inclusive.
    pub fn range_label(&self) -> String {
        let from = self.page.saturating_mul(self.rows_per_page);
        let to = from.saturating_add(self.rows_per_page).min(self.count);
        if self.count == 0 || from >= self.count {
            return format!("0-0 of {}", self.count);
        }
        format!("{}-{} of {}", from + 1, to, self.count)
    }
}

const MAX_CELL_WIDTH: usize = 40;

fn clip(cell: &str) -> String {
    let single_line = cell.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_CELL_WIDTH {
        return single_line;
    }
    let mut clipped: String = single_line.chars().take(MAX_CELL_WIDTH - 3).collect();
    clipped.push_str("...");
    clipped
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| clip(c)).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        writeln!(f, "{}", header.join(" | ").trim_end())?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;

        if self.loading {
            writeln!(f, "Loading...")?;
        } else {
            for row in &rows {
                let line: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| format!("{:<w$}", c, w = *w))
                    .collect();
                writeln!(f, "{}", line.join(" | ").trim_end())?;
            }
        }

        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }

        write!(
            f,
            "Rows per page: {}  {}",
            self.pagination.rows_per_page,
            self.pagination.range_label()
        )
    }
}
