use std::cmp::Ordering;
use std::sync::Arc;

use derive_setters::Setters;
use tracing::trace;

use crate::badge;
use crate::record::{Record, Value};

/// Formats one cell of a record. Columns without a renderer show the raw field value.
pub type CellRenderer = fn(&Record) -> String;

#[derive(Debug, Clone, Setters)]
#[setters(strip_option)]
pub struct ColumnDescriptor {
    #[setters(skip)]
    pub key: String,
    #[setters(skip)]
    pub header: String,
    pub render: Option<CellRenderer>,
    pub sortable: bool,
    /// Colour the cell with the status badge of the raw value.
    pub badge: bool,
}

impl ColumnDescriptor {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            render: None,
            sortable: false,
            badge: false,
        }
    }

    /// A status column, rendered as a badge label.
    pub fn status(key: &str, header: &str) -> Self {
        Self::new(key, header).badge(true)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search_text: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
        }
    }
}

/// Searchable, sortable and paginated view over a fixed sequence of records.
///
/// The records are never touched. Every state change recomputes `rows`, the mapping
/// of view position to record index, from scratch.
#[derive(Debug, Clone)]
pub struct DataTable {
    records: Arc<Vec<Record>>,
    columns: Vec<ColumnDescriptor>,
    search_key: Option<String>,
    page_size: usize,
    state: ViewState,
    rows: Vec<usize>,
}

impl DataTable {
    pub fn new(records: Vec<Record>, columns: Vec<ColumnDescriptor>) -> Self {
        let rows = (0..records.len()).collect();
        Self {
            records: Arc::new(records),
            columns,
            search_key: None,
            page_size: 10,
            state: ViewState::default(),
            rows,
        }
    }

    pub fn search_key(mut self, key: &str) -> Self {
        self.search_key = Some(key.to_string());
        self.update_rows();
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self.update_rows();
        self
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.update_rows();
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get_search_key(&self) -> Option<&str> {
        self.search_key.as_deref()
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = ViewState::default();
        self.update_rows();
    }

    pub fn set_search(&mut self, text: &str) {
        if self.state.search_text != text {
            self.state.search_text = text.to_string();
            self.state.current_page = 1;
            self.update_rows();
        }
    }

    /// Sorts by `key`. The same key again flips the direction, a new key starts ascending.
    /// Unknown and non sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
        if !sortable {
            trace!("Ignoring sort request for column {key}");
            return false;
        }
        if self.state.sort_key.as_deref() == Some(key) {
            self.state.sort_direction = self.state.sort_direction.flip();
        } else {
            self.state.sort_key = Some(key.to_string());
            self.state.sort_direction = SortDirection::Ascending;
        }
        self.update_rows();
        true
    }

    pub fn sort_by_column(&mut self, column_idx: usize) -> bool {
        match self.columns.get(column_idx) {
            Some(column) => {
                let key = column.key.clone();
                self.toggle_sort(&key)
            }
            None => false,
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.current_page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.current_page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.page_count());
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn view_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn filtered_len(&self) -> usize {
        self.rows.len()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    fn page_bounds(&self) -> (usize, usize) {
        let begin = (self.state.current_page - 1) * self.page_size;
        let end = std::cmp::min(begin + self.page_size, self.rows.len());
        (begin.min(end), end)
    }

    /// Record indices on the current page.
    pub fn page_indices(&self) -> &[usize] {
        let (begin, end) = self.page_bounds();
        &self.rows[begin..end]
    }

    pub fn page_rows(&self) -> Vec<&Record> {
        self.page_indices()
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    /// Record at a position of the filtered and sorted view.
    pub fn view_record(&self, view_idx: usize) -> Option<&Record> {
        self.view_indices().get(view_idx).map(|&idx| &self.records[idx])
    }

    /// Position in the view of the first row of the current page.
    pub fn page_offset(&self) -> usize {
        self.page_bounds().0
    }

    /// 1-based first and last row shown, and the filtered total.
    pub fn page_range(&self) -> (usize, usize, usize) {
        let (begin, end) = self.page_bounds();
        if begin == end {
            (0, 0, self.rows.len())
        } else {
            (begin + 1, end, self.rows.len())
        }
    }

    pub fn cell_text(&self, record: &Record, column: &ColumnDescriptor) -> String {
        match column.render {
            Some(render) => render(record),
            None if column.badge => badge::badge(&record.text(&column.key)).label,
            None => record.text(&column.key),
        }
    }

    pub fn header_text(&self, column: &ColumnDescriptor) -> String {
        if self.state.sort_key.as_deref() == Some(column.key.as_str()) {
            let marker = match self.state.sort_direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {}", column.header, marker)
        } else {
            column.header.clone()
        }
    }

    fn matches_search(&self, record: &Record) -> bool {
        match &self.search_key {
            Some(key) if !self.state.search_text.is_empty() => record
                .text(key)
                .to_lowercase()
                .contains(&self.state.search_text.to_lowercase()),
            _ => true,
        }
    }

    fn update_rows(&mut self) {
        let mut rows: Vec<usize> = (0..self.records.len())
            .filter(|&idx| self.matches_search(&self.records[idx]))
            .collect();

        if let Some(key) = &self.state.sort_key {
            let direction = self.state.sort_direction;
            // sort_by is stable, equal keys keep their original order in both directions
            rows.sort_by(|&a, &b| {
                let ord = compare_values(self.records[a].get(key), self.records[b].get(key));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        trace!(
            "Table view: {} of {} records, sort {:?} {:?}, search \"{}\"",
            rows.len(),
            self.records.len(),
            self.state.sort_key,
            self.state.sort_direction,
            self.state.search_text
        );
        self.rows = rows;
        self.state.current_page = self.state.current_page.clamp(1, self.page_count());
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Number(_)) => 0,
        Some(Value::Text(_)) | Some(Value::List(_)) => 1,
        Some(Value::Empty) | None => 2,
    }
}

/// Numbers before text, missing values last. Numbers compare numerically, the rest as strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(x @ (Value::Text(_) | Value::List(_))), Some(y @ (Value::Text(_) | Value::List(_)))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
