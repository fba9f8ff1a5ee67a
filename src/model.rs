use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::{debug, error, info, trace};

use crate::domain::{ERPConfig, ERPError, Message};
use crate::inputter::{InputResult, Inputter};
use crate::pages::{self, Page, PageContent, Role};
use crate::record::{Record, Value};
use crate::table::{DataTable, SortDirection};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modus {
    TABLE,
    SEARCH,
    MODAL,
    RECORD,
    POPUP,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    SIDEBAR,
    CONTENT,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarEntry {
    Page(Page),
    /// Sub entry of a collapsible section, opening the tab with the given index.
    Child(Page, usize),
}

#[derive(Debug)]
pub struct Sidebar {
    pub collapsed: bool,
    open_sections: Vec<Page>,
    pub curser: usize,
}

impl Sidebar {
    fn new(collapsed: bool) -> Self {
        Sidebar {
            collapsed,
            open_sections: Vec::new(),
            curser: 0,
        }
    }

    pub fn entries(&self) -> Vec<SidebarEntry> {
        let mut entries = Vec::new();
        for page in Page::ALL {
            entries.push(SidebarEntry::Page(page));
            if !self.collapsed && self.is_open(page) {
                for &(_, tab) in page.children() {
                    entries.push(SidebarEntry::Child(page, tab));
                }
            }
        }
        entries
    }

    pub fn is_open(&self, page: Page) -> bool {
        self.open_sections.contains(&page)
    }

    fn toggle_section(&mut self, page: Page) {
        if self.is_open(page) {
            self.open_sections.retain(|&p| p != page);
        } else {
            self.open_sections.push(page);
        }
    }

    fn selected(&self) -> Option<SidebarEntry> {
        self.entries().get(self.curser).copied()
    }

    fn select_page(&mut self, page: Page) {
        self.curser = self
            .entries()
            .iter()
            .position(|e| *e == SidebarEntry::Page(page))
            .unwrap_or(0);
    }
}

#[derive(Debug, Default)]
pub struct RecordView {
    /// Position of the record in the filtered and sorted table view.
    pub view_idx: usize,
    pub curser_row: usize,
}

pub struct Model {
    config: ERPConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    focus: Focus,
    page: Page,
    pages: Vec<PageContent>,
    active_tabs: Vec<usize>,
    curser_row: usize,
    sidebar: Sidebar,
    role: Role,
    record_view: RecordView,
    input: Inputter,
    last_input: InputResult,
    status_message: String,
    last_status_message_update: Instant,
    clipboard: Option<Clipboard>,
}

impl Model {
    pub fn init(config: &ERPConfig) -> Self {
        let pages = pages::build_all(config);
        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            focus: Focus::CONTENT,
            page: config.start_page,
            active_tabs: vec![0; pages.len()],
            pages,
            curser_row: 0,
            sidebar: Sidebar::new(config.sidebar_collapsed),
            role: config.role,
            record_view: RecordView::default(),
            input: Inputter::default(),
            last_input: InputResult::default(),
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            clipboard: None,
        };
        model.sidebar.select_page(model.page);
        model.set_status_message("Press ? for help");
        info!("Initialized model on page {:?} as {:?}", model.page, model.role);
        model
    }

    // ----------------------------- Accessors ------------------------------ //

    pub fn config(&self) -> &ERPConfig {
        &self.config
    }

    pub fn modus(&self) -> Modus {
        self.modus
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn content(&self) -> &PageContent {
        &self.pages[self.page.index()]
    }

    pub fn active_tab(&self) -> usize {
        self.active_tabs[self.page.index()]
    }

    pub fn table(&self) -> &DataTable {
        &self.content().tabs[self.active_tab()].table
    }

    fn table_mut(&mut self) -> &mut DataTable {
        let page_idx = self.page.index();
        let tab = self.active_tabs[page_idx];
        &mut self.pages[page_idx].tabs[tab].table
    }

    /// Selected row on the current table page.
    pub fn curser_row(&self) -> usize {
        self.curser_row
    }

    pub fn record_view(&self) -> &RecordView {
        &self.record_view
    }

    pub fn last_input(&self) -> &InputResult {
        &self.last_input
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn last_status_message_update(&self) -> Instant {
        self.last_status_message_update
    }

    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::SEARCH
    }

    /// Field name and display value of the record shown in the record view.
    pub fn record_fields(&self) -> Vec<(String, String)> {
        self.table()
            .view_record(self.record_view.view_idx)
            .map(|r| {
                r.fields()
                    .map(|(k, v)| (k.to_string(), Self::field_text(v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn field_text(value: &Value) -> String {
        match value {
            Value::List(items) => items
                .iter()
                .map(|item| {
                    item.fields()
                        .map(|(_, v)| v.to_string())
                        .collect::<Vec<String>>()
                        .join(" / ")
                })
                .collect::<Vec<String>>()
                .join("; "),
            v => v.to_string(),
        }
    }

    // ------------------------------ Update -------------------------------- //

    pub fn update(&mut self, message: Option<Message>) -> Result<(), ERPError> {
        let Some(msg) = message else {
            return Ok(());
        };
        trace!("Update {:?} in {:?}/{:?}", msg, self.modus, self.focus);

        match self.modus {
            Modus::TABLE => match msg {
                Message::Quit => self.quit(),
                Message::ToggleFocus => self.toggle_focus(),
                Message::ToggleSidebar => self.toggle_sidebar(),
                Message::OpenModal => self.open_modal(),
                Message::CycleRole => self.cycle_role(),
                Message::Help => self.show_help(),
                Message::NextTab => self.switch_tab(1),
                Message::PrevTab => self.switch_tab(-1),
                Message::NextPage => self.change_page(DataTable::next_page),
                Message::PrevPage => self.change_page(DataTable::prev_page),
                Message::FirstPage => self.change_page(DataTable::first_page),
                Message::LastPage => self.change_page(DataTable::last_page),
                Message::SortColumn(idx) => self.sort_column(idx),
                Message::Search => self.enter_search_mode(),
                Message::ResetTable => self.reset_table(),
                Message::CopyRow => self.copy_table_row(),
                msg => match self.focus {
                    Focus::SIDEBAR => self.update_sidebar(msg),
                    Focus::CONTENT => self.update_content(msg),
                },
            },
            Modus::SEARCH => match msg {
                Message::Quit => self.quit(),
                Message::RawKey(key) => self.raw_input(key),
                _ => {}
            },
            Modus::RECORD => match msg {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_record_selection_up(),
                Message::MoveDown => self.move_record_selection_down(),
                Message::MoveLeft => self.previous_record(),
                Message::MoveRight => self.next_record(),
                Message::CopyRow => self.copy_record_cell(),
                Message::Help => self.show_help(),
                Message::Enter | Message::Exit => self.exit_record_view(),
                _ => {}
            },
            Modus::MODAL => match msg {
                Message::Quit => self.quit(),
                Message::Enter => {
                    self.close_popup();
                    self.set_status_message("Sample data is read only, nothing was saved");
                }
                Message::Exit => self.close_popup(),
                _ => {}
            },
            Modus::POPUP => match msg {
                Message::Quit => self.quit(),
                Message::Enter | Message::Exit | Message::Help => self.close_popup(),
                _ => {}
            },
        }
        Ok(())
    }

    pub fn quit(&mut self) {
        info!("Quitting ...");
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
        debug!("Status: {}", self.status_message);
    }

    // ----------------------------- Navigation ----------------------------- //

    fn navigate(&mut self, page: Page, tab: Option<usize>) {
        self.page = page;
        let page_idx = page.index();
        if let Some(tab) = tab {
            let last = self.pages[page_idx].tabs.len().saturating_sub(1);
            self.active_tabs[page_idx] = tab.min(last);
        }
        self.curser_row = 0;
        self.clamp_curser();
        let title = self.content().title.clone();
        info!("Navigated to {:?} tab {}", self.content().page, self.active_tab());
        self.set_status_message(format!("Opened {title}"));
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::SIDEBAR => Focus::CONTENT,
            Focus::CONTENT => {
                self.sidebar.select_page(self.page);
                Focus::SIDEBAR
            }
        };
    }

    fn toggle_sidebar(&mut self) {
        self.sidebar.collapsed = !self.sidebar.collapsed;
        self.sidebar.select_page(self.page);
    }

    fn update_sidebar(&mut self, msg: Message) {
        let entries = self.sidebar.entries();
        match msg {
            Message::MoveUp => {
                self.sidebar.curser = self.sidebar.curser.saturating_sub(1);
            }
            Message::MoveDown => {
                if self.sidebar.curser + 1 < entries.len() {
                    self.sidebar.curser += 1;
                }
            }
            Message::MoveLeft => {
                if let Some(SidebarEntry::Page(page)) = self.sidebar.selected()
                    && self.sidebar.is_open(page)
                {
                    self.sidebar.toggle_section(page);
                }
            }
            Message::MoveRight | Message::Exit => self.focus = Focus::CONTENT,
            Message::Enter => self.activate_sidebar_entry(),
            _ => {}
        }
    }

    fn activate_sidebar_entry(&mut self) {
        match self.sidebar.selected() {
            Some(SidebarEntry::Page(page)) => {
                if !page.children().is_empty() && !self.sidebar.collapsed {
                    self.sidebar.toggle_section(page);
                    self.navigate(page, None);
                } else {
                    self.navigate(page, None);
                    self.focus = Focus::CONTENT;
                }
            }
            Some(SidebarEntry::Child(page, tab)) => {
                self.navigate(page, Some(tab));
                self.focus = Focus::CONTENT;
            }
            None => {}
        }
    }

    fn switch_tab(&mut self, step: isize) {
        let page_idx = self.page.index();
        let ntabs = self.pages[page_idx].tabs.len() as isize;
        if ntabs > 1 {
            let current = self.active_tabs[page_idx] as isize;
            self.active_tabs[page_idx] = (current + step).rem_euclid(ntabs) as usize;
            self.curser_row = 0;
            self.clamp_curser();
            let title = self.content().tabs[self.active_tab()].title.clone();
            self.set_status_message(format!("Showing {title}"));
        }
    }

    fn cycle_role(&mut self) {
        self.role = self.role.next();
        info!("Switched role to {:?}", self.role);
        self.set_status_message(format!("Switched role to {}", self.role.name()));
    }

    // ------------------------------- Table -------------------------------- //

    fn rows_on_page(&self) -> usize {
        self.table().page_indices().len()
    }

    fn clamp_curser(&mut self) {
        self.curser_row = std::cmp::min(self.curser_row, self.rows_on_page().saturating_sub(1));
    }

    fn update_content(&mut self, msg: Message) {
        match msg {
            Message::MoveUp => self.move_table_selection_up(),
            Message::MoveDown => self.move_table_selection_down(),
            Message::MoveLeft => self.change_page(DataTable::prev_page),
            Message::MoveRight => self.change_page(DataTable::next_page),
            Message::Enter => self.open_record_view(),
            Message::Exit => {
                if !self.table().state().search_text.is_empty() {
                    self.table_mut().set_search("");
                    self.clamp_curser();
                    self.set_status_message("Search cleared");
                }
            }
            _ => {}
        }
    }

    fn move_table_selection_up(&mut self) {
        if self.curser_row > 0 {
            self.curser_row -= 1;
        } else if self.table().current_page() > 1 {
            // Continue at the bottom of the previous page
            self.table_mut().prev_page();
            self.curser_row = self.rows_on_page().saturating_sub(1);
        }
    }

    fn move_table_selection_down(&mut self) {
        if self.curser_row + 1 < self.rows_on_page() {
            self.curser_row += 1;
        } else if self.table().current_page() < self.table().page_count() {
            self.table_mut().next_page();
            self.curser_row = 0;
        }
    }

    fn change_page(&mut self, action: fn(&mut DataTable)) {
        let before = self.table().current_page();
        action(self.table_mut());
        if self.table().current_page() != before {
            self.curser_row = 0;
        }
        self.clamp_curser();
    }

    fn sort_column(&mut self, column_idx: usize) {
        if self.table_mut().sort_by_column(column_idx) {
            let table = self.table();
            let header = table.columns()[column_idx].header.clone();
            let direction = match table.state().sort_direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            };
            self.clamp_curser();
            self.set_status_message(format!("Sorted by {header} {direction}"));
        } else {
            self.set_status_message(format!("Column {} is not sortable", column_idx + 1));
        }
    }

    fn reset_table(&mut self) {
        self.table_mut().reset();
        self.curser_row = 0;
        self.set_status_message("Table reset");
    }

    fn enter_search_mode(&mut self) {
        let Some(key) = self.table().get_search_key().map(str::to_string) else {
            self.set_status_message("This table can not be searched");
            return;
        };
        trace!("Entering search mode on {key} ...");
        self.previous_modus = self.modus;
        self.modus = Modus::SEARCH;
        let current = self.table().state().search_text.clone();
        self.input.set(&current);
        self.last_input = self.input.get();
        self.set_status_message(format!("Search by {key}, Enter to keep, Esc to clear"));
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        let term = self.last_input.input.clone();
        self.table_mut().set_search(&term);
        self.curser_row = 0;

        if self.last_input.finished {
            self.modus = self.previous_modus;
            self.previous_modus = Modus::SEARCH;
            if self.last_input.canceled {
                self.set_status_message("Search cleared");
            } else {
                let matches = self.table().filtered_len();
                if matches == 0 {
                    self.set_status_message("Found no matches!");
                } else {
                    self.set_status_message(format!("Found {matches} results"));
                }
            }
        }
    }

    // ----------------------------- Record view ---------------------------- //

    fn open_record_view(&mut self) {
        if self.rows_on_page() == 0 {
            return;
        }
        trace!("Building record view ...");
        self.record_view = RecordView {
            view_idx: self.table().page_offset() + self.curser_row,
            curser_row: 0,
        };
        self.previous_modus = self.modus;
        self.modus = Modus::RECORD;
    }

    fn exit_record_view(&mut self) {
        // Keep the table on the page of the record that was looked at last
        let view_idx = self.record_view.view_idx;
        let page_size = self.table().get_page_size();
        self.table_mut().set_page(view_idx / page_size + 1);
        self.curser_row = view_idx % page_size;
        self.clamp_curser();
        self.previous_modus = Modus::RECORD;
        self.modus = Modus::TABLE;
    }

    fn move_record_selection_up(&mut self) {
        self.record_view.curser_row = self.record_view.curser_row.saturating_sub(1);
    }

    fn move_record_selection_down(&mut self) {
        let nfields = self.record_fields().len();
        if self.record_view.curser_row + 1 < nfields {
            self.record_view.curser_row += 1;
        }
    }

    fn previous_record(&mut self) {
        self.record_view.view_idx = self.record_view.view_idx.saturating_sub(1);
        self.clamp_record_curser();
    }

    fn next_record(&mut self) {
        if self.record_view.view_idx + 1 < self.table().filtered_len() {
            self.record_view.view_idx += 1;
        }
        self.clamp_record_curser();
    }

    fn clamp_record_curser(&mut self) {
        let nfields = self.record_fields().len();
        self.record_view.curser_row = std::cmp::min(self.record_view.curser_row, nfields.saturating_sub(1));
    }

    // ------------------------------ Popups -------------------------------- //

    fn open_modal(&mut self) {
        if self.content().modal.is_some() {
            self.previous_modus = self.modus;
            self.modus = Modus::MODAL;
        } else {
            self.set_status_message("Nothing to add on this page");
        }
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        let closed = self.modus;
        self.modus = self.previous_modus;
        self.previous_modus = closed;
        // A popup opened from another popup has nothing sensible to fall back to
        if self.modus == closed {
            self.modus = Modus::TABLE;
        }
    }

    // ----------------------------- Clipboard ------------------------------ //

    /// Csv line of the rendered cells of `record`.
    pub fn row_as_csv(table: &DataTable, record: &Record) -> String {
        table
            .columns()
            .iter()
            .map(|c| Self::wrap_cell_content(&table.cell_text(record, c)))
            .collect::<Vec<String>>()
            .join(",")
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.contains('"');
        let needs_wrapping = needs_escaping || c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = c.to_string();

        if needs_escaping {
            out = out.replace('"', "\"\"");
        }
        if needs_wrapping {
            out = format!("\"{out}\"");
        }
        out
    }

    fn copy_table_row(&mut self) {
        let table = self.table();
        let Some(&idx) = table.page_indices().get(self.curser_row) else {
            return;
        };
        let content = Self::row_as_csv(table, &table.records()[idx]);
        self.copy_to_clipboard(content, "row");
    }

    fn copy_record_cell(&mut self) {
        let fields = self.record_fields();
        if let Some((_, value)) = fields.get(self.record_view.curser_row) {
            self.copy_to_clipboard(value.clone(), "cell");
        }
    }

    fn copy_to_clipboard(&mut self, content: String, what: &str) {
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    error!("Clipboard not available: {:?}", e);
                    self.set_status_message("Clipboard not available");
                    return;
                }
            }
        }
        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(content),
            None => return,
        };
        match result {
            Ok(_) => {
                trace!("Copied {what} content to clipboard.");
                self.set_status_message(format!("Copied {what} to clipboard"));
            }
            Err(e) => {
                error!("Error copying to clipboard: {:?}", e);
                self.set_status_message("Copy to clipboard failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn model_on(page: Page) -> Model {
        let config = ERPConfig {
            start_page: page,
            ..ERPConfig::default()
        };
        Model::init(&config)
    }

    fn send(model: &mut Model, msg: Message) {
        model.update(Some(msg)).unwrap();
    }

    fn type_search(model: &mut Model, s: &str) {
        for c in s.chars() {
            send(model, Message::RawKey(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
        }
    }

    fn key(model: &mut Model, code: KeyCode) {
        send(model, Message::RawKey(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn selected_name(model: &Model) -> String {
        let table = model.table();
        let idx = table.page_indices()[model.curser_row()];
        table.records()[idx].text("name")
    }

    #[test]
    fn starts_on_configured_page() {
        let model = model_on(Page::Hr);
        assert_eq!(model.page(), Page::Hr);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.table().filtered_len(), 8);
        assert_eq!(model.status, Status::READY);
    }

    #[test]
    fn quit_sets_status() {
        let mut model = model_on(Page::Dashboard);
        send(&mut model, Message::Quit);
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn no_message_changes_nothing() {
        let mut model = model_on(Page::Dashboard);
        model.update(None).unwrap();
        assert_eq!(model.modus(), Modus::TABLE);
    }

    #[test]
    fn live_search_filters_and_enter_keeps_it() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::Search);
        assert_eq!(model.modus(), Modus::SEARCH);
        assert!(model.raw_keyevents());
        type_search(&mut model, "SAR");
        assert_eq!(model.table().filtered_len(), 1);
        assert_eq!(model.last_input().input, "SAR");
        key(&mut model, KeyCode::Enter);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.table().state().search_text, "SAR");
        assert_eq!(selected_name(&model), "Sarah Johnson");
        assert_eq!(model.status_message(), "Found 1 results");
    }

    #[test]
    fn escape_in_search_restores_all_rows() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::Search);
        type_search(&mut model, "zzz");
        assert_eq!(model.table().filtered_len(), 0);
        key(&mut model, KeyCode::Esc);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.table().filtered_len(), 8);
    }

    #[test]
    fn quit_works_while_searching() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::Search);
        type_search(&mut model, "an");
        send(&mut model, Message::Quit);
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn copy_row_reports_clipboard_outcome() {
        // Headless runs have no clipboard, so either outcome is valid but the update must not fail
        let mut model = model_on(Page::Hr);
        assert!(model.update(Some(Message::CopyRow)).is_ok());
        assert!(
            [
                "Copied row to clipboard",
                "Clipboard not available",
                "Copy to clipboard failed"
            ]
            .contains(&model.status_message()),
            "unexpected status {:?}",
            model.status_message()
        );
        assert_eq!(model.modus(), Modus::TABLE);

        send(&mut model, Message::Enter);
        assert_eq!(model.modus(), Modus::RECORD);
        assert!(model.update(Some(Message::CopyRow)).is_ok());
        assert!(
            [
                "Copied cell to clipboard",
                "Clipboard not available",
                "Copy to clipboard failed"
            ]
            .contains(&model.status_message()),
            "unexpected status {:?}",
            model.status_message()
        );
        assert_eq!(model.modus(), Modus::RECORD);
    }

    #[test]
    fn exit_clears_a_kept_search() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::Search);
        type_search(&mut model, "an");
        key(&mut model, KeyCode::Enter);
        assert!(model.table().filtered_len() < 8);
        send(&mut model, Message::Exit);
        assert_eq!(model.table().filtered_len(), 8);
        assert_eq!(model.status_message(), "Search cleared");
    }

    #[test]
    fn tables_without_search_key_refuse_search() {
        let mut model = model_on(Page::Dashboard);
        send(&mut model, Message::Search);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.status_message(), "This table can not be searched");
    }

    #[test]
    fn sorting_by_column_number_toggles_direction() {
        let mut model = model_on(Page::Hr);
        // Salary is the fifth column
        send(&mut model, Message::SortColumn(4));
        assert_eq!(selected_name(&model), "Amanda Martinez");
        assert_eq!(model.status_message(), "Sorted by Salary ascending");
        send(&mut model, Message::SortColumn(4));
        assert_eq!(selected_name(&model), "Sarah Johnson");
        send(&mut model, Message::SortColumn(3));
        assert_eq!(model.status_message(), "Column 4 is not sortable");
    }

    #[test]
    fn moving_down_crosses_page_boundaries() {
        let config = ERPConfig {
            start_page: Page::Hr,
            page_size: Some(3),
            ..ERPConfig::default()
        };
        let mut model = Model::init(&config);
        assert_eq!(model.table().page_count(), 3);
        for _ in 0..3 {
            send(&mut model, Message::MoveDown);
        }
        assert_eq!(model.table().current_page(), 2);
        assert_eq!(model.curser_row(), 0);
        send(&mut model, Message::MoveUp);
        assert_eq!(model.table().current_page(), 1);
        assert_eq!(model.curser_row(), 2);
        send(&mut model, Message::LastPage);
        assert_eq!(model.table().current_page(), 3);
        send(&mut model, Message::MoveDown);
        send(&mut model, Message::MoveDown);
        assert_eq!(model.curser_row(), 1);
        send(&mut model, Message::NextPage);
        assert_eq!(model.table().current_page(), 3);
    }

    #[test]
    fn tabs_cycle_and_keep_their_state() {
        let mut model = model_on(Page::Inventory);
        send(&mut model, Message::SortColumn(0));
        send(&mut model, Message::NextTab);
        assert_eq!(model.active_tab(), 1);
        assert_eq!(model.table().filtered_len(), 2);
        send(&mut model, Message::PrevTab);
        send(&mut model, Message::PrevTab);
        assert_eq!(model.active_tab(), 2);
        send(&mut model, Message::NextTab);
        assert_eq!(model.active_tab(), 0);
        assert_eq!(model.table().state().sort_key.as_deref(), Some("name"));
    }

    #[test]
    fn record_view_walks_the_filtered_view() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::SortColumn(0));
        send(&mut model, Message::Enter);
        assert_eq!(model.modus(), Modus::RECORD);
        let fields = model.record_fields();
        assert!(fields.contains(&("name".to_string(), "Amanda Martinez".to_string())));
        send(&mut model, Message::MoveRight);
        send(&mut model, Message::MoveRight);
        assert_eq!(model.record_view().view_idx, 2);
        send(&mut model, Message::MoveDown);
        assert_eq!(model.record_view().curser_row, 1);
        send(&mut model, Message::Exit);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.curser_row(), 2);
        assert_eq!(selected_name(&model), "Emily Davis");
    }

    #[test]
    fn record_view_expands_nested_lists() {
        let mut model = model_on(Page::Ecommerce);
        send(&mut model, Message::MoveDown);
        send(&mut model, Message::Enter);
        let fields = model.record_fields();
        let products = fields.iter().find(|(k, _)| k == "products").unwrap();
        assert_eq!(products.1, "Smart Watch Pro / 1 / 249.99; Leather Wallet / 1 / 59.99");
    }

    #[test]
    fn sidebar_sections_expand_and_open_tabs() {
        let mut model = model_on(Page::Dashboard);
        send(&mut model, Message::ToggleFocus);
        assert_eq!(model.focus(), Focus::SIDEBAR);
        for _ in 0..4 {
            send(&mut model, Message::MoveDown);
        }
        send(&mut model, Message::Enter);
        assert_eq!(model.page(), Page::Ecommerce);
        assert!(model.sidebar().is_open(Page::Ecommerce));
        assert_eq!(model.sidebar().entries().len(), Page::ALL.len() + 3);
        // Customers child entry
        for _ in 0..3 {
            send(&mut model, Message::MoveDown);
        }
        send(&mut model, Message::Enter);
        assert_eq!(model.focus(), Focus::CONTENT);
        assert_eq!(model.active_tab(), 2);
        assert_eq!(model.content().tabs[2].title, "Customers");
    }

    #[test]
    fn collapsed_sidebar_hides_children() {
        let mut model = model_on(Page::Dashboard);
        send(&mut model, Message::ToggleFocus);
        for _ in 0..4 {
            send(&mut model, Message::MoveDown);
        }
        send(&mut model, Message::Enter);
        send(&mut model, Message::ToggleSidebar);
        assert!(model.sidebar().collapsed);
        assert_eq!(model.sidebar().entries().len(), Page::ALL.len());
        assert_eq!(model.sidebar().curser, Page::Ecommerce.index());
    }

    #[test]
    fn modal_opens_only_where_a_form_exists() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::OpenModal);
        assert_eq!(model.modus(), Modus::MODAL);
        send(&mut model, Message::MoveDown);
        assert_eq!(model.modus(), Modus::MODAL);
        send(&mut model, Message::Exit);
        assert_eq!(model.modus(), Modus::TABLE);

        let mut model = model_on(Page::Finance);
        send(&mut model, Message::OpenModal);
        assert_eq!(model.modus(), Modus::TABLE);
        assert_eq!(model.status_message(), "Nothing to add on this page");
    }

    #[test]
    fn help_returns_to_previous_modus() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::Enter);
        send(&mut model, Message::Help);
        assert_eq!(model.modus(), Modus::POPUP);
        send(&mut model, Message::Exit);
        assert_eq!(model.modus(), Modus::RECORD);
    }

    #[test]
    fn roles_cycle() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::CycleRole);
        assert_eq!(model.role(), Role::HrManager);
        assert_eq!(model.status_message(), "Switched role to HR Manager");
    }

    #[test]
    fn reset_table_restores_default_view() {
        let mut model = model_on(Page::Hr);
        send(&mut model, Message::SortColumn(0));
        send(&mut model, Message::MoveDown);
        send(&mut model, Message::ResetTable);
        assert_eq!(model.table().state().sort_key, None);
        assert_eq!(model.curser_row(), 0);
    }

    #[test]
    fn csv_rows_quote_cells_with_separators() {
        let model = model_on(Page::Ecommerce);
        let table = model.table();
        let line = Model::row_as_csv(table, &table.records()[1]);
        assert_eq!(line, "ORD-002,\"Emma Wilson\",\"2 item(s)\",$309.98,Paid,Shipped,2024-01-18");
        assert_eq!(Model::wrap_cell_content("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
