use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use ratatui::crossterm::event::KeyEvent;

use crate::pages::{Page, Role};

#[derive(Debug)]
pub enum ERPError {
    IoError(Error),
    InvalidArgument(String),
    LoggingFailed(String),
}

impl fmt::Display for ERPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ERPError::IoError(e) => write!(f, "io error: {e}"),
            ERPError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            ERPError::LoggingFailed(msg) => write!(f, "could not set up logging: {msg}"),
        }
    }
}

impl std::error::Error for ERPError {}

impl From<Error> for ERPError {
    fn from(err: Error) -> Self {
        ERPError::IoError(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ERPConfig {
    pub event_poll_time: u64,
    /// Overrides the page size of every table.
    pub page_size: Option<usize>,
    pub start_page: Page,
    pub role: Role,
    pub sidebar_collapsed: bool,
    /// Reference date for overdue tasks.
    pub today: NaiveDate,
    pub max_column_width: usize,
    pub log_file: PathBuf,
}

pub const DEFAULT_TODAY: &str = "2024-01-26";

impl Default for ERPConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            page_size: None,
            start_page: Page::Dashboard,
            role: Role::SuperAdmin,
            sidebar_collapsed: false,
            today: NaiveDate::from_ymd_opt(2024, 1, 26).unwrap_or_default(),
            max_column_width: 32,
            log_file: PathBuf::from(".erp-pro.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    NextTab,
    PrevTab,
    SortColumn(usize),
    Search,
    RawKey(KeyEvent),
    Enter,
    Exit,
    ToggleFocus,
    ToggleSidebar,
    OpenModal,
    CycleRole,
    CopyRow,
    ResetTable,
    Help,
}

pub const HELP_TEXT: &str = "\
Navigation
  f            switch focus between sidebar and content
  up/down j/k  move selection
  left/right   previous/next page, h/l (previous/next record in record view)
  PgUp/PgDn    previous/next page
  Home/End     first/last page, g/G
  Tab/S-Tab    next/previous table tab
  Enter        open record / activate sidebar entry
  Esc          back, clears an active search
  b            collapse or expand the sidebar

Table
  /            search the table
  1-9          sort by column, again to flip direction
  x            reset search, sort and page
  y            copy the current row as csv

Other
  a            open the add form of the page
  r            switch role
  ?            this help
  q, Ctrl-c    quit";
