use std::time::Duration;
use tracing::trace;

use crate::domain::{ERPConfig, ERPError, Message};
use crate::model::Model;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &ERPConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, ERPError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(Self::map_key(key, model.raw_keyevents()));
        }
        Ok(None)
    }

    /// Ctrl-C quits in every modus, other keys go raw to the search box while it is open.
    fn map_key(key: event::KeyEvent, raw: bool) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }
        if raw {
            return Some(Message::RawKey(key));
        }
        Self::handle_key(key)
    }

    fn handle_key(key: event::KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                _ => None,
            };
        }
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::PageDown => Some(Message::NextPage),
            KeyCode::PageUp => Some(Message::PrevPage),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(Message::LastPage),
            KeyCode::Tab => Some(Message::NextTab),
            KeyCode::BackTab => Some(Message::PrevTab),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|d| Message::SortColumn(d as usize - 1)),
            KeyCode::Char('/') => Some(Message::Search),
            KeyCode::Enter => Some(Message::Enter),
            KeyCode::Esc => Some(Message::Exit),
            KeyCode::Char('f') => Some(Message::ToggleFocus),
            KeyCode::Char('b') => Some(Message::ToggleSidebar),
            KeyCode::Char('a') => Some(Message::OpenModal),
            KeyCode::Char('r') => Some(Message::CycleRole),
            KeyCode::Char('y') => Some(Message::CopyRow),
            KeyCode::Char('x') => Some(Message::ResetTable),
            KeyCode::Char('?') => Some(Message::Help),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn map(code: KeyCode) -> Option<Message> {
        Controller::handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map(KeyCode::Char('j')), Some(Message::MoveDown));
        assert_eq!(map(KeyCode::Up), Some(Message::MoveUp));
        assert_eq!(map(KeyCode::PageDown), Some(Message::NextPage));
        assert_eq!(map(KeyCode::End), Some(Message::LastPage));
        assert_eq!(map(KeyCode::BackTab), Some(Message::PrevTab));
        assert_eq!(map(KeyCode::Esc), Some(Message::Exit));
    }

    #[test]
    fn digits_sort_by_zero_based_column() {
        assert_eq!(map(KeyCode::Char('1')), Some(Message::SortColumn(0)));
        assert_eq!(map(KeyCode::Char('9')), Some(Message::SortColumn(8)));
        assert_eq!(map(KeyCode::Char('0')), None);
    }

    #[test]
    fn actions_and_quit() {
        assert_eq!(map(KeyCode::Char('/')), Some(Message::Search));
        assert_eq!(map(KeyCode::Char('a')), Some(Message::OpenModal));
        assert_eq!(map(KeyCode::Char('q')), Some(Message::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Controller::handle_key(ctrl_c), Some(Message::Quit));
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(Controller::handle_key(ctrl_j), None);
        assert_eq!(map(KeyCode::Char('z')), None);
    }

    #[test]
    fn ctrl_c_quits_while_searching() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Controller::map_key(ctrl_c, true), Some(Message::Quit));
        assert_eq!(Controller::map_key(ctrl_c, false), Some(Message::Quit));

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(Controller::map_key(q, true), Some(Message::RawKey(q)));
        assert_eq!(Controller::map_key(q, false), Some(Message::Quit));
    }
}
