use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};
use tracing::trace;

/// Single line editor backing the search box. Cursor positions count characters.
#[derive(Default)]
pub struct Inputter {
    current_input: String,
    curser_pos: usize,
    finished: bool,
    canceled: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputResult {
    pub input: String,
    pub finished: bool,
    pub canceled: bool,
    pub curser_pos: usize,
}

impl Inputter {
    pub fn read(&mut self, key: event::KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Enter => self.enter(),
            KeyCode::Esc => self.escape(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            kc => self.key(kc, key.modifiers),
        }
    }

    /// Starts a new edit with `s` as content and the cursor at its end.
    pub fn set(&mut self, s: &str) {
        self.clear();
        self.current_input = s.to_string();
        self.curser_pos = s.chars().count();
    }

    pub fn get(&self) -> InputResult {
        InputResult {
            canceled: self.canceled,
            finished: self.finished,
            input: self.current_input.clone(),
            curser_pos: self.curser_pos,
        }
    }

    pub fn clear(&mut self) {
        self.canceled = false;
        self.finished = false;
        self.current_input.clear();
        self.curser_pos = 0;
    }

    fn enter(&mut self) -> InputResult {
        self.finished = true;
        self.get()
    }

    fn escape(&mut self) -> InputResult {
        self.clear();
        self.canceled = true;
        self.finished = true;
        self.get()
    }

    fn backspace(&mut self) -> InputResult {
        if self.curser_pos > 0 {
            self.curser_pos -= 1;
            let idx = self.byte_pos();
            self.current_input.remove(idx);
        }
        self.get()
    }

    fn delete(&mut self) -> InputResult {
        if self.curser_pos < self.len() {
            let idx = self.byte_pos();
            self.current_input.remove(idx);
        }
        self.get()
    }

    fn left(&mut self) -> InputResult {
        self.curser_pos = self.curser_pos.saturating_sub(1);
        self.get()
    }

    fn right(&mut self) -> InputResult {
        if self.curser_pos < self.len() {
            self.curser_pos += 1;
        }
        self.get()
    }

    fn home(&mut self) -> InputResult {
        self.curser_pos = 0;
        self.get()
    }

    fn end(&mut self) -> InputResult {
        self.curser_pos = self.len();
        self.get()
    }

    fn key(&mut self, code: KeyCode, modifier: KeyModifiers) -> InputResult {
        if modifier.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            trace!("Ignoring {code:?} with {modifier:?} in input");
            return self.get();
        }
        if let Some(chr) = code.as_char() {
            let idx = self.byte_pos();
            self.current_input.insert(idx, chr);
            self.curser_pos += 1;
        }
        self.get()
    }

    fn len(&self) -> usize {
        self.current_input.chars().count()
    }

    fn byte_pos(&self) -> usize {
        self.current_input
            .char_indices()
            .nth(self.curser_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.current_input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn press(input: &mut Inputter, code: KeyCode) -> InputResult {
        input.read(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(input: &mut Inputter, s: &str) -> InputResult {
        let mut result = input.get();
        for c in s.chars() {
            result = press(input, KeyCode::Char(c));
        }
        result
    }

    #[test]
    fn typing_and_finishing() {
        let mut input = Inputter::default();
        let r = type_str(&mut input, "sarah");
        assert_eq!(r.input, "sarah");
        assert_eq!(r.curser_pos, 5);
        assert!(!r.finished);
        let r = press(&mut input, KeyCode::Enter);
        assert!(r.finished);
        assert!(!r.canceled);
        assert_eq!(r.input, "sarah");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = Inputter::default();
        type_str(&mut input, "bb");
        press(&mut input, KeyCode::Left);
        let r = press(&mut input, KeyCode::Char('o'));
        assert_eq!(r.input, "bob");
        assert_eq!(r.curser_pos, 2);
        let r = press(&mut input, KeyCode::Backspace);
        assert_eq!(r.input, "bb");
        press(&mut input, KeyCode::Home);
        let r = press(&mut input, KeyCode::Delete);
        assert_eq!(r.input, "b");
        assert_eq!(r.curser_pos, 0);
    }

    #[test]
    fn multibyte_characters() {
        let mut input = Inputter::default();
        type_str(&mut input, "zoë");
        let r = press(&mut input, KeyCode::Backspace);
        assert_eq!(r.input, "zo");
        press(&mut input, KeyCode::Left);
        let r = press(&mut input, KeyCode::Char('é'));
        assert_eq!(r.input, "zéo");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = Inputter::default();
        press(&mut input, KeyCode::Left);
        let r = press(&mut input, KeyCode::Backspace);
        assert_eq!(r.curser_pos, 0);
        type_str(&mut input, "ab");
        let r = press(&mut input, KeyCode::Right);
        assert_eq!(r.curser_pos, 2);
    }

    #[test]
    fn escape_cancels_and_clears() {
        let mut input = Inputter::default();
        input.set("widget");
        assert_eq!(input.get().curser_pos, 6);
        let r = press(&mut input, KeyCode::Esc);
        assert!(r.finished);
        assert!(r.canceled);
        assert!(r.input.is_empty());
    }

    #[test]
    fn control_chords_are_not_inserted() {
        let mut input = Inputter::default();
        let r = input.read(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(r.input.is_empty());
        let r = input.read(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT));
        assert_eq!(r.input, "B");
    }
}
