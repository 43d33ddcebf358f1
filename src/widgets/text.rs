//! Free-text input, single or multi-line, with a masked password variant
//!
//! Every edit writes the current text into the answer map. Gaining focus
//! selects all existing text, so the next keystroke replaces it wholesale,
//! matching how users expect pre-filled fields to behave.

use super::{Frame, InputWidget, Reaction, WidgetChrome};
use crate::answers::{Answers, Secret};
use crate::spec::MessagePosition;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use serde_json::Value;

const MASK_CHAR: char = '\u{2022}';

pub struct TextWidget {
    chrome: WidgetChrome,
    chars: Vec<char>,
    cursor: usize,
    /// Whole-value selection, armed on focus gain
    select_all: bool,
    masked: bool,
    rows: u16,
    focused: bool,
    answers: Answers,
}

impl TextWidget {
    pub fn plain(
        chrome: WidgetChrome,
        default: Option<String>,
        line_height: u16,
        answers: Answers,
    ) -> Self {
        // Height honors an explicit line count, else grows to fit a
        // multi-line default value.
        let default_lines = default
            .as_deref()
            .map(|text| text.lines().count().max(1))
            .unwrap_or(1);
        let rows = u16::try_from(default_lines)
            .unwrap_or(1)
            .max(line_height.max(1));

        let seeded = match &default {
            Some(text) => Value::String(text.clone()),
            None => Value::Null,
        };
        super::seed_answer(&answers, &chrome.name, seeded);

        Self::build(chrome, default, false, rows, answers)
    }

    pub fn password(chrome: WidgetChrome, default: Option<String>, answers: Answers) -> Self {
        super::seed_secret(&answers, &chrome.name, default.as_deref());
        Self::build(chrome, default, true, 1, answers)
    }

    fn build(
        chrome: WidgetChrome,
        default: Option<String>,
        masked: bool,
        rows: u16,
        answers: Answers,
    ) -> Self {
        let chars: Vec<char> = default.unwrap_or_default().chars().collect();
        let cursor = chars.len();
        Self {
            chrome,
            chars,
            cursor,
            select_all: false,
            masked,
            rows,
            focused: false,
            answers,
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn multiline(&self) -> bool {
        self.rows > 1
    }

    fn write_answer(&self) {
        let value = if self.masked {
            Secret::new(self.text()).into_value()
        } else {
            Value::String(self.text())
        };
        self.answers.borrow_mut().set(self.chrome.name.clone(), value);
    }

    /// Drop the whole-value selection, optionally deleting its contents
    fn resolve_selection(&mut self, delete: bool) {
        if self.select_all && delete {
            self.chars.clear();
            self.cursor = 0;
        }
        self.select_all = false;
    }

    fn insert(&mut self, c: char) {
        self.resolve_selection(true);
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
        self.write_answer();
    }

    fn display_line(&self, theme: &Theme) -> Line<'static> {
        let style = self.chrome.text_style(theme);
        let rendered: String = if self.masked {
            std::iter::repeat(MASK_CHAR).take(self.chars.len()).collect()
        } else {
            self.text()
        };

        if !self.focused {
            return Line::from(Span::styled(rendered, style));
        }
        if self.select_all {
            return Line::from(Span::styled(
                rendered,
                style.bg(theme.selection).add_modifier(Modifier::REVERSED),
            ));
        }

        // Cursor shown by reversing the character under it.
        let chars: Vec<char> = rendered.chars().collect();
        let before: String = chars[..self.cursor].iter().collect();
        let at: String = chars
            .get(self.cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars
            .get(self.cursor + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(before, style),
            Span::styled(at, style.add_modifier(Modifier::REVERSED)),
            Span::styled(after, style),
        ])
    }
}

impl InputWidget for TextWidget {
    fn name(&self) -> &str {
        &self.chrome.name
    }

    fn focusable(&self) -> bool {
        !self.chrome.read_only
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
        if !focus {
            self.select_all = false;
        }
    }

    fn on_focus(&mut self) {
        self.select_all = !self.chars.is_empty();
        self.cursor = self.chars.len();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Reaction {
        if self.chrome.read_only {
            return Reaction::ignored();
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                Reaction::consumed()
            }
            KeyCode::Enter if self.multiline() => {
                self.insert('\n');
                Reaction::consumed()
            }
            KeyCode::Backspace => {
                if self.select_all {
                    self.resolve_selection(true);
                    self.write_answer();
                } else if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                    self.write_answer();
                }
                Reaction::consumed()
            }
            KeyCode::Delete => {
                if self.select_all {
                    self.resolve_selection(true);
                    self.write_answer();
                } else if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                    self.write_answer();
                }
                Reaction::consumed()
            }
            KeyCode::Left => {
                self.resolve_selection(false);
                self.cursor = self.cursor.saturating_sub(1);
                Reaction::consumed()
            }
            KeyCode::Right => {
                self.resolve_selection(false);
                self.cursor = (self.cursor + 1).min(self.chars.len());
                Reaction::consumed()
            }
            KeyCode::Home => {
                self.resolve_selection(false);
                self.cursor = 0;
                Reaction::consumed()
            }
            KeyCode::End => {
                self.resolve_selection(false);
                self.cursor = self.chars.len();
                Reaction::consumed()
            }
            _ => Reaction::ignored(),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let mut body = area;
        if let Some(label) = &self.chrome.label {
            let label_style = Style::default().fg(theme.text);
            match self.chrome.label_position {
                MessagePosition::Top => {
                    frame.render_widget(
                        Paragraph::new(label.clone()).style(label_style),
                        Rect { height: 1, ..area },
                    );
                    body.y = body.y.saturating_add(1);
                    body.height = body.height.saturating_sub(1);
                }
                MessagePosition::Left => {
                    let cols = self.chrome.label_cols().min(area.width);
                    frame.render_widget(
                        Paragraph::new(format!("{} ", label)).style(label_style),
                        Rect { width: cols, ..area },
                    );
                    body.x = body.x.saturating_add(cols);
                    body.width = body.width.saturating_sub(cols);
                }
            }
        }

        let base = Style::default().bg(theme.selection);
        let field = if self.multiline() && !self.focused {
            Paragraph::new(self.text()).style(self.chrome.text_style(theme).bg(theme.selection))
        } else {
            Paragraph::new(self.display_line(theme)).style(base)
        };
        frame.render_widget(field.alignment(self.chrome.rat_alignment()), body);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.label_rows() + self.rows
    }

    fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn set_text(&mut self, text: String) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
        self.select_all = false;
        self.write_answer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;

    fn chrome(name: &str) -> WidgetChrome {
        WidgetChrome::from_prompt(&Prompt::text(name), 0, &FontSpec::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_every_edit_writes_through() {
        let answers = shared(AnswerMap::new());
        let mut widget = TextWidget::plain(chrome("city"), None, 1, answers.clone());

        widget.handle_key(key(KeyCode::Char('O')));
        widget.handle_key(key(KeyCode::Char('s')));
        assert_eq!(answers.borrow().string("city"), Some("Os"));

        widget.handle_key(key(KeyCode::Backspace));
        assert_eq!(answers.borrow().string("city"), Some("O"));
    }

    #[test]
    fn test_focus_selects_all_and_next_char_replaces() {
        let answers = shared(AnswerMap::new());
        let mut widget =
            TextWidget::plain(chrome("city"), Some("Oslo".into()), 1, answers.clone());

        widget.set_focus(true);
        widget.on_focus();
        widget.handle_key(key(KeyCode::Char('B')));
        assert_eq!(answers.borrow().string("city"), Some("B"));
    }

    #[test]
    fn test_password_writes_opaque_values() {
        let answers = shared(AnswerMap::new());
        let mut widget = TextWidget::password(chrome("pw"), None, answers.clone());

        widget.handle_key(key(KeyCode::Char('x')));
        let map = answers.borrow();
        assert_eq!(map.string("pw"), None);
        assert_eq!(map.secret("pw").unwrap().reveal(), "x");
    }

    #[test]
    fn test_multiline_consumes_enter() {
        let answers = shared(AnswerMap::new());
        let mut widget = TextWidget::plain(chrome("notes"), None, 3, answers.clone());
        assert!(widget.handle_key(key(KeyCode::Enter)).consumed);
        widget.handle_key(key(KeyCode::Char('a')));
        assert_eq!(answers.borrow().string("notes"), Some("\na"));

        let mut single = TextWidget::plain(chrome("one"), None, 1, answers);
        assert!(!single.handle_key(key(KeyCode::Enter)).consumed);
    }

    #[test]
    fn test_height_follows_default_line_count() {
        let answers = shared(AnswerMap::new());
        let widget =
            TextWidget::plain(chrome("notes"), Some("a\nb\nc".into()), 1, answers);
        assert_eq!(widget.desired_height(40), 3);
    }

    #[test]
    fn test_read_only_ignores_keys() {
        let answers = shared(AnswerMap::new());
        let mut chrome = chrome("locked");
        chrome.read_only = true;
        let mut widget = TextWidget::plain(chrome, Some("v".into()), 1, answers.clone());
        assert!(!widget.handle_key(key(KeyCode::Char('x'))).consumed);
        assert_eq!(answers.borrow().string("locked"), Some("v"));
    }
}
