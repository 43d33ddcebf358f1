//! Checkbox widget
//!
//! A single toggle labelled with the prompt message. Toggling writes a
//! boolean into the answer map.

use super::{Frame, InputWidget, Reaction, WidgetChrome};
use crate::answers::Answers;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::Paragraph;
use serde_json::Value;

pub struct CheckboxWidget {
    chrome: WidgetChrome,
    checked: bool,
    focused: bool,
    answers: Answers,
}

impl CheckboxWidget {
    pub fn new(chrome: WidgetChrome, default: Option<Value>, answers: Answers) -> Self {
        let checked = default.as_ref().and_then(Value::as_bool).unwrap_or(false);
        super::seed_answer(&answers, &chrome.name, Value::Bool(checked));
        Self {
            chrome,
            checked,
            focused: false,
            answers,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    fn toggle(&mut self) {
        self.checked = !self.checked;
        self.answers
            .borrow_mut()
            .set(self.chrome.name.clone(), Value::Bool(self.checked));
    }
}

impl InputWidget for CheckboxWidget {
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
    }

    fn handle_key(&mut self, key: KeyEvent) -> Reaction {
        if self.chrome.read_only {
            return Reaction::ignored();
        }
        match key.code {
            KeyCode::Char(' ') => {
                self.toggle();
                Reaction::consumed()
            }
            _ => Reaction::ignored(),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let mark = if self.checked { "[x] " } else { "[ ] " };
        let label = self.chrome.label.as_deref().unwrap_or("");
        let mut style = self.chrome.text_style(theme);
        if self.focused {
            style = style.bg(theme.selection).add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(format!("{}{}", mark, label)).style(style),
            area,
        );
    }

    fn desired_height(&self, _width: u16) -> u16 {
        1
    }

    fn is_empty(&self) -> bool {
        !self.checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;
    use serde_json::json;

    fn chrome() -> WidgetChrome {
        let prompt = Prompt::checkbox("notify").message("Notify me");
        WidgetChrome::from_prompt(&prompt, 0, &FontSpec::default())
    }

    #[test]
    fn test_toggle_writes_boolean() {
        let answers = shared(AnswerMap::new());
        let mut widget = CheckboxWidget::new(chrome(), None, answers.clone());
        assert_eq!(answers.borrow().boolean("notify"), Some(false));

        widget.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert_eq!(answers.borrow().boolean("notify"), Some(true));

        widget.handle_key(KeyEvent::from(KeyCode::Char(' ')));
        assert_eq!(answers.borrow().boolean("notify"), Some(false));
    }

    #[test]
    fn test_truthy_default_seeds_checked() {
        let answers = shared(AnswerMap::new());
        let widget = CheckboxWidget::new(chrome(), Some(json!(true)), answers.clone());
        assert!(widget.is_checked());
        assert_eq!(answers.borrow().boolean("notify"), Some(true));
    }
}
