//! Fixed choice sets: combo and radio presentation
//!
//! Both widgets write the selected label string into the answer map. The
//! radio variant additionally owns an exclusivity scope: checking an
//! option reports the scope so the session can clear same-scope siblings,
//! and explicitly unchecking the checked option clears the answer entry
//! back to null when its label matches the current value.

use super::{Effect, Frame, InputWidget, Reaction, WidgetChrome};
use crate::answers::Answers;
use crate::spec::MessagePosition;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use serde_json::Value;

/// Single-select dropdown over a fixed label set
pub struct ComboWidget {
    chrome: WidgetChrome,
    choices: Vec<String>,
    /// Index of the committed selection, if any
    selected: Option<usize>,
    focused: bool,
    answers: Answers,
}

impl ComboWidget {
    pub fn new(
        chrome: WidgetChrome,
        choices: Vec<String>,
        default: Option<Value>,
        answers: Answers,
    ) -> Self {
        let selected = default
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|label| choices.iter().position(|choice| choice == label));
        let seeded = match selected {
            Some(index) => Value::String(choices[index].clone()),
            None => default.unwrap_or(Value::Null),
        };
        super::seed_answer(&answers, &chrome.name, seeded);
        Self {
            chrome,
            choices,
            selected,
            focused: false,
            answers,
        }
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.map(|index| self.choices[index].as_str())
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.answers.borrow_mut().set(
            self.chrome.name.clone(),
            Value::String(self.choices[index].clone()),
        );
    }

    fn step(&mut self, delta: isize) {
        if self.choices.is_empty() {
            return;
        }
        let next = match self.selected {
            None => 0,
            Some(current) if delta < 0 => current.saturating_sub(1),
            Some(current) => (current + 1).min(self.choices.len() - 1),
        };
        self.select(next);
    }
}

impl InputWidget for ComboWidget {
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
            KeyCode::Up | KeyCode::Left => {
                self.step(-1);
                Reaction::consumed()
            }
            KeyCode::Down | KeyCode::Right => {
                self.step(1);
                Reaction::consumed()
            }
            _ => Reaction::ignored(),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let mut body = area;
        if let Some(label) = &self.chrome.label {
            if self.chrome.label_position == MessagePosition::Top {
                frame.render_widget(
                    Paragraph::new(label.clone()).style(Style::default().fg(theme.text)),
                    Rect { height: 1, ..area },
                );
                body.y += 1;
                body.height = body.height.saturating_sub(1);
            } else {
                let cols = self.chrome.label_cols().min(area.width);
                frame.render_widget(
                    Paragraph::new(format!("{} ", label))
                        .style(Style::default().fg(theme.text)),
                    Rect { width: cols, ..area },
                );
                body.x += cols;
                body.width = body.width.saturating_sub(cols);
            }
        }

        let value = self.selected_label().unwrap_or("");
        let style = if self.focused {
            self.chrome.text_style(theme).add_modifier(Modifier::BOLD)
        } else {
            self.chrome.text_style(theme)
        };
        let marker_style = Style::default().fg(if self.focused {
            theme.border_focus
        } else {
            theme.text_muted
        });
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("\u{25c2} ", marker_style),
                Span::styled(value.to_string(), style),
                Span::styled(" \u{25b8}", marker_style),
            ]))
            .style(Style::default().bg(theme.selection)),
            body,
        );
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.label_rows() + 1
    }

    fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

/// Exclusive toggle set over a fixed label set
pub struct RadioWidget {
    chrome: WidgetChrome,
    choices: Vec<String>,
    /// Option currently carrying the check mark
    checked: Option<usize>,
    /// Option under the highlight cursor
    highlighted: usize,
    scope: String,
    focused: bool,
    answers: Answers,
}

impl RadioWidget {
    pub fn new(
        chrome: WidgetChrome,
        choices: Vec<String>,
        default: Option<Value>,
        scope: String,
        answers: Answers,
    ) -> Self {
        let checked = default
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|label| choices.iter().position(|choice| choice == label));
        let seeded = match checked {
            Some(index) => Value::String(choices[index].clone()),
            None => default.unwrap_or(Value::Null),
        };
        super::seed_answer(&answers, &chrome.name, seeded);
        Self {
            chrome,
            choices,
            checked,
            highlighted: checked.unwrap_or(0),
            scope,
            focused: false,
            answers,
        }
    }

    pub fn checked_label(&self) -> Option<&str> {
        self.checked.map(|index| self.choices[index].as_str())
    }

    /// Toggle the highlighted option
    ///
    /// Checking writes the label and reports the scope; unchecking clears
    /// the answer to null only when the label still matches the current
    /// value (it always does unless a sibling overwrote it).
    fn toggle(&mut self) -> Reaction {
        if self.choices.is_empty() {
            return Reaction::consumed();
        }
        if self.checked == Some(self.highlighted) {
            let label = self.choices[self.highlighted].clone();
            self.checked = None;
            let mut answers = self.answers.borrow_mut();
            let matches = answers
                .string(&self.chrome.name)
                .is_some_and(|current| current == label);
            if matches {
                answers.set(self.chrome.name.clone(), Value::Null);
            }
            return Reaction::consumed();
        }

        self.checked = Some(self.highlighted);
        self.answers.borrow_mut().set(
            self.chrome.name.clone(),
            Value::String(self.choices[self.highlighted].clone()),
        );
        Reaction::with_effect(Effect::RadioChecked {
            scope: self.scope.clone(),
        })
    }
}

impl InputWidget for RadioWidget {
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
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Reaction::consumed()
            }
            KeyCode::Down => {
                if self.highlighted + 1 < self.choices.len() {
                    self.highlighted += 1;
                }
                Reaction::consumed()
            }
            KeyCode::Char(' ') => self.toggle(),
            _ => Reaction::ignored(),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let mut y = area.y;
        if let Some(label) = &self.chrome.label {
            frame.render_widget(
                Paragraph::new(label.clone()).style(Style::default().fg(theme.text)),
                Rect { y, height: 1, ..area },
            );
            y += 1;
        }
        for (index, choice) in self.choices.iter().enumerate() {
            if y >= area.y + area.height {
                break;
            }
            let mark = if self.checked == Some(index) {
                "(\u{25cf}) "
            } else {
                "( ) "
            };
            let mut style = self.chrome.text_style(theme);
            if self.focused && index == self.highlighted {
                style = style.bg(theme.selection).add_modifier(Modifier::BOLD);
            }
            frame.render_widget(
                Paragraph::new(format!("{}{}", mark, choice)).style(style),
                Rect { y, height: 1, ..area },
            );
            y += 1;
        }
    }

    fn desired_height(&self, _width: u16) -> u16 {
        let label_rows = if self.chrome.label.is_some() { 1 } else { 0 };
        label_rows + u16::try_from(self.choices.len()).unwrap_or(u16::MAX)
    }

    fn is_empty(&self) -> bool {
        self.checked.is_none()
    }

    fn radio_scope(&self) -> Option<&str> {
        Some(&self.scope)
    }

    fn clear_checked(&mut self) {
        let Some(index) = self.checked.take() else {
            return;
        };
        // The sibling that displaced this check already wrote its own
        // entry; this widget's uncheck clears its own entry when the
        // label still matches.
        let label = &self.choices[index];
        let mut answers = self.answers.borrow_mut();
        let matches = answers
            .string(&self.chrome.name)
            .is_some_and(|current| current == label.as_str());
        if matches {
            answers.set(self.chrome.name.clone(), Value::Null);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;
    use serde_json::json;

    fn chrome(name: &str) -> WidgetChrome {
        WidgetChrome::from_prompt(&Prompt::new(name), 0, &FontSpec::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn labels() -> Vec<String> {
        vec!["Red".to_string(), "Green".to_string()]
    }

    #[test]
    fn test_combo_selection_writes_label() {
        let answers = shared(AnswerMap::new());
        let mut combo = ComboWidget::new(chrome("color"), labels(), None, answers.clone());
        assert_eq!(answers.borrow().get("color"), Some(&Value::Null));

        combo.handle_key(key(KeyCode::Down));
        assert_eq!(answers.borrow().string("color"), Some("Red"));
        combo.handle_key(key(KeyCode::Down));
        assert_eq!(answers.borrow().string("color"), Some("Green"));
        combo.handle_key(key(KeyCode::Down)); // clamped at the end
        assert_eq!(answers.borrow().string("color"), Some("Green"));
    }

    #[test]
    fn test_radio_check_then_switch() {
        let answers = shared(AnswerMap::new());
        let mut radio = RadioWidget::new(
            chrome("color"),
            labels(),
            Some(json!("Red")),
            "scope".to_string(),
            answers.clone(),
        );
        assert_eq!(answers.borrow().string("color"), Some("Red"));

        // Checking Green just writes Green; the displaced Red emits no
        // clearing write.
        radio.handle_key(key(KeyCode::Down));
        let reaction = radio.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(answers.borrow().string("color"), Some("Green"));
        assert!(matches!(
            reaction.effect,
            Some(Effect::RadioChecked { ref scope }) if scope == "scope"
        ));
    }

    #[test]
    fn test_radio_uncheck_clears_to_null() {
        let answers = shared(AnswerMap::new());
        let mut radio = RadioWidget::new(
            chrome("color"),
            labels(),
            Some(json!("Red")),
            "scope".to_string(),
            answers.clone(),
        );

        // Highlight starts on the checked option; Space unchecks it.
        radio.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(answers.borrow().get("color"), Some(&Value::Null));
        assert!(radio.is_empty());
    }

    #[test]
    fn test_clear_checked_respects_current_value() {
        let answers = shared(AnswerMap::new());
        let mut radio = RadioWidget::new(
            chrome("color"),
            labels(),
            Some(json!("Red")),
            "scope".to_string(),
            answers.clone(),
        );

        // Some other binding rewrote the entry; the uncheck must not
        // clobber it.
        answers
            .borrow_mut()
            .set("color".to_string(), json!("Overwritten"));
        radio.clear_checked();
        assert_eq!(answers.borrow().string("color"), Some("Overwritten"));
    }

    #[test]
    fn test_at_most_one_checked() {
        let answers = shared(AnswerMap::new());
        let mut radio = RadioWidget::new(
            chrome("color"),
            labels(),
            None,
            "scope".to_string(),
            answers.clone(),
        );

        radio.handle_key(key(KeyCode::Char(' ')));
        radio.handle_key(key(KeyCode::Down));
        radio.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(radio.checked_label(), Some("Green"));
        assert_eq!(answers.borrow().string("color"), Some("Green"));
    }
}
