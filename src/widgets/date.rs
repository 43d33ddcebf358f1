//! Date widget
//!
//! Holds a calendar date, defaulting to today when the prompt has no
//! default. Arrow keys step the day, PageUp/PageDown step the month; the
//! answer map always carries the textual `YYYY-MM-DD` form.

use super::{Frame, InputWidget, Reaction, WidgetChrome};
use crate::answers::Answers;
use crate::spec::MessagePosition;
use crate::theme::Theme;
use chrono::{Days, Local, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct DateWidget {
    chrome: WidgetChrome,
    date: NaiveDate,
    focused: bool,
    answers: Answers,
}

impl DateWidget {
    pub fn new(chrome: WidgetChrome, default: Option<String>, answers: Answers) -> Self {
        let date = default
            .as_deref()
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
            .unwrap_or_else(|| Local::now().date_naive());
        super::seed_answer(
            &answers,
            &chrome.name,
            Value::String(date.format(DATE_FORMAT).to_string()),
        );
        Self {
            chrome,
            date,
            focused: false,
            answers,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.answers.borrow_mut().set(
            self.chrome.name.clone(),
            Value::String(date.format(DATE_FORMAT).to_string()),
        );
    }
}

impl InputWidget for DateWidget {
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
        let next = match key.code {
            KeyCode::Up => self.date.checked_add_days(Days::new(1)),
            KeyCode::Down => self.date.checked_sub_days(Days::new(1)),
            KeyCode::PageUp => self.date.checked_add_months(Months::new(1)),
            KeyCode::PageDown => self.date.checked_sub_months(Months::new(1)),
            _ => return Reaction::ignored(),
        };
        if let Some(date) = next {
            self.set_date(date);
        }
        Reaction::consumed()
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

        let mut style = self.chrome.text_style(theme);
        if self.focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(self.date.format(DATE_FORMAT).to_string())
                .style(style.bg(theme.selection)),
            body,
        );
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.label_rows() + 1
    }

    /// A date field always carries a value
    fn is_empty(&self) -> bool {
        false
    }

    fn set_text(&mut self, text: String) {
        if let Ok(date) = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
            self.set_date(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;

    fn chrome() -> WidgetChrome {
        WidgetChrome::from_prompt(&Prompt::date("when"), 0, &FontSpec::default())
    }

    #[test]
    fn test_explicit_default_is_kept() {
        let answers = shared(AnswerMap::new());
        let widget = DateWidget::new(chrome(), Some("2024-02-29".into()), answers.clone());
        assert_eq!(widget.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(answers.borrow().string("when"), Some("2024-02-29"));
    }

    #[test]
    fn test_unset_default_falls_back_to_today() {
        let answers = shared(AnswerMap::new());
        let widget = DateWidget::new(chrome(), None, answers.clone());
        assert_eq!(widget.date(), Local::now().date_naive());
        assert!(answers.borrow().string("when").is_some());
    }

    #[test]
    fn test_arrows_step_and_write_textual_form() {
        let answers = shared(AnswerMap::new());
        let mut widget = DateWidget::new(chrome(), Some("2024-12-31".into()), answers.clone());

        widget.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(answers.borrow().string("when"), Some("2025-01-01"));

        widget.handle_key(KeyEvent::from(KeyCode::PageDown));
        assert_eq!(answers.borrow().string("when"), Some("2024-12-01"));
    }
}
