//! File path widget
//!
//! A text field paired with a picker affordance. Enter asks the lifecycle
//! controller to run the external file dialog; a confirmed pick lands in
//! the text field through `set_text`, which fires the normal text-changed
//! binding. The field itself stays independently editable.

use super::{Effect, Frame, InputWidget, Reaction, TextWidget, WidgetChrome};
use crate::answers::Answers;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

const PICKER_HINT: &str = " [\u{2026}]";

pub struct FileWidget {
    field: TextWidget,
    save: bool,
}

impl FileWidget {
    pub fn new(
        chrome: WidgetChrome,
        default: Option<String>,
        save: bool,
        answers: Answers,
    ) -> Self {
        Self {
            field: TextWidget::plain(chrome, default, 1, answers),
            save,
        }
    }

    pub fn is_save(&self) -> bool {
        self.save
    }

    pub fn path_text(&self) -> String {
        self.field.text()
    }
}

impl InputWidget for FileWidget {
    fn name(&self) -> &str {
        self.field.name()
    }

    fn focusable(&self) -> bool {
        self.field.focusable()
    }

    fn has_focus(&self) -> bool {
        self.field.has_focus()
    }

    fn set_focus(&mut self, focus: bool) {
        self.field.set_focus(focus);
    }

    fn on_focus(&mut self) {
        self.field.on_focus();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Reaction {
        if key.code == KeyCode::Enter && self.focusable() {
            return Reaction::with_effect(Effect::PickFile { save: self.save });
        }
        self.field.handle_key(key)
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let hint_width = u16::try_from(PICKER_HINT.chars().count()).unwrap_or(4);
        let field_area = Rect {
            width: area.width.saturating_sub(hint_width),
            ..area
        };
        self.field.render(frame, field_area, theme);

        let hint_area = Rect {
            x: area.x + field_area.width,
            y: area.y + area.height.saturating_sub(1),
            width: hint_width.min(area.width),
            height: 1,
        };
        let style = if self.has_focus() {
            Style::default().fg(theme.border_focus)
        } else {
            Style::default().fg(theme.text_muted)
        };
        frame.render_widget(Paragraph::new(PICKER_HINT).style(style), hint_area);
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.field.desired_height(width)
    }

    fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Picker round-trip: the confirmed path replaces the field text and
    /// fires the text-changed binding
    fn set_text(&mut self, text: String) {
        self.field.set_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;

    fn chrome(name: &str) -> WidgetChrome {
        WidgetChrome::from_prompt(&Prompt::file_open(name), 0, &FontSpec::default())
    }

    #[test]
    fn test_enter_requests_picker() {
        let answers = shared(AnswerMap::new());
        let mut widget = FileWidget::new(chrome("log"), None, false, answers);
        let reaction = widget.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(reaction.effect, Some(Effect::PickFile { save: false }));
    }

    #[test]
    fn test_picked_path_fires_text_binding() {
        let answers = shared(AnswerMap::new());
        let mut widget = FileWidget::new(chrome("log"), None, false, answers.clone());
        widget.set_text("/var/log/syslog".to_string());
        assert_eq!(answers.borrow().string("log"), Some("/var/log/syslog"));
    }

    #[test]
    fn test_field_stays_editable() {
        let answers = shared(AnswerMap::new());
        let mut widget = FileWidget::new(chrome("log"), Some("/tmp".into()), false, answers.clone());
        widget.handle_key(KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(answers.borrow().string("log"), Some("/tmpx"));
    }
}
