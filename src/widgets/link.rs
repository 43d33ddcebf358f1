//! Link widget
//!
//! Styled clickable text. Activation writes `true` into the answer map and
//! asks the lifecycle controller to open the target through the opener
//! collaborator: the default value when one was given, else the message
//! text itself.

use super::{Effect, Frame, InputWidget, Reaction, WidgetChrome};
use crate::answers::Answers;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::Paragraph;
use serde_json::Value;

pub struct LinkWidget {
    chrome: WidgetChrome,
    target: String,
    activated: bool,
    focused: bool,
    answers: Answers,
}

impl LinkWidget {
    pub fn new(chrome: WidgetChrome, default: Option<String>, answers: Answers) -> Self {
        let target = default
            .or_else(|| chrome.label.clone())
            .unwrap_or_default();
        super::seed_answer(&answers, &chrome.name, Value::Bool(false));
        Self {
            chrome,
            target,
            activated: false,
            focused: false,
            answers,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl InputWidget for LinkWidget {
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
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activated = true;
                self.answers
                    .borrow_mut()
                    .set(self.chrome.name.clone(), Value::Bool(true));
                Reaction::with_effect(Effect::OpenTarget(self.target.clone()))
            }
            _ => Reaction::ignored(),
        }
    }

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let text = self.chrome.label.clone().unwrap_or_else(|| self.target.clone());
        let mut style = theme.link_style();
        if self.focused {
            style = style.add_modifier(Modifier::BOLD).bg(theme.selection);
        }
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        1
    }

    fn is_empty(&self) -> bool {
        !self.activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use crate::spec::Prompt;
    use crate::theme::FontSpec;

    fn chrome(message: Option<&str>) -> WidgetChrome {
        let mut prompt = Prompt::link("docs");
        if let Some(text) = message {
            prompt = prompt.message(text);
        }
        WidgetChrome::from_prompt(&prompt, 0, &FontSpec::default())
    }

    #[test]
    fn test_activation_writes_true_and_opens_target() {
        let answers = shared(AnswerMap::new());
        let mut widget = LinkWidget::new(
            chrome(Some("Read the docs")),
            Some("https://example.test/docs".into()),
            answers.clone(),
        );
        assert_eq!(answers.borrow().boolean("docs"), Some(false));

        let reaction = widget.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(answers.borrow().boolean("docs"), Some(true));
        assert_eq!(
            reaction.effect,
            Some(Effect::OpenTarget("https://example.test/docs".into()))
        );
    }

    #[test]
    fn test_message_is_fallback_target() {
        let answers = shared(AnswerMap::new());
        let widget = LinkWidget::new(chrome(Some("example.test")), None, answers);
        assert_eq!(widget.target(), "example.test");
    }
}
