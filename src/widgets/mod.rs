//! Widget factory and the interactive element contract
//!
//! The factory turns one `Prompt` into exactly one addressable interactive
//! element. Construction resolves font/alignment inheritance from the
//! dialog-level defaults, seeds the answer map with the prompt's default
//! value, and hands the widget a clone of the shared answer handle so its
//! change events write straight into the map. Dispatch over the resolved
//! variant is an exhaustive match.

mod choice;
mod date;
mod file;
mod link;
mod text;
mod toggle;

pub use choice::{ComboWidget, RadioWidget};
pub use date::DateWidget;
pub use file::FileWidget;
pub use link::LinkWidget;
pub use text::TextWidget;
pub use toggle::CheckboxWidget;

use crate::answers::{Answers, Secret};
use crate::spec::{
    Alignment, MessagePosition, Prompt, PromptKind, ResolvedVariant, SetPresentation,
};
use crate::theme::{FontSpec, Theme};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use serde_json::Value;

pub type Frame<'a> = ratatui::Frame<'a>;

/// Side effect a widget asks the lifecycle controller to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a path or URL through the opener collaborator
    OpenTarget(String),
    /// Run the external file dialog and pipe the picked path back into
    /// the widget's text field
    PickFile { save: bool },
    /// A radio option in this scope was checked; same-scope siblings
    /// must clear
    RadioChecked { scope: String },
}

/// Result of routing one key event to a widget
#[derive(Debug, Default)]
pub struct Reaction {
    pub consumed: bool,
    pub effect: Option<Effect>,
}

impl Reaction {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            effect: None,
        }
    }

    pub fn with_effect(effect: Effect) -> Self {
        Self {
            consumed: true,
            effect: Some(effect),
        }
    }
}

/// Contract every interactive element fulfils
///
/// Widgets own their visual state; the shared answer map entry under
/// `name()` is their only channel of output.
pub trait InputWidget {
    fn name(&self) -> &str;

    /// Read-only widgets stay visible but take no focus
    fn focusable(&self) -> bool;

    fn has_focus(&self) -> bool;

    fn set_focus(&mut self, focus: bool);

    /// Focus-gain hook; plain text selects all existing input
    fn on_focus(&mut self) {}

    fn handle_key(&mut self, key: KeyEvent) -> Reaction;

    fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme);

    /// Rows this widget needs at the given width, label included
    fn desired_height(&self, width: u16) -> u16;

    /// Whether the current value is empty, for initial focus assignment
    fn is_empty(&self) -> bool;

    /// Exclusivity scope, for radio presentation only
    fn radio_scope(&self) -> Option<&str> {
        None
    }

    /// Clear the checked option and the bound answer entry; no-op for
    /// non-radio widgets
    fn clear_checked(&mut self) {}

    /// Replace the textual value, firing the normal change binding; used
    /// by the file picker round-trip and the preparation hook
    fn set_text(&mut self, _text: String) {}
}

/// Display attributes shared by every widget, resolved once at bind time
#[derive(Debug, Clone)]
pub struct WidgetChrome {
    pub name: String,
    pub label: Option<String>,
    pub label_position: MessagePosition,
    pub alignment: Alignment,
    pub style_color: Option<String>,
    pub read_only: bool,
    pub required: bool,
}

impl WidgetChrome {
    pub(crate) fn from_prompt(prompt: &Prompt, index: usize, dialog_font: &FontSpec) -> Self {
        let font = prompt.font.merged_with(dialog_font);
        Self {
            name: prompt.effective_name(index),
            // A collapsible prompt's message becomes its expander header,
            // so the widget itself drops the label.
            label: if prompt.collapsible {
                None
            } else {
                prompt.message.clone()
            },
            label_position: prompt.message_position,
            alignment: prompt.alignment.unwrap_or_default(),
            style_color: font.color,
            read_only: prompt.read_only,
            required: prompt.required,
        }
    }

    pub fn text_style(&self, theme: &Theme) -> Style {
        let font = FontSpec {
            color: self.style_color.clone(),
            ..FontSpec::default()
        };
        let style = font.style(theme);
        if self.read_only {
            style.fg(theme.text_muted)
        } else {
            style
        }
    }

    /// Rows the label occupies above the widget body
    pub fn label_rows(&self) -> u16 {
        match (&self.label, self.label_position) {
            (Some(_), MessagePosition::Top) => 1,
            _ => 0,
        }
    }

    /// The prompt's alignment in ratatui terms
    pub fn rat_alignment(&self) -> ratatui::layout::Alignment {
        match self.alignment {
            Alignment::Left => ratatui::layout::Alignment::Left,
            Alignment::Center => ratatui::layout::Alignment::Center,
            Alignment::Right => ratatui::layout::Alignment::Right,
        }
    }

    /// Columns the label occupies left of the widget body
    pub fn label_cols(&self) -> u16 {
        use unicode_width::UnicodeWidthStr;
        match (&self.label, self.label_position) {
            (Some(label), MessagePosition::Left) => {
                u16::try_from(label.width() + 2).unwrap_or(u16::MAX)
            }
            _ => 0,
        }
    }
}

/// Build the widget for one prompt and seed its answer entry
pub fn build(
    prompt: &Prompt,
    index: usize,
    answers: Answers,
    dialog_font: &FontSpec,
) -> Box<dyn InputWidget> {
    let chrome = WidgetChrome::from_prompt(prompt, index, dialog_font);
    let default = prompt.default_value.clone();

    match prompt.resolved_variant() {
        ResolvedVariant::Choice(SetPresentation::Combo) => Box::new(ComboWidget::new(
            chrome,
            prompt.choices.clone(),
            default,
            answers,
        )),
        ResolvedVariant::Choice(SetPresentation::Radio) => Box::new(RadioWidget::new(
            chrome,
            prompt.choices.clone(),
            default,
            prompt.radio_scope(index),
            answers,
        )),
        ResolvedVariant::Kind(PromptKind::Checkbox) => {
            Box::new(CheckboxWidget::new(chrome, default, answers))
        }
        ResolvedVariant::Kind(PromptKind::Password) => Box::new(TextWidget::password(
            chrome,
            default_text(default.as_ref()),
            answers,
        )),
        ResolvedVariant::Kind(PromptKind::Date) => {
            Box::new(DateWidget::new(chrome, default_text(default.as_ref()), answers))
        }
        ResolvedVariant::Kind(PromptKind::Link) => Box::new(LinkWidget::new(
            chrome,
            default_text(default.as_ref()),
            answers,
        )),
        ResolvedVariant::Kind(PromptKind::FileOpen) => Box::new(FileWidget::new(
            chrome,
            default_text(default.as_ref()),
            false,
            answers,
        )),
        ResolvedVariant::Kind(PromptKind::FileSave) => Box::new(FileWidget::new(
            chrome,
            default_text(default.as_ref()),
            true,
            answers,
        )),
        ResolvedVariant::Kind(PromptKind::Text) => Box::new(TextWidget::plain(
            chrome,
            default_text(default.as_ref()),
            prompt.line_height,
            answers,
        )),
    }
}

/// Textual form of a default value, when one was given
fn default_text(default: Option<&Value>) -> Option<String> {
    match default {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Seed helper shared by widget constructors
pub(crate) fn seed_answer(answers: &Answers, name: &str, value: Value) {
    answers.borrow_mut().set(name.to_string(), value);
}

/// Seed helper for password widgets: the default goes in as an opaque
/// secret, never as a plain string
pub(crate) fn seed_secret(answers: &Answers, name: &str, chars: Option<&str>) {
    let secret = Secret::new(chars.unwrap_or_default());
    answers.borrow_mut().set(name.to_string(), secret.into_value());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use serde_json::json;

    #[test]
    fn test_factory_seeds_defaults() {
        let answers = shared(AnswerMap::new());
        let prompts = vec![
            Prompt::text("city").with_default(json!("Oslo")),
            Prompt::checkbox("notify"),
            Prompt::choice("color", ["Red", "Green"]).with_default(json!("Red")),
        ];
        for (index, prompt) in prompts.iter().enumerate() {
            build(prompt, index, answers.clone(), &FontSpec::default());
        }

        let map = answers.borrow();
        assert_eq!(map.string("city"), Some("Oslo"));
        assert_eq!(map.boolean("notify"), Some(false));
        assert_eq!(map.string("color"), Some("Red"));
    }

    #[test]
    fn test_factory_seeds_null_for_unset_text_default() {
        let answers = shared(AnswerMap::new());
        build(
            &Prompt::text("note"),
            0,
            answers.clone(),
            &FontSpec::default(),
        );
        assert_eq!(answers.borrow().get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_password_default_is_opaque() {
        let answers = shared(AnswerMap::new());
        build(
            &Prompt::password("pw").with_default(json!("top")),
            0,
            answers.clone(),
            &FontSpec::default(),
        );
        let map = answers.borrow();
        assert_eq!(map.string("pw"), None);
        assert_eq!(map.secret("pw").unwrap().reveal(), "top");
    }

    #[test]
    fn test_collapsible_prompt_drops_inline_label() {
        let prompt = Prompt::text("a").message("Header").collapsible(true);
        let chrome = WidgetChrome::from_prompt(&prompt, 0, &FontSpec::default());
        assert_eq!(chrome.label, None);
    }

    #[test]
    fn test_read_only_widget_not_focusable() {
        let answers = shared(AnswerMap::new());
        let widget = build(
            &Prompt::text("locked").with_default(json!("v")).read_only(true),
            0,
            answers,
            &FontSpec::default(),
        );
        assert!(!widget.focusable());
    }
}
