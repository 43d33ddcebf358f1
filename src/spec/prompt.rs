//! Prompt model
//!
//! A `Prompt` is the declarative description of one input field: its
//! variant, default, validation constraints, and display options. The
//! widget factory dispatches exhaustively on the resolved variant, so a
//! fixed choice set always wins over the declared kind.

use crate::theme::FontSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input variants a prompt can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// Single or multi-line free text (the default)
    #[default]
    Text,
    /// Single toggle labelled with the prompt message
    Checkbox,
    /// Masked single-line field; the answer holds an opaque secret
    Password,
    /// Date field, defaults to today when unset
    Date,
    /// Styled clickable text that opens a target on activation
    Link,
    /// Text field paired with a file-open picker button
    FileOpen,
    /// Text field paired with a file-save picker button
    FileSave,
}

/// How a fixed choice set is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetPresentation {
    #[default]
    Combo,
    Radio,
}

/// Where the prompt message renders relative to its widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePosition {
    #[default]
    Top,
    Left,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Declarative description of one input field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompt {
    /// Unique identity; auto-generated `Input_<index>` when absent
    pub name: Option<String>,
    /// Label text
    pub message: Option<String>,
    pub kind: PromptKind,
    /// Fixed choice set; when non-empty it overrides `kind` and renders
    /// per `show_set_as`
    pub choices: Vec<String>,
    pub show_set_as: SetPresentation,
    pub default_value: Option<Value>,
    /// Rendered disabled; the answer entry stays frozen at the default
    pub read_only: bool,
    /// Heights above 1 produce a multi-line editor
    pub line_height: u16,
    pub alignment: Option<Alignment>,
    /// Unset attributes inherit the dialog-level font at bind time
    pub font: FontSpec,
    pub message_position: MessagePosition,
    /// Wrap the prompt in a collapsing container; beats `Left` placement
    pub collapsible: bool,
    /// Placement keys; prompts cluster by the (tab, group) pair
    pub group: Option<String>,
    pub tab: Option<String>,
    /// Exclusivity scope for radio presentation; absent means the prompt
    /// gets its own generated scope
    pub radio_group: Option<String>,
    pub show_separator: bool,
    /// Validation: value must be non-empty before a validated close
    pub required: bool,
    /// Validation: stringified value must match this regex
    pub pattern: Option<String>,
    /// Message shown when the pattern fails
    pub pattern_hint: Option<String>,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            name: None,
            message: None,
            kind: PromptKind::Text,
            choices: Vec::new(),
            show_set_as: SetPresentation::default(),
            default_value: None,
            read_only: false,
            line_height: 1,
            alignment: None,
            font: FontSpec::default(),
            message_position: MessagePosition::default(),
            collapsible: false,
            group: None,
            tab: None,
            radio_group: None,
            show_separator: false,
            required: false,
            pattern: None,
            pattern_hint: None,
        }
    }
}

impl Prompt {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Checkbox)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Password)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Date)
    }

    pub fn link(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::Link)
    }

    pub fn file_open(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::FileOpen)
    }

    pub fn file_save(name: impl Into<String>) -> Self {
        Self::new(name).kind(PromptKind::FileSave)
    }

    /// A fixed choice set, combo presentation unless changed
    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prompt = Self::new(name);
        prompt.choices = choices.into_iter().map(Into::into).collect();
        prompt
    }

    pub fn kind(mut self, kind: PromptKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn pattern_hint(mut self, hint: impl Into<String>) -> Self {
        self.pattern_hint = Some(hint.into());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn lines(mut self, line_height: u16) -> Self {
        self.line_height = line_height.max(1);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    pub fn radio_group(mut self, scope: impl Into<String>) -> Self {
        self.radio_group = Some(scope.into());
        self
    }

    pub fn show_as_radio(mut self) -> Self {
        self.show_set_as = SetPresentation::Radio;
        self
    }

    pub fn message_left(mut self) -> Self {
        self.message_position = MessagePosition::Left;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    pub fn separator(mut self, show: bool) -> Self {
        self.show_separator = show;
        self
    }

    pub fn font_color(mut self, color: impl Into<String>) -> Self {
        self.font.color = Some(color.into());
        self
    }

    /// The identity this prompt binds under, generating one when unnamed
    pub fn effective_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Input_{}", index),
        }
    }

    /// The variant the widget factory dispatches on: a non-empty choice
    /// set always overrides the declared kind
    pub fn resolved_variant(&self) -> ResolvedVariant {
        if !self.choices.is_empty() {
            ResolvedVariant::Choice(self.show_set_as)
        } else {
            ResolvedVariant::Kind(self.kind)
        }
    }

    /// Whether this prompt participates in validation at all
    pub fn has_constraint(&self) -> bool {
        self.required || self.pattern.is_some()
    }

    /// Exclusivity scope for radio presentation
    pub fn radio_scope(&self, index: usize) -> String {
        match &self.radio_group {
            Some(scope) => scope.clone(),
            None => format!("__radio_scope_{}", index),
        }
    }
}

/// Outcome of resolving the choice-set override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVariant {
    Kind(PromptKind),
    Choice(SetPresentation),
}

/// Bare strings are shorthand for a plain text prompt labelled with the
/// string itself
impl From<&str> for Prompt {
    fn from(message: &str) -> Self {
        Prompt {
            message: Some(message.to_string()),
            ..Prompt::default()
        }
    }
}

impl From<String> for Prompt {
    fn from(message: String) -> Self {
        Prompt {
            message: Some(message),
            ..Prompt::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_name_generation() {
        let named = Prompt::text("city");
        assert_eq!(named.effective_name(3), "city");

        let anonymous = Prompt::from("Where to?");
        assert_eq!(anonymous.effective_name(3), "Input_3");
    }

    #[test]
    fn test_choice_set_overrides_kind() {
        let prompt = Prompt::password("color").with_default(json!("Red"));
        assert_eq!(
            prompt.resolved_variant(),
            ResolvedVariant::Kind(PromptKind::Password)
        );

        let prompt = Prompt::choice("color", ["Red", "Green"]).kind(PromptKind::Password);
        assert_eq!(
            prompt.resolved_variant(),
            ResolvedVariant::Choice(SetPresentation::Combo)
        );
    }

    #[test]
    fn test_radio_scope_defaults_per_prompt() {
        let scoped = Prompt::choice("a", ["x"]).radio_group("shared");
        assert_eq!(scoped.radio_scope(0), "shared");

        let unscoped = Prompt::choice("b", ["y"]);
        assert_ne!(unscoped.radio_scope(0), unscoped.radio_scope(1));
    }

    #[test]
    fn test_deserialize_full_prompt() {
        let prompt: Prompt = serde_json::from_value(json!({
            "name": "env",
            "choices": ["dev", "prod"],
            "show_set_as": "radio",
            "required": true
        }))
        .unwrap();

        assert_eq!(prompt.name.as_deref(), Some("env"));
        assert_eq!(
            prompt.resolved_variant(),
            ResolvedVariant::Choice(SetPresentation::Radio)
        );
        assert!(prompt.required);
    }
}
