//! Dialog specification
//!
//! `DialogSpec` is the single input of the engine: messages, prompts,
//! buttons, optional tabular data, timing and styling options. It is
//! builder-constructed from code or deserialized from JSON (bare strings
//! are accepted as shorthand for plain prompts and buttons). Callbacks
//! never travel through serde.

pub mod button;
pub mod prompt;

pub use button::{Button, ButtonAction, CloseRequest};
pub use prompt::{
    Alignment, MessagePosition, Prompt, PromptKind, ResolvedVariant, SetPresentation,
};

use crate::error::{DialogError, DialogResult};
use crate::theme::FontSpec;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Reserved button synthesized when a grid is shown with its search bar:
/// opens the full rows in the secondary tabular viewer
pub const EXPLORE_BUTTON: &str = "Explore";
/// Reserved button synthesized alongside [`EXPLORE_BUTTON`]: exports the
/// currently displayed grid rows to CSV
pub const SAVE_BUTTON: &str = "Save";
/// Reserved button synthesized when requested and a message is present:
/// copies the message text to the clipboard
pub const COPY_BUTTON: &str = "Copy";

/// Icon shown beside the dialog title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    #[default]
    None,
    Info,
    Question,
    Warning,
    Error,
}

/// Source of the optional banner image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Filesystem path to a decodable image
    Path(PathBuf),
    /// Inline base-64 payload
    Base64(String),
}

/// How grid selections are captured into the answer map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Grid is display-only
    None,
    /// Answer holds the stringified first selected cell value
    SingleCell,
    /// Answer holds the selected row object
    #[default]
    SingleRow,
    /// Answer holds the ordered array of selected row objects
    MultiRow,
}

/// Window chrome style carried by the specification
///
/// In the terminal medium the style decides whether the dialog draws a
/// border and title; the remaining chrome options are carried for callers
/// that round-trip the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    #[default]
    Default,
    Borderless,
    ToolWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    #[default]
    NoResize,
    CanResize,
}

/// Window chrome options
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub style: WindowStyle,
    pub resize: ResizeMode,
    /// Minimum dialog size in cells (width, height)
    pub min_size: Option<(u16, u16)>,
    /// Maximum dialog size in cells (width, height)
    pub max_size: Option<(u16, u16)>,
    pub topmost: bool,
    pub show_in_taskbar: bool,
}

/// Hook invoked once after full construction, with access to the live
/// widget and answer state
pub type PrepareHook = Box<dyn FnOnce(&mut crate::dialog::Session)>;

/// The full declarative description of one modal dialog
#[derive(Deserialize)]
#[serde(default)]
pub struct DialogSpec {
    pub icon: IconKind,
    pub title: Option<String>,
    pub image: Option<ImageSource>,
    /// Top-level message paragraphs
    pub message: Vec<String>,
    #[serde(deserialize_with = "prompts_with_shorthand")]
    pub prompts: Vec<Prompt>,
    #[serde(deserialize_with = "buttons_with_shorthand")]
    pub buttons: Vec<Button>,
    /// Role assignment by button name, applied before structural checks
    pub default_button: Option<String>,
    pub cancel_button: Option<String>,
    /// Buttons are split evenly across this many rows
    pub button_rows: u16,
    /// Comment paragraphs rendered below the content
    pub comment: Vec<String>,
    pub content_alignment: Alignment,
    /// Dialog-level font defaults inherited by prompts
    pub font: FontSpec,
    pub background_color: Option<String>,
    pub accent_color: Option<String>,
    pub window: WindowOptions,
    /// Seconds until the dialog force-closes with `TimedOut = true`;
    /// zero disables the timer
    pub timeout_secs: u64,
    pub show_countdown: bool,
    /// One inner sequence per grid instance
    pub grid_data: Vec<Vec<Value>>,
    /// Render grid rows as a single value column
    pub grid_as_list: bool,
    pub selection_mode: SelectionMode,
    pub hide_grid_search: bool,
    pub show_copy_button: bool,
    /// Render group boxes as collapsing containers
    pub collapsible_groups: bool,
    #[serde(skip)]
    pub prepare: Option<PrepareHook>,
}

impl Default for DialogSpec {
    fn default() -> Self {
        Self {
            icon: IconKind::default(),
            title: None,
            image: None,
            message: Vec::new(),
            prompts: Vec::new(),
            buttons: Vec::new(),
            default_button: None,
            cancel_button: None,
            button_rows: 1,
            comment: Vec::new(),
            content_alignment: Alignment::default(),
            font: FontSpec::default(),
            background_color: None,
            accent_color: None,
            window: WindowOptions::default(),
            timeout_secs: 0,
            show_countdown: false,
            grid_data: Vec::new(),
            grid_as_list: false,
            selection_mode: SelectionMode::default(),
            hide_grid_search: false,
            show_copy_button: false,
            collapsible_groups: false,
            prepare: None,
        }
    }
}

impl DialogSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: IconKind) -> Self {
        self.icon = icon;
        self
    }

    pub fn image(mut self, image: ImageSource) -> Self {
        self.image = Some(image);
        self
    }

    pub fn message(mut self, line: impl Into<String>) -> Self {
        self.message.push(line.into());
        self
    }

    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<Prompt>) -> Self {
        self.prompts.push(prompt.into());
        self
    }

    pub fn prompts<I, P>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Prompt>,
    {
        self.prompts.extend(prompts.into_iter().map(Into::into));
        self
    }

    pub fn button(mut self, button: impl Into<Button>) -> Self {
        self.buttons.push(button.into());
        self
    }

    pub fn buttons<I, B>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Button>,
    {
        self.buttons.extend(buttons.into_iter().map(Into::into));
        self
    }

    pub fn default_button(mut self, name: impl Into<String>) -> Self {
        self.default_button = Some(name.into());
        self
    }

    pub fn cancel_button(mut self, name: impl Into<String>) -> Self {
        self.cancel_button = Some(name.into());
        self
    }

    pub fn button_rows(mut self, rows: u16) -> Self {
        self.button_rows = rows.max(1);
        self
    }

    pub fn content_alignment(mut self, alignment: Alignment) -> Self {
        self.content_alignment = alignment;
        self
    }

    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration, show_countdown: bool) -> Self {
        self.timeout_secs = timeout.as_secs();
        self.show_countdown = show_countdown;
        self
    }

    /// Add one grid instance backed by the given row sequence
    pub fn grid<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.grid_data.push(rows.into_iter().collect());
        self
    }

    pub fn grid_as_list(mut self, as_list: bool) -> Self {
        self.grid_as_list = as_list;
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn hide_grid_search(mut self, hide: bool) -> Self {
        self.hide_grid_search = hide;
        self
    }

    pub fn show_copy_button(mut self, show: bool) -> Self {
        self.show_copy_button = show;
        self
    }

    pub fn collapsible_groups(mut self, collapsible: bool) -> Self {
        self.collapsible_groups = collapsible;
        self
    }

    pub fn prepare<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut crate::dialog::Session) + 'static,
    {
        self.prepare = Some(Box::new(hook));
        self
    }

    /// Whether the reserved Explore/Save buttons apply
    pub fn grid_actions_enabled(&self) -> bool {
        !self.grid_data.is_empty() && !self.hide_grid_search
    }

    /// Whether the reserved Copy button applies
    pub fn copy_action_enabled(&self) -> bool {
        self.show_copy_button && !self.message.is_empty()
    }

    /// Apply named role assignments and the single-button promotion rule,
    /// then verify the structural invariants
    pub(crate) fn resolve_roles(&mut self) -> DialogResult<()> {
        if let Some(name) = self.default_button.clone() {
            for button in &mut self.buttons {
                if button.effective_name() == name {
                    button.is_default = true;
                }
            }
        }
        if let Some(name) = self.cancel_button.clone() {
            for button in &mut self.buttons {
                if button.effective_name() == name {
                    button.is_cancel = true;
                }
            }
        }

        // A lone role-less caller button is promoted to default.
        if self.buttons.len() == 1 {
            let only = &mut self.buttons[0];
            if !only.is_default && !only.is_cancel && !only.is_custom() {
                only.is_default = true;
            }
        }

        self.check()
    }

    /// Structural invariants: unique prompt names, at most one default and
    /// one cancel button, compilable patterns
    pub(crate) fn check(&self) -> DialogResult<()> {
        let mut seen = HashSet::new();
        for (index, prompt) in self.prompts.iter().enumerate() {
            let name = prompt.effective_name(index);
            if !seen.insert(name.clone()) {
                return Err(DialogError::bad_spec(format!(
                    "duplicate prompt name '{}'",
                    name
                )));
            }
            if let Some(pattern) = &prompt.pattern {
                regex::Regex::new(pattern).map_err(|e| {
                    DialogError::bad_spec(format!(
                        "prompt '{}' has an invalid pattern: {}",
                        name, e
                    ))
                })?;
            }
        }

        let defaults = self.buttons.iter().filter(|b| b.is_default).count();
        if defaults > 1 {
            return Err(DialogError::bad_spec("more than one default button"));
        }
        let cancels = self.buttons.iter().filter(|b| b.is_cancel).count();
        if cancels > 1 {
            return Err(DialogError::bad_spec("more than one cancel button"));
        }

        Ok(())
    }
}

fn prompts_with_shorthand<'de, D>(deserializer: D) -> Result<Vec<Prompt>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shorthand {
        Bare(String),
        Full(Prompt),
    }

    let items = Vec::<Shorthand>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            Shorthand::Bare(message) => Prompt::from(message),
            Shorthand::Full(prompt) => prompt,
        })
        .collect())
}

fn buttons_with_shorthand<'de, D>(deserializer: D) -> Result<Vec<Button>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shorthand {
        Bare(String),
        Full(Button),
    }

    let items = Vec::<Shorthand>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            Shorthand::Bare(text) => Button::from(text),
            Shorthand::Full(button) => button,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_prompt_names_rejected() {
        let mut spec = DialogSpec::new("t")
            .prompt(Prompt::text("name"))
            .prompt(Prompt::text("name"));
        assert!(matches!(
            spec.resolve_roles(),
            Err(DialogError::BadSpec(_))
        ));
    }

    #[test]
    fn test_single_plain_button_promoted_to_default() {
        let mut spec = DialogSpec::new("t").button("OK");
        spec.resolve_roles().unwrap();
        assert!(spec.buttons[0].is_default);
    }

    #[test]
    fn test_named_role_assignment() {
        let mut spec = DialogSpec::new("t")
            .buttons(["Cancel", "Apply"])
            .default_button("Apply")
            .cancel_button("Cancel");
        spec.resolve_roles().unwrap();
        assert!(spec.buttons[1].is_default);
        assert!(spec.buttons[0].is_cancel);
    }

    #[test]
    fn test_two_defaults_rejected() {
        let mut spec = DialogSpec::new("t")
            .button(Button::new("A").default_button())
            .button(Button::new("B").default_button());
        assert!(spec.resolve_roles().is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let spec = DialogSpec::new("t").prompt(Prompt::text("x").pattern("("));
        assert!(spec.check().is_err());
    }

    #[test]
    fn test_deserialize_with_shorthand() {
        let spec: DialogSpec = serde_json::from_value(json!({
            "title": "Setup",
            "prompts": [
                "Project name?",
                { "name": "env", "choices": ["dev", "prod"] }
            ],
            "buttons": ["Cancel", { "text": "Create", "is_default": true }],
            "timeout_secs": 30
        }))
        .unwrap();

        assert_eq!(spec.prompts.len(), 2);
        assert_eq!(spec.prompts[0].message.as_deref(), Some("Project name?"));
        assert_eq!(spec.buttons[1].text, "Create");
        assert!(spec.buttons[1].is_default);
        assert_eq!(spec.timeout_secs, 30);
    }

    #[test]
    fn test_reserved_button_conditions() {
        let with_grid = DialogSpec::new("t").grid(vec![json!({"a": 1})]);
        assert!(with_grid.grid_actions_enabled());
        assert!(!with_grid.copy_action_enabled());

        let hidden = DialogSpec::new("t")
            .grid(vec![json!({"a": 1})])
            .hide_grid_search(true);
        assert!(!hidden.grid_actions_enabled());

        let copy = DialogSpec::new("t").message("hello").show_copy_button(true);
        assert!(copy.copy_action_enabled());
    }
}
