//! Button model
//!
//! Buttons carry their close role (default/cancel/custom) and optionally a
//! typed action callback. An action owns the close decision entirely: the
//! engine never validates or closes on its behalf, it only honors the
//! `CloseRequest` the action leaves behind.

use crate::answers::AnswerMap;
use serde::Deserialize;

/// Close decision handed to a custom button action
#[derive(Debug, Default)]
pub struct CloseRequest {
    close: bool,
}

impl CloseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the lifecycle controller to close the dialog after the action
    /// returns
    pub fn request_close(&mut self) {
        self.close = true;
    }

    pub fn is_requested(&self) -> bool {
        self.close
    }
}

/// Typed callback replacing runtime-synthesized handler bodies: the action
/// receives the live answer map and a close-request flag
pub type ButtonAction = Box<dyn FnMut(&mut AnswerMap, &mut CloseRequest)>;

/// Declarative description of one action button
#[derive(Deserialize)]
#[serde(default)]
pub struct Button {
    /// Identity in the answer map; falls back to `text`
    pub name: Option<String>,
    pub text: String,
    /// Closes without validation
    pub is_cancel: bool,
    /// Activated by Enter outside any button
    pub is_default: bool,
    /// Custom handler; replaces the standard validate-then-close behavior
    #[serde(skip)]
    pub on_click: Option<ButtonAction>,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            name: None,
            text: String::new(),
            is_cancel: false,
            is_default: false,
            on_click: None,
        }
    }
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cancel(mut self) -> Self {
        self.is_cancel = true;
        self
    }

    pub fn default_button(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn on_click<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut AnswerMap, &mut CloseRequest) + 'static,
    {
        self.on_click = Some(Box::new(action));
        self
    }

    /// The identity this button binds under
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.text)
    }

    /// Custom-handler buttons own their close decision and contribute no
    /// boolean entry to the answer map
    pub fn is_custom(&self) -> bool {
        self.on_click.is_some()
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("is_cancel", &self.is_cancel)
            .field("is_default", &self.is_default)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Bare strings are shorthand for a plain button with that label
impl From<&str> for Button {
    fn from(text: &str) -> Self {
        Button::new(text)
    }
}

impl From<String> for Button {
    fn from(text: String) -> Self {
        Button::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_effective_name_falls_back_to_text() {
        assert_eq!(Button::new("OK").effective_name(), "OK");
        assert_eq!(Button::new("OK").named("confirm").effective_name(), "confirm");
    }

    #[test]
    fn test_close_request_flow() {
        let mut button = Button::new("Apply").on_click(|answers, close| {
            answers.set("applied", json!(true));
            close.request_close();
        });
        assert!(button.is_custom());

        let mut answers = AnswerMap::new();
        let mut close = CloseRequest::new();
        (button.on_click.as_mut().unwrap())(&mut answers, &mut close);

        assert!(close.is_requested());
        assert_eq!(answers.boolean("applied"), Some(true));
    }

    #[test]
    fn test_deserialize_button() {
        let button: Button = serde_json::from_value(json!({
            "text": "Abort",
            "is_cancel": true
        }))
        .unwrap();
        assert!(button.is_cancel);
        assert!(!button.is_custom());
    }
}
