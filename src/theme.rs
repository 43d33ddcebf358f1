//! Visual theme for rendered dialogs
//!
//! A reduced semantic palette in the shape of the full application theme:
//! background/surface/text/border colors plus focus, accent and status
//! colors. Dialog-level background/accent overrides from the specification
//! are applied on top of the default theme.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic colors used by the dialog renderer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Dim overlay painted over the owner surface behind the modal
    pub overlay: Color,
    /// Dialog background
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
    pub accent: Color,
    pub selection: Color,
    pub error: Color,
    pub link: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            overlay: Color::Rgb(23, 23, 23),
            surface: Color::Rgb(38, 38, 38),
            text: Color::Rgb(229, 229, 229),
            text_muted: Color::Rgb(115, 115, 115),
            border: Color::Rgb(82, 82, 82),
            border_focus: Color::Rgb(130, 130, 255),
            accent: Color::Rgb(130, 130, 255),
            selection: Color::Rgb(64, 64, 64),
            error: Color::Rgb(239, 68, 68),
            link: Color::Rgb(59, 130, 246),
        }
    }
}

impl Theme {
    /// Apply dialog-level color overrides on top of the default theme
    pub fn with_overrides(background: Option<&str>, accent: Option<&str>) -> Self {
        let mut theme = Self::default();
        if let Some(color) = background.and_then(parse_color) {
            theme.surface = color;
        }
        if let Some(color) = accent.and_then(parse_color) {
            theme.accent = color;
            theme.border_focus = color;
        }
        theme
    }

    pub fn focus_style(&self) -> Style {
        Style::default()
            .fg(self.border_focus)
            .add_modifier(Modifier::BOLD)
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }
}

/// Parse a color name (`"red"`) or hex value (`"#82aaff"`)
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

/// Font attributes carried by prompts and the dialog itself
///
/// Unset prompt attributes inherit the dialog-level values once, at bind
/// time. Family and size travel with the specification for callers that
/// round-trip it; in the terminal medium only the color takes effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: Option<String>,
    pub size: Option<u16>,
    pub color: Option<String>,
}

impl FontSpec {
    /// Fill unset attributes from the dialog-level defaults
    pub fn merged_with(&self, defaults: &FontSpec) -> FontSpec {
        FontSpec {
            family: self.family.clone().or_else(|| defaults.family.clone()),
            size: self.size.or(defaults.size),
            color: self.color.clone().or_else(|| defaults.color.clone()),
        }
    }

    /// The effective text style under the given theme
    pub fn style(&self, theme: &Theme) -> Style {
        let fg = self
            .color
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(theme.text);
        Style::default().fg(fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("#102030"), Some(Color::Rgb(16, 32, 48)));
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn test_font_inheritance_resolves_unset_fields_only() {
        let dialog = FontSpec {
            family: Some("monospace".into()),
            size: Some(12),
            color: Some("gray".into()),
        };
        let prompt = FontSpec {
            color: Some("red".into()),
            ..FontSpec::default()
        };

        let merged = prompt.merged_with(&dialog);
        assert_eq!(merged.family.as_deref(), Some("monospace"));
        assert_eq!(merged.size, Some(12));
        assert_eq!(merged.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_theme_overrides() {
        let theme = Theme::with_overrides(Some("#000000"), Some("yellow"));
        assert_eq!(theme.surface, Color::Rgb(0, 0, 0));
        assert_eq!(theme.accent, Color::Yellow);
        assert_eq!(theme.border_focus, Color::Yellow);
    }
}
