//! Pre-close validation pass
//!
//! Runs only when a non-cancel, non-custom button is activated. Prompts
//! are checked in declaration order against the answer map's current
//! values; the first failure wins and blocks the close. Failure never
//! touches the map, so all entered input survives.

use crate::answers::{AnswerMap, Secret};
use crate::spec::Prompt;
use regex::Regex;
use serde_json::Value;

/// Result of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Passed,
    Failed {
        /// Index of the failing prompt, the refocus target
        prompt_index: usize,
        /// User-facing description of the violated constraint
        message: String,
    },
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed)
    }
}

/// Check every constrained prompt against the current answers
pub fn validate(prompts: &[Prompt], answers: &AnswerMap) -> ValidationOutcome {
    for (index, prompt) in prompts.iter().enumerate() {
        if !prompt.has_constraint() {
            continue;
        }
        let name = prompt.effective_name(index);
        let text = answer_text(answers.get(&name));

        if prompt.required && text.trim().is_empty() {
            return ValidationOutcome::Failed {
                prompt_index: index,
                message: format!("'{}' is required.", display_name(prompt, &name)),
            };
        }

        if let Some(pattern) = &prompt.pattern {
            // Patterns were compiled once at spec check time; a failure
            // here means the regex crate rejected it after all, which the
            // structural check prevents.
            let Ok(regex) = Regex::new(pattern) else {
                continue;
            };
            if !text.is_empty() && !regex.is_match(&text) {
                let message = prompt.pattern_hint.clone().unwrap_or_else(|| {
                    format!(
                        "'{}' must match the pattern {}.",
                        display_name(prompt, &name),
                        pattern
                    )
                });
                return ValidationOutcome::Failed {
                    prompt_index: index,
                    message,
                };
            }
        }
    }
    ValidationOutcome::Passed
}

/// Prompts are reported by their message when they have one
fn display_name<'a>(prompt: &'a Prompt, name: &'a str) -> &'a str {
    prompt.message.as_deref().unwrap_or(name)
}

/// Textual view of an answer value for constraint checks
fn answer_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => match Secret::from_value(other) {
            Some(secret) => secret.reveal().to_string(),
            None => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Secret;
    use serde_json::json;

    fn answers(pairs: &[(&str, Value)]) -> AnswerMap {
        let mut map = AnswerMap::new();
        for (key, value) in pairs {
            map.set(key.to_string(), value.clone());
        }
        map
    }

    #[test]
    fn test_unconstrained_prompts_are_skipped() {
        let prompts = vec![Prompt::text("free")];
        let map = answers(&[("free", Value::Null)]);
        assert!(validate(&prompts, &map).passed());
    }

    #[test]
    fn test_required_fails_on_empty_and_null() {
        let prompts = vec![Prompt::text("name").message("Your name").required(true)];

        for empty in [Value::Null, json!(""), json!("   ")] {
            let map = answers(&[("name", empty)]);
            let outcome = validate(&prompts, &map);
            assert_eq!(
                outcome,
                ValidationOutcome::Failed {
                    prompt_index: 0,
                    message: "'Your name' is required.".to_string(),
                }
            );
        }

        let map = answers(&[("name", json!("Ada"))]);
        assert!(validate(&prompts, &map).passed());
    }

    #[test]
    fn test_first_failure_wins_in_declaration_order() {
        let prompts = vec![
            Prompt::text("a"),
            Prompt::text("b").required(true),
            Prompt::text("c").required(true),
        ];
        let map = answers(&[("a", Value::Null), ("b", json!("")), ("c", json!(""))]);
        let outcome = validate(&prompts, &map);
        assert_eq!(
            outcome,
            ValidationOutcome::Failed {
                prompt_index: 1,
                message: "'b' is required.".to_string(),
            }
        );
    }

    #[test]
    fn test_pattern_with_hint() {
        let prompts = vec![Prompt::text("ticket")
            .pattern(r"^[A-Z]+-\d+$")
            .pattern_hint("Tickets look like ABC-123.")];

        let map = answers(&[("ticket", json!("nope"))]);
        let outcome = validate(&prompts, &map);
        assert_eq!(
            outcome,
            ValidationOutcome::Failed {
                prompt_index: 0,
                message: "Tickets look like ABC-123.".to_string(),
            }
        );

        let map = answers(&[("ticket", json!("OPS-42"))]);
        assert!(validate(&prompts, &map).passed());
    }

    #[test]
    fn test_pattern_skips_empty_unless_required() {
        let prompts = vec![Prompt::text("opt").pattern(r"^\d+$")];
        let map = answers(&[("opt", json!(""))]);
        assert!(validate(&prompts, &map).passed());
    }

    #[test]
    fn test_required_secret_checks_revealed_chars() {
        let prompts = vec![Prompt::password("pw").required(true)];

        let map = answers(&[("pw", Secret::new("").into_value())]);
        assert!(!validate(&prompts, &map).passed());

        let map = answers(&[("pw", Secret::new("hunter2").into_value())]);
        assert!(validate(&prompts, &map).passed());
    }
}
