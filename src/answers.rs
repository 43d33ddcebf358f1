//! The shared answer map
//!
//! Every interactive element of a dialog writes into one `AnswerMap`:
//! prompts under their name, buttons under their name or label, plus the
//! reserved `TimedOut` and `grid_select<k>` entries. The map is created
//! once per invocation, shared by reference across all widget bindings for
//! the lifetime of the window, and returned to the caller at close.
//!
//! The engine is single-threaded (every handler runs to completion on the
//! UI thread), so the shared handle is `Rc<RefCell<_>>` rather than a lock.

use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Reserved key set to `true` when a configured timeout expires
pub const TIMED_OUT_KEY: &str = "TimedOut";

/// Reserved key carrying the selection payload of grid instance `k` (1-based)
pub fn grid_select_key(k: usize) -> String {
    format!("grid_select{}", k)
}

/// Flat `name -> value` record collected from one dialog invocation
///
/// Entries keep insertion order, which follows prompt declaration order, so
/// iterating the returned map mirrors the specification the caller wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMap {
    entries: Vec<(String, Value)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value for a key
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Insert or replace a value, keeping the original position on replace
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Get a value as a string, if it is one
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get a value as a boolean, if it is one
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Recover a password prompt's opaque value
    pub fn secret(&self, name: &str) -> Option<Secret> {
        self.get(name).and_then(Secret::from_value)
    }

    /// Consume the map into a JSON object, in insertion order of keys
    pub fn into_json(self) -> Value {
        let mut object = serde_json::Map::new();
        for (key, value) in self.entries {
            object.insert(key, value);
        }
        Value::Object(object)
    }
}

/// Shared handle to the answer map, cloned into every widget binding
pub type Answers = Rc<RefCell<AnswerMap>>;

/// Create the shared handle for one dialog invocation
pub fn shared(map: AnswerMap) -> Answers {
    Rc::new(RefCell::new(map))
}

/// Opaque wrapper for password input
///
/// Password widgets never write their characters into the answer map as a
/// plain string; they store the `Secret`'s value form instead. The wrapper
/// redacts itself in `Debug` output and only gives the characters back
/// through [`Secret::reveal`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

const SECRET_TAG: &str = "$secret";

impl Secret {
    pub fn new(chars: impl Into<String>) -> Self {
        Self(chars.into())
    }

    /// The protected characters
    pub fn reveal(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value form stored in the answer map
    pub fn into_value(self) -> Value {
        serde_json::json!({ SECRET_TAG: self.0 })
    }

    /// Read a secret back out of its value form
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get(SECRET_TAG)
            .and_then(Value::as_str)
            .map(|chars| Self(chars.to_string()))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(****)")
    }
}
