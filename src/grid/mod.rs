//! Grid sub-engine
//!
//! Binds one ordered row sequence to a selectable, filterable table view.
//! Selections are recomputed into the shared answer map on every change,
//! under the grid's reserved `grid_select<k>` key. Filtering always
//! recomputes the displayed subset from the original backing sequence,
//! never from the already-filtered view.

pub mod filter;

pub use filter::{CompiledFilter, FilterOp, FilterSpec};

use crate::answers::{grid_select_key, Answers};
use crate::spec::SelectionMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::collections::BTreeSet;

/// Column used when rows are scalars or the caller asked for a list view
const VALUE_COLUMN: &str = "Value";

/// Live state of one grid instance
pub struct GridView {
    /// 1-based instance number; keys the `grid_select<k>` answer entry
    instance: usize,
    /// Original backing sequence, in caller order
    rows: Vec<Value>,
    columns: Vec<String>,
    as_list: bool,
    selection_mode: SelectionMode,
    search_hidden: bool,
    pub filter: FilterSpec,
    /// Indices into `rows` currently displayed
    visible: Vec<usize>,
    /// Cursor position within `visible`
    cursor: usize,
    /// Column cursor, used by cell selection
    cursor_col: usize,
    /// Selected original row indices (multi-row mode)
    selected: BTreeSet<usize>,
    /// No answer is written until the user makes a first selection
    has_selection: bool,
    answers: Answers,
    focused: bool,
}

impl GridView {
    pub fn new(
        instance: usize,
        rows: Vec<Value>,
        as_list: bool,
        selection_mode: SelectionMode,
        search_hidden: bool,
        answers: Answers,
    ) -> Self {
        let columns = derive_columns(&rows, as_list);
        let visible = (0..rows.len()).collect();
        answers
            .borrow_mut()
            .set(grid_select_key(instance), Value::Null);
        Self {
            instance,
            rows,
            columns,
            as_list,
            selection_mode,
            search_hidden,
            filter: FilterSpec::default(),
            visible,
            cursor: 0,
            cursor_col: 0,
            selected: BTreeSet::new(),
            has_selection: false,
            answers,
            focused: false,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn search_hidden(&self) -> bool {
        self.search_hidden
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Display-only grids take no focus at all
    pub fn focusable(&self) -> bool {
        self.selection_mode != SelectionMode::None || !self.search_hidden
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn is_row_selected(&self, visible_index: usize) -> bool {
        match self.selection_mode {
            SelectionMode::MultiRow => self
                .visible
                .get(visible_index)
                .is_some_and(|original| self.selected.contains(original)),
            _ => self.has_selection && visible_index == self.cursor,
        }
    }

    /// Rows currently displayed, in backing order
    pub fn displayed(&self) -> Vec<&Value> {
        self.visible.iter().map(|&index| &self.rows[index]).collect()
    }

    /// The full backing sequence, regardless of filtering
    pub fn all_rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn displayed_count(&self) -> usize {
        self.visible.len()
    }

    /// `"<shown> / <total> Results"` while filtered, `"<total> Results"`
    /// otherwise
    pub fn counter_text(&self) -> String {
        if self.filter.text.is_empty() {
            format!("{} Results", self.rows.len())
        } else {
            format!("{} / {} Results", self.visible.len(), self.rows.len())
        }
    }

    /// Stringified cell for filtering and display
    pub fn cell_text(&self, row: &Value, column: usize) -> String {
        let value = if self.as_list || !row.is_object() {
            row.clone()
        } else {
            self.columns
                .get(column)
                .and_then(|name| row.get(name))
                .cloned()
                .unwrap_or(Value::Null)
        };
        value_text(&value)
    }

    /// Route one key event; returns whether the grid consumed it
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.selection_mode == SelectionMode::None && self.search_hidden {
            return false;
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('c') if !self.search_hidden => {
                    self.filter.column = (self.filter.column + 1) % self.columns.len().max(1);
                    self.refilter();
                    true
                }
                KeyCode::Char('o') if !self.search_hidden => {
                    self.filter.op = self.filter.op.cycled();
                    self.refilter();
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Up if self.selection_mode != SelectionMode::None => {
                self.move_cursor(-1);
                true
            }
            KeyCode::Down if self.selection_mode != SelectionMode::None => {
                self.move_cursor(1);
                true
            }
            KeyCode::Left if self.selection_mode == SelectionMode::SingleCell => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
                self.sync_answer();
                true
            }
            KeyCode::Right if self.selection_mode == SelectionMode::SingleCell => {
                if self.cursor_col + 1 < self.columns.len() {
                    self.cursor_col += 1;
                }
                self.sync_answer();
                true
            }
            KeyCode::Char(' ') if self.selection_mode == SelectionMode::MultiRow => {
                self.toggle_current();
                true
            }
            KeyCode::Char(c) if !self.search_hidden => {
                self.filter.text.push(c);
                self.refilter();
                true
            }
            KeyCode::Backspace if !self.search_hidden => {
                if self.filter.text.pop().is_some() {
                    self.refilter();
                }
                true
            }
            _ => false,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        self.cursor = match delta {
            d if d < 0 => self.cursor.saturating_sub(1),
            _ => (self.cursor + 1).min(last),
        };
        self.has_selection = true;
        self.sync_answer();
    }

    fn toggle_current(&mut self) {
        let Some(&original) = self.visible.get(self.cursor) else {
            return;
        };
        if !self.selected.remove(&original) {
            self.selected.insert(original);
        }
        self.has_selection = true;
        self.sync_answer();
    }

    /// Recompute the displayed subset from the original backing sequence
    pub fn refilter(&mut self) {
        let compiled = self.filter.compile();
        let column = self.filter.column;
        self.visible = (0..self.rows.len())
            .filter(|&index| compiled.matches(&self.cell_text(&self.rows[index], column)))
            .collect();
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
        if self.has_selection {
            self.sync_answer();
        }
    }

    /// Recompute the `grid_select<k>` answer entry from the current
    /// selection state
    fn sync_answer(&self) {
        let payload = if !self.has_selection || self.visible.is_empty() {
            match self.selection_mode {
                // Toggled rows survive filtering in multi-row mode.
                SelectionMode::MultiRow if self.has_selection => self.multi_payload(),
                _ => Value::Null,
            }
        } else {
            match self.selection_mode {
                SelectionMode::None => Value::Null,
                SelectionMode::SingleCell => {
                    let row = &self.rows[self.visible[self.cursor]];
                    Value::String(self.cell_text(row, self.cursor_col))
                }
                SelectionMode::SingleRow => self.rows[self.visible[self.cursor]].clone(),
                SelectionMode::MultiRow => self.multi_payload(),
            }
        };
        self.answers
            .borrow_mut()
            .set(grid_select_key(self.instance), payload);
    }

    fn multi_payload(&self) -> Value {
        if self.selected.is_empty() {
            return Value::Null;
        }
        Value::Array(
            self.selected
                .iter()
                .map(|&index| self.rows[index].clone())
                .collect(),
        )
    }
}

/// Union of row-object keys in first-seen order; scalar rows and list
/// view collapse to a single value column
fn derive_columns(rows: &[Value], as_list: bool) -> Vec<String> {
    if as_list {
        return vec![VALUE_COLUMN.to_string()];
    }
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(fields) = row {
            for key in fields.keys() {
                if !columns.iter().any(|existing| existing == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    if columns.is_empty() {
        columns.push(VALUE_COLUMN.to_string());
    }
    columns
}

/// Plain display form: strings render bare, null renders empty
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{shared, AnswerMap};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    fn people() -> Vec<Value> {
        vec![
            json!({"n": "Alice"}),
            json!({"n": "Bob"}),
            json!({"n": "Carol"}),
        ]
    }

    fn grid(mode: SelectionMode) -> GridView {
        GridView::new(1, people(), false, mode, false, shared(AnswerMap::new()))
    }

    #[test]
    fn test_columns_first_seen_union() {
        let rows = vec![json!({"a": 1, "b": 2}), json!({"c": 3, "a": 4})];
        assert_eq!(derive_columns(&rows, false), vec!["a", "b", "c"]);
        assert_eq!(derive_columns(&rows, true), vec![VALUE_COLUMN]);
    }

    #[test]
    fn test_starts_with_filter_and_counter() {
        let mut grid = grid(SelectionMode::SingleRow);
        assert_eq!(grid.counter_text(), "3 Results");

        grid.filter.op = FilterOp::StartsWith;
        grid.filter.text = "A".to_string();
        grid.refilter();

        assert_eq!(grid.displayed_count(), 1);
        assert_eq!(grid.displayed()[0], &json!({"n": "Alice"}));
        assert_eq!(grid.counter_text(), "1 / 3 Results");

        grid.filter.text.clear();
        grid.refilter();
        assert_eq!(grid.displayed_count(), 3);
        assert_eq!(grid.counter_text(), "3 Results");
    }

    #[test]
    fn test_filter_applies_to_original_sequence() {
        let mut grid = grid(SelectionMode::SingleRow);
        grid.filter.text = "Bob".to_string();
        grid.refilter();
        assert_eq!(grid.displayed_count(), 1);

        // Widening the filter re-expands from the original rows, not from
        // the narrowed view.
        grid.filter.text = "o".to_string();
        grid.refilter();
        assert_eq!(grid.displayed_count(), 2);
    }

    #[test]
    fn test_single_row_selection_payload() {
        let mut grid = grid(SelectionMode::SingleRow);
        let answers = grid.answers.clone();
        assert_eq!(answers.borrow().get("grid_select1"), Some(&Value::Null));

        grid.handle_key(key(KeyCode::Down));
        assert_eq!(
            answers.borrow().get("grid_select1"),
            Some(&json!({"n": "Bob"}))
        );
    }

    #[test]
    fn test_single_cell_selection_payload() {
        let rows = vec![json!({"n": "Alice", "age": 30})];
        let answers = shared(AnswerMap::new());
        let mut grid = GridView::new(
            1,
            rows,
            false,
            SelectionMode::SingleCell,
            false,
            answers.clone(),
        );

        grid.handle_key(key(KeyCode::Down));
        assert_eq!(answers.borrow().string("grid_select1"), Some("Alice"));

        grid.handle_key(key(KeyCode::Right));
        assert_eq!(answers.borrow().string("grid_select1"), Some("30"));
    }

    #[test]
    fn test_multi_row_toggle_and_order() {
        let mut grid = grid(SelectionMode::MultiRow);
        let answers = grid.answers.clone();

        grid.handle_key(key(KeyCode::Down)); // cursor on Bob
        grid.handle_key(key(KeyCode::Char(' ')));
        grid.handle_key(key(KeyCode::Up)); // cursor on Alice
        grid.handle_key(key(KeyCode::Char(' ')));

        // Backing order, not toggle order.
        assert_eq!(
            answers.borrow().get("grid_select1"),
            Some(&json!([{"n": "Alice"}, {"n": "Bob"}]))
        );

        grid.handle_key(key(KeyCode::Char(' '))); // untoggle Alice
        assert_eq!(
            answers.borrow().get("grid_select1"),
            Some(&json!([{"n": "Bob"}]))
        );
    }

    #[test]
    fn test_typing_edits_filter_when_search_shown() {
        let mut grid = grid(SelectionMode::SingleRow);
        assert!(grid.handle_key(key(KeyCode::Char('B'))));
        assert_eq!(grid.filter.text, "B");
        assert_eq!(grid.displayed_count(), 1);

        assert!(grid.handle_key(key(KeyCode::Backspace)));
        assert_eq!(grid.displayed_count(), 3);
    }

    #[test]
    fn test_hidden_search_ignores_typing() {
        let answers = shared(AnswerMap::new());
        let mut grid = GridView::new(
            1,
            people(),
            false,
            SelectionMode::SingleRow,
            true,
            answers,
        );
        assert!(!grid.handle_key(key(KeyCode::Char('B'))));
        assert_eq!(grid.filter.text, "");
    }

    #[test]
    fn test_alt_keys_cycle_column_and_operator() {
        let rows = vec![json!({"a": "x", "b": "y"})];
        let answers = shared(AnswerMap::new());
        let mut grid = GridView::new(
            1,
            rows,
            false,
            SelectionMode::SingleRow,
            false,
            answers,
        );

        assert!(grid.handle_key(alt('c')));
        assert_eq!(grid.filter.column, 1);
        assert!(grid.handle_key(alt('o')));
        assert_eq!(grid.filter.op, FilterOp::NotContains);
    }

    #[test]
    fn test_none_mode_is_inert() {
        let answers = shared(AnswerMap::new());
        let mut grid = GridView::new(
            1,
            people(),
            false,
            SelectionMode::None,
            true,
            answers.clone(),
        );
        assert!(!grid.focusable());
        assert!(!grid.handle_key(key(KeyCode::Down)));
        assert_eq!(answers.borrow().get("grid_select1"), Some(&Value::Null));
    }
}
