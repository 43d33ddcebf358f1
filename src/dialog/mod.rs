//! Dialog lifecycle controller
//!
//! Owns the state machine `Constructing -> Shown -> {Validating <-> Shown}
//! -> Closing -> Closed`: modal presentation, the synchronous event loop,
//! focus order, the timeout countdown, button activation (validated,
//! cancel, custom and reserved), and nested secondary modals. The answer
//! map is finalized and returned when the loop leaves `Closing`.

pub mod toolkit;

pub use toolkit::{TerminalToolkit, Toolkit, UiEvent};

use crate::answers::{shared, AnswerMap, Answers, TIMED_OUT_KEY};
use crate::error::DialogResult;
use crate::grid::GridView;
use crate::layout::{self, Node};
use crate::platform::{DecodedImage, PickOutcome, Platform, ViewOutcome};
use crate::render;
use crate::spec::{
    Alignment, Button, CloseRequest, DialogSpec, IconKind, Prompt, WindowOptions,
    COPY_BUTTON, EXPLORE_BUTTON, SAVE_BUTTON,
};
use crate::theme::Theme;
use crate::validate::{validate, ValidationOutcome};
use crate::widgets::{self, Effect, InputWidget};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Lifecycle phases of one dialog invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogPhase {
    Constructing,
    Shown,
    Validating,
    Closing,
    Closed,
}

/// Anything that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Prompt(usize),
    Grid(usize),
    Button(usize),
}

/// Actions the engine wires onto its own reserved buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reserved {
    Explore,
    Save,
    Copy,
}

/// A button as it lives inside a running session
pub struct ButtonRuntime {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) is_default: bool,
    pub(crate) is_cancel: bool,
    action: Option<crate::spec::ButtonAction>,
    reserved: Option<Reserved>,
}

impl ButtonRuntime {
    fn from_button(button: Button) -> Self {
        let name = button.effective_name().to_string();
        Self {
            name,
            text: button.text,
            is_default: button.is_default,
            is_cancel: button.is_cancel,
            action: button.on_click,
            reserved: None,
        }
    }

    fn reserved(text: &str, action: Reserved) -> Self {
        Self {
            name: text.to_string(),
            text: text.to_string(),
            is_default: false,
            is_cancel: false,
            action: None,
            reserved: Some(action),
        }
    }

    /// Custom and reserved buttons own their behavior entirely: no
    /// answer entry, no engine-driven close
    fn is_custom(&self) -> bool {
        self.action.is_some() || self.reserved.is_some()
    }
}

/// The live state of one dialog invocation
///
/// Handed to the caller's preparation hook after construction; everything
/// else stays engine-internal.
pub struct Session {
    pub(crate) title: Option<String>,
    pub(crate) icon: IconKind,
    pub(crate) alignment: Alignment,
    pub(crate) window: WindowOptions,
    pub(crate) theme: Theme,
    pub(crate) tree: Node,
    pub(crate) prompts: Vec<Prompt>,
    pub(crate) widgets: Vec<Box<dyn InputWidget>>,
    pub(crate) grids: Vec<GridView>,
    pub(crate) buttons: Vec<ButtonRuntime>,
    pub(crate) answers: Answers,
    pub(crate) message: Vec<String>,
    pub(crate) image: Option<DecodedImage>,
    pub(crate) countdown_remaining: Option<u64>,
    pub(crate) active_tab: usize,
    tab_count: usize,
    collapsed: HashSet<usize>,
    focus_order: Vec<FocusTarget>,
    focus_index: Option<usize>,
    phase: DialogPhase,
}

impl Session {
    fn build(mut spec: DialogSpec, platform: &mut Platform) -> DialogResult<Session> {
        spec.resolve_roles()?;

        let answers = shared(AnswerMap::new());

        // Prompts seed their defaults in declaration order.
        let widgets: Vec<Box<dyn InputWidget>> = spec
            .prompts
            .iter()
            .enumerate()
            .map(|(index, prompt)| widgets::build(prompt, index, answers.clone(), &spec.font))
            .collect();

        // Reserved buttons slot in immediately after the first caller
        // button: Explore and Save when a searchable grid is up, Copy
        // when requested alongside a message.
        let copy = spec.copy_action_enabled();
        let grid_actions = spec.grid_actions_enabled();
        let mut buttons: Vec<ButtonRuntime> = spec
            .buttons
            .drain(..)
            .map(ButtonRuntime::from_button)
            .collect();
        let insert_at = buttons.len().min(1);
        if copy {
            buttons.insert(insert_at, ButtonRuntime::reserved(COPY_BUTTON, Reserved::Copy));
        }
        if grid_actions {
            buttons.insert(insert_at, ButtonRuntime::reserved(SAVE_BUTTON, Reserved::Save));
            buttons.insert(
                insert_at,
                ButtonRuntime::reserved(EXPLORE_BUTTON, Reserved::Explore),
            );
        }

        {
            let mut map = answers.borrow_mut();
            for button in &buttons {
                if !button.is_custom() {
                    map.set(button.name.clone(), Value::Bool(false));
                }
            }
            if spec.timeout_secs > 0 {
                map.set(TIMED_OUT_KEY, Value::Bool(false));
            }
        }

        // The tree must see the grid sequences before they move into
        // their views.
        let tree = layout::compile(&spec, buttons.len());
        let tab_count = count_tabs(&tree);

        let grids: Vec<GridView> = spec
            .grid_data
            .drain(..)
            .enumerate()
            .map(|(index, rows)| {
                GridView::new(
                    index + 1,
                    rows,
                    spec.grid_as_list,
                    spec.selection_mode,
                    spec.hide_grid_search,
                    answers.clone(),
                )
            })
            .collect();

        // An unreadable image degrades to omitting the banner.
        let image = spec.image.as_ref().and_then(|source| {
            match platform.images.decode(source) {
                Ok(decoded) => Some(decoded),
                Err(error) => {
                    warn!("dialog image dropped: {:#}", error);
                    None
                }
            }
        });
        let theme = Theme::with_overrides(
            spec.background_color.as_deref(),
            spec.accent_color.as_deref(),
        );

        let mut session = Session {
            title: spec.title,
            icon: spec.icon,
            alignment: spec.content_alignment,
            window: spec.window,
            theme,
            tree,
            prompts: spec.prompts,
            widgets,
            grids,
            buttons,
            answers,
            message: spec.message,
            image,
            countdown_remaining: (spec.timeout_secs > 0).then_some(spec.timeout_secs),
            active_tab: 0,
            tab_count,
            collapsed: HashSet::new(),
            focus_order: Vec::new(),
            focus_index: None,
            phase: DialogPhase::Constructing,
        };
        session.rebuild_focus();
        session.assign_initial_focus();
        Ok(session)
    }

    /// Shared handle to the live answer map
    pub fn answers(&self) -> Answers {
        self.answers.clone()
    }

    /// Replace a prompt's textual value through its normal change binding
    pub fn set_prompt_text(&mut self, name: &str, text: impl Into<String>) {
        if let Some(widget) = self.widgets.iter_mut().find(|w| w.name() == name) {
            widget.set_text(text.into());
        }
    }

    /// Move focus to the named prompt
    pub fn focus_prompt(&mut self, name: &str) {
        if let Some(index) = self.widgets.iter().position(|w| w.name() == name) {
            self.focus_prompt_index(index);
        }
    }

    pub(crate) fn focus_target(&self) -> Option<FocusTarget> {
        self.focus_index.map(|index| self.focus_order[index])
    }

    pub(crate) fn is_collapsed(&self, seq: usize) -> bool {
        self.collapsed.contains(&seq)
    }

    /// Focusables in visual order: widgets and grids from the tree, then
    /// buttons. Widgets inside collapsed expanders or inactive tabs drop
    /// out.
    fn rebuild_focus(&mut self) {
        let previous = self.focus_target();
        let mut order = Vec::new();
        let mut seq = 0usize;
        walk_focus(
            &self.tree,
            &self.widgets,
            &self.grids,
            &self.collapsed,
            self.active_tab,
            true,
            &mut seq,
            &mut order,
        );
        self.focus_order = order;
        self.focus_index = previous
            .and_then(|target| self.focus_order.iter().position(|t| *t == target))
            .or(if self.focus_order.is_empty() { None } else { Some(0) });
        self.apply_focus_flags();
    }

    /// First empty required prompt, else first empty prompt, else the
    /// first prompt, else the first focusable
    fn assign_initial_focus(&mut self) {
        let mut chosen = None;
        for (position, target) in self.focus_order.iter().enumerate() {
            if let FocusTarget::Prompt(index) = target {
                let empty = self.widgets[*index].is_empty();
                if empty && self.prompts[*index].required {
                    chosen = Some(position);
                    break;
                }
                if chosen.is_none() && empty {
                    chosen = Some(position);
                }
            }
        }
        let chosen = chosen.or_else(|| {
            self.focus_order
                .iter()
                .position(|target| matches!(target, FocusTarget::Prompt(_)))
        });
        if let Some(position) = chosen {
            self.focus_index = Some(position);
        }
        self.apply_focus_flags();
        self.fire_on_focus();
    }

    fn apply_focus_flags(&mut self) {
        let focused = self.focus_target();
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            widget.set_focus(focused == Some(FocusTarget::Prompt(index)));
        }
        for (index, grid) in self.grids.iter_mut().enumerate() {
            grid.set_focus(focused == Some(FocusTarget::Grid(index)));
        }
    }

    fn fire_on_focus(&mut self) {
        if let Some(FocusTarget::Prompt(index)) = self.focus_target() {
            self.widgets[index].on_focus();
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let len = self.focus_order.len();
        if len == 0 {
            return;
        }
        let current = self.focus_index.unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus_index = Some(next);
        self.apply_focus_flags();
        self.fire_on_focus();
    }

    fn focus_prompt_index(&mut self, prompt_index: usize) {
        if let Some(position) = self
            .focus_order
            .iter()
            .position(|target| *target == FocusTarget::Prompt(prompt_index))
        {
            self.focus_index = Some(position);
            self.apply_focus_flags();
            self.fire_on_focus();
        }
    }

    fn switch_tab(&mut self, forward: bool) {
        if self.tab_count == 0 {
            return;
        }
        self.active_tab = if forward {
            (self.active_tab + 1) % self.tab_count
        } else {
            (self.active_tab + self.tab_count - 1) % self.tab_count
        };
        self.rebuild_focus();
    }

    /// Toggle the innermost expander around the focused prompt
    fn toggle_collapse(&mut self) {
        let Some(FocusTarget::Prompt(prompt_index)) = self.focus_target() else {
            return;
        };
        let mut seq = 0usize;
        let mut stack = Vec::new();
        let Some(group) = find_collapse_group(&self.tree, prompt_index, &mut seq, &mut stack)
        else {
            return;
        };
        if !self.collapsed.remove(&group) {
            self.collapsed.insert(group);
        }
        self.rebuild_focus();
    }

    fn set_phase(&mut self, phase: DialogPhase) {
        if self.phase != phase {
            debug!(?phase, "dialog phase");
            self.phase = phase;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_focus(
    node: &Node,
    widgets: &[Box<dyn InputWidget>],
    grids: &[GridView],
    collapsed: &HashSet<usize>,
    active_tab: usize,
    visible: bool,
    seq: &mut usize,
    out: &mut Vec<FocusTarget>,
) {
    match node {
        Node::Stack(children) => {
            for child in children {
                walk_focus(child, widgets, grids, collapsed, active_tab, visible, seq, out);
            }
        }
        Node::Group {
            collapsible, body, ..
        } => {
            let show = if *collapsible {
                let id = *seq;
                *seq += 1;
                visible && !collapsed.contains(&id)
            } else {
                visible
            };
            walk_focus(body, widgets, grids, collapsed, active_tab, show, seq, out);
        }
        Node::Tabs(pages) => {
            for (index, (_, page)) in pages.iter().enumerate() {
                walk_focus(
                    page,
                    widgets,
                    grids,
                    collapsed,
                    active_tab,
                    visible && index == active_tab,
                    seq,
                    out,
                );
            }
        }
        Node::PromptRef(index) => {
            if visible && widgets[*index].focusable() {
                out.push(FocusTarget::Prompt(*index));
            }
        }
        Node::GridRef(index) => {
            if visible && grids[*index].focusable() {
                out.push(FocusTarget::Grid(*index));
            }
        }
        Node::ButtonRow(indices) => {
            if visible {
                out.extend(indices.iter().map(|&index| FocusTarget::Button(index)));
            }
        }
        _ => {}
    }
}

/// Innermost collapsible group (by sequence id) containing the prompt
fn find_collapse_group(
    node: &Node,
    prompt_index: usize,
    seq: &mut usize,
    stack: &mut Vec<usize>,
) -> Option<usize> {
    match node {
        Node::Stack(children) => children
            .iter()
            .find_map(|child| find_collapse_group(child, prompt_index, seq, stack)),
        Node::Group {
            collapsible, body, ..
        } => {
            if *collapsible {
                let id = *seq;
                *seq += 1;
                stack.push(id);
                let found = find_collapse_group(body, prompt_index, seq, stack);
                stack.pop();
                found
            } else {
                find_collapse_group(body, prompt_index, seq, stack)
            }
        }
        Node::Tabs(pages) => pages
            .iter()
            .find_map(|(_, page)| find_collapse_group(page, prompt_index, seq, stack)),
        Node::PromptRef(index) if *index == prompt_index => stack.last().copied(),
        _ => None,
    }
}

fn count_tabs(node: &Node) -> usize {
    match node {
        Node::Stack(children) => children.iter().map(count_tabs).sum(),
        Node::Group { body, .. } => count_tabs(body),
        Node::Tabs(pages) => pages.len(),
        _ => 0,
    }
}

enum Flow {
    Continue,
    Close,
}

/// Run one dialog to completion and return its finalized answer map
pub fn run(
    mut spec: DialogSpec,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
) -> DialogResult<AnswerMap> {
    let prepare = spec.prepare.take();
    let mut session = Session::build(spec, platform)?;

    toolkit.begin_modal()?;
    let result = run_loop(&mut session, prepare, platform, toolkit);
    toolkit.end_modal()?;
    result
}

fn run_loop(
    session: &mut Session,
    prepare: Option<crate::spec::PrepareHook>,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
) -> DialogResult<AnswerMap> {
    if let Some(hook) = prepare {
        hook(session);
    }
    session.set_phase(DialogPhase::Shown);

    let tick = session
        .countdown_remaining
        .map(|_| Duration::from_secs(1));

    loop {
        toolkit.draw(&mut |frame| render::draw(frame, session))?;

        match toolkit.next_event(tick)? {
            None => {
                // One second of idle time elapsed.
                if let Some(remaining) = session.countdown_remaining {
                    let remaining = remaining.saturating_sub(1);
                    session.countdown_remaining = Some(remaining);
                    if remaining == 0 {
                        // Timeout is an unconditional, unvalidated close.
                        session
                            .answers
                            .borrow_mut()
                            .set(TIMED_OUT_KEY, Value::Bool(true));
                        break;
                    }
                }
            }
            Some(UiEvent::Resize) => continue,
            Some(UiEvent::Key(key)) => match handle_key(session, platform, toolkit, key)? {
                Flow::Continue => {}
                Flow::Close => break,
            },
        }
    }

    session.set_phase(DialogPhase::Closing);
    let result = session.answers.borrow().clone();
    session.set_phase(DialogPhase::Closed);
    Ok(result)
}

fn handle_key(
    session: &mut Session,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
    key: crossterm::event::KeyEvent,
) -> DialogResult<Flow> {
    use crossterm::event::{KeyCode, KeyModifiers};

    match key.code {
        KeyCode::Tab if key.modifiers.is_empty() => {
            session.focus_step(true);
            return Ok(Flow::Continue);
        }
        KeyCode::BackTab => {
            session.focus_step(false);
            return Ok(Flow::Continue);
        }
        KeyCode::Esc => {
            if let Some(index) = session.buttons.iter().position(|b| b.is_cancel) {
                return activate_button(session, platform, toolkit, index);
            }
            return Ok(Flow::Continue);
        }
        KeyCode::Left if key.modifiers.contains(KeyModifiers::ALT) => {
            session.switch_tab(false);
            return Ok(Flow::Continue);
        }
        KeyCode::Right if key.modifiers.contains(KeyModifiers::ALT) => {
            session.switch_tab(true);
            return Ok(Flow::Continue);
        }
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            session.toggle_collapse();
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    match session.focus_target() {
        Some(FocusTarget::Prompt(index)) => {
            let reaction = session.widgets[index].handle_key(key);
            if let Some(effect) = reaction.effect {
                handle_effect(session, platform, toolkit, index, effect)?;
            }
            if !reaction.consumed && key.code == KeyCode::Enter {
                return activate_default(session, platform, toolkit);
            }
        }
        Some(FocusTarget::Grid(index)) => {
            let consumed = session.grids[index].handle_key(key);
            if !consumed && key.code == KeyCode::Enter {
                return activate_default(session, platform, toolkit);
            }
        }
        Some(FocusTarget::Button(index)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                return activate_button(session, platform, toolkit, index);
            }
        }
        None => {
            if key.code == KeyCode::Enter {
                return activate_default(session, platform, toolkit);
            }
        }
    }
    Ok(Flow::Continue)
}

fn activate_default(
    session: &mut Session,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
) -> DialogResult<Flow> {
    match session.buttons.iter().position(|b| b.is_default) {
        Some(index) => activate_button(session, platform, toolkit, index),
        None => Ok(Flow::Continue),
    }
}

/// The only paths into `Closing`: a validated default/plain button, the
/// cancel button, or a custom handler that requested it
fn activate_button(
    session: &mut Session,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
    index: usize,
) -> DialogResult<Flow> {
    if let Some(reserved) = session.buttons[index].reserved {
        run_reserved(session, platform, toolkit, reserved)?;
        return Ok(Flow::Continue);
    }

    if let Some(action) = session.buttons[index].action.as_mut() {
        let mut close = CloseRequest::new();
        {
            let mut map = session.answers.borrow_mut();
            action(&mut map, &mut close);
        }
        return Ok(if close.is_requested() {
            Flow::Close
        } else {
            Flow::Continue
        });
    }

    if session.buttons[index].is_cancel {
        let name = session.buttons[index].name.clone();
        session.answers.borrow_mut().set(name, Value::Bool(true));
        return Ok(Flow::Close);
    }

    session.set_phase(DialogPhase::Validating);
    let outcome = {
        let map = session.answers.borrow();
        validate(&session.prompts, &map)
    };
    match outcome {
        ValidationOutcome::Passed => {
            let name = session.buttons[index].name.clone();
            session.answers.borrow_mut().set(name, Value::Bool(true));
            Ok(Flow::Close)
        }
        ValidationOutcome::Failed {
            prompt_index,
            message,
        } => {
            // Block the close, tell the user, put them back on the
            // failing widget. Entered input stays untouched.
            session.set_phase(DialogPhase::Shown);
            message_dialog(toolkit, platform, "Validation", &message)?;
            session.focus_prompt_index(prompt_index);
            Ok(Flow::Continue)
        }
    }
}

fn run_reserved(
    session: &mut Session,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
    action: Reserved,
) -> DialogResult<()> {
    match action {
        Reserved::Explore => {
            let Some(grid) = session.grids.first() else {
                return Ok(());
            };
            let rows = grid.all_rows().to_vec();
            if platform.viewer.open(&rows) == ViewOutcome::Unsupported {
                let spec = DialogSpec::new("Explore")
                    .grid(rows)
                    .selection_mode(crate::spec::SelectionMode::None)
                    .hide_grid_search(true)
                    .button(Button::new("Close").cancel());
                run(spec, platform, toolkit)?;
            }
        }
        Reserved::Save => {
            let picked = pick_path(platform, toolkit, true, None)?;
            let Some(path) = picked else {
                return Ok(());
            };
            let Some(grid) = session.grids.first() else {
                return Ok(());
            };
            let headers = grid.columns().to_vec();
            let rows: Vec<Vec<String>> = grid
                .displayed()
                .iter()
                .map(|row| {
                    (0..headers.len())
                        .map(|column| grid.cell_text(row, column))
                        .collect()
                })
                .collect();
            match platform.csv.write(&headers, &rows, &path) {
                Ok(()) => {
                    if let Err(error) = platform.opener.open(&path.to_string_lossy()) {
                        message_dialog(toolkit, platform, "Error", &format!("{:#}", error))?;
                    }
                }
                Err(error) => {
                    message_dialog(toolkit, platform, "Error", &format!("{:#}", error))?;
                }
            }
        }
        Reserved::Copy => {
            let text = session.message.join("\n");
            if let Err(error) = platform.clipboard.set_text(&text) {
                message_dialog(toolkit, platform, "Error", &format!("{:#}", error))?;
            }
        }
    }
    Ok(())
}

fn handle_effect(
    session: &mut Session,
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
    source: usize,
    effect: Effect,
) -> DialogResult<()> {
    match effect {
        Effect::OpenTarget(target) => {
            if let Err(error) = platform.opener.open(&target) {
                message_dialog(toolkit, platform, "Error", &format!("{:#}", error))?;
            }
        }
        Effect::RadioChecked { scope } => {
            // Exclusivity across prompts sharing one scope: the displaced
            // sibling unchecks, clearing its own entry.
            for (index, widget) in session.widgets.iter_mut().enumerate() {
                if index != source && widget.radio_scope() == Some(scope.as_str()) {
                    widget.clear_checked();
                }
            }
        }
        Effect::PickFile { save } => {
            let initial = session
                .answers
                .borrow()
                .string(session.widgets[source].name())
                .map(PathBuf::from);
            let picked = pick_path(platform, toolkit, save, initial)?;
            if let Some(path) = picked {
                session.widgets[source].set_text(path.to_string_lossy().into_owned());
            }
        }
    }
    Ok(())
}

/// Ask the file-dialog collaborator for a path, falling back to a nested
/// path-entry dialog when this medium has no chooser
fn pick_path(
    platform: &mut Platform,
    toolkit: &mut dyn Toolkit,
    save: bool,
    initial: Option<PathBuf>,
) -> DialogResult<Option<PathBuf>> {
    match platform.files.pick(save, initial.as_deref()) {
        PickOutcome::Picked(path) => Ok(Some(path)),
        PickOutcome::Cancelled => Ok(None),
        PickOutcome::Unsupported => {
            let title = if save { "Save File" } else { "Open File" };
            let mut prompt = Prompt::text("path").message("Path").required(true);
            if let Some(path) = &initial {
                prompt = prompt.with_default(Value::String(path.to_string_lossy().into_owned()));
            }
            let spec = DialogSpec::new(title)
                .prompt(prompt)
                .buttons(["Cancel", "OK"])
                .default_button("OK")
                .cancel_button("Cancel");
            let result = run(spec, platform, toolkit)?;
            if result.boolean("OK") == Some(true) {
                Ok(result.string("path").map(PathBuf::from))
            } else {
                Ok(None)
            }
        }
    }
}

/// Secondary message modal, built with this same engine
pub fn message_dialog(
    toolkit: &mut dyn Toolkit,
    platform: &mut Platform,
    title: &str,
    text: &str,
) -> DialogResult<()> {
    let spec = DialogSpec::new(title).message(text).button("OK");
    run(spec, platform, toolkit).map(|_| ())
}

impl DialogSpec {
    /// Show the dialog on the current terminal with the native
    /// collaborator set
    pub fn show(self) -> DialogResult<AnswerMap> {
        let mut platform = Platform::native();
        let mut toolkit = TerminalToolkit::new();
        run(self, &mut platform, &mut toolkit)
    }

    /// Show the dialog against explicit collaborators and toolkit
    pub fn run_with(
        self,
        platform: &mut Platform,
        toolkit: &mut dyn Toolkit,
    ) -> DialogResult<AnswerMap> {
        run(self, platform, toolkit)
    }
}
