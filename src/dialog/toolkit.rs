//! The windowing toolkit seam
//!
//! The engine consumes a terminal through this trait: it asks for modal
//! presentation, hands over a paint closure, and waits for input events
//! with a tick deadline. `TerminalToolkit` is the real crossterm/ratatui
//! implementation; tests drive the whole engine through a scripted
//! implementation against ratatui's test backend.
//!
//! Modal presentation is depth-counted so nested dialogs (validation
//! messages, pickers, viewers) reuse the already-initialized terminal.

use crate::error::DialogResult;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

pub type Frame<'a> = ratatui::Frame<'a>;

/// Input the engine cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Key(KeyEvent),
    Resize,
}

/// Minimal contract the engine needs from a terminal
pub trait Toolkit {
    /// Enter modal presentation; nested calls must be cheap re-entries
    fn begin_modal(&mut self) -> DialogResult<()>;

    /// Leave modal presentation; the outermost call restores the terminal
    fn end_modal(&mut self) -> DialogResult<()>;

    /// Paint one frame through the given closure
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> DialogResult<()>;

    /// Wait for the next event. With a tick duration, `Ok(None)` means
    /// one tick elapsed with no input; without one, the call blocks.
    fn next_event(&mut self, tick: Option<Duration>) -> DialogResult<Option<UiEvent>>;
}

type NativeTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Real terminal: raw mode + alternate screen, depth-counted for nested
/// modals
pub struct TerminalToolkit {
    terminal: Option<NativeTerminal>,
    depth: usize,
    last_tick: Instant,
}

impl TerminalToolkit {
    pub fn new() -> Self {
        Self {
            terminal: None,
            depth: 0,
            last_tick: Instant::now(),
        }
    }
}

impl Default for TerminalToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for TerminalToolkit {
    fn begin_modal(&mut self) -> DialogResult<()> {
        self.depth += 1;
        if self.depth == 1 {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            self.terminal = Some(Terminal::new(CrosstermBackend::new(stdout))?);
            self.last_tick = Instant::now();
        }
        Ok(())
    }

    fn end_modal(&mut self) -> DialogResult<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            if let Some(mut terminal) = self.terminal.take() {
                disable_raw_mode()?;
                execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
                terminal.show_cursor()?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> DialogResult<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.draw(|frame| render(frame))?;
        }
        Ok(())
    }

    fn next_event(&mut self, tick: Option<Duration>) -> DialogResult<Option<UiEvent>> {
        loop {
            let wait = match tick {
                Some(interval) => {
                    let elapsed = self.last_tick.elapsed();
                    if elapsed >= interval {
                        self.last_tick = Instant::now();
                        return Ok(None);
                    }
                    Some(interval - elapsed)
                }
                None => None,
            };

            let ready = match wait {
                Some(remaining) => event::poll(remaining)?,
                None => true, // block in read below
            };
            if !ready {
                continue;
            }

            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(UiEvent::Key(key)));
                }
                CrosstermEvent::Resize(_, _) => return Ok(Some(UiEvent::Resize)),
                _ => continue,
            }
        }
    }
}

/// Scripted toolkit: pops pre-recorded events and paints into ratatui's
/// test backend, so end-to-end tests run the real render path headlessly
#[cfg(test)]
pub struct ScriptedToolkit {
    terminal: Terminal<ratatui::backend::TestBackend>,
    events: std::collections::VecDeque<ScriptStep>,
    pub begin_calls: usize,
    pub end_calls: usize,
}

/// One scripted event: a key press, or one elapsed timer tick
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum ScriptStep {
    Key(KeyEvent),
    Tick,
}

#[cfg(test)]
impl ScriptedToolkit {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            terminal: Terminal::new(ratatui::backend::TestBackend::new(100, 40))
                .expect("test backend"),
            events: steps.into(),
            begin_calls: 0,
            end_calls: 0,
        }
    }

    /// Rendered screen contents, for texture assertions
    pub fn screen_text(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(&buffer.get(x, y).symbol);
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
impl Toolkit for ScriptedToolkit {
    fn begin_modal(&mut self) -> DialogResult<()> {
        self.begin_calls += 1;
        Ok(())
    }

    fn end_modal(&mut self) -> DialogResult<()> {
        self.end_calls += 1;
        Ok(())
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> DialogResult<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn next_event(&mut self, tick: Option<Duration>) -> DialogResult<Option<UiEvent>> {
        match self.events.pop_front() {
            Some(ScriptStep::Key(key)) => Ok(Some(UiEvent::Key(key))),
            Some(ScriptStep::Tick) => Ok(None),
            None if tick.is_some() => Ok(None),
            None => panic!("event script exhausted with no timeout configured"),
        }
    }
}
