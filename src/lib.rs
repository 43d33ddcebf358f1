//! askbox — declarative modal dialogs for the terminal
//!
//! Describe a dialog once (messages, typed input prompts, action buttons,
//! an optional data grid, timing and styling options) and show it; the
//! engine compiles the description into a live widget tree, wires every
//! interactive element to one shared answer map, gates the close on a
//! validation pass, and returns the finalized map.
//!
//! ```no_run
//! use askbox::{DialogSpec, Prompt};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), askbox::DialogError> {
//! let answers = DialogSpec::new("Deploy")
//!     .message("Ship release 4.2 to production?")
//!     .prompt(Prompt::text("ticket").message("Change ticket").required(true))
//!     .prompt(Prompt::checkbox("notify").message("Notify on completion"))
//!     .buttons(["Cancel", "Deploy"])
//!     .default_button("Deploy")
//!     .cancel_button("Cancel")
//!     .timeout(Duration::from_secs(120), true)
//!     .show()?;
//!
//! if answers.boolean("Deploy") == Some(true) {
//!     println!("ticket: {:?}", answers.string("ticket"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod answers;
pub mod dialog;
pub mod error;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod platform;
pub mod render;
pub mod spec;
pub mod theme;
pub mod validate;
pub mod widgets;

pub use answers::{AnswerMap, Answers, Secret, TIMED_OUT_KEY};
pub use dialog::{message_dialog, run, Session, TerminalToolkit, Toolkit};
pub use error::{DialogError, DialogResult};
pub use logging::init_logging;
pub use spec::{
    Button, DialogSpec, IconKind, ImageSource, Prompt, PromptKind, SelectionMode,
    SetPresentation,
};
pub use theme::{FontSpec, Theme};
pub use validate::{validate, ValidationOutcome};
