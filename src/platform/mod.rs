//! External collaborators
//!
//! Everything the engine needs from the outside world goes through one of
//! these narrow traits: file dialogs, the clipboard, CSV output, the
//! secondary tabular viewer, the system opener, icon lookup and image
//! decoding. `Platform::native()` wires the default implementations;
//! tests substitute recorders.

pub mod native;

use crate::spec::{IconKind, ImageSource};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Result of asking the file-dialog collaborator for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PathBuf),
    /// The user dismissed the chooser
    Cancelled,
    /// This medium has no chooser of its own; the engine falls back to a
    /// nested path-entry dialog
    Unsupported,
}

/// OS file-open/file-save dialog
pub trait FileDialog {
    fn pick(&mut self, save: bool, initial: Option<&Path>) -> PickOutcome;
}

/// Clipboard writer
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// CSV file writer
pub trait CsvWriter {
    fn write(&mut self, headers: &[String], rows: &[Vec<String>], path: &Path)
        -> anyhow::Result<()>;
}

/// Result of asking the tabular-viewer collaborator to show rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewOutcome {
    #[default]
    Shown,
    /// This medium has no viewer of its own; the engine falls back to a
    /// nested read-only grid dialog
    Unsupported,
}

/// Secondary, independent tabular viewer; fire-and-forget
pub trait TableViewer {
    fn open(&mut self, rows: &[Value]) -> ViewOutcome;
}

/// System-default opener for paths and URLs
pub trait Opener {
    fn open(&mut self, target: &str) -> anyhow::Result<()>;
}

/// Decodes the dialog banner image from a path or inline payload
pub trait ImageDecoder {
    fn decode(&mut self, source: &ImageSource) -> anyhow::Result<DecodedImage>;
}

/// RGBA bitmap handed to the renderer
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let index = ((y * self.width + x) * 4) as usize;
        match self.rgba.get(index..index + 3) {
            Some(px) => (px[0], px[1], px[2]),
            None => (0, 0, 0),
        }
    }
}

/// Icon-by-name lookup for the title bar
pub fn icon_glyph(kind: IconKind) -> Option<&'static str> {
    match kind {
        IconKind::None => None,
        IconKind::Info => Some("\u{24d8}"),
        IconKind::Question => Some("?"),
        IconKind::Warning => Some("\u{26a0}"),
        IconKind::Error => Some("\u{2716}"),
    }
}

/// The collaborator bundle one dialog invocation runs against
pub struct Platform {
    pub files: Box<dyn FileDialog>,
    pub clipboard: Box<dyn Clipboard>,
    pub csv: Box<dyn CsvWriter>,
    pub viewer: Box<dyn TableViewer>,
    pub opener: Box<dyn Opener>,
    pub images: Box<dyn ImageDecoder>,
}

impl Platform {
    /// The default collaborator set for native terminal runs
    pub fn native() -> Self {
        Self {
            files: Box::new(native::NativeFileDialog),
            clipboard: Box::new(native::NativeClipboard::default()),
            csv: Box::new(native::NativeCsvWriter),
            viewer: Box::new(native::NativeTableViewer),
            opener: Box::new(native::NativeOpener),
            images: Box::new(native::NativeImageDecoder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(icon_glyph(IconKind::None), None);
        assert!(icon_glyph(IconKind::Warning).is_some());
    }

    #[test]
    fn test_decoded_image_pixel_access() {
        let image = DecodedImage {
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 255, 4, 5, 6, 255],
        };
        assert_eq!(image.pixel(1, 0), (4, 5, 6));
        assert_eq!(image.pixel(9, 9), (0, 0, 0));
    }
}
