//! Default collaborator implementations for native terminal runs
//!
//! The terminal medium has no OS file chooser or secondary viewer of its
//! own, so those two report `Unsupported` and the engine presents nested
//! dialogs instead. Clipboard, CSV, opener and image decoding are real.

use super::{
    Clipboard, CsvWriter, DecodedImage, FileDialog, ImageDecoder, Opener, PickOutcome,
    TableViewer, ViewOutcome,
};
use crate::spec::ImageSource;
use anyhow::{Context, Result};
use base64::Engine;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::Command;

/// Falls back to the engine's nested path-entry dialog
pub struct NativeFileDialog;

impl FileDialog for NativeFileDialog {
    fn pick(&mut self, _save: bool, _initial: Option<&Path>) -> PickOutcome {
        PickOutcome::Unsupported
    }
}

/// Falls back to the engine's nested read-only grid dialog
pub struct NativeTableViewer;

impl TableViewer for NativeTableViewer {
    fn open(&mut self, _rows: &[Value]) -> ViewOutcome {
        ViewOutcome::Unsupported
    }
}

/// System clipboard via arboard, connected on first use
#[derive(Default)]
pub struct NativeClipboard {
    handle: Option<arboard::Clipboard>,
}

impl Clipboard for NativeClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new().context("clipboard unavailable")?);
        }
        if let Some(clipboard) = self.handle.as_mut() {
            clipboard
                .set_text(text.to_string())
                .context("clipboard write failed")?;
        }
        Ok(())
    }
}

/// Plain RFC 4180 output: fields quoted when they contain a comma, a
/// quote or a line break
pub struct NativeCsvWriter;

impl CsvWriter for NativeCsvWriter {
    fn write(&mut self, headers: &[String], rows: &[Vec<String>], path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        let mut out = BufWriter::new(file);

        write_record(&mut out, headers)?;
        for row in rows {
            write_record(&mut out, row)?;
        }
        out.flush().context("flushing CSV output")?;
        Ok(())
    }
}

fn write_record<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> Result<()> {
    let line = fields
        .iter()
        .map(|field| csv_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{}", line).context("writing CSV record")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Opens a path or URL with the platform's default handler
pub struct NativeOpener;

impl Opener for NativeOpener {
    fn open(&mut self, target: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(target);
            c
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", target]);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(target);
            c
        };
        command
            .spawn()
            .with_context(|| format!("cannot open {}", target))?;
        Ok(())
    }
}

/// Decodes from a filesystem path or an inline base-64 payload
pub struct NativeImageDecoder;

impl ImageDecoder for NativeImageDecoder {
    fn decode(&mut self, source: &ImageSource) -> Result<DecodedImage> {
        let dynamic = match source {
            ImageSource::Path(path) => image::ImageReader::open(path)
                .with_context(|| format!("cannot read image {}", path.display()))?
                .decode()
                .context("image decode failed")?,
            ImageSource::Base64(payload) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(payload.trim())
                    .context("invalid base-64 image payload")?;
                image::load_from_memory(&bytes).context("image decode failed")?
            }
        };
        let rgba = dynamic.to_rgba8();
        Ok(DecodedImage {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_writer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let headers = vec!["n".to_string(), "note".to_string()];
        let rows = vec![
            vec!["Alice".to_string(), "likes, commas".to_string()],
            vec!["Bob".to_string(), "plain".to_string()],
        ];
        NativeCsvWriter.write(&headers, &rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "n,note\nAlice,\"likes, commas\"\nBob,plain\n");
    }

    #[test]
    fn test_base64_decode_rejects_garbage() {
        let mut decoder = NativeImageDecoder;
        let result = decoder.decode(&ImageSource::Base64("@@not-base64@@".into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_native_file_dialog_defers_to_engine() {
        assert_eq!(
            NativeFileDialog.pick(false, None),
            PickOutcome::Unsupported
        );
    }
}
