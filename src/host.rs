//! Whatever provides the Markdown, and takes the LaTeX back.
//!
//! Conversion itself can't fail; everything that can is here.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{convert_with, data::ConvertOptions};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("No document is open, there is nothing to convert")]
    NoActiveDocument,
    #[error("Document is empty, there is nothing to convert")]
    EmptyInput,
    #[error("Failed to write {}: {}", .path.display(), .source)]
    OutputWriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Markdown document the host currently has open
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDocument {
    pub path: PathBuf,
    pub text: String,
}

pub trait Host {
    /// Currently open document, if there's any
    fn load_document(&self) -> Option<ActiveDocument>;
    fn save_output(&self, path: &Path, latex: &str) -> std::io::Result<()>;
}

impl<H: Host + ?Sized> Host for &H {
    fn load_document(&self) -> Option<ActiveDocument> {
        (**self).load_document()
    }

    fn save_output(&self, path: &Path, latex: &str) -> std::io::Result<()> {
        (**self).save_output(path, latex)
    }
}

/// Where the LaTeX for a document at `input` goes: same path, `.tex` extension
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("tex")
}

/// Loads the active document, converts it and saves the result next to it
///
/// Outputs the path LaTeX was written to. Nothing is retried, and nothing is written on failure.
pub fn convert_active<H: Host>(host: H, options: &ConvertOptions) -> Result<PathBuf, ConvertError> {
    let document = host.load_document().ok_or(ConvertError::NoActiveDocument)?;
    if document.text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let latex = convert_with(&document.text, options);
    let path = output_path(&document.path);
    host.save_output(&path, &latex)
        .map_err(|source| ConvertError::OutputWriteFailure {
            path: path.clone(),
            source,
        })?;
    info!(input = %document.path.display(), output = %path.display(), "LaTeX written");
    Ok(path)
}

/// Host backed by the filesystem, with (at most) a single document open
#[derive(Debug, Clone, Default)]
pub struct FileHost {
    document: Option<PathBuf>,
}

impl FileHost {
    pub fn new(document: impl Into<Option<PathBuf>>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl Host for FileHost {
    fn load_document(&self) -> Option<ActiveDocument> {
        let path = self.document.as_ref()?;
        match std::fs::read_to_string(path) {
            Ok(text) => Some(ActiveDocument {
                path: path.clone(),
                text,
            }),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read the document");
                None
            }
        }
    }

    fn save_output(&self, path: &Path, latex: &str) -> std::io::Result<()> {
        std::fs::write(path, latex)
    }
}
