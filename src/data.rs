use std::borrow::Cow;

use smart_default::SmartDefault;

/// Conversion input, with line endings already normalized.
///
/// Lives exactly as long as a single conversion does.
#[derive(Debug, PartialEq)]
pub struct Document<'source> {
    pub raw: &'source str,
    pub normalized: Cow<'source, str>,
}

impl<'source> Document<'source> {
    pub fn new(raw: &'source str) -> Self {
        // most inputs have no carriage returns at all, so don't copy them
        let normalized = if raw.contains('\r') {
            Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(raw)
        };
        Self { raw, normalized }
    }
}

/// Preamble fragments, in the order they were requested.
#[derive(Debug, Default, Clone, PartialEq, derive_more::Deref)]
pub struct Preamble(Vec<Cow<'static, str>>);

impl Preamble {
    pub fn push(&mut self, fragment: impl Into<Cow<'static, str>>) {
        self.0.push(fragment.into());
    }

    /// Appends `fragment` unless it's already present.
    ///
    /// Returns `true`, if fragment was actually appended.
    pub fn require(&mut self, fragment: &'static str) -> bool {
        if self.0.iter().any(|present| present == fragment) {
            return false;
        }
        self.push(fragment);
        true
    }
}

/// Everything rewrite stages are allowed to mutate.
///
/// A fresh one is created by every conversion and passed down explicitly,
/// so nothing leaks from one conversion into the next.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConversionState {
    pub preamble: Preamble,
    pub title: Option<String>,
}

impl ConversionState {
    pub fn title_declared(&self) -> bool {
        self.title.is_some()
    }

    pub fn declare_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }
}

/// A piece of the document body, as seen by block-level stages.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Markdown still subject to the remaining stages
    Text(String),
    /// Finished LaTeX, nothing rewrites it anymore
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, SmartDefault)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ConvertOptions {
    /// Promote a leading `# Title` line into `\title` + `\maketitle`
    #[default = true]
    pub extract_title: bool,
    /// How deep `>` quotes may nest before the rest is left as plain text
    #[default = 16]
    pub max_quote_depth: usize,
    pub author: Option<String>,
    pub date: Option<String>,
}
