//! Turns (a modest subset of) Markdown into a LaTeX document.
//!
//! Supported: ATX and Setext headings, bold, italic, inline code, indented code blocks, links,
//! blockquotes (nested ones included) and hard line breaks. A `# Title` on the very first line
//! becomes the document title. Anything else passes through as is - in particular, LaTeX special
//! characters are not escaped.
//!
//! # Ideology
//! Conversion is an ordered list of rewrite stages over text (see [`rewrite`] for the order, and why it is what it is).
//! Stages share a single [`ConversionState`], which collects preamble fragments and the title as the
//! stages go. That state is created anew by every conversion and passed around explicitly, so one
//! conversion can't possibly leak anything into another.
//!
//! Stages never fail: markup that doesn't match simply stays text. The only failures are about getting
//! the document in and the result out, see [`host`].
//!
//! ```
//! let latex = texdown::convert("# Notes\nSome **bold** claims.");
//! assert!(latex.contains(r"\title{Notes}"));
//! assert!(latex.contains(r"\textbf{bold}"));
//! ```

use std::fmt::Write;

mod data;
mod gen;
pub mod host;
mod lexer;
pub mod rewrite;
mod util;

pub use data::{Block, ConversionState, ConvertOptions, Document, Preamble};
pub use gen::{write_document, CODE_SUPPORT, HYPERLINK_SUPPORT, INPUT_ENCODING};

/// Converts Markdown into a complete LaTeX document, with default options
pub fn convert(markdown: &str) -> String {
    convert_with(markdown, &ConvertOptions::default())
}

pub fn convert_with(markdown: &str, options: &ConvertOptions) -> String {
    let mut buf = String::new();
    convert_into(markdown, options, &mut buf).expect("Writing to a String should not fail");
    buf
}

/// Converts Markdown, writing LaTeX into `output`
///
/// Only fails if `output` does.
pub fn convert_into<W: Write + ?Sized>(
    markdown: &str,
    options: &ConvertOptions,
    output: &mut W,
) -> std::fmt::Result {
    let document = Document::new(markdown);
    let mut state = ConversionState::default();
    let body = rewrite::run(&document, &mut state, options);
    gen::write_document(output, &state, options, &body)
}
