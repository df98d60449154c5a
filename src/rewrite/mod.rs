//! The rewrite pipeline.
//!
//! Every stage is a function of `(text, &mut ConversionState)`, and they run in a fixed order:
//!
//! 1. [`title::extract`] - only on the whole document, before headings could claim the `# Title` line
//! 2. [`block::code_blocks`] - before anything else touches the body, so listings are never rewritten
//! 3. [`block::blockquotes`] - quote contents recurse into [`render_body`]
//! 4. [`block::headings`] - ATX before Setext, on every line
//! 5. [`block::line_breaks`]
//! 6. [`inline::rewrite`] - code spans and links, then bold, then italic
//!
//! Stages 2-6 make up the body pipeline. Once a stage produces finished LaTeX ([`Block::Raw`]),
//! later stages skip it.

pub mod block;
pub mod inline;
pub mod title;

use itertools::Itertools;
use tracing::debug;

use crate::data::{Block, ConversionState, ConvertOptions, Document};

/// Runs all stages over the document, outputs the body (without the document template)
pub fn run(document: &Document, state: &mut ConversionState, options: &ConvertOptions) -> String {
    let text: &str = &document.normalized;
    let text = if options.extract_title {
        title::extract(text, state)
    } else {
        text
    };
    render_body(text, state, options, 0)
}

/// Body pipeline
///
/// `depth` is the current blockquote nesting level, top-level text is at 0.
pub fn render_body(
    text: &str,
    state: &mut ConversionState,
    options: &ConvertOptions,
    depth: usize,
) -> String {
    debug!(depth, len = text.len(), "rendering body");
    let blocks = block::code_blocks(text, state)
        .into_iter()
        .flat_map(|block| match block {
            Block::Text(text) => block::blockquotes(&text, state, options, depth),
            raw @ Block::Raw(_) => vec![raw],
        })
        .collect_vec();
    let last = blocks.len().saturating_sub(1);
    blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| match block {
            Block::Raw(raw) => raw,
            Block::Text(text) => {
                let text = block::headings(&text);
                let text = block::line_breaks(&text, i < last);
                inline::rewrite(&text, state)
            }
        })
        .join("\n")
}
