//! Inline rewrites: code spans, links, bold, italic.
//!
//! Code spans and links come out as finished LaTeX, so they are stashed before emphasis runs
//! and put back afterwards. Emphasis never reaches inside them (and can still wrap around them).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::{
    data::ConversionState,
    gen::{CODE_SUPPORT, HYPERLINK_SUPPORT},
    util::Stash,
};

macro_rules! regex {
    ($name:ident, $regex:literal) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($regex).expect("Should be a valid regex"));
    };
}

regex! {CODE_OR_LINK, r"`([^`\n]+)`|\[([^\]\n]+)\]\(([^)\s]+)\)"}
regex! {BOLD, r"(?s)\*\*(.+?)\*\*|__(.+?)__"}
regex! {ITALIC, r"(?s)\*(.+?)\*|_(.+?)_"}

/// Content of whichever delimiter alternative matched
fn inner<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str())
}

/// Applies every inline rewrite to `text`, in order: code spans and links, then bold, then italic.
pub fn rewrite(text: &str, state: &mut ConversionState) -> String {
    let mut stash = Stash::default();
    let text = protect(text, &mut stash, state);
    let text = bold(&text);
    let text = italic(&text);
    debug!(protected = stash.len(), "inline rewrites applied");
    stash.restore(&text)
}

/// Stashes code spans and links, in a single left-to-right pass.
///
/// Preamble support is requested in order of the first occurrence.
fn protect(text: &str, stash: &mut Stash, state: &mut ConversionState) -> String {
    CODE_OR_LINK
        .replace_all(text, |caps: &Captures| {
            let latex = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(code), _, _) => {
                    state.preamble.require(CODE_SUPPORT);
                    format!("\\inlinecode{{{}}}", code.as_str())
                }
                (_, Some(display), Some(url)) => {
                    state.preamble.require(HYPERLINK_SUPPORT);
                    format!("\\href{{{}}}{{{}}}", url.as_str(), display.as_str())
                }
                _ => unreachable!("Every alternative captures either code, or link text with url"),
            };
            stash.put(latex)
        })
        .into_owned()
}

/// `**text**` and `__text__`
pub fn bold(text: &str) -> String {
    BOLD.replace_all(text, |caps: &Captures| format!("\\textbf{{{}}}", inner(caps)))
        .into_owned()
}

/// `*text*` and `_text_`
///
/// Must run after [`bold`]: it's single delimiters would otherwise eat a half of every double one.
pub fn italic(text: &str) -> String {
    ITALIC
        .replace_all(text, |caps: &Captures| format!("\\textit{{{}}}", inner(caps)))
        .into_owned()
}
