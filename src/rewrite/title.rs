use tracing::debug;

use crate::{data::ConversionState, lexer};

use super::inline;

/// Takes a leading `# Title` line off the document, declaring it as the document title
///
/// Only the very first line is considered, and only a level-1 heading with some text.
/// Title text goes through inline rewrites. Outputs the rest of the document.
pub fn extract<'t>(text: &'t str, state: &mut ConversionState) -> &'t str {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    match lexer::atx_heading(first) {
        Ok((_, (1, title))) if !title.is_empty() => {
            debug!(title, "document title found");
            let title = inline::rewrite(title, state);
            state.declare_title(title);
            rest
        }
        _ => text,
    }
}
