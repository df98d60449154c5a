use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([0-9]+)\u{E001}").expect("Should be a valid regex"));

/// Holds finished LaTeX snippets while the text around them is still being rewritten.
///
/// Every stashed snippet leaves a placeholder behind: a decimal index, wrapped in a pair of
/// private-use characters. Placeholders contain nothing any markup pattern could match.
#[derive(Debug, Default, derive_more::Deref)]
pub struct Stash(Vec<String>);

impl Stash {
    /// Stores the snippet, returns it's placeholder
    pub fn put(&mut self, latex: String) -> String {
        let index = self.0.len();
        self.0.push(latex);
        format!("{OPEN}{index}{CLOSE}")
    }

    /// Puts every stashed snippet back in place of it's placeholder, in a single pass
    ///
    /// Placeholders this stash did not issue are left untouched.
    pub fn restore(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_owned();
        }
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.0.get(index))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }
}
