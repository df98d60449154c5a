//! Line-oriented rewrites: indented code, blockquotes, headings, hard line breaks.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    data::{Block, ConversionState, ConvertOptions},
    gen::CODE_SUPPORT,
    lexer,
};

/// Accumulates consecutive text lines, until some raw block interrupts them
#[derive(Debug, Default)]
struct Blocks {
    blocks: Vec<Block>,
    lines: Vec<String>,
}

impl Blocks {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn raw(&mut self, raw: String) {
        self.flush();
        self.blocks.push(Block::Raw(raw));
    }

    fn flush(&mut self) {
        // an empty line is still a line, so only an empty *run* gets skipped
        if !self.lines.is_empty() {
            self.blocks.push(Block::Text(self.lines.drain(..).join("\n")));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Extracts indented code blocks into `lstlisting` environments
///
/// - Block starts with a non-blank line prefixed by four spaces, either first in the text or right after a blank line
/// - Continues while lines are prefixed, or blank (and followed by more prefixed lines)
/// - Prefix and trailing whitespace are stripped from every line
///
/// Blank lines after the block, as well as a line that broke the prefix rule, are passed through as text.
pub fn code_blocks(text: &str, state: &mut ConversionState) -> Vec<Block> {
    let lines = text.split('\n').collect_vec();
    let mut out = Blocks::default();
    let mut count = 0usize;
    let mut i = 0;
    while i < lines.len() {
        let starts_block = (i == 0 || lexer::is_blank(lines[i - 1]))
            && !lexer::is_blank(lines[i])
            && lexer::indented_line(lines[i]).is_ok();
        if !starts_block {
            out.line(lines[i]);
            i += 1;
            continue;
        }

        // find the last prefixed line of this block; blank lines may be inside
        let mut end = i;
        for (j, line) in lines.iter().enumerate().skip(i + 1) {
            if lexer::is_blank(line) {
                continue;
            }
            if lexer::indented_line(line).is_err() {
                break;
            }
            end = j;
        }

        let code = lines[i..=end]
            .iter()
            .map(|line| match lexer::indented_line(line) {
                Ok((_, content)) => content.trim_end(),
                Err(_) => "", // blank
            })
            .join("\n");
        out.raw(format!("\\begin{{lstlisting}}\n{code}\n\\end{{lstlisting}}"));
        count += 1;
        i = end + 1;
    }

    if count > 0 {
        debug!(count, "indented code blocks extracted");
        state.preamble.require(CODE_SUPPORT);
    }
    out.finish()
}

/// Wraps every maximal run of `>`-lines into a `quote` environment
///
/// Quote content goes through the whole body pipeline, one level deeper.
/// Once `max_quote_depth` is reached, quote lines are left as they are.
pub fn blockquotes(
    text: &str,
    state: &mut ConversionState,
    options: &ConvertOptions,
    depth: usize,
) -> Vec<Block> {
    let mut out = Blocks::default();
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        let Ok((_, first)) = lexer::quote_line(line) else {
            out.line(line);
            continue;
        };
        if depth >= options.max_quote_depth {
            warn!(depth, "blockquote nesting is too deep, leaving it as text");
            out.line(line);
            continue;
        }

        let mut inner = vec![first];
        while let Some((_, content)) = lines.peek().and_then(|&l| lexer::quote_line(l).ok()) {
            inner.push(content);
            lines.next();
        }
        let body = super::render_body(&inner.join("\n"), state, options, depth + 1);
        out.raw(format!(
            "\\begin{{quote}}\n{}\n\\end{{quote}}",
            body.trim_matches('\n')
        ));
    }
    out.finish()
}

fn heading_command(level: usize, content: &str) -> String {
    let command = match level {
        1 => "section",
        2 => "subsection",
        3 => "subsubsection",
        4 => "paragraph",
        5 => "subparagraph",
        _ => return format!("\\noindent\\textbf{{{content}}}"),
    };
    format!("\\{command}{{{content}}}")
}

/// Rewrites ATX (`## Heading`) and Setext (underlined) headings, in a single pass
///
/// On every line, ATX shape is checked first; an ATX heading line never becomes Setext content.
pub fn headings(text: &str) -> String {
    let lines = text.split('\n').collect_vec();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if let Ok((_, (level, content))) = lexer::atx_heading(line) {
            if !content.is_empty() {
                out.push(heading_command(level, content));
                i += 1;
                continue;
            }
        }
        let underline = lines
            .get(i + 1)
            .and_then(|next| lexer::setext_underline(next).ok());
        match underline {
            Some((_, level)) if !lexer::is_blank(line) => {
                out.push(heading_command(level, line.trim()));
                i += 2;
            }
            _ => {
                out.push(line.to_owned());
                i += 1;
            }
        }
    }
    out.join("\n")
}

static HARD_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(.*\S) {2,}\n").expect("Should be a valid regex"));
static TRAILING_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S) {2,}\z").expect("Should be a valid regex"));

/// `line  ⏎` becomes `line\\⏎`
///
/// Last line of the text only gets a break if `followed` is set, i.e. there's another block after
/// this text, so its line break is the one joining them.
pub fn line_breaks(text: &str, followed: bool) -> String {
    let text = HARD_BREAK.replace_all(text, "${1}\\\\\n");
    if followed {
        TRAILING_BREAK.replace(&text, "${1}\\\\").into_owned()
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Block {
        Block::Text(s.to_owned())
    }

    fn raw(s: &str) -> Block {
        Block::Raw(s.to_owned())
    }

    macro_rules! test {
        {$name:ident, code_blocks, $input:literal, [$($block:expr), *]} => {
            #[test]
            fn $name() {
                // arrange
                let mut state = ConversionState::default();

                // act
                let output = code_blocks($input, &mut state);

                // assert
                assert_eq!(output, vec![$($block), *], "Should split into expected blocks");
            }
        };
        {$name:ident, line_breaks, followed: $followed:literal, $input:literal, $expected:literal} => {
            #[test]
            fn $name() {
                // arrange
                let input = $input;

                // act
                let output = line_breaks(input, $followed);

                // assert
                assert_eq!(output, $expected, "Should produce expected output");
            }
        };
        {$name:ident, $stage:ident, $input:literal, $expected:literal} => {
            #[test]
            fn $name() {
                // arrange
                let input = $input;

                // act
                let output = $stage(input);

                // assert
                assert_eq!(output, $expected, "Should produce expected output");
            }
        };
    }

    // Headings
    test! {atx_section, headings, "# A", r"\section{A}"}
    test! {atx_subsection, headings, "## Sub", r"\subsection{Sub}"}
    test! {atx_subsubsection, headings, "### A", r"\subsubsection{A}"}
    test! {atx_paragraph, headings, "#### A", r"\paragraph{A}"}
    test! {atx_subparagraph, headings, "##### A", r"\subparagraph{A}"}
    test! {atx_fallback, headings, "###### A", r"\noindent\textbf{A}"}
    test! {atx_fallback_deeper, headings, "######### A", r"\noindent\textbf{A}"}
    test! {atx_in_text, headings, "before\n## Mid\nafter", "before\n\\subsection{Mid}\nafter"}
    test! {not_atx, headings, "#tag and # not heading", "#tag and # not heading"}
    test! {setext_section, headings, "Title\n=====", r"\section{Title}"}
    test! {setext_subsection, headings, "Title  \n---", r"\subsection{Title}"}
    test! {setext_keeps_following, headings, "A\n===\nbody", "\\section{A}\nbody"}
    test! {setext_after_blank, headings, "\n---", "\n---"}
    test! {atx_before_setext, headings, "# A\n===", "\\section{A}\n==="}
    test! {atx_empty, headings, "text\n\n## \nmore", "text\n\n## \nmore"}
    test! {atx_blank_content, headings, "###   ", "###   "}

    // Hard line breaks
    test! {hard_break, line_breaks, followed: false, "a  \nb", "a\\\\\nb"}
    test! {hard_break_many_spaces, line_breaks, followed: false, "a     \nb", "a\\\\\nb"}
    test! {hard_break_chain, line_breaks, followed: false, "a  \nb  \nc", "a\\\\\nb\\\\\nc"}
    test! {hard_break_one_space, line_breaks, followed: false, "a \nb", "a \nb"}
    test! {hard_break_blank_line, line_breaks, followed: false, "   \nb", "   \nb"}
    test! {hard_break_last_line, line_breaks, followed: false, "a  ", "a  "}
    test! {hard_break_before_block, line_breaks, followed: true, "a\nb  ", "a\nb\\\\"}
    test! {hard_break_before_block_one_space, line_breaks, followed: true, "b ", "b "}
    test! {hard_break_before_block_blank, line_breaks, followed: true, "b\n   ", "b\n   "}

    // Code blocks
    test! {code_only, code_blocks, "    let x = 1;", [raw("\\begin{lstlisting}\nlet x = 1;\n\\end{lstlisting}")]}
    test! {code_between, code_blocks, "a\n\n    x  \n      y\n\nb", [
        text("a\n"),
        raw("\\begin{lstlisting}\nx\n  y\n\\end{lstlisting}"),
        text("\nb")
    ]}
    test! {code_inner_blank, code_blocks, "    x\n\n    y", [raw("\\begin{lstlisting}\nx\n\ny\n\\end{lstlisting}")]}
    test! {code_broken_by_line, code_blocks, "    x\nnot code", [
        raw("\\begin{lstlisting}\nx\n\\end{lstlisting}"),
        text("not code")
    ]}
    test! {code_needs_blank_before, code_blocks, "para\n    not code", [text("para\n    not code")]}
    test! {code_trailing_blanks_stay, code_blocks, "    x\n\n\nb", [
        raw("\\begin{lstlisting}\nx\n\\end{lstlisting}"),
        text("\n\nb")
    ]}
    test! {code_none, code_blocks, "a\nb", [text("a\nb")]}

    #[test]
    fn code_blocks_request_preamble() {
        // arrange
        let mut with_code = ConversionState::default();
        let mut without_code = ConversionState::default();

        // act
        code_blocks("    code", &mut with_code);
        code_blocks("text", &mut without_code);

        // assert
        assert_eq!(with_code.preamble.len(), 1);
        assert_eq!(&*with_code.preamble[0], CODE_SUPPORT);
        assert!(without_code.preamble.is_empty());
    }

    #[test]
    fn quote_is_rendered_recursively() {
        // arrange
        let mut state = ConversionState::default();
        let options = ConvertOptions::default();

        // act
        let output = blockquotes("before\n> quoted **bold**\n> ## Sub\nafter", &mut state, &options, 0);

        // assert
        assert_eq!(
            output,
            vec![
                text("before"),
                raw("\\begin{quote}\nquoted \\textbf{bold}\n\\subsection{Sub}\n\\end{quote}"),
                text("after")
            ]
        );
    }

    #[test]
    fn quote_runs_are_split_by_other_lines() {
        // arrange
        let mut state = ConversionState::default();
        let options = ConvertOptions::default();

        // act
        let output = blockquotes("> a\n\n> b", &mut state, &options, 0);

        // assert
        assert_eq!(
            output,
            vec![
                raw("\\begin{quote}\na\n\\end{quote}"),
                text(""),
                raw("\\begin{quote}\nb\n\\end{quote}"),
            ]
        );
    }

    #[test]
    fn nested_quotes() {
        // arrange
        let mut state = ConversionState::default();
        let options = ConvertOptions::default();

        // act
        let output = blockquotes("> outer\n> > inner", &mut state, &options, 0);

        // assert
        assert_eq!(
            output,
            vec![raw(
                "\\begin{quote}\nouter\n\\begin{quote}\ninner\n\\end{quote}\n\\end{quote}"
            )]
        );
    }

    #[test]
    fn quote_depth_is_bounded() {
        // arrange
        let mut state = ConversionState::default();
        let options = ConvertOptions {
            max_quote_depth: 1,
            ..Default::default()
        };

        // act
        let output = blockquotes("> outer\n> > inner", &mut state, &options, 0);

        // assert
        assert_eq!(
            output,
            vec![raw("\\begin{quote}\nouter\n> inner\n\\end{quote}")]
        );
    }
}
