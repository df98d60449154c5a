//! Document template, and the preamble fragments rewrites may request.

use std::fmt::Write;

use crate::data::{ConversionState, ConvertOptions};

/// Requested by both inline code spans and indented code blocks
pub const CODE_SUPPORT: &str = r"\usepackage{listings}
\usepackage{xcolor}
\definecolor{codebg}{rgb}{0.95,0.95,0.95}
\lstset{basicstyle=\ttfamily\small, backgroundcolor=\color{codebg}, breaklines=true, frame=single}
\newcommand{\inlinecode}[1]{\colorbox{codebg}{\texttt{#1}}}";

/// Requested by links
pub const HYPERLINK_SUPPORT: &str =
    r"\usepackage[colorlinks=true, linkcolor=blue, urlcolor=blue]{hyperref}";

/// Always the last preamble line
pub const INPUT_ENCODING: &str = r"\usepackage[utf8]{inputenc}";

pub const DOCUMENT_CLASS: &str = r"\documentclass[12pt]{article}";

/// Writes out the complete document: class, preamble, attributes and the body
///
/// Blank lines around the body are dropped.
pub fn write_document<W: Write + ?Sized>(
    output: &mut W,
    state: &ConversionState,
    options: &ConvertOptions,
    body: &str,
) -> std::fmt::Result {
    writeln!(output, "{DOCUMENT_CLASS}\n")?;
    for fragment in state.preamble.iter() {
        writeln!(output, "{fragment}")?;
    }
    writeln!(output, "{INPUT_ENCODING}\n")?;

    let attributes = [
        ("title", state.title.as_deref()),
        ("author", options.author.as_deref()),
        ("date", options.date.as_deref()),
    ];
    let mut any_attributes = false;
    for (command, value) in attributes {
        if let Some(value) = value {
            writeln!(output, "\\{command}{{{value}}}")?;
            any_attributes = true;
        }
    }
    if any_attributes {
        output.write_char('\n')?;
    }

    output.write_str("\\begin{document}\n")?;
    if state.title_declared() {
        output.write_str("\\maketitle\n")?;
    }
    let body = body.trim_matches('\n');
    if !body.is_empty() {
        writeln!(output, "{body}")?;
    }
    output.write_str("\\end{document}\n")
}
