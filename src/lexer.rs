//! Single-line shape recognizers used by block-level rewrites.
//!
//! None of these look past a line break: callers split the text into lines first.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0},
    combinator::{all_consuming, opt, rest, value},
    multi::many1_count,
    sequence::{pair, preceded, terminated, tuple},
    IResult, Parser,
};

/// Parses ATX heading
///
/// - One or more '#'-symbols, followed by a single space
/// - Everything after that (trimmed) is the heading text
///
/// Outputs `(level, text)`, where level is the number of '#'-symbols
pub fn atx_heading(input: &str) -> IResult<&str, (usize, &str)> {
    tuple((many1_count(char('#')), char(' '), rest))
        .map(|(level, _, content): (usize, char, &str)| (level, content.trim()))
        .parse(input)
}

/// Parses Setext underline
///
/// A line of only '=' (level 1) or only '-' (level 2), trailing spaces allowed
pub fn setext_underline(input: &str) -> IResult<&str, usize> {
    all_consuming(terminated(
        alt((
            value(1, take_while1(|c: char| c == '=')),
            value(2, take_while1(|c: char| c == '-')),
        )),
        space0,
    ))
    .parse(input)
}

/// Parses blockquote line, outputs it's content
///
/// Strips '>', and a single space following it, if there's one
pub fn quote_line(input: &str) -> IResult<&str, &str> {
    preceded(pair(char('>'), opt(char(' '))), rest).parse(input)
}

/// Parses indented code line, outputs the line without it's four-space prefix
pub fn indented_line(input: &str) -> IResult<&str, &str> {
    preceded(tag("    "), rest).parse(input)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
