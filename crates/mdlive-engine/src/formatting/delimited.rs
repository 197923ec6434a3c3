//! Matching of `(delimiter)(content)\1` spans.
//!
//! The `regex` crate has no backreferences, so the closing run is checked by hand. The
//! scan reproduces what a backtracking engine does with such a pattern: leftmost match
//! first, delimiter alternatives in priority order at each position, non-overlapping
//! matches. Because the content class never contains a delimiter's first character, the
//! content is always the longest run of content characters.

use crate::text::Span;

/// Delimiter alternatives tried at each position.
#[derive(Debug, Clone, Copy)]
pub enum Delimiters<'a> {
    /// These strings, first match wins.
    OneOf(&'a [&'a str]),
    /// Any whole number of repetitions of this unit, longest first.
    Repeated(&'a str),
}

impl Delimiters<'_> {
    /// Byte lengths of the delimiters that start `rest`, in the order to try them.
    fn candidates(&self, rest: &str) -> Vec<usize> {
        match self {
            Delimiters::OneOf(options) => options
                .iter()
                .filter(|d| rest.starts_with(**d))
                .map(|d| d.len())
                .collect(),
            Delimiters::Repeated(unit) => {
                if unit.is_empty() {
                    return Vec::new();
                }
                let mut count = 0;
                while rest[count * unit.len()..].starts_with(unit) {
                    count += 1;
                }
                (1..=count).rev().map(|k| k * unit.len()).collect()
            }
        }
    }
}

/// One matched span, in coordinates of the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimited {
    pub open: Span,
    pub close: Span,
}

impl Delimited {
    pub fn span(&self) -> Span {
        Span::new(self.open.start, self.close.end)
    }

    pub fn delimiter<'t>(&self, text: &'t str) -> &'t str {
        &text[self.open.start..self.open.end]
    }
}

/// All non-overlapping matches in `text`, left to right.
pub fn find_all(
    text: &str,
    delimiters: Delimiters<'_>,
    is_content: impl Fn(char) -> bool,
) -> Vec<Delimited> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match match_at(text, pos, delimiters, &is_content) {
            Some(m) => {
                pos = m.close.end;
                found.push(m);
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    found
}

/// The first match that contains `selection` entirely.
pub fn find_enclosing(
    text: &str,
    selection: Span,
    delimiters: Delimiters<'_>,
    is_content: impl Fn(char) -> bool,
) -> Option<Delimited> {
    find_all(text, delimiters, is_content)
        .into_iter()
        .find(|m| m.span().contains(selection))
}

fn match_at(
    text: &str,
    pos: usize,
    delimiters: Delimiters<'_>,
    is_content: &impl Fn(char) -> bool,
) -> Option<Delimited> {
    let rest = &text[pos..];
    for len in delimiters.candidates(rest) {
        let delimiter = &rest[..len];
        let body = &rest[len..];
        let content_len = body
            .char_indices()
            .find(|(_, c)| !is_content(*c))
            .map_or(body.len(), |(i, _)| i);
        if content_len == 0 {
            continue;
        }
        if body[content_len..].starts_with(delimiter) {
            let open_end = pos + len;
            let close_start = open_end + content_len;
            return Some(Delimited {
                open: Span::new(pos, open_end),
                close: Span::new(close_start, close_start + len),
            });
        }
    }
    None
}
