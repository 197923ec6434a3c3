use std::sync::OnceLock;

use regex::Regex;

use crate::editing::{Document, TextEdit};
use crate::text::Line;

static ORDERED_ITEM: OnceLock<Regex> = OnceLock::new();
static UNORDERED_ITEM: OnceLock<Regex> = OnceLock::new();

fn ordered_item_regex() -> &'static Regex {
    ORDERED_ITEM.get_or_init(|| Regex::new(r"^(\s*)(\d+(\.\d+)*)\.\s").unwrap())
}

fn unordered_item_regex() -> &'static Regex {
    UNORDERED_ITEM.get_or_init(|| Regex::new(r"^(\s*)([-*+])\s").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Ordered,
    Unordered,
}

/// Numbering context at one indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub indent: usize,
    pub number: usize,
    pub list_type: ListType,
}

/// A list item line as seen by the numbering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemLine {
    indent: usize,
    list_type: ListType,
    /// Absolute offsets of the numeral, ordered items only.
    numeral: Option<(usize, usize)>,
    numeral_text: String,
}

impl ItemLine {
    fn parse(line: &Line) -> Option<Self> {
        if let Some(caps) = ordered_item_regex().captures(&line.text) {
            let numeral = caps.get(2)?;
            return Some(Self {
                indent: caps[1].len(),
                list_type: ListType::Ordered,
                numeral: Some((line.from + numeral.start(), line.from + numeral.end())),
                numeral_text: numeral.as_str().to_string(),
            });
        }
        let caps = unordered_item_regex().captures(&line.text)?;
        Some(Self {
            indent: caps[1].len(),
            list_type: ListType::Unordered,
            numeral: None,
            numeral_text: String::new(),
        })
    }
}

/// The `ListFrame` stack for one top-to-bottom pass.
#[derive(Debug, Default)]
pub struct Numbering {
    stack: Vec<ListFrame>,
}

impl Numbering {
    pub fn frames(&self) -> &[ListFrame] {
        &self.stack
    }

    /// Feed the next line; returns the numeral fix for it, if any.
    pub fn line(&mut self, line: &Line) -> Option<TextEdit> {
        let Some(item) = ItemLine::parse(line) else {
            // blank lines keep the list open, anything else ends it
            if !line.is_blank() {
                self.stack.clear();
            }
            return None;
        };

        while self.stack.last().is_some_and(|f| f.indent > item.indent) {
            self.stack.pop();
        }
        match self.stack.last_mut() {
            Some(top) if top.indent == item.indent && top.list_type == item.list_type => {
                top.number += 1;
            }
            Some(top) if top.indent == item.indent => {
                *top = ListFrame {
                    indent: item.indent,
                    number: 1,
                    list_type: item.list_type,
                };
            }
            _ => self.stack.push(ListFrame {
                indent: item.indent,
                number: 1,
                list_type: item.list_type,
            }),
        }

        let (from, to) = item.numeral?;
        let expected = self.numeral(&item.numeral_text);
        (expected != item.numeral_text).then(|| TextEdit::replace(from, to, expected))
    }

    /// The numeral the current item should carry.
    ///
    /// A plain `3.` is numbered by its own frame. A dotted numeral like `2.1.` spells out
    /// every ordered level on the stack, outer to inner.
    fn numeral(&self, current: &str) -> String {
        let own = self.stack.last().map_or(1, |f| f.number);
        if !current.contains('.') {
            return own.to_string();
        }
        self.stack
            .iter()
            .filter(|f| f.list_type == ListType::Ordered)
            .map(|f| f.number.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// One pass over the whole document: the numeral replacements that make every ordered
/// list count up from 1 at each level. Running it again after applying the edits yields
/// nothing.
pub fn renumber(doc: &Document) -> Vec<TextEdit> {
    let mut numbering = Numbering::default();
    let edits: Vec<TextEdit> = doc.lines().filter_map(|line| numbering.line(&line)).collect();
    log::debug!("renumbering produced {} edits", edits.len());
    edits
}
