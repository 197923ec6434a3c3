use std::sync::OnceLock;

use regex::Regex;

use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side};

static OPENING_FENCE: OnceLock<Regex> = OnceLock::new();
static CLOSING_FENCE: OnceLock<Regex> = OnceLock::new();

fn opening_fence_regex() -> &'static Regex {
    OPENING_FENCE.get_or_init(|| Regex::new(r"^(\s*(?:>\s*)?)(`{3,})(\w*)").unwrap())
}

fn closing_fence_regex() -> &'static Regex {
    CLOSING_FENCE.get_or_init(|| Regex::new(r"^(\s*(?:>\s*)?)(`{3,})").unwrap())
}

pub struct CodeFence;

impl CodeFence {
    /// Hides the opening fence with its language tag and the closing fence, matched on
    /// whole lines so a quote prefix is included. Nothing at all while revealed, and
    /// nothing for a block that has not grown past its opening line yet.
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        if cx.revealed() {
            return Vec::new();
        }
        let first = cx.doc.line_at(cx.from);
        let last = cx.doc.line_at(cx.to.saturating_sub(1).max(cx.from));
        if last.number <= first.number {
            return Vec::new();
        }

        let mut items = Vec::new();
        if let Some(m) = opening_fence_regex().find(&first.text) {
            items.push(DecorationItem::hide(first.from, first.from + m.end(), Side::Opening));
        }
        if let Some(m) = closing_fence_regex().find(&last.text) {
            items.push(DecorationItem::hide(last.from, last.from + m.end(), Side::Closing));
        }
        items
    }
}
