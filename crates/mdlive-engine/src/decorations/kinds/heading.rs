use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side};

pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// The `#` run plus one space. Heading text is never widgetized so it stays editable.
    ///
    /// Setext headings have no prefix and get nothing.
    pub fn decorate(cx: &NodeContext<'_>, level: u8) -> Vec<DecorationItem> {
        if !cx.source().starts_with(Self::MARKER) {
            return Vec::new();
        }
        let end = (cx.from + usize::from(level) + 1).min(cx.to);
        vec![cx.syntax(cx.from, end, Side::Opening)]
    }
}
