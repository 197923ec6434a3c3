use crate::decorations::DecorationItem;
use crate::decorations::kinds::NodeContext;

pub struct Emphasis;

impl Emphasis {
    /// `*`/`_` (len 1) or `**`/`__` (len 2) on both edges, hidden or shown but never
    /// widgetized.
    pub fn decorate(cx: &NodeContext<'_>, len: usize) -> Vec<DecorationItem> {
        let source = cx.source();
        if source.len() < len * 2 || !Self::is_delimited(source, len) {
            log::trace!("emphasis at {}..{} has no {len}-char markers", cx.from, cx.to);
            return Vec::new();
        }
        cx.edges(len)
    }

    fn is_delimited(source: &str, len: usize) -> bool {
        let bytes = source.as_bytes();
        let edges = bytes[..len].iter().chain(&bytes[bytes.len() - len..]);
        edges.into_iter().all(|b| matches!(b, b'*' | b'_'))
    }
}
