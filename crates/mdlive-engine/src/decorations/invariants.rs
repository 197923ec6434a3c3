use crate::decorations::{DecorationItem, DecorationKind};
use crate::editing::{Document, Selection};

/// Panics if a decoration list breaks what hosts rely on: ranges inside the document and
/// sorted by `(from, to, side)`, line decorations empty and at a line start, and no widget
/// over a span the main selection touches.
pub fn check(doc: &Document, selection: &Selection, items: &[DecorationItem]) {
    let n = doc.len();
    let main = selection.main().span();

    for pair in items.windows(2) {
        assert!(
            pair[0].sort_key() <= pair[1].sort_key(),
            "decorations out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }

    for item in items {
        assert!(
            item.from <= item.to && item.to <= n,
            "decoration out of bounds: {}..{} (document length: {})",
            item.from,
            item.to,
            n
        );
        if let DecorationKind::Line { .. } = item.kind {
            assert_eq!(item.from, item.to, "line decoration with a non-empty range");
            assert_eq!(
                doc.line_at(item.from).from,
                item.from,
                "line decoration not at a line start"
            );
        }
        if let Some(widget) = item.widget_ref() {
            assert!(
                !widget.original_span().intersects(main),
                "widget {:?} replaces a span touching the selection {:?}",
                widget,
                main
            );
        }
    }
}
