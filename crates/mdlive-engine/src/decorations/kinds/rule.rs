use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side, classes};

pub struct HorizontalRule;

impl HorizontalRule {
    /// A line decoration that draws the rule even while the token text is hidden, plus the
    /// token itself.
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        let line = cx.doc.line_at(cx.from);
        let class = if cx.is_selected {
            classes::HORIZONTAL_RULE_ACTIVE
        } else {
            classes::HORIZONTAL_RULE
        };
        let mut items = vec![DecorationItem::line(line.from, class, None)];

        let to = cx.to.min(line.to);
        if to > cx.from {
            items.push(cx.syntax(cx.from, to, Side::Inline));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorations::kinds::test_support::{context, single_node};
    use crate::editing::Selection;
    use crate::options::PreviewOptions;
    use crate::syntax::NodeKind;
    use crate::text::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_line_and_hidden_token() {
        let (doc, tree, id) = single_node("a\n\n---\n\nb", NodeKind::HorizontalRule, Span::new(3, 6));
        let sel = Selection::cursor(0);
        let opts = PreviewOptions::default();
        assert_eq!(
            HorizontalRule::decorate(&context(&doc, &tree, id, &sel, &opts)),
            vec![
                DecorationItem::line(3, classes::HORIZONTAL_RULE, None),
                DecorationItem::hide(3, 6, Side::Inline),
            ]
        );
    }

    #[test]
    fn selected_rule_uses_active_class_and_shows_token() {
        let (doc, tree, id) = single_node("***", NodeKind::HorizontalRule, Span::new(0, 3));
        let sel = Selection::cursor(1);
        let opts = PreviewOptions::default();
        assert_eq!(
            HorizontalRule::decorate(&context(&doc, &tree, id, &sel, &opts)),
            vec![
                DecorationItem::line(0, classes::HORIZONTAL_RULE_ACTIVE, None),
                DecorationItem::mark(0, 3, Side::Inline, classes::VISIBLE_SYNTAX),
            ]
        );
    }
}
