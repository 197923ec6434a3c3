use crate::decorations::definitions::{Definition, DefinitionKind};
use crate::decorations::{DecorationItem, Side, Widget, WidgetKind, classes};
use crate::editing::{Document, Selection};
use crate::options::PreviewOptions;
use crate::text::preview;

pub struct DefinitionLine;

impl DefinitionLine {
    /// Not revealed: the whole line becomes one widget. Revealed: `[id]:` is shown as
    /// syntax and the rest is marked as definition content.
    pub fn decorate(
        doc: &Document,
        selection: &Selection,
        options: &PreviewOptions,
        def: &Definition,
    ) -> Vec<DecorationItem> {
        let line = def.line.span();
        let is_selected = line.intersects(selection.main().span());

        if is_selected || !options.hiding_enabled {
            let label = def.label_span();
            let content = def.content_span();
            let mut items = vec![DecorationItem::mark(
                label.start,
                label.end,
                Side::Opening,
                classes::VISIBLE_SYNTAX,
            )];
            if !content.is_empty() {
                items.push(DecorationItem::mark(
                    content.start,
                    content.end,
                    Side::Inline,
                    classes::DEFINITION_CONTENT,
                ));
            }
            return items;
        }

        let id = def.id.clone();
        let kind = match def.kind {
            DefinitionKind::Footnote => WidgetKind::FootnoteDefinition {
                id,
                preview: def.content.clone(),
            },
            DefinitionKind::Link => WidgetKind::LinkDefinition {
                id,
                preview: preview(&def.content, options.link_preview_max),
            },
        };
        vec![DecorationItem::widget(Widget::new(doc, line, kind))]
    }
}
