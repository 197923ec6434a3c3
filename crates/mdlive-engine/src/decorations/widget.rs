use serde::Serialize;

use crate::decorations::definitions::{self, DefinitionKind};
use crate::editing::Document;
use crate::text::Span;

/// What a widget renders in place of the syntax it hides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetKind {
    Strikethrough { text: String },
    Highlight { text: String },
    Underline { text: String },
    InlineCode { code: String },
    Link { text: String, url: String },
    /// `[text][ref_id]`; the URL is looked up in the definition on click.
    ReferenceLink { text: String, ref_id: String },
    /// Superscript `[^id]`
    FootnoteRef { id: String },
    FootnoteDefinition { id: String, preview: String },
    LinkDefinition { id: String, preview: String },
}

/// A rendered replacement for a hidden span of Markdown.
///
/// The original span and source text travel with the widget so the host can map a click
/// back onto the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub original_from: usize,
    pub original_to: usize,
    pub source_text: String,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn new(doc: &Document, span: Span, kind: WidgetKind) -> Self {
        Self {
            original_from: span.start,
            original_to: span.end,
            source_text: doc.slice_span(span).to_string(),
            kind,
        }
    }

    pub fn original_span(&self) -> Span {
        Span::new(self.original_from, self.original_to)
    }

    /// Text shown by the widget.
    pub fn display_text(&self) -> &str {
        match &self.kind {
            WidgetKind::Strikethrough { text }
            | WidgetKind::Highlight { text }
            | WidgetKind::Underline { text }
            | WidgetKind::Link { text, .. }
            | WidgetKind::ReferenceLink { text, .. } => text,
            WidgetKind::InlineCode { code } => code,
            WidgetKind::FootnoteRef { id } => id,
            WidgetKind::FootnoteDefinition { preview, .. }
            | WidgetKind::LinkDefinition { preview, .. } => preview,
        }
    }

    /// Where a click on this widget should take the caret in `doc`.
    ///
    /// Resolved against the current document on every call: a footnote reference jumps to
    /// its definition line, a definition to the first place it is used, and a reference
    /// link to its definition. Other widgets have nowhere to go.
    pub fn jump_target(&self, doc: &Document) -> Option<Span> {
        match &self.kind {
            WidgetKind::FootnoteRef { id } => {
                definitions::find_footnote(doc, id).map(|d| d.line.span())
            }
            WidgetKind::ReferenceLink { ref_id, .. } => {
                definitions::find_link(doc, ref_id).map(|d| d.line.span())
            }
            WidgetKind::FootnoteDefinition { id, .. } => {
                definitions::first_usage(doc, DefinitionKind::Footnote, id)
            }
            WidgetKind::LinkDefinition { id, .. } => {
                definitions::first_usage(doc, DefinitionKind::Link, id)
            }
            _ => None,
        }
    }
}
