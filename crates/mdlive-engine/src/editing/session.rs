use std::collections::VecDeque;

use crate::decorations::{self, DecorationItem};
use crate::editing::{Assoc, ChangeSet, Document, EditError, Patch, Selection};
use crate::formatting::{self, InlineMarker};
use crate::lists;
use crate::options::PreviewOptions;
use crate::syntax::{MarkdownParser, PulldownParser, SyntaxTree};
use crate::text::Span;

/// One host request: an edit batch, a selection change, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub changes: ChangeSet,
    /// Selection after the transaction, in the coordinates of the new document. `None`
    /// maps the current selection through `changes`.
    pub selection: Option<Selection>,
    /// Ask for the numbering pass once the edit has landed.
    pub renumber: bool,
}

impl Transaction {
    pub fn select(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }

    pub fn edit(changes: ChangeSet) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_renumber(mut self) -> Self {
        self.renumber = true;
        self
    }
}

/// Undo steps kept per session; the oldest is dropped past this.
const UNDO_LIMIT: usize = 500;

#[derive(Debug, Clone)]
struct UndoStep {
    inverse: ChangeSet,
    selection: Selection,
}

/// Current document, its syntax tree and the selection, plus the most recent
/// `UNDO_LIMIT` undo steps.
pub struct Session<P: MarkdownParser = PulldownParser> {
    doc: Document,
    tree: SyntaxTree,
    selection: Selection,
    options: PreviewOptions,
    parser: P,
    undo: VecDeque<UndoStep>,
}

impl Session<PulldownParser> {
    pub fn with_default_parser(text: &str, options: PreviewOptions) -> Self {
        Self::new(text, PulldownParser::default(), options)
    }
}

impl<P: MarkdownParser> Session<P> {
    pub fn new(text: &str, parser: P, options: PreviewOptions) -> Self {
        Self::from_document(Document::new(text), parser, options)
    }

    pub fn from_document(doc: Document, parser: P, options: PreviewOptions) -> Self {
        let tree = parser.parse(&doc);
        Self {
            doc,
            tree,
            selection: Selection::default(),
            options,
            parser,
            undo: VecDeque::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PreviewOptions) {
        self.options = options;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Apply a transaction.
    ///
    /// A non-empty edit batch becomes one undo step. When the transaction asks for it and
    /// `renumber_after_edit` is on, the numbering pass runs next against the edited
    /// document and, if it changes anything, becomes a second undo step.
    pub fn dispatch(&mut self, transaction: Transaction) -> Result<Patch, EditError> {
        let Transaction {
            changes,
            selection,
            renumber,
        } = transaction;

        let mut changed = Vec::new();
        if !changes.is_empty() {
            changed = self.commit(&changes, selection)?;
        } else if let Some(selection) = selection {
            self.selection = selection.clamp(self.doc.len());
        }

        if renumber && self.options.renumber_after_edit {
            let numbering = ChangeSet::new(lists::renumber(&self.doc))?;
            if !numbering.is_empty() {
                let mut spans: Vec<Span> = changed
                    .iter()
                    .map(|s| {
                        let start = numbering.map_pos_lossy(s.start, Assoc::Before);
                        let end = numbering.map_pos_lossy(s.end, Assoc::After);
                        Span::new(start, end.max(start))
                    })
                    .collect();
                spans.extend(self.commit(&numbering, None)?);
                spans.sort_by_key(|s| (s.start, s.end));
                changed = spans;
            }
        }

        Ok(self.patch(changed))
    }

    /// Decorations for the current snapshot, recomputed from scratch.
    pub fn decorations(&self) -> Vec<DecorationItem> {
        decorations::build_with_options(&self.doc, &self.tree, &self.selection, &self.options)
    }

    /// Toggle `marker` around the main selection.
    pub fn toggle_style(&mut self, marker: InlineMarker) -> Result<Patch, EditError> {
        let main = self.selection.main();
        let result = formatting::toggle_with_window(
            &self.doc,
            main.from(),
            main.to(),
            marker,
            self.options.toggle_window_factor,
        );
        let changes = result.changes()?;
        self.dispatch(Transaction::edit(changes).with_selection(Selection::single(
            result.selection.anchor,
            result.selection.head,
        )))
    }

    /// Run the numbering pass over the whole document as one undo step.
    pub fn renumber_lists(&mut self) -> Result<Patch, EditError> {
        let changes = ChangeSet::new(lists::renumber(&self.doc))?;
        self.dispatch(Transaction::edit(changes))
    }

    /// Revert the most recent undo step. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Patch>, EditError> {
        let Some(step) = self.undo.pop_back() else {
            return Ok(None);
        };
        let doc = match self.doc.apply(&step.inverse) {
            Ok(doc) => doc,
            Err(e) => {
                self.undo.push_back(step);
                return Err(e);
            }
        };
        let changed = step.inverse.changed_ranges();
        self.doc = doc;
        self.selection = step.selection.clamp(self.doc.len());
        self.tree = self.parser.parse(&self.doc);
        log::debug!("undo to version {}", self.doc.version());
        Ok(Some(self.patch(changed)))
    }

    fn commit(
        &mut self,
        changes: &ChangeSet,
        selection: Option<Selection>,
    ) -> Result<Vec<Span>, EditError> {
        let next = self.doc.apply(changes)?;
        self.undo.push_back(UndoStep {
            inverse: changes.invert(&self.doc),
            selection: self.selection.clone(),
        });
        if self.undo.len() > UNDO_LIMIT {
            self.undo.pop_front();
        }
        let selection = selection.unwrap_or_else(|| self.selection.map(changes));
        self.selection = selection.clamp(next.len());
        self.doc = next;
        self.tree = self.parser.parse(&self.doc);
        log::debug!(
            "applied {} edits, now at version {}",
            changes.len(),
            self.doc.version()
        );
        Ok(changes.changed_ranges())
    }

    fn patch(&self, changed: Vec<Span>) -> Patch {
        Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.doc.version(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorations::DecorationKind;
    use crate::editing::TextEdit;
    use pretty_assertions::assert_eq;

    fn session(text: &str) -> Session {
        Session::with_default_parser(text, PreviewOptions::default())
    }

    #[test]
    fn selection_only_transaction_is_not_an_undo_step() {
        let mut s = session("hello");
        let patch = s.dispatch(Transaction::select(Selection::single(1, 3))).unwrap();
        assert!(patch.changed.is_empty());
        assert_eq!(patch.version, 0);
        assert_eq!(s.selection(), &Selection::single(1, 3));
        assert!(!s.can_undo());
    }

    #[test]
    fn edit_maps_selection_and_reparses() {
        let mut s = session("a **b**");
        s.dispatch(Transaction::select(Selection::cursor(7))).unwrap();
        let patch = s
            .dispatch(Transaction::edit(ChangeSet::single(TextEdit::insert(0, "# "))))
            .unwrap();
        assert_eq!(s.document().text(), "# a **b**");
        assert_eq!(patch.changed, vec![Span::new(0, 2)]);
        assert_eq!(patch.new_selection, Selection::cursor(9));
        assert_eq!(patch.version, 1);
        assert!(
            s.tree()
                .preorder()
                .iter()
                .any(|id| s.tree().node(*id).kind == crate::syntax::NodeKind::Heading(1))
        );
    }

    #[test]
    fn rejected_edit_leaves_session_untouched() {
        let mut s = session("abc");
        let err = s
            .dispatch(Transaction::edit(ChangeSet::single(TextEdit::delete(2, 9))))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::OutOfBounds {
                from: 2,
                to: 9,
                len: 3
            }
        );
        assert_eq!(s.document().text(), "abc");
        assert!(!s.can_undo());
    }

    #[test]
    fn renumbering_is_its_own_undo_step() {
        let mut s = session("1. a\n2. b");
        let insert = ChangeSet::single(TextEdit::insert(5, "1. new\n"));
        s.dispatch(Transaction::edit(insert).with_renumber()).unwrap();
        assert_eq!(s.document().text(), "1. a\n2. new\n3. b");

        s.undo().unwrap();
        assert_eq!(s.document().text(), "1. a\n1. new\n2. b");
        s.undo().unwrap();
        assert_eq!(s.document().text(), "1. a\n2. b");
        assert_eq!(s.undo().unwrap(), None);
    }

    #[test]
    fn renumbering_can_be_switched_off() {
        let options = PreviewOptions {
            renumber_after_edit: false,
            ..PreviewOptions::default()
        };
        let mut s = Session::with_default_parser("1. a\n2. b", options);
        let insert = ChangeSet::single(TextEdit::insert(5, "1. new\n"));
        s.dispatch(Transaction::edit(insert).with_renumber()).unwrap();
        assert_eq!(s.document().text(), "1. a\n1. new\n2. b");
    }

    #[test]
    fn toggle_style_round_trip() {
        let mut s = session("**text**");
        s.dispatch(Transaction::select(Selection::single(2, 6))).unwrap();
        s.toggle_style(InlineMarker::Asterisk).unwrap();
        assert_eq!(s.document().text(), "***text***");
        assert_eq!(s.selection(), &Selection::single(3, 7));
        s.toggle_style(InlineMarker::Asterisk).unwrap();
        assert_eq!(s.document().text(), "**text**");
        assert_eq!(s.selection(), &Selection::single(2, 6));
    }

    #[test]
    fn undo_restores_selection() {
        let mut s = session("say hello");
        s.dispatch(Transaction::select(Selection::single(4, 9))).unwrap();
        s.toggle_style(InlineMarker::Highlight).unwrap();
        assert_eq!(s.document().text(), "say ==hello==");
        let patch = s.undo().unwrap().unwrap();
        assert_eq!(s.document().text(), "say hello");
        assert_eq!(patch.new_selection, Selection::single(4, 9));
    }

    #[test]
    fn undo_history_is_capped() {
        let mut s = session("");
        for _ in 0..UNDO_LIMIT + 10 {
            let end = s.document().len();
            s.dispatch(Transaction::edit(ChangeSet::single(TextEdit::insert(end, "x"))))
                .unwrap();
        }
        let mut undone = 0;
        while s.undo().unwrap().is_some() {
            undone += 1;
        }
        assert_eq!(undone, UNDO_LIMIT);
        assert_eq!(s.document().text(), "x".repeat(10));
    }

    #[test]
    fn renumber_lists_fixes_whole_document() {
        let mut s = session("3. a\n3. b");
        s.renumber_lists().unwrap();
        assert_eq!(s.document().text(), "1. a\n2. b");
    }

    #[test]
    fn decorations_follow_selection() {
        let mut s = session("`abc` x");
        s.dispatch(Transaction::select(Selection::cursor(7))).unwrap();
        assert!(s.decorations().iter().any(|d| d.widget_ref().is_some()));

        s.dispatch(Transaction::select(Selection::cursor(2))).unwrap();
        let items = s.decorations();
        assert!(items.iter().all(|d| d.widget_ref().is_none()));
        assert!(
            items
                .iter()
                .any(|d| matches!(d.kind, DecorationKind::Mark { .. }))
        );
    }
}
