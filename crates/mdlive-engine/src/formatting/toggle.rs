use serde::Serialize;

use crate::editing::{Assoc, ChangeSet, Document, EditError, SelectionRange, TextEdit};
use crate::formatting::InlineMarker;
use crate::formatting::delimited::{self, Delimited, Delimiters};
use crate::options::PreviewOptions;
use crate::text::{Span, ceil_char_boundary, floor_char_boundary};

/// Delimiters of the bold/bold-italic swap, longest first.
const BOLD_RUNS: &[&str] = &["***", "**"];

/// Every delimiter run a stacked style can sit inside.
const STYLE_RUNS: &[&str] = &["***", "**", "*", "___", "__", "_", "~~", "=="];

/// Which rule produced a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleStep {
    /// `**x**` and `***x***` swapped into each other.
    BoldItalic,
    /// One marker peeled off an enclosing run of the same marker.
    Unwrap,
    /// The marker added to or removed from a run of a different style.
    Combine,
    /// A caret between an empty marker pair; the pair is removed.
    RemoveEmptyPair,
    /// The selection wrapped in the marker.
    Wrap,
}

/// Edits for one toggle and where the selection goes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResult {
    pub step: ToggleStep,
    pub edits: Vec<TextEdit>,
    pub selection: SelectionRange,
}

impl ToggleResult {
    pub fn changes(&self) -> Result<ChangeSet, EditError> {
        ChangeSet::new(self.edits.clone())
    }
}

/// Toggle `marker` around `[from, to)` using the default search window.
pub fn toggle(doc: &Document, from: usize, to: usize, marker: InlineMarker) -> ToggleResult {
    toggle_with_window(
        doc,
        from,
        to,
        marker,
        PreviewOptions::default().toggle_window_factor,
    )
}

/// Toggle `marker` around `[from, to)`.
///
/// Only text within `marker.len() * window_factor` bytes of the selection is searched for
/// an enclosing styled span. The rules are tried in order and the first that applies
/// wins: swap bold and bold-italic, peel the marker off a span already styled with it,
/// stack it onto (or off) a span of another style, and finally wrap the selection.
pub fn toggle_with_window(
    doc: &Document,
    from: usize,
    to: usize,
    marker: InlineMarker,
    window_factor: usize,
) -> ToggleResult {
    let text = doc.text();
    let (from, to) = (from.min(to), from.max(to));
    let from = floor_char_boundary(text, from);
    let to = ceil_char_boundary(text, to);

    let reach = marker.len() * window_factor;
    let (start, end) = widen_over_runs(
        text,
        floor_char_boundary(text, from.saturating_sub(reach)),
        ceil_char_boundary(text, to.saturating_add(reach)),
    );
    let window = &text[start..end];
    let selection = Span::new(from - start, to - start);

    let found = bold_italic(window, selection, marker)
        .map(|(m, edits)| (ToggleStep::BoldItalic, m, edits))
        .or_else(|| peel(window, selection, marker).map(|(m, e)| (ToggleStep::Unwrap, m, e)))
        .or_else(|| combine(window, selection, marker).map(|(m, e)| (ToggleStep::Combine, m, e)));

    let result = match found {
        Some((step, m, edits)) => {
            let edits: Vec<TextEdit> = edits
                .into_iter()
                .map(|e| TextEdit::replace(e.from + start, e.to + start, e.insert))
                .collect();
            log::debug!(
                "toggle {marker}: {step:?} on {}..{}",
                m.open.start + start,
                m.close.end + start
            );
            let selection = map_selection(&edits, from, to);
            ToggleResult {
                step,
                edits,
                selection,
            }
        }
        None => wrap_or_clear(text, from, to, marker),
    };
    log::trace!("toggle produced {:?}", result);
    result
}

type Found = (Delimited, Vec<TextEdit>);

fn is_marker_byte(b: u8) -> bool {
    matches!(b, b'*' | b'_' | b'~' | b'=')
}

/// Move the window bounds outward until neither cuts through a run of marker characters.
fn widen_over_runs(text: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    let splits = |at: usize| {
        at > 0 && at < bytes.len() && is_marker_byte(bytes[at - 1]) && is_marker_byte(bytes[at])
    };
    while splits(start) {
        start -= 1;
    }
    while splits(end) {
        end += 1;
    }
    (start, end)
}

fn bold_italic(window: &str, selection: Span, marker: InlineMarker) -> Option<Found> {
    if marker != InlineMarker::Asterisk {
        return None;
    }
    let m = delimited::find_enclosing(window, selection, Delimiters::OneOf(BOLD_RUNS), |c| {
        c != '*'
    })?;
    let swapped = if m.open.len() == 2 { "***" } else { "**" };
    let edits = vec![
        TextEdit::replace(m.open.start, m.open.end, swapped),
        TextEdit::replace(m.close.start, m.close.end, swapped),
    ];
    Some((m, edits))
}

fn peel(window: &str, selection: Span, marker: InlineMarker) -> Option<Found> {
    let unit = marker.unit();
    let m = delimited::find_enclosing(
        window,
        selection,
        Delimiters::Repeated(marker.as_str()),
        |c| c != unit,
    )?;
    // peel from the inner side of each run
    let len = marker.len();
    let edits = vec![
        TextEdit::delete(m.open.end - len, m.open.end),
        TextEdit::delete(m.close.start, m.close.start + len),
    ];
    Some((m, edits))
}

fn combine(window: &str, selection: Span, marker: InlineMarker) -> Option<Found> {
    let m = delimited::find_enclosing(window, selection, Delimiters::OneOf(STYLE_RUNS), |c| {
        !matches!(c, '*' | '_' | '~' | '=')
    })?;
    let run = m.delimiter(window);
    let edits = if run.contains(marker.as_str()) {
        let stripped = run.replacen(marker.as_str(), "", 1);
        vec![
            TextEdit::replace(m.open.start, m.open.end, stripped.clone()),
            TextEdit::replace(m.close.start, m.close.end, stripped),
        ]
    } else {
        vec![
            TextEdit::insert(m.open.end, marker.as_str()),
            TextEdit::insert(m.close.start, marker.as_str()),
        ]
    };
    Some((m, edits))
}

fn wrap_or_clear(text: &str, from: usize, to: usize, marker: InlineMarker) -> ToggleResult {
    let m = marker.as_str();
    let len = m.len();

    if from == to && text[..from].ends_with(m) && text[from..].starts_with(m) {
        log::debug!("toggle {marker}: removing empty pair at {from}");
        return ToggleResult {
            step: ToggleStep::RemoveEmptyPair,
            edits: vec![TextEdit::delete(from - len, from + len)],
            selection: SelectionRange::cursor(from - len),
        };
    }

    log::debug!("toggle {marker}: wrapping {from}..{to}");
    let edits = if from == to {
        vec![TextEdit::insert(from, m.repeat(2))]
    } else {
        vec![TextEdit::insert(from, m), TextEdit::insert(to, m)]
    };
    ToggleResult {
        step: ToggleStep::Wrap,
        edits,
        selection: SelectionRange::new(from + len, to + len),
    }
}

/// Carry the selection through the edits so it keeps covering the same text.
fn map_selection(edits: &[TextEdit], from: usize, to: usize) -> SelectionRange {
    let Ok(changes) = ChangeSet::new(edits.to_vec()) else {
        return SelectionRange::new(from, to);
    };
    let new_from = changes.map_pos_lossy(from, Assoc::After);
    let new_to = changes.map_pos_lossy(to, Assoc::Before).max(new_from);
    SelectionRange::new(new_from, new_to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn apply(text: &str, from: usize, to: usize, marker: InlineMarker) -> (String, SelectionRange) {
        let doc = Document::new(text);
        let result = toggle(&doc, from, to, marker);
        let next = doc.apply(&result.changes().unwrap()).unwrap();
        (next.text().to_string(), result.selection)
    }

    fn selected(text: &str, sel: SelectionRange) -> &str {
        &text[sel.from()..sel.to()]
    }

    #[rstest]
    #[case::wrap_italic("say hello", 4, 9, InlineMarker::Asterisk, "say *hello*")]
    #[case::wrap_underscore("say hello", 4, 9, InlineMarker::Underscore, "say _hello_")]
    #[case::wrap_strike("say hello", 4, 9, InlineMarker::Strikethrough, "say ~~hello~~")]
    #[case::wrap_highlight("say hello", 4, 9, InlineMarker::Highlight, "say ==hello==")]
    #[case::bold_to_bold_italic("**text**", 2, 6, InlineMarker::Asterisk, "***text***")]
    #[case::bold_italic_to_bold("***text***", 3, 7, InlineMarker::Asterisk, "**text**")]
    #[case::unwrap_italic("a *b* c", 3, 4, InlineMarker::Asterisk, "a b c")]
    #[case::unwrap_strike("~~gone~~", 2, 6, InlineMarker::Strikethrough, "gone")]
    #[case::unwrap_bold_underscore("__x__", 2, 3, InlineMarker::Underscore, "_x_")]
    #[case::stack_strike_on_bold("**text**", 2, 6, InlineMarker::Strikethrough, "**~~text~~**")]
    #[case::stack_highlight_on_italic("_text_", 1, 5, InlineMarker::Highlight, "_==text==_")]
    #[case::caret_inside_word("**text**", 4, 4, InlineMarker::Asterisk, "***text***")]
    fn toggles(
        #[case] text: &str,
        #[case] from: usize,
        #[case] to: usize,
        #[case] marker: InlineMarker,
        #[case] expected: &str,
    ) {
        assert_eq!(apply(text, from, to, marker).0, expected);
    }

    #[rstest]
    fn toggling_twice_restores_text(
        #[values(
            InlineMarker::Asterisk,
            InlineMarker::Underscore,
            InlineMarker::Strikethrough,
            InlineMarker::Highlight
        )]
        marker: InlineMarker,
        #[values((0, 5), (6, 11), (2, 4), (0, 11), (3, 3), (11, 11))] sel: (usize, usize),
    ) {
        let original = "hello world";
        let (once, selection) = apply(original, sel.0, sel.1, marker);
        let (twice, _) = apply(&once, selection.from(), selection.to(), marker);
        assert_eq!(twice, original);
    }

    #[test]
    fn bold_italic_cycle() {
        let (italic_bold, sel) = apply("**text**", 2, 6, InlineMarker::Asterisk);
        assert_eq!(italic_bold, "***text***");
        assert_eq!(selected(&italic_bold, sel), "text");
        let (bold, sel) = apply(&italic_bold, sel.from(), sel.to(), InlineMarker::Asterisk);
        assert_eq!(bold, "**text**");
        assert_eq!(selected(&bold, sel), "text");
    }

    #[test]
    fn selection_keeps_covering_the_same_text() {
        let (text, sel) = apply("x **bold** y", 4, 8, InlineMarker::Strikethrough);
        assert_eq!(text, "x **~~bold~~** y");
        assert_eq!(selected(&text, sel), "bold");

        let (text, sel) = apply("x *it* y", 3, 5, InlineMarker::Asterisk);
        assert_eq!(text, "x it y");
        assert_eq!(selected(&text, sel), "it");
    }

    #[test]
    fn empty_selection_wraps_into_an_empty_pair() {
        let doc = Document::new("ab");
        let result = toggle(&doc, 1, 1, InlineMarker::Highlight);
        assert_eq!(result.step, ToggleStep::Wrap);
        assert_eq!(result.edits, vec![TextEdit::insert(1, "====")]);
        assert_eq!(result.selection, SelectionRange::cursor(3));
    }

    #[test]
    fn empty_pair_around_caret_is_removed() {
        let doc = Document::new("a~~~~b");
        let result = toggle(&doc, 3, 3, InlineMarker::Strikethrough);
        assert_eq!(result.step, ToggleStep::RemoveEmptyPair);
        assert_eq!(result.edits, vec![TextEdit::delete(1, 5)]);
        assert_eq!(result.selection, SelectionRange::cursor(1));
    }

    #[test]
    fn styled_span_outside_window_is_ignored() {
        let doc = Document::new("*abcdefghij*");
        let near = toggle_with_window(&doc, 5, 6, InlineMarker::Asterisk, 50);
        assert_eq!(near.step, ToggleStep::Unwrap);
        let far = toggle_with_window(&doc, 5, 6, InlineMarker::Asterisk, 2);
        assert_eq!(far.step, ToggleStep::Wrap);
    }

    #[rstest]
    #[case::window_starts_inside_opening_run(51, 55)]
    #[case::window_ends_inside_closing_run(9, 14)]
    fn window_never_splits_a_delimiter_run(#[case] from: usize, #[case] to: usize) {
        let original = format!("***{}***", "a".repeat(60));
        let (once, selection) = apply(&original, from, to, InlineMarker::Asterisk);
        assert_eq!(once, format!("**{}**", "a".repeat(60)));
        let (twice, _) = apply(&once, selection.from(), selection.to(), InlineMarker::Asterisk);
        assert_eq!(twice, original);
    }

    #[test]
    fn enclosing_span_must_contain_the_selection() {
        // selection straddles the closing delimiter
        let (text, _) = apply("*ab* cd", 2, 6, InlineMarker::Highlight);
        assert_eq!(text, "*a==b* c==d");
    }

    #[test]
    fn multibyte_selection_is_snapped_to_char_boundaries() {
        let doc = Document::new("héllo");
        // offset 2 is inside 'é'
        let result = toggle(&doc, 2, 6, InlineMarker::Asterisk);
        assert_eq!(
            result.edits,
            vec![TextEdit::insert(1, "*"), TextEdit::insert(6, "*")]
        );
    }
}
