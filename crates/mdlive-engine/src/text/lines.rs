use xi_rope::Rope;

use super::span::Span;

/// A single line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first character of the line.
    pub from: usize,
    /// Byte offset of the end of the line content, excluding the line terminator.
    pub to: usize,
    /// The line text without its terminator.
    pub text: String,
}

impl Line {
    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Returns an iterator over the lines of the rope.
///
/// Uses `lines_raw` so that offsets account for `\n` and `\r\n` terminators; the
/// terminator itself is stripped from `text` and excluded from `to`.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = Line> {
    let total = rope.len();
    let mut offset = 0usize;
    let mut lines: Vec<Line> = Vec::new();

    for raw in rope.lines_raw(..) {
        let from = offset;
        offset += raw.len();
        let text = raw.trim_end_matches(['\r', '\n']).to_string();
        lines.push(Line {
            number: lines.len() + 1,
            from,
            to: from + text.len(),
            text,
        });
    }

    // `lines_raw` yields nothing for the empty line after a final newline; hosts still
    // address it as a real (empty) line.
    let ends_open = total == 0 || rope.byte_at(total - 1) == b'\n';
    if ends_open {
        lines.push(Line {
            number: lines.len() + 1,
            from: total,
            to: total,
            text: String::new(),
        });
    }

    lines.into_iter()
}
