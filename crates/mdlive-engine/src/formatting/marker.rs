use std::fmt;
use std::str::FromStr;

/// Inline style markers the toggle understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineMarker {
    /// `*` italic, and bold/bold-italic via runs of two or three
    Asterisk,
    /// `_` italic
    Underscore,
    /// `~~` strikethrough
    Strikethrough,
    /// `==` highlight
    Highlight,
}

impl InlineMarker {
    pub const ALL: [InlineMarker; 4] = [
        InlineMarker::Asterisk,
        InlineMarker::Underscore,
        InlineMarker::Strikethrough,
        InlineMarker::Highlight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InlineMarker::Asterisk => "*",
            InlineMarker::Underscore => "_",
            InlineMarker::Strikethrough => "~~",
            InlineMarker::Highlight => "==",
        }
    }

    pub fn len(self) -> usize {
        self.as_str().len()
    }

    /// The character the marker is made of.
    pub fn unit(self) -> char {
        match self {
            InlineMarker::Asterisk => '*',
            InlineMarker::Underscore => '_',
            InlineMarker::Strikethrough => '~',
            InlineMarker::Highlight => '=',
        }
    }
}

impl fmt::Display for InlineMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown inline marker {0:?} (expected one of *, _, ~~, ==)")]
pub struct UnknownMarker(pub String);

impl FromStr for InlineMarker {
    type Err = UnknownMarker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InlineMarker::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMarker(s.to_string()))
    }
}
