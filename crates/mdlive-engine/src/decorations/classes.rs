//! Style classes attached by `Mark` and `Line` decorations.

/// Syntax markers shown because their node is selected or hiding is off.
pub const VISIBLE_SYNTAX: &str = "md-syntax-visible";
/// Numeral of an ordered list item.
pub const ORDERED_LIST_MARKER: &str = "md-list-ordered";
/// Body of a footnote or link definition line while it is being edited.
pub const DEFINITION_CONTENT: &str = "md-definition-content";
pub const BLOCKQUOTE_LINE: &str = "md-blockquote";
pub const HORIZONTAL_RULE: &str = "md-hr";
pub const HORIZONTAL_RULE_ACTIVE: &str = "md-hr-active";
