//! Ordered list numbering.
//!
//! A single top-to-bottom pass over the lines keeps a stack of [`ListFrame`]s and emits a
//! [`crate::editing::TextEdit`] for every ordered item whose numeral is off. The host
//! applies all of them as one change, after the edit that triggered the pass.

pub mod numbering;

pub use numbering::{ListFrame, ListType, Numbering, renumber};
