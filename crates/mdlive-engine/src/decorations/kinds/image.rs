use std::sync::OnceLock;

use regex::Regex;

use crate::decorations::kinds::NodeContext;
use crate::decorations::{DecorationItem, Side};

static IMAGE: OnceLock<Regex> = OnceLock::new();

fn image_regex() -> &'static Regex {
    IMAGE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap())
}

pub struct Image;

impl Image {
    pub const PREFIX: &'static str = "![";

    /// Only the `![` prefix and the `](url)` tail; the image itself is rendered by the
    /// host, so this never produces a widget.
    pub fn decorate(cx: &NodeContext<'_>) -> Vec<DecorationItem> {
        let Some(caps) = image_regex().captures(cx.source()) else {
            log::trace!("image at {}..{} is not an inline image", cx.from, cx.to);
            return Vec::new();
        };
        let alt_len = caps.get(1).map_or(0, |m| m.len());
        let tail = cx.from + Self::PREFIX.len() + alt_len;
        if tail >= cx.to {
            return Vec::new();
        }
        vec![
            cx.syntax(cx.from, cx.from + Self::PREFIX.len(), Side::Opening),
            cx.syntax(tail, cx.to, Side::Closing),
        ]
    }
}
