/// Truncates `text` to at most `max` characters, appending `...` when anything was cut.
///
/// Counts characters rather than bytes so previews of non-ASCII URLs never split a
/// code point.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut s = text[..cut].to_string();
            s.push_str("...");
            s
        }
        None => text.to_string(),
    }
}

/// Largest char boundary in `text` that is `<= index`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary in `text` that is `>= index`.
pub fn ceil_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
