// Shared by several bench targets; each only uses some of these
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic*, `code` and a [link](https://example.com).\n\n1. first\n1. second\n   - nested item\n\n> quoted ==highlight==\n> > deeper\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\nA note[^1] and a [ref][r].\n\n---\n\n";
    let mut content = base.repeat(size);
    content.push_str("[^1]: The footnote.\n[r]: https://example.com/reference\n");
    content
}

#[allow(dead_code)]
pub fn generate_numbered_list(items: usize) -> String {
    (0..items)
        .map(|i| {
            if i % 5 == 4 {
                "   1. nested\n".to_string()
            } else {
                "1. item\n".to_string()
            }
        })
        .collect()
}
