// Shared by several bench targets; each one only uses part of it.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* `content` and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted text\n> across lines\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n---\n\n";
    base.repeat(size)
}

/// Marker geometry for a document of `blocks` blocks, each a few lines tall.
#[allow(dead_code)]
pub fn generate_marker_layout(blocks: usize) -> Vec<(usize, f64, f64)> {
    let mut line = 0;
    let mut top = 0.0;
    (0..blocks)
        .map(|i| {
            let lines = 1 + i % 4;
            let height = 24.0 * lines as f64;
            let marker = (line, top, height);
            line += lines + 1;
            top += height + 12.0;
            marker
        })
        .collect()
}
