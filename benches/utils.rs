/// Builds a document of `lines` lines of comma-separated words.
pub fn document(lines: usize) -> String {
    let mut doc = String::with_capacity(lines * 48);
    for line in 0..lines {
        for word in 0..6 {
            if word > 0 {
                doc.push_str(", ");
            }
            doc.push_str(&format!("w{line}x{word}"));
        }
        doc.push('\n');
    }
    doc
}

/// Builds a single line of `words` comma-separated words, like minified output.
pub fn single_line(words: usize) -> String {
    (0..words)
        .map(|word| format!("w{word}"))
        .collect::<Vec<_>>()
        .join(",")
}
