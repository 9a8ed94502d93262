/// Split text into lines on `\r?\n` boundaries.
///
/// An empty text has no lines. Any other text yields one more line than it has
/// separators, so a trailing newline produces a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Like [`split_lines`], but every piece keeps its own `\n` or `\r\n`.
///
/// Yields exactly as many pieces as [`split_lines`] does, so concatenating the
/// pieces gives back `text` unchanged.
pub fn split_lines_inclusive(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut pieces: Vec<&str> = text.split_inclusive('\n').collect();
    if text.ends_with('\n') {
        pieces.push("");
    }
    pieces
}

/// The `\r\n`, `\n` or empty terminator at the end of a line piece.
pub(crate) fn line_terminator(piece: &str) -> &'static str {
    if piece.ends_with("\r\n") {
        "\r\n"
    } else if piece.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// The line separator used by `text`, if it contains one.
pub fn detect_separator(text: &str) -> Option<&'static str> {
    let pos = text.find('\n')?;
    if text[..pos].ends_with('\r') {
        Some("\r\n")
    } else {
        Some("\n")
    }
}

/// Inverse of [`split_lines`] for a given separator.
pub fn join_lines<S: AsRef<str>>(lines: &[S], separator: &str) -> String {
    let capacity = lines.iter().map(|l| l.as_ref().len()).sum::<usize>()
        + separator.len() * lines.len().saturating_sub(1);
    let mut result = String::with_capacity(capacity);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.push_str(line.as_ref());
    }
    result
}
