use std::borrow::Cow;

/// Text transformations applied to both inputs before they are diffed.
///
/// The diff core compares lines by exact equality; anything that should be
/// ignored has to be removed from the text here first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationOptions {
    /// Compare lines case-insensitively
    pub ignore_case: bool,
    /// Collapse runs of spaces and tabs into one space and trim line ends
    pub collapse_whitespace: bool,
    /// Remove SQL `--` and `/* */` comments
    pub strip_comments: bool,
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_case(mut self, enabled: bool) -> Self {
        self.ignore_case = enabled;
        self
    }

    pub fn collapse_whitespace(mut self, enabled: bool) -> Self {
        self.collapse_whitespace = enabled;
        self
    }

    pub fn strip_comments(mut self, enabled: bool) -> Self {
        self.strip_comments = enabled;
        self
    }

    pub fn is_noop(&self) -> bool {
        !(self.ignore_case || self.collapse_whitespace || self.strip_comments)
    }

    /// Apply the enabled transformations to `text`.
    ///
    /// Line structure is preserved: the result has as many lines as the input,
    /// so line numbers in a diff of normalized text still point into the
    /// original text.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_noop() {
            return Cow::Borrowed(text);
        }

        let mut result = if self.strip_comments {
            strip_sql_comments(text)
        } else {
            text.to_string()
        };

        if self.collapse_whitespace {
            result = result
                .split('\n')
                .map(collapse_line)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.ignore_case {
            result = result.to_lowercase();
        }

        Cow::Owned(result)
    }
}

fn collapse_line(line: &str) -> String {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut collapsed = String::with_capacity(line.len());
    let mut in_space = false;
    for c in line.trim().chars() {
        if c == ' ' || c == '\t' {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }
    collapsed
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Quoted(char),
    LineComment,
    BlockComment(usize),
}

/// Remove T-SQL comments while leaving string literals and bracketed
/// identifiers alone. Block comments nest; newlines inside them are kept.
fn strip_sql_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut state = Scan::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            Scan::Code => match c {
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = Scan::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Scan::BlockComment(1);
                }
                '\'' | '"' => {
                    result.push(c);
                    state = Scan::Quoted(c);
                }
                '[' => {
                    result.push(c);
                    state = Scan::Quoted(']');
                }
                _ => result.push(c),
            },
            Scan::Quoted(close) => {
                result.push(c);
                if c == close {
                    state = Scan::Code;
                }
            }
            Scan::LineComment => {
                if c == '\n' {
                    result.push(c);
                    state = Scan::Code;
                } else if c == '\r' && chars.peek() == Some(&'\n') {
                    result.push(c);
                }
            }
            Scan::BlockComment(depth) => match c {
                '*' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = if depth == 1 {
                        Scan::Code
                    } else {
                        Scan::BlockComment(depth - 1)
                    };
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Scan::BlockComment(depth + 1);
                }
                '\n' => result.push(c),
                _ => {}
            },
        }
    }

    result
}
