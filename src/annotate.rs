//! Raw definition text to annotated HTML.
//!
//! Every line is split at its first unescaped `#`. Code and comment text are
//! both HTML-escaped; the comment keeps its leading `#` and is wrapped in a
//! `comment` span. Line structure (blank lines included) is preserved so the
//! block can be dropped into a `<pre>` element as-is.
//!
//! A `#` inside a closed quoted literal is part of a string value, as in
//! `string COLOR="#ff0000"`, so it is treated like an escaped one.

use tera::escape_html;

/// CSS class applied to comment spans.
pub const COMMENT_CLASS: &str = "comment";

/// Split `line` into its code part and an optional comment starting at `#`.
///
/// A `#` does not start a comment when it is preceded by a backslash or sits
/// inside a closed quoted literal. Quotes that never close are ordinary
/// characters.
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    let bytes = line.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => {
                idx += 2;
                continue;
            }
            quote @ (b'"' | b'\'') => {
                if let Some(close) = closing_quote(bytes, idx + 1, quote) {
                    idx = close + 1;
                    continue;
                }
            }
            b'#' => return (&line[..idx], Some(&line[idx..])),
            _ => {}
        }
        idx += 1;
    }
    (line, None)
}

fn closing_quote(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut idx = start;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b if b == quote => return Some(idx),
            _ => idx += 1,
        }
    }
    None
}

/// One source line, split for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnotatedLine<'a> {
    /// Code text; right-trimmed when a comment follows.
    pub code: &'a str,
    /// Whitespace between code and comment, kept verbatim.
    pub gap: &'a str,
    /// Comment text including the leading `#`.
    pub comment: Option<&'a str>,
}

impl<'a> AnnotatedLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        match split_comment(line) {
            (code, Some(comment)) => {
                let trimmed = code.trim_end();
                Self {
                    code: trimmed,
                    gap: &code[trimmed.len()..],
                    comment: Some(comment),
                }
            }
            (code, None) => Self {
                code,
                gap: "",
                comment: None,
            },
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = escape_html(self.code);
        html.push_str(self.gap);
        if let Some(comment) = self.comment {
            html.push_str("<span class=\"");
            html.push_str(COMMENT_CLASS);
            html.push_str("\">");
            html.push_str(&escape_html(comment));
            html.push_str("</span>");
        }
        html
    }
}

/// Annotate a whole definition, one output line per source line.
pub fn annotate_raw_text(raw_text: &str) -> String {
    raw_text
        .lines()
        .map(|line| AnnotatedLine::parse(line).to_html())
        .collect::<Vec<_>>()
        .join("\n")
}
