//! Line grammar for robots.txt documents
//!
//! Each line is either blank, a full-line comment, or `Key: Value`. The first
//! colon separates key from value and anything after a `#` in the value is an
//! inline comment. Lines that do not fit are kept as [`LineKind::Malformed`]
//! so the validator can report them with their position.

use super::ast::{DirectiveKey, DirectiveLine, Document, LineKind, Span};

const BOM: char = '\u{feff}';

/// Parse a document into classified lines. Never fails.
pub fn parse(input: &str) -> Document {
    let mut lines = Vec::new();
    let mut offset = 0;

    for (index, chunk) in input.split_inclusive('\n').enumerate() {
        let mut start = offset;
        offset += chunk.len();

        let mut content = chunk.strip_suffix('\n').unwrap_or(chunk);
        content = content.strip_suffix('\r').unwrap_or(content);
        if index == 0 {
            if let Some(rest) = content.strip_prefix(BOM) {
                start += BOM.len_utf8();
                content = rest;
            }
        }

        let span: Span = start..start + content.len();
        lines.push(DirectiveLine {
            number: index + 1,
            span,
            kind: classify(content),
        });
    }

    Document { lines }
}

fn classify(content: &str) -> LineKind {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }

    let Some((raw_key, raw_value)) = trimmed.split_once(':') else {
        return LineKind::Malformed;
    };
    let raw_key = raw_key.trim();
    if raw_key.is_empty() {
        return LineKind::Malformed;
    }

    let value = match raw_value.split_once('#') {
        Some((before, _comment)) => before,
        None => raw_value,
    };

    LineKind::Directive {
        key: DirectiveKey::from_raw(raw_key),
        value: value.trim().to_string(),
    }
}
