//! Parsed view of a robots.txt document

use std::fmt;

use super::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A directive name, either one of the recognized keys or anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKey {
    UserAgent,
    Allow,
    Disallow,
    CrawlDelay,
    Sitemap,
    /// Unrecognized key, spelled as written
    Unknown(String),
}

impl DirectiveKey {
    /// Classify a raw (already trimmed) key.
    pub fn from_raw(raw: &str) -> Self {
        match super::lexer::lex_key(raw) {
            Some(Token::UserAgent) => DirectiveKey::UserAgent,
            Some(Token::Allow) => DirectiveKey::Allow,
            Some(Token::Disallow) => DirectiveKey::Disallow,
            Some(Token::CrawlDelay) => DirectiveKey::CrawlDelay,
            Some(Token::Sitemap) => DirectiveKey::Sitemap,
            None => DirectiveKey::Unknown(raw.to_string()),
        }
    }

    /// Whether this directive counts as an access rule for its group.
    pub fn is_rule(&self) -> bool {
        matches!(self, DirectiveKey::Allow | DirectiveKey::Disallow)
    }
}

impl fmt::Display for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKey::UserAgent => write!(f, "User-agent"),
            DirectiveKey::Allow => write!(f, "Allow"),
            DirectiveKey::Disallow => write!(f, "Disallow"),
            DirectiveKey::CrawlDelay => write!(f, "Crawl-delay"),
            DirectiveKey::Sitemap => write!(f, "Sitemap"),
            DirectiveKey::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// What a single line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Directive { key: DirectiveKey, value: String },
    /// No colon, or nothing before it
    Malformed,
}

/// One line of the document with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the line content, excluding the line terminator
    pub span: Span,
    pub kind: LineKind,
}

/// A parsed document: every source line in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<DirectiveLine>,
}
