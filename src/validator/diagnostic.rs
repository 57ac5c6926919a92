//! Diagnostics produced by the validator

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::parser::Span;

/// How a diagnostic affects validity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The line is not `key: value`
    Syntax,
    /// A recognized directive with a bad value or missing prerequisite
    Semantic,
    /// Unknown directives and structural smells; never affects validity
    Advisory,
}

impl Category {
    pub fn severity(self) -> Severity {
        match self {
            Category::Syntax | Category::Semantic => Severity::Error,
            Category::Advisory => Severity::Warning,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Syntax => write!(f, "syntax"),
            Category::Semantic => write!(f, "semantic"),
            Category::Advisory => write!(f, "advisory"),
        }
    }
}

/// The specific problem found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    InvalidFormat,
    EmptyUserAgent,
    PathWithoutSlash,
    OrphanDirective,
    InvalidCrawlDelay,
    InvalidSitemapUrl,
    UnrecognizedDirective { key: String },
    EmptyGroup { agents: Vec<String> },
    MissingUserAgent,
    MissingSitemap,
}

impl DiagnosticKind {
    pub fn category(&self) -> Category {
        match self {
            DiagnosticKind::InvalidFormat => Category::Syntax,
            DiagnosticKind::EmptyUserAgent
            | DiagnosticKind::PathWithoutSlash
            | DiagnosticKind::OrphanDirective
            | DiagnosticKind::InvalidCrawlDelay
            | DiagnosticKind::InvalidSitemapUrl => Category::Semantic,
            DiagnosticKind::UnrecognizedDirective { .. }
            | DiagnosticKind::EmptyGroup { .. }
            | DiagnosticKind::MissingUserAgent
            | DiagnosticKind::MissingSitemap => Category::Advisory,
        }
    }

    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidFormat => "invalid-format",
            DiagnosticKind::EmptyUserAgent => "empty-user-agent",
            DiagnosticKind::PathWithoutSlash => "path-without-slash",
            DiagnosticKind::OrphanDirective => "orphan-directive",
            DiagnosticKind::InvalidCrawlDelay => "invalid-crawl-delay",
            DiagnosticKind::InvalidSitemapUrl => "invalid-sitemap-url",
            DiagnosticKind::UnrecognizedDirective { .. } => "unrecognized-directive",
            DiagnosticKind::EmptyGroup { .. } => "empty-group",
            DiagnosticKind::MissingUserAgent => "missing-user-agent",
            DiagnosticKind::MissingSitemap => "missing-sitemap",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::InvalidFormat => {
                write!(f, "invalid format, expected 'Key: Value'")
            }
            DiagnosticKind::EmptyUserAgent => write!(f, "User-agent value is empty"),
            DiagnosticKind::PathWithoutSlash => write!(f, "path must start with /"),
            DiagnosticKind::OrphanDirective => {
                write!(f, "directive appears before any User-agent")
            }
            DiagnosticKind::InvalidCrawlDelay => {
                write!(f, "Crawl-delay must be a non-negative number")
            }
            DiagnosticKind::InvalidSitemapUrl => write!(f, "Sitemap must be an absolute URL"),
            DiagnosticKind::UnrecognizedDirective { key } => {
                write!(f, "unrecognized directive '{}'", key)
            }
            DiagnosticKind::EmptyGroup { agents } => {
                write!(f, "group for '{}' has no Allow/Disallow rules", agents.join(", "))
            }
            DiagnosticKind::MissingUserAgent => write!(f, "no User-agent directive found"),
            DiagnosticKind::MissingSitemap => write!(f, "no Sitemap directive found"),
        }
    }
}

/// A single finding, optionally tied to a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line the message cites; `None` for document-level findings
    pub line: Option<usize>,
    /// Byte range to highlight when rendering against the source
    pub span: Option<Span>,
}

impl Diagnostic {
    /// A diagnostic citing a specific line
    pub fn at_line(kind: DiagnosticKind, line: usize, span: Span) -> Self {
        Self {
            kind,
            line: Some(line),
            span: Some(span),
        }
    }

    /// A document-level diagnostic
    pub fn document(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            line: None,
            span: None,
        }
    }

    /// Attach a span without making the message cite a line
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn severity(&self) -> Severity {
        self.kind.category().severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 5)?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("category", &self.category())?;
        state.serialize_field("code", self.kind.code())?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Outcome of validating one document.
///
/// `is_valid` holds iff there are no errors; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new(errors: Vec<Diagnostic>, warnings: Vec<Diagnostic>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|d| d.to_string()).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|d| d.to_string()).collect()
    }

    /// Errors then warnings, each in report order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_diagnostic_display() {
        let d = Diagnostic::at_line(DiagnosticKind::PathWithoutSlash, 3, 10..20);
        assert_eq!(d.to_string(), "Line 3: path must start with /");
        assert_eq!(d.severity(), Severity::Error);
    }

    #[test]
    fn test_document_diagnostic_display() {
        let d = Diagnostic::document(DiagnosticKind::MissingSitemap);
        assert_eq!(d.to_string(), "no Sitemap directive found");
        assert_eq!(d.severity(), Severity::Warning);
    }

    #[test]
    fn test_empty_group_lists_agents() {
        let d = Diagnostic::document(DiagnosticKind::EmptyGroup {
            agents: vec!["Googlebot".to_string(), "Bingbot".to_string()],
        })
        .with_span(0..5);
        assert_eq!(
            d.to_string(),
            "group for 'Googlebot, Bingbot' has no Allow/Disallow rules"
        );
        assert_eq!(d.line, None);
        assert_eq!(d.span, Some(0..5));
    }

    #[test]
    fn test_validity_tracks_errors_only() {
        let warn = Diagnostic::document(DiagnosticKind::MissingUserAgent);
        assert!(ValidationResult::new(vec![], vec![warn.clone()]).is_valid());

        let err = Diagnostic::at_line(DiagnosticKind::InvalidFormat, 1, 0..3);
        assert!(!ValidationResult::new(vec![err], vec![warn]).is_valid());
    }

    #[test]
    fn test_serializes_messages() {
        let result = ValidationResult::new(
            vec![Diagnostic::at_line(DiagnosticKind::OrphanDirective, 1, 0..18)],
            vec![],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["code"], "orphan-directive");
        assert_eq!(json["errors"][0]["line"], 1);
        assert_eq!(
            json["errors"][0]["message"],
            "Line 1: directive appears before any User-agent"
        );
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(0));
    }
}
