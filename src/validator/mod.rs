//! Validation engine for robots.txt documents.
//!
//! A single pass over the parsed lines checks each directive in isolation
//! and tracks `User-agent` groups. A post-pass then looks at the document
//! as a whole for structural smells: empty groups and missing sections.
//!
//! Syntax and semantic problems are errors. Unknown directives and
//! structural smells are warnings and never make a document invalid, so
//! crawler-specific extensions such as `Host` or `Clean-param` pass through.

mod diagnostic;

pub use diagnostic::{Category, Diagnostic, DiagnosticKind, Severity, ValidationResult};

use url::Url;

use crate::parser::{self, DirectiveKey, DirectiveLine, Document, LineKind, Span};

/// Validate a robots.txt document. Never fails; always returns a result.
pub fn validate(input: &str) -> ValidationResult {
    validate_document(&parser::parse(input))
}

/// Validate an already-parsed document
pub fn validate_document(doc: &Document) -> ValidationResult {
    let mut validator = Validator::default();
    for line in &doc.lines {
        validator.visit(line);
    }
    validator.finish()
}

/// Agents declared by one run of consecutive `User-agent` lines
#[derive(Debug)]
struct Group {
    agents: Vec<String>,
    span: Span,
    rules: usize,
}

#[derive(Debug, Default)]
struct Validator {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    groups: Vec<Group>,
    /// Previous directive was a `User-agent`, so the next one joins its group
    in_agent_run: bool,
    seen_user_agent: bool,
    seen_sitemap: bool,
}

impl Validator {
    fn visit(&mut self, line: &DirectiveLine) {
        let (key, value) = match &line.kind {
            LineKind::Blank | LineKind::Comment => return,
            LineKind::Malformed => {
                self.in_agent_run = false;
                self.error(DiagnosticKind::InvalidFormat, line);
                return;
            }
            LineKind::Directive { key, value } => (key, value.as_str()),
        };

        if *key != DirectiveKey::UserAgent {
            self.in_agent_run = false;
        }

        match key {
            DirectiveKey::UserAgent => self.visit_user_agent(line, value),
            DirectiveKey::Allow | DirectiveKey::Disallow | DirectiveKey::CrawlDelay => {
                self.visit_group_member(line, key, value)
            }
            DirectiveKey::Sitemap => {
                self.seen_sitemap = true;
                if !is_absolute_http_url(value) {
                    self.error(DiagnosticKind::InvalidSitemapUrl, line);
                }
            }
            DirectiveKey::Unknown(raw) => {
                self.warning(
                    DiagnosticKind::UnrecognizedDirective { key: raw.clone() },
                    line,
                );
            }
        }
    }

    fn visit_user_agent(&mut self, line: &DirectiveLine, agent: &str) {
        self.seen_user_agent = true;
        if agent.is_empty() {
            self.error(DiagnosticKind::EmptyUserAgent, line);
        }

        if !self.in_agent_run || self.groups.is_empty() {
            self.groups.push(Group {
                agents: Vec::new(),
                span: line.span.clone(),
                rules: 0,
            });
        }
        if let Some(group) = self.groups.last_mut() {
            if !agent.is_empty() {
                group.agents.push(agent.to_string());
            }
        }
        self.in_agent_run = true;
    }

    fn visit_group_member(&mut self, line: &DirectiveLine, key: &DirectiveKey, value: &str) {
        match self.groups.last_mut() {
            Some(group) => {
                if key.is_rule() {
                    group.rules += 1;
                }
            }
            None => self.error(DiagnosticKind::OrphanDirective, line),
        }

        match key {
            DirectiveKey::Disallow if value.is_empty() => {}
            DirectiveKey::Allow | DirectiveKey::Disallow => {
                if !value.starts_with('/') {
                    self.error(DiagnosticKind::PathWithoutSlash, line);
                }
            }
            DirectiveKey::CrawlDelay => {
                if parse_crawl_delay(value).is_none() {
                    self.error(DiagnosticKind::InvalidCrawlDelay, line);
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> ValidationResult {
        for group in &self.groups {
            if group.rules == 0 && !group.agents.is_empty() {
                self.warnings.push(
                    Diagnostic::document(DiagnosticKind::EmptyGroup {
                        agents: group.agents.clone(),
                    })
                    .with_span(group.span.clone()),
                );
            }
        }
        if !self.seen_user_agent {
            self.warnings
                .push(Diagnostic::document(DiagnosticKind::MissingUserAgent));
        }
        if !self.seen_sitemap {
            self.warnings
                .push(Diagnostic::document(DiagnosticKind::MissingSitemap));
        }
        ValidationResult::new(self.errors, self.warnings)
    }

    fn error(&mut self, kind: DiagnosticKind, line: &DirectiveLine) {
        self.errors
            .push(Diagnostic::at_line(kind, line.number, line.span.clone()));
    }

    fn warning(&mut self, kind: DiagnosticKind, line: &DirectiveLine) {
        self.warnings
            .push(Diagnostic::at_line(kind, line.number, line.span.clone()));
    }
}

/// Parse a `Crawl-delay` value as a finite, non-negative number of seconds
pub fn parse_crawl_delay(value: &str) -> Option<f64> {
    let delay: f64 = value.parse().ok()?;
    (delay.is_finite() && delay >= 0.0).then_some(delay)
}

/// Whether `value` is an absolute `http`/`https` URL with a host.
///
/// The URL parser repairs special-scheme URLs such as `https:/x` or
/// `http:\\x`, so the raw text must also carry the `://` authority marker.
pub fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && value
                    .get(url.scheme().len()..)
                    .is_some_and(|rest| rest.starts_with("://"))
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
