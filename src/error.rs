//! Error types and diagnostic rendering

use std::path::PathBuf;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::policy::PolicyError;
use crate::sitemap::PagesError;
use crate::template::TemplateError;
use crate::validator::{Diagnostic, Severity, ValidationResult};

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error reading file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error reading from stdin: {0}")]
    ReadStdin(std::io::Error),
    #[error("Error writing output: {0}")]
    Write(#[from] std::io::Error),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Pages(#[from] PagesError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("Error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Diagnostic {
    /// Format the diagnostic with source context using ariadne
    pub fn format(&self, source: &str, filename: &str, color: bool) -> String {
        let (kind, label_color) = match self.severity() {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };
        let offset = self.span.as_ref().map_or(0, |span| span.start);

        let mut report = Report::build(kind, filename, offset)
            .with_config(Config::default().with_color(color))
            .with_code(self.kind.code())
            .with_message(self.to_string());
        if let Some(span) = &self.span {
            report = report.with_label(
                Label::new((filename, span.clone()))
                    .with_message(self.kind.to_string())
                    .with_color(label_color),
            );
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

impl ValidationResult {
    /// Render every diagnostic against the source, errors first
    pub fn format(&self, source: &str, filename: &str, color: bool) -> String {
        self.diagnostics()
            .map(|d| d.format(source, filename, color))
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use crate::validate;

    #[test]
    fn test_format_includes_message_and_code() {
        let source = "User-agent: *\nDisallow: admin\n";
        let result = validate(source);
        let rendered = result.errors()[0].format(source, "robots.txt", false);
        assert!(rendered.contains("path must start with /"));
        assert!(rendered.contains("path-without-slash"));
        assert!(rendered.contains("robots.txt"));
    }

    #[test]
    fn test_format_document_level_warning() {
        let result = validate("");
        let rendered = result.format("", "robots.txt", false);
        assert!(rendered.contains("no User-agent directive found"));
        assert!(rendered.contains("no Sitemap directive found"));
    }
}
