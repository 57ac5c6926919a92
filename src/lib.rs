//! Robots Forge - robots.txt generation and validation
//!
//! This library generates a default robots.txt from a crawl policy, validates
//! arbitrary robots.txt text against the robots-exclusion grammar, and ships a
//! catalog of ready-made templates. Everything in the core is pure: no I/O and
//! no shared state, so the functions can be called from anywhere at any time.
//!
//! # Example
//!
//! ```rust
//! use robots_forge::{generate_default, validate};
//!
//! let robots = generate_default();
//! let result = validate(&robots);
//! assert!(result.is_valid());
//! ```

pub mod error;
pub mod generator;
pub mod parser;
pub mod policy;
pub mod sitemap;
pub mod template;
pub mod validator;

pub use error::CliError;
pub use generator::{generate, generate_default};
pub use parser::{parse, Document};
pub use policy::{AgentPolicy, Policy, PolicyError};
pub use sitemap::{render_sitemap, ChangeFrequency, PageRecord};
pub use template::{find_template, list_templates, RobotsTemplate};
pub use validator::{validate, Category, Diagnostic, DiagnosticKind, Severity, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_default_validates() {
        assert!(validate(&generate_default()).is_valid());
    }

    #[test]
    fn test_every_template_validates() {
        for template in list_templates() {
            let result = validate(template.content);
            assert!(
                result.is_valid(),
                "template '{}' has errors: {:?}",
                template.name,
                result.error_messages()
            );
        }
    }

    #[test]
    fn test_template_replaces_generated_buffer() {
        let mut buffer = generate_default();
        let template = find_template("block-staging").expect("preset exists");
        buffer.clear();
        buffer.push_str(template.content);
        let result = validate(&buffer);
        assert!(result.is_valid());
        assert_eq!(result.warning_messages(), vec!["no Sitemap directive found"]);
    }
}
