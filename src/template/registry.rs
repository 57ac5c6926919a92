//! Built-in robots.txt presets

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when looking up a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template with that name or slug
    #[error("template not found: {name} (available: {})", available.join(", "))]
    NotFound {
        name: String,
        available: Vec<&'static str>,
    },
}

/// A ready-made robots.txt document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RobotsTemplate {
    /// Short identifier for lookup from the command line
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

const TEMPLATES: &[RobotsTemplate] = &[
    RobotsTemplate {
        slug: "allow-all",
        name: "Allow all",
        description: "Let every crawler index the whole site",
        content: "\
User-agent: *
Allow: /

Sitemap: https://zivo.travel/sitemap.xml
",
    },
    RobotsTemplate {
        slug: "block-admin",
        name: "Block admin paths",
        description: "Allow the public site, keep admin, API and account pages out of search",
        content: "\
User-agent: *
Allow: /
Disallow: /admin/
Disallow: /api/
Disallow: /mypage/
Disallow: /booking/checkout/

Sitemap: https://zivo.travel/sitemap.xml
",
    },
    RobotsTemplate {
        slug: "block-staging",
        name: "Block staging",
        description: "Keep every crawler off a staging or development deployment",
        content: "\
# Staging environment: do not index
User-agent: *
Disallow: /
",
    },
    RobotsTemplate {
        slug: "search-engines-only",
        name: "Search engines only",
        description: "Allow Google, Bing and Naver; block every other crawler",
        content: "\
User-agent: Googlebot
User-agent: Bingbot
User-agent: Yeti
Allow: /
Disallow: /admin/

User-agent: *
Disallow: /

Sitemap: https://zivo.travel/sitemap.xml
",
    },
    RobotsTemplate {
        slug: "block-ai-crawlers",
        name: "Block AI crawlers",
        description: "Allow search engines but opt out of AI training crawlers",
        content: "\
User-agent: GPTBot
User-agent: ChatGPT-User
User-agent: CCBot
User-agent: Google-Extended
User-agent: ClaudeBot
Disallow: /

User-agent: *
Allow: /
Disallow: /admin/

Sitemap: https://zivo.travel/sitemap.xml
",
    },
    RobotsTemplate {
        slug: "slow-crawl",
        name: "Slow crawl",
        description: "Allow everything but ask crawlers to wait between requests",
        content: "\
User-agent: *
Allow: /
Crawl-delay: 10

Sitemap: https://zivo.travel/sitemap.xml
",
    },
];

/// All built-in templates, in display order
pub fn list_templates() -> &'static [RobotsTemplate] {
    TEMPLATES
}

/// Find a template by slug or name, ignoring ASCII case
pub fn find_template(name: &str) -> Option<&'static RobotsTemplate> {
    let name = name.trim();
    TEMPLATES
        .iter()
        .find(|t| t.slug.eq_ignore_ascii_case(name) || t.name.eq_ignore_ascii_case(name))
}

/// Like [`find_template`], but with an error listing what is available
pub fn get_template(name: &str) -> Result<&'static RobotsTemplate, TemplateError> {
    find_template(name).ok_or_else(|| TemplateError::NotFound {
        name: name.to_string(),
        available: TEMPLATES.iter().map(|t| t.slug).collect(),
    })
}
