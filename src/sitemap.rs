//! sitemap.xml assembly from page records
//!
//! Page records are the registered pages of the site (normally the meta-tag
//! entries). Only active records are listed. Each entry points at the page's
//! canonical URL when one is set, otherwise at `base_url + url_path`.

use std::fmt;
use std::path::Path;

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRIORITY: f64 = 0.5;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;

/// Errors that can occur when loading page records
#[derive(Error, Debug)]
pub enum PagesError {
    #[error("Failed to read pages file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse pages TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("priority {priority} for '{url_path}' is outside 0.0..=1.0")]
    InvalidPriority { url_path: String, priority: f64 },
}

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        };
        write!(f, "{}", s)
    }
}

/// One registered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url_path: String,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub changefreq: Option<ChangeFrequency>,
    /// ISO-8601 timestamp or date
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PageRecord {
    pub fn new(url_path: impl Into<String>) -> Self {
        Self {
            url_path: url_path.into(),
            canonical_url: None,
            priority: None,
            changefreq: None,
            last_modified: None,
            active: true,
        }
    }

    /// Absolute location of the page
    pub fn location(&self, base_url: &str) -> String {
        match self.canonical_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => format!("{}{}", base_url.trim_end_matches('/'), self.url_path),
        }
    }

    /// Date part of the last modification timestamp
    pub fn lastmod_date(&self) -> Option<&str> {
        let stamp = self.last_modified.as_deref()?;
        let date = stamp.split('T').next().unwrap_or(stamp);
        (!date.is_empty()).then_some(date)
    }
}

#[derive(Deserialize)]
struct TomlPages {
    #[serde(default)]
    pages: Vec<PageRecord>,
}

/// Load page records from a TOML file with `[[pages]]` tables
pub fn load_pages(path: &Path) -> Result<Vec<PageRecord>, PagesError> {
    let content = std::fs::read_to_string(path)?;
    parse_pages(&content)
}

/// Parse page records from TOML
pub fn parse_pages(content: &str) -> Result<Vec<PageRecord>, PagesError> {
    let parsed: TomlPages = toml::from_str(content)?;
    for page in &parsed.pages {
        if let Some(priority) = page.priority {
            if !(0.0..=1.0).contains(&priority) {
                return Err(PagesError::InvalidPriority {
                    url_path: page.url_path.clone(),
                    priority,
                });
            }
        }
    }
    Ok(parsed.pages)
}

/// Render the sitemap for all active pages
pub fn render_sitemap(base_url: &str, pages: &[PageRecord]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str(URLSET_OPEN);
    xml.push('\n');

    let mut active = pages.iter().filter(|p| p.active).peekable();
    if active.peek().is_none() {
        xml.push_str("  <!-- no active pages registered -->\n");
    }
    for page in active {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(page.location(base_url))));
        if let Some(date) = page.lastmod_date() {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape(date)));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            page.changefreq.unwrap_or_default()
        ));
        xml.push_str(&format!(
            "    <priority>{:.1}</priority>\n",
            page.priority.unwrap_or(DEFAULT_PRIORITY)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
