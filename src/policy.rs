//! Crawl policy that the default robots.txt is generated from
//!
//! A policy describes the rules structurally: which paths the wildcard group
//! may or may not crawl, optional per-crawler groups, and where the sitemap
//! lives. Policies can be loaded from TOML; any field left out falls back to
//! the platform defaults.
//!
//! ```toml
//! base_url = "https://staging.zivo.travel"
//! disallow = ["/admin/", "/api/"]
//!
//! [[agents]]
//! user_agent = "Yeti"
//! crawl_delay = 2
//! allow = ["/"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validator::is_absolute_http_url;

/// Canonical public origin of the platform
pub const DEFAULT_BASE_URL: &str = "https://zivo.travel";

/// Sitemap location relative to the base URL
pub const DEFAULT_SITEMAP_PATH: &str = "/sitemap.xml";

/// Errors that can occur when loading or checking a policy
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse policy TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("base_url must be an absolute http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("path '{path}' in {field} must start with /")]
    InvalidPath { field: String, path: String },
    #[error("agents entry is missing user_agent")]
    EmptyUserAgent,
    #[error("crawl_delay for '{agent}' must be a non-negative number")]
    InvalidCrawlDelay { agent: String },
    #[error("{field} value {value:?} contains a line break")]
    LineBreak { field: String, value: String },
    #[error("{field} value {value:?} contains '#', which starts a comment")]
    CommentMarker { field: String, value: String },
}

/// Rules for one named crawler
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentPolicy {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Option<f64>,
}

impl AgentPolicy {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    pub fn allow(mut self, path: impl Into<String>) -> Self {
        self.allow.push(path.into());
        self
    }

    pub fn disallow(mut self, path: impl Into<String>) -> Self {
        self.disallow.push(path.into());
        self
    }

    pub fn with_crawl_delay(mut self, seconds: f64) -> Self {
        self.crawl_delay = Some(seconds);
        self
    }
}

/// Structured rules for a whole robots.txt document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Origin used to build the absolute sitemap URL
    pub base_url: String,
    /// Sitemap path, or an absolute URL that is used as-is
    pub sitemap_path: String,
    /// Header comment, one `#` line per entry
    pub comment: Vec<String>,
    /// Wildcard group rules
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Option<f64>,
    /// Extra groups for specific crawlers, emitted after the wildcard group
    pub agents: Vec<AgentPolicy>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sitemap_path: DEFAULT_SITEMAP_PATH.to_string(),
            comment: vec!["robots.txt for zivo.travel".to_string()],
            allow: vec!["/".to_string()],
            disallow: vec![
                "/admin/".to_string(),
                "/api/".to_string(),
                "/mypage/".to_string(),
                "/booking/checkout/".to_string(),
            ],
            crawl_delay: None,
            agents: Vec::new(),
        }
    }
}

impl Policy {
    /// Load a policy from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a policy from a TOML string and check it
    pub fn from_str(content: &str) -> Result<Self, PolicyError> {
        let policy: Policy = toml::from_str(content)?;
        policy.check()?;
        Ok(policy)
    }

    /// Set the origin used for the sitemap URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add a crawler-specific group
    pub fn with_agent(mut self, agent: AgentPolicy) -> Self {
        self.agents.push(agent);
        self
    }

    /// Absolute URL of the sitemap
    pub fn sitemap_url(&self) -> String {
        if is_absolute_http_url(&self.sitemap_path) {
            return self.sitemap_path.clone();
        }
        let base = self.base_url.trim_end_matches('/');
        if self.sitemap_path.starts_with('/') {
            format!("{}{}", base, self.sitemap_path)
        } else {
            format!("{}/{}", base, self.sitemap_path)
        }
    }

    /// Check that the policy would generate a document the validator accepts
    pub fn check(&self) -> Result<(), PolicyError> {
        check_value("base_url", &self.base_url)?;
        check_value("sitemap_path", &self.sitemap_path)?;
        if !is_absolute_http_url(&self.sitemap_url()) {
            return Err(PolicyError::InvalidBaseUrl(self.base_url.clone()));
        }
        if let Some(line) = self.comment.iter().find(|l| has_line_break(l)) {
            return Err(PolicyError::LineBreak {
                field: "comment".to_string(),
                value: line.clone(),
            });
        }
        check_rules("*", &self.allow, &self.disallow, self.crawl_delay)?;
        for agent in &self.agents {
            if agent.user_agent.trim().is_empty() {
                return Err(PolicyError::EmptyUserAgent);
            }
            check_value("user_agent", &agent.user_agent)?;
            check_rules(
                &agent.user_agent,
                &agent.allow,
                &agent.disallow,
                agent.crawl_delay,
            )?;
        }
        Ok(())
    }
}

fn check_rules(
    agent: &str,
    allow: &[String],
    disallow: &[String],
    crawl_delay: Option<f64>,
) -> Result<(), PolicyError> {
    let fields = [("allow", allow), ("disallow", disallow)];
    for (field, paths) in fields {
        if let Some(path) = paths.iter().find(|p| !p.starts_with('/')) {
            return Err(PolicyError::InvalidPath {
                field: format!("{} for '{}'", field, agent),
                path: path.clone(),
            });
        }
        for path in paths {
            check_value(&format!("{} for '{}'", field, agent), path)?;
        }
    }
    if let Some(delay) = crawl_delay {
        if !delay.is_finite() || delay < 0.0 {
            return Err(PolicyError::InvalidCrawlDelay {
                agent: agent.to_string(),
            });
        }
    }
    Ok(())
}

/// A directive value must stay on its line and must not be cut short by a comment
fn check_value(field: &str, value: &str) -> Result<(), PolicyError> {
    if has_line_break(value) {
        return Err(PolicyError::LineBreak {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value.contains('#') {
        return Err(PolicyError::CommentMarker {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
