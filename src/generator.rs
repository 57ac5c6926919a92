//! robots.txt generation from a [`Policy`]

use crate::policy::Policy;

/// Build a robots.txt document one section at a time
#[derive(Debug, Default)]
pub struct RobotsBuilder {
    sections: Vec<Vec<String>>,
}

impl RobotsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `#` comment lines as their own section
    pub fn add_comment(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        self.sections
            .push(lines.iter().map(|l| format!("# {}", l)).collect());
    }

    /// Add a `User-agent` group.
    ///
    /// A group always carries at least one rule; with no paths given it
    /// gets an empty `Disallow:`, which allows everything.
    pub fn add_group(
        &mut self,
        user_agent: &str,
        allow: &[String],
        disallow: &[String],
        crawl_delay: Option<f64>,
    ) {
        let mut lines = vec![format!("User-agent: {}", user_agent)];
        lines.extend(allow.iter().map(|p| format!("Allow: {}", p)));
        lines.extend(disallow.iter().map(|p| format!("Disallow: {}", p)));
        if allow.is_empty() && disallow.is_empty() {
            lines.push("Disallow:".to_string());
        }
        if let Some(delay) = crawl_delay {
            lines.push(format!("Crawl-delay: {}", delay));
        }
        self.sections.push(lines);
    }

    pub fn add_sitemap(&mut self, url: &str) {
        self.sections.push(vec![format!("Sitemap: {}", url)]);
    }

    /// Sections separated by a blank line, ending with a newline
    pub fn build(self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for line in section {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Render a policy as a robots.txt document
pub fn generate(policy: &Policy) -> String {
    let mut builder = RobotsBuilder::new();
    builder.add_comment(&policy.comment);
    builder.add_group("*", &policy.allow, &policy.disallow, policy.crawl_delay);
    for agent in &policy.agents {
        builder.add_group(
            &agent.user_agent,
            &agent.allow,
            &agent.disallow,
            agent.crawl_delay,
        );
    }
    builder.add_sitemap(&policy.sitemap_url());
    builder.build()
}

/// The platform's default robots.txt
pub fn generate_default() -> String {
    generate(&Policy::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AgentPolicy;
    use crate::validator::validate;

    #[test]
    fn test_default_document() {
        insta::assert_snapshot!(generate_default().trim_end(), @r"
        # robots.txt for zivo.travel

        User-agent: *
        Allow: /
        Disallow: /admin/
        Disallow: /api/
        Disallow: /mypage/
        Disallow: /booking/checkout/

        Sitemap: https://zivo.travel/sitemap.xml
        ");
    }

    #[test]
    fn test_default_is_valid_without_warnings() {
        let result = validate(&generate_default());
        assert!(result.is_valid(), "{:?}", result.error_messages());
        assert!(result.warnings().is_empty(), "{:?}", result.warning_messages());
    }

    #[test]
    fn test_default_has_exactly_one_sitemap() {
        let doc = generate_default();
        let sitemaps: Vec<_> = doc.lines().filter(|l| l.starts_with("Sitemap:")).collect();
        assert_eq!(sitemaps, vec!["Sitemap: https://zivo.travel/sitemap.xml"]);
        assert!(doc.lines().any(|l| l == "User-agent: *"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate_default(), generate_default());
    }

    #[test]
    fn test_agent_groups() {
        let policy = Policy {
            comment: Vec::new(),
            ..Policy::default()
        }
        .with_agent(AgentPolicy::new("Yeti").with_crawl_delay(2.0))
        .with_agent(AgentPolicy::new("GPTBot").disallow("/"));
        let doc = generate(&policy);
        assert!(doc.starts_with("User-agent: *\n"));
        assert!(doc.contains("User-agent: Yeti\nDisallow:\nCrawl-delay: 2\n"));
        assert!(doc.contains("User-agent: GPTBot\nDisallow: /\n"));

        let result = validate(&doc);
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_builder_separates_sections() {
        let mut builder = RobotsBuilder::new();
        builder.add_group("*", &[], &[], None);
        builder.add_sitemap("https://zivo.travel/sitemap.xml");
        assert_eq!(
            builder.build(),
            "User-agent: *\nDisallow:\n\nSitemap: https://zivo.travel/sitemap.xml\n"
        );
    }
}
