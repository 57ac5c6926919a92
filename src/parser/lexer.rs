//! Directive-key lexer using logos

use logos::Logos;

/// Recognized robots-exclusion directive names.
///
/// Matching is ASCII case-insensitive, so `user-agent`, `User-Agent` and
/// `USER-AGENT` all lex to [`Token::UserAgent`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("user-agent", ignore(ascii_case))]
    UserAgent,
    #[token("allow", ignore(ascii_case))]
    Allow,
    #[token("disallow", ignore(ascii_case))]
    Disallow,
    #[token("crawl-delay", ignore(ascii_case))]
    CrawlDelay,
    #[token("sitemap", ignore(ascii_case))]
    Sitemap,
}

/// Classify a directive key.
///
/// Returns `None` unless the whole key is exactly one recognized token,
/// so `Allowed` or `User-agent-x` are not mistaken for known directives.
pub fn lex_key(key: &str) -> Option<Token> {
    let mut lexer = Token::lexer(key);
    let token = lexer.next()?.ok()?;
    if lexer.span() != (0..key.len()) || lexer.next().is_some() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(lex_key("User-agent"), Some(Token::UserAgent));
        assert_eq!(lex_key("Allow"), Some(Token::Allow));
        assert_eq!(lex_key("Disallow"), Some(Token::Disallow));
        assert_eq!(lex_key("Crawl-delay"), Some(Token::CrawlDelay));
        assert_eq!(lex_key("Sitemap"), Some(Token::Sitemap));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(lex_key("USER-AGENT"), Some(Token::UserAgent));
        assert_eq!(lex_key("disALLOW"), Some(Token::Disallow));
        assert_eq!(lex_key("sitemap"), Some(Token::Sitemap));
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(lex_key("Foo"), None);
        assert_eq!(lex_key("Host"), None);
        assert_eq!(lex_key(""), None);
    }

    #[test]
    fn test_partial_match_is_unknown() {
        assert_eq!(lex_key("Allowed"), None);
        assert_eq!(lex_key("User-agent-x"), None);
        assert_eq!(lex_key("xAllow"), None);
        assert_eq!(lex_key("Allow Disallow"), None);
    }
}
