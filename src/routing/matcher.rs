//! Exclusion matching logic.
//!
//! # Responsibilities
//! - Decide which request paths bypass locale routing
//! - Match configured path prefixes at segment boundaries
//! - Apply the static-file heuristic (any path containing a dot)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes match whole segments ("/api" matches "/api/users", not "/apikeys")
//! - Matchers are compiled once at startup and immutable afterwards
//! - No regex to guarantee O(n) matching

use crate::config::schema::MatcherConfig;

/// Trait for matching request paths against exclusion conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix at a segment boundary.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A trailing slash is stripped so
    /// "/api" and "/api/" behave identically.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Matches any path containing a literal dot (static-file heuristic).
#[derive(Debug, Clone)]
pub struct DottedPathMatcher;

impl Matcher for DottedPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path.contains('.')
    }
}

/// Combines multiple matchers with OR semantics: any match excludes the path.
#[derive(Debug)]
pub struct ExclusionMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl ExclusionMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Compile the exclusion list from configuration.
    pub fn from_config(config: &MatcherConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = config
            .exclude_prefixes
            .iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p.clone())) as Box<dyn Matcher>)
            .collect();

        if config.exclude_dotted {
            matchers.push(Box::new(DottedPathMatcher));
        }

        Self::new(matchers)
    }

    /// Returns true if the path is excluded from locale routing.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matcher_respects_segment_boundaries() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/users"));
        assert!(!matcher.matches("/apikeys"));
        assert!(!matcher.matches("/v1/api"));
    }

    #[test]
    fn prefix_matcher_ignores_trailing_slash_in_pattern() {
        let matcher = PathPrefixMatcher::new("/_next/");
        assert!(matcher.matches("/_next/static"));
        assert!(matcher.matches("/_next"));
    }

    #[test]
    fn dotted_matcher_flags_static_file_paths() {
        let matcher = DottedPathMatcher;
        assert!(matcher.matches("/favicon.ico"));
        assert!(matcher.matches("/images/logo.svg"));
        assert!(!matcher.matches("/dashboard"));
    }

    #[test]
    fn default_exclusions_cover_internal_paths() {
        let matcher = ExclusionMatcher::from_config(&MatcherConfig::default());

        assert!(matcher.is_excluded("/api/users"));
        assert!(matcher.is_excluded("/_next/static/chunk.js"));
        assert!(matcher.is_excluded("/_vercel/insights"));
        assert!(matcher.is_excluded("/_assets/admin.css"));
        assert!(matcher.is_excluded("/favicon.ico"));

        assert!(!matcher.is_excluded("/dashboard"));
        assert!(!matcher.is_excluded("/"));
        assert!(!matcher.is_excluded("/fr/dashboard"));
    }

    #[test]
    fn empty_exclusion_list_matches_nothing() {
        let matcher = ExclusionMatcher::new(Vec::new());
        assert!(!matcher.is_excluded("/anything"));
    }
}
