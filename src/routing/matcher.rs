//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request hostname (exact, after normalization)
//! - Match the `/{segment}/` path prefix (case-sensitive)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Hostnames are normalized once, at extraction and construction time
//! - Path matching is case-sensitive
//! - The bare `/{segment}` path never matches; only subpaths do
//! - No regex to guarantee O(n) matching

/// The parts of an inbound request that routing looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget<'a> {
    /// Request path, as received.
    pub path: &'a str,
    /// Lower-cased hostname without port.
    pub hostname: &'a str,
}

impl<'a> RequestTarget<'a> {
    pub fn new(path: &'a str, hostname: &'a str) -> Self {
        Self { path, hostname }
    }
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, target: &RequestTarget<'_>) -> bool;
}

/// Matches the request hostname.
#[derive(Debug, Clone)]
pub struct HostnameMatcher {
    expected_hostname: String,
}

impl HostnameMatcher {
    /// Create a new hostname matcher.
    /// The hostname is normalized to lowercase, the same way request hostnames are.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            expected_hostname: hostname.into().to_lowercase(),
        }
    }
}

impl Matcher for HostnameMatcher {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        target.hostname == self.expected_hostname
    }
}

/// Matches paths under `/{segment}/`.
#[derive(Debug, Clone)]
pub struct PathSegmentMatcher {
    prefix: String,
}

impl PathSegmentMatcher {
    /// Create a matcher for `segment`, which carries no surrounding slashes.
    pub fn new(segment: &str) -> Self {
        Self {
            prefix: format!("/{segment}/"),
        }
    }

    /// The full `/{segment}/` prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathSegmentMatcher {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        target.path.starts_with(&self.prefix)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        // Any matcher may claim the request (OR)
        self.matchers.iter().any(|m| m.matches(target))
    }
}
