//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching a request
//! - Rewrite a matched request path onto the route's upstream
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; first match wins
//! - Explicit `None` rather than a silent default route

use tracing::warn;

use crate::config::validation::{check_target, ValidationError};
use crate::config::RouteConfig;
use crate::routing::matcher::{
    AnyMatcher, HostnameMatcher, Matcher, PathSegmentMatcher, RequestTarget,
};

/// Upstream base for a route.
#[derive(Debug, Clone)]
struct Upstream {
    /// Base URL as configured, without a trailing slash.
    base: String,
    /// Hostname sent as `Host` to the upstream.
    hostname: String,
}

/// A compiled route.
#[derive(Debug)]
pub struct RouteEntry {
    path_segment: String,
    prefix: String,
    hostname_alias: Option<String>,
    upstream: Option<Upstream>,
    matcher: AnyMatcher,
}

impl RouteEntry {
    fn compile(config: &RouteConfig) -> Result<Self, ValidationError> {
        let upstream = match config.resolved_target() {
            Some(target) => {
                let url = check_target(&target).map_err(|reason| ValidationError::InvalidTarget {
                    segment: config.path_segment.clone(),
                    target: target.clone(),
                    reason,
                })?;
                Some(Upstream {
                    base: target.trim_end_matches('/').to_string(),
                    hostname: url.host_str().unwrap_or_default().to_string(),
                })
            }
            None => None,
        };

        let path_matcher = PathSegmentMatcher::new(&config.path_segment);
        let prefix = path_matcher.prefix().to_string();
        let mut matchers: Vec<Box<dyn Matcher>> = vec![Box::new(path_matcher)];
        let hostname_alias = config.hostname_alias.as_ref().map(|h| h.to_lowercase());
        if let Some(alias) = &hostname_alias {
            matchers.push(Box::new(HostnameMatcher::new(alias.clone())));
        }

        Ok(Self {
            path_segment: config.path_segment.clone(),
            prefix,
            hostname_alias,
            upstream,
            matcher: AnyMatcher::new(matchers),
        })
    }

    /// The configured path segment, e.g. `openrouter/api`.
    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    pub fn hostname_alias(&self) -> Option<&str> {
        self.hostname_alias.as_deref()
    }

    /// Upstream base URL, or `None` when the route has no target.
    pub fn target(&self) -> Option<&str> {
        self.upstream.as_ref().map(|u| u.base.as_str())
    }

    /// Hostname of the upstream, used for the outbound `Host` header.
    pub fn upstream_hostname(&self) -> Option<&str> {
        self.upstream.as_ref().map(|u| u.hostname.as_str())
    }

    /// Returns true if this route claims the request.
    pub fn matches(&self, target: &RequestTarget<'_>) -> bool {
        self.matcher.matches(target)
    }

    /// Build the upstream URL for a request path and query.
    ///
    /// The `/{segment}/` prefix is replaced by `/` only when it leads the path;
    /// a `/{segment}/` further down is left alone. Paths matched through the
    /// hostname alias are forwarded unchanged. The query string is kept verbatim.
    /// Returns `None` when the route has no target.
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Option<String> {
        let upstream = self.upstream.as_ref()?;
        // Keep the trailing slash of the prefix as the leading slash of the residual.
        let residual = path
            .strip_prefix(&self.prefix[..self.prefix.len() - 1])
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(path);

        let mut url = String::with_capacity(upstream.base.len() + path.len() + 1);
        url.push_str(&upstream.base);
        url.push_str(residual);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        Some(url)
    }
}

/// Ordered, immutable route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compile routes, keeping declaration order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ValidationError> {
        let entries = routes
            .iter()
            .map(RouteEntry::compile)
            .collect::<Result<Vec<_>, _>>()?;

        for entry in entries.iter().filter(|e| e.upstream.is_none()) {
            warn!(
                route = %entry.path_segment,
                "Route has no upstream target; requests to it will fail"
            );
        }

        Ok(Self { entries })
    }

    /// Find the first route matching the request.
    pub fn resolve(&self, target: &RequestTarget<'_>) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.matches(target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }
}
