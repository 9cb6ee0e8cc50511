//! Route tables: the pattern → handler list a matcher is built from.
//!
//! ```yaml
//! matcher: trie
//! routes:
//!   - pattern: "https://:tenant.example.com/api/(v:major/)users/:id"
//!     handler: get_user
//!   - pattern: "*"
//!     handler: not_found
//! ```
//!
//! Routes are registered in file order, so earlier routes win.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matcher::{Matcher, MatcherKind, RouteMatcher};

/// One route of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub pattern: String,
    pub handler: String,
}

/// A route table as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Algorithm for this table; falls back to the caller's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<MatcherKind>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Load a table, choosing the format by extension: `.yaml`/`.yml`,
    /// `.toml`, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let table: RouteTable = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            "toml" => toml::from_str(&content)
                .with_context(|| format!("invalid TOML in {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", path.display()))?,
        };

        info!(
            path = %path.display(),
            routes = table.routes.len(),
            "Route table loaded"
        );
        Ok(table)
    }

    /// The algorithm this table asks for, or `default`.
    #[must_use]
    pub fn kind_or(&self, default: MatcherKind) -> MatcherKind {
        self.matcher.unwrap_or(default)
    }

    /// Build a matcher with every route registered in table order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed pattern, naming its position.
    pub fn build(&self, default: MatcherKind) -> anyhow::Result<RouteMatcher<String>> {
        self.build_with(self.kind_or(default))
    }

    /// Build with an explicit algorithm, ignoring the table's choice.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed pattern, naming its position.
    pub fn build_with(&self, kind: MatcherKind) -> anyhow::Result<RouteMatcher<String>> {
        let mut matcher = RouteMatcher::new(kind);
        for (i, route) in self.routes.iter().enumerate() {
            matcher
                .add(&route.pattern, route.handler.clone())
                .with_context(|| format!("route #{} ({})", i + 1, route.handler))?;
        }
        Ok(matcher)
    }
}
