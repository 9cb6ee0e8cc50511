//! # Matcher Module
//!
//! The matcher module turns many registered patterns into a URL-to-payload
//! lookup. Two algorithms are provided behind one [`Matcher`] trait:
//!
//! - [`ArrayMatcher`] scans entries in registration order and tests compiled
//!   regexes. Simple, exact author-order priority, O(patterns × variants).
//! - [`TrieMatcher`] walks a prefix tree over protocol, reversed hostname
//!   labels and path segments. Lookup cost follows the URL rather than the
//!   size of the route table.
//!
//! Both return the same `(pattern, params, payload)` for the same table and
//! URL: the earliest registered matching pattern wins, and within a pattern
//! the most specific variant of each component supplies the parameters.
//!
//! ## Example
//!
//! ```rust
//! use brrtpattern::matcher::{Matcher, TrieMatcher};
//!
//! let mut matcher = TrieMatcher::new();
//! matcher.add("api/(v:major(.:minor)/)run", "runner").unwrap();
//!
//! let m = matcher.match_str("https://example.com/api/v1.2/run").unwrap().unwrap();
//! assert_eq!(*m.payload, "runner");
//! assert_eq!(m.params.get("major"), Some("1"));
//! assert_eq!(m.params.get("minor"), Some("2"));
//! ```
//!
//! ## Concurrency
//!
//! `add` needs `&mut self`; lookups take `&self` and mutate nothing, so a
//! finished matcher can be shared between threads as-is, or published through
//! [`SharedMatcher`](crate::shared::SharedMatcher) when it must be replaced at
//! runtime.

mod array;
mod trie;
#[cfg(test)]
mod tests;

pub use array::ArrayMatcher;
pub use trie::TrieMatcher;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;
use tracing::{debug, warn};
use url::Url;

use crate::pattern::{ParseError, RoutePattern};
use crate::url_parts::UrlParts;

/// Maximum number of parameters stored inline before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Lookups slower than this are logged at `warn`.
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Parameter storage: every name of the matched pattern with its value, or
/// `None` when the matched variant did not bind it.
pub type ParamVec = SmallVec<[(Arc<str>, Option<String>); MAX_INLINE_PARAMS]>;

/// Parameters extracted by a match.
///
/// Holds an entry for every name the pattern declares, in declaration order,
/// so an optional parameter that was skipped is still visible as unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(ParamVec);

impl Params {
    /// All of `names` present and unbound.
    pub(crate) fn unbound(names: &[Arc<str>]) -> Self {
        Self(names.iter().map(|n| (Arc::clone(n), None)).collect())
    }

    pub(crate) fn bind(&mut self, index: usize, value: String) {
        if let Some((_, slot)) = self.0.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Value of `name`, `None` when unbound or not declared.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// True when the pattern declares `name`, bound or not.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_ref() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to an ordered map.
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Option<String>> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}

/// Result of a successful lookup, borrowing from the matcher.
#[derive(Debug)]
pub struct Match<'m, T> {
    pub pattern: &'m RoutePattern,
    pub params: Params,
    pub payload: &'m T,
}

impl<T: PartialEq> PartialEq for Match<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.source() == other.pattern.source()
            && self.params == other.params
            && self.payload == other.payload
    }
}

impl<T: Clone> Match<'_, T> {
    /// Detach the result from the matcher.
    #[must_use]
    pub fn into_owned(self) -> OwnedMatch<T> {
        OwnedMatch {
            pattern: self.pattern.source().to_string(),
            params: self.params,
            payload: self.payload.clone(),
        }
    }
}

/// A [`Match`] that owns its data, for handing across threads or swaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedMatch<T> {
    pub pattern: String,
    pub params: Params,
    pub payload: T,
}

/// Common interface of the linear and trie matchers.
pub trait Matcher<T> {
    /// Register `pattern` with `payload`.
    ///
    /// Patterns registered earlier take priority. On error nothing is
    /// registered and previously added patterns are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed patterns.
    fn add(&mut self, pattern: &str, payload: T) -> Result<(), ParseError>;

    /// Look up an already decomposed URL.
    fn match_parts(&self, url: &UrlParts) -> Option<Match<'_, T>>;

    /// Look up a parsed URL.
    fn match_url(&self, url: &Url) -> Option<Match<'_, T>> {
        self.match_parts(&UrlParts::from(url))
    }

    /// Parse and look up a URL string.
    ///
    /// # Errors
    ///
    /// Returns the URL parser's error for strings that are not absolute URLs.
    /// A well-formed URL that matches nothing is `Ok(None)`.
    fn match_str(&self, url: &str) -> Result<Option<Match<'_, T>>, url::ParseError> {
        let parts: UrlParts = url.parse()?;
        Ok(self.match_parts(&parts))
    }

    /// Number of registered patterns.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which matching algorithm to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Linear scan in registration order
    Array,
    /// Prefix tree over URL parts
    #[default]
    Trie,
}

impl MatcherKind {
    /// Parse a kind name, falling back to the default for unknown names.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "array" | "linear" => MatcherKind::Array,
            _ => MatcherKind::Trie,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatcherKind::Array => "array",
            MatcherKind::Trie => "trie",
        }
    }
}

/// Either matcher, chosen at runtime.
///
/// Adds lookup logging and slow-lookup warnings on top of the underlying
/// matcher.
#[derive(Debug)]
pub enum RouteMatcher<T> {
    Array(ArrayMatcher<T>),
    Trie(TrieMatcher<T>),
}

impl<T> RouteMatcher<T> {
    #[must_use]
    pub fn new(kind: MatcherKind) -> Self {
        match kind {
            MatcherKind::Array => RouteMatcher::Array(ArrayMatcher::new()),
            MatcherKind::Trie => RouteMatcher::Trie(TrieMatcher::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MatcherKind {
        match self {
            RouteMatcher::Array(_) => MatcherKind::Array,
            RouteMatcher::Trie(_) => MatcherKind::Trie,
        }
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> Box<dyn Iterator<Item = &RoutePattern> + '_> {
        match self {
            RouteMatcher::Array(m) => Box::new(m.patterns()),
            RouteMatcher::Trie(m) => Box::new(m.patterns()),
        }
    }

    /// First match found by the trie search, ignoring priority. The array
    /// matcher has no cheaper unordered mode and answers by priority.
    pub fn match_any(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        match self {
            RouteMatcher::Array(m) => m.match_parts(url),
            RouteMatcher::Trie(m) => m.match_any(url),
        }
    }
}

impl<T> Matcher<T> for RouteMatcher<T> {
    fn add(&mut self, pattern: &str, payload: T) -> Result<(), ParseError> {
        match self {
            RouteMatcher::Array(m) => m.add(pattern, payload),
            RouteMatcher::Trie(m) => m.add(pattern, payload),
        }
    }

    fn match_parts(&self, url: &UrlParts) -> Option<Match<'_, T>> {
        let started = Instant::now();
        let result = match self {
            RouteMatcher::Array(m) => m.match_parts(url),
            RouteMatcher::Trie(m) => m.match_by_order(url),
        };
        let elapsed = started.elapsed();

        if elapsed > SLOW_MATCH {
            warn!(
                hostname = %url.hostname,
                pathname = %url.pathname,
                matched = result.as_ref().map(|m| m.pattern.source()),
                duration_us = elapsed.as_micros(),
                algorithm = self.kind().as_str(),
                "Slow pattern lookup detected"
            );
        } else {
            debug!(
                hostname = %url.hostname,
                pathname = %url.pathname,
                matched = result.as_ref().map(|m| m.pattern.source()),
                duration_us = elapsed.as_micros(),
                algorithm = self.kind().as_str(),
                "Pattern lookup"
            );
        }
        result
    }

    fn len(&self) -> usize {
        match self {
            RouteMatcher::Array(m) => m.len(),
            RouteMatcher::Trie(m) => m.len(),
        }
    }
}
