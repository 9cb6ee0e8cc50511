//! Lock-free shared access to a matcher that can be replaced at runtime.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::matcher::{MatcherKind, Matcher, OwnedMatch, RouteMatcher};
use crate::url_parts::UrlParts;

/// A hot-swappable wrapper around [`RouteMatcher`].
///
/// Matchers are built with `&mut self` and published whole; readers never see
/// a half-built table. All reads go through `arc_swap::Guard`, which is
/// wait-free.
pub struct SharedMatcher<T> {
    inner: ArcSwap<RouteMatcher<T>>,
}

impl<T> SharedMatcher<T> {
    /// Publish an initial matcher.
    #[must_use]
    pub fn new(matcher: RouteMatcher<T>) -> Self {
        Self {
            inner: ArcSwap::new(Arc::new(matcher)),
        }
    }

    /// Atomically replace the matcher with a new one.
    pub fn update(&self, matcher: RouteMatcher<T>) {
        self.inner.store(Arc::new(matcher));
    }

    /// The currently published matcher, kept alive for as long as the caller
    /// holds it even if an update happens meanwhile.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RouteMatcher<T>> {
        self.inner.load_full()
    }

    /// Number of patterns in the current matcher.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn kind(&self) -> MatcherKind {
        self.inner.load().kind()
    }
}

impl<T: Clone> SharedMatcher<T> {
    /// Match against the current matcher.
    ///
    /// Returns an owned result so the caller does not pin the matcher it came
    /// from across an update.
    #[must_use]
    pub fn match_parts(&self, url: &UrlParts) -> Option<OwnedMatch<T>> {
        let matcher = self.inner.load();
        matcher.match_parts(url).map(|m| m.into_owned())
    }

    /// Parse `url` and match it against the current matcher.
    ///
    /// # Errors
    ///
    /// Returns the URL parser's error for strings that are not absolute URLs.
    pub fn match_str(&self, url: &str) -> Result<Option<OwnedMatch<T>>, url::ParseError> {
        let parts: UrlParts = url.parse()?;
        Ok(self.match_parts(&parts))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedMatcher")
            .field("inner", &*self.inner.load())
            .finish()
    }
}
