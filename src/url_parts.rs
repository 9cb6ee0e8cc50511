//! Decomposition of request URLs into the components patterns match against.

use std::str::FromStr;

use url::Url;

/// A URL component matched segment by segment.
///
/// Port and search are plain equality/constraint checks and are not parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Protocol,
    Hostname,
    Pathname,
}

impl Part {
    /// Parts in trie traversal order.
    pub const ALL: [Part; 3] = [Part::Protocol, Part::Hostname, Part::Pathname];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Part::Protocol => 0,
            Part::Hostname => 1,
            Part::Pathname => 2,
        }
    }

    /// Segment separator. The protocol is always a single segment.
    #[inline]
    #[must_use]
    pub const fn separator(self) -> Option<char> {
        match self {
            Part::Protocol => None,
            Part::Hostname => Some('.'),
            Part::Pathname => Some('/'),
        }
    }

    /// Hostname labels are walked right to left so shared domain suffixes
    /// share trie prefixes.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> bool {
        matches!(self, Part::Hostname)
    }

    /// Value pattern for a `:name` parameter in this part.
    ///
    /// Lazy so that text or an optional group following the parameter inside
    /// the same segment gets to match first.
    #[inline]
    #[must_use]
    pub const fn param_regex(self) -> &'static str {
        match self {
            Part::Protocol => "[^/]+?",
            Part::Hostname => "[^.]+?",
            Part::Pathname => "[^/]+?",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Part::Protocol => "protocol",
            Part::Hostname => "hostname",
            Part::Pathname => "pathname",
        }
    }

    /// Split `value` into segments in traversal order.
    ///
    /// An empty value yields one empty segment.
    #[must_use]
    pub fn segments(self, value: &str) -> Vec<&str> {
        let mut segments: Vec<&str> = match self.separator() {
            Some(sep) => value.split(sep).collect(),
            None => vec![value],
        };
        if self.reversed() {
            segments.reverse();
        }
        segments
    }

    /// Join traversal-ordered segments back into source order.
    #[must_use]
    pub fn join<S: AsRef<str>>(self, segments: &[S]) -> String {
        let sep = self.separator().map(String::from).unwrap_or_default();
        if self.reversed() {
            segments
                .iter()
                .rev()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(sep.as_str())
        } else {
            segments
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(sep.as_str())
        }
    }
}

/// A request URL broken into the components patterns are written against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme without the trailing `:`
    pub protocol: String,
    /// Host, empty when the URL has none
    pub hostname: String,
    /// Explicit port, empty when absent or equal to the scheme default
    pub port: String,
    /// Path with one leading `/` stripped, still percent-encoded
    pub pathname: String,
    /// Decoded query pairs in URL order
    pub query: Vec<(String, String)>,
}

impl UrlParts {
    #[must_use]
    pub fn part(&self, part: Part) -> &str {
        match part {
            Part::Protocol => &self.protocol,
            Part::Hostname => &self.hostname,
            Part::Pathname => &self.pathname,
        }
    }
}

impl From<&Url> for UrlParts {
    fn from(url: &Url) -> Self {
        let path = url.path();
        Self {
            protocol: url.scheme().to_string(),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
            pathname: path.strip_prefix('/').unwrap_or(path).to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }
}

impl FromStr for UrlParts {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s).map(|url| UrlParts::from(&url))
    }
}
