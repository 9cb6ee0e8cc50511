//! Positional decomposition of a full pattern string into its URL components.

/// The component strings of a pattern, before parsing.
///
/// A `None` component was not written by the pattern author and imposes no
/// constraint at match time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPattern {
    pub protocol: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub pathname: Option<String>,
    pub search: Option<String>,
}

impl SplitPattern {
    /// Split `source` into protocol, hostname, port, pathname and search.
    ///
    /// ```rust
    /// use brrtpattern::pattern::SplitPattern;
    ///
    /// let split = SplitPattern::split("https://:tenant.example.com:8443/api/*?debug");
    /// assert_eq!(split.protocol.as_deref(), Some("https"));
    /// assert_eq!(split.hostname.as_deref(), Some(":tenant.example.com"));
    /// assert_eq!(split.port.as_deref(), Some("8443"));
    /// assert_eq!(split.pathname.as_deref(), Some("api/*"));
    /// assert_eq!(split.search.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn split(source: &str) -> Self {
        let mut split = SplitPattern::default();

        let rest = match source.split_once('?') {
            Some((head, search)) => {
                split.search = Some(search.to_string());
                head
            }
            None => source,
        };

        match rest.find("://") {
            Some(0) => split.host_region(&rest[3..]),
            Some(at) => {
                let protocol = &rest[..at];
                if protocol.contains('/') {
                    // A protocol never contains '/', so this is a path that
                    // happens to embed "://".
                    split.pathname = Some(strip_leading_slash(rest).to_string());
                } else {
                    split.protocol = Some(protocol.to_string());
                    split.host_region(&rest[at + 3..]);
                }
            }
            None => split.pathname = Some(strip_leading_slash(rest).to_string()),
        }

        split
    }

    fn host_region(&mut self, region: &str) {
        let host = match region.split_once('/') {
            Some((host, pathname)) => {
                self.pathname = Some(pathname.to_string());
                host
            }
            None => region,
        };

        let host = match host.rsplit_once(':') {
            Some((hostname, port))
                if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
            {
                self.port = Some(port.to_string());
                hostname
            }
            _ => host,
        };

        if !host.is_empty() {
            self.hostname = Some(host.to_string());
        }
    }
}

fn strip_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}
