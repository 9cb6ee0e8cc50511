//! # brrtpattern
//!
//! **brrtpattern** is a deterministic URL route-pattern engine. Patterns cover
//! the whole URL (protocol, hostname, port, pathname and query) with named
//! parameters, wildcards and nestable optional groups; a table of patterns is
//! compiled once and then resolves URLs to `(pattern, params, payload)`.
//!
//! ## Pattern Syntax
//!
//! ```text
//! http(s)://:tenant.example.com:8443/api/(v:major(.:minor)/)files/*path?debug
//! ```
//!
//! - `:name` - a parameter: one or more characters up to the next separator
//!   (`.` in hostnames, `/` in protocol and pathname)
//! - `*` / `*name` - a wildcard: zero or more characters, separators
//!   included, within one component
//! - `( ... )` - an optional group; groups nest
//! - `?a&b=c` - the query must carry `a`, and `b` equal to `c`
//! - anything else is literal text
//!
//! Components the pattern leaves out are unconstrained: `users/:id` matches
//! any protocol, host and port.
//!
//! ## Architecture
//!
//! - **[`escape`]** - placeholder keys shared by the compiler and the trie
//! - **[`pattern`]** - parsing, splitting, variant expansion and regex
//!   compilation
//! - **[`url_parts`]** - decomposition of request URLs
//! - **[`search`]** - query-string constraints
//! - **[`matcher`]** - the linear and trie matchers
//! - **[`shared`]** - lock-free publication of a rebuilt matcher
//! - **[`table`]** - route tables loaded from YAML, TOML or JSON
//! - **[`hot_reload`]** - file watching for route tables
//! - **[`runtime_config`]** / **[`logging`]** - environment configuration and
//!   `tracing` setup
//! - **[`cli`]** - the `brrtpattern` command
//!
//! ## Priority
//!
//! Patterns registered earlier win. Within one pattern, each component
//! prefers its most specific variant, which is how `api/(v:major(.:minor)/)run`
//! binds `api/v1.2/run` to `major = "1"`, `minor = "2"` rather than to
//! `major = "1.2"`. Both matchers implement exactly this order and return
//! identical results.
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtpattern::{ArrayMatcher, Matcher, TrieMatcher};
//!
//! let mut trie = TrieMatcher::new();
//! let mut array = ArrayMatcher::new();
//! for (pattern, handler) in [
//!     ("https://:tenant.example.com/users/:id", "tenant_user"),
//!     ("users/:id", "get_user"),
//!     ("files/*path", "files"),
//! ] {
//!     trie.add(pattern, handler).unwrap();
//!     array.add(pattern, handler).unwrap();
//! }
//!
//! let url = "https://acme.example.com/users/42";
//! let m = trie.match_str(url).unwrap().unwrap();
//! assert_eq!(*m.payload, "tenant_user");
//! assert_eq!(m.params.get("tenant"), Some("acme"));
//! assert_eq!(m.params.get("id"), Some("42"));
//! assert_eq!(Some(m), array.match_str(url).unwrap());
//!
//! let m = trie.match_str("http://localhost/files/a/b.txt").unwrap().unwrap();
//! assert_eq!(m.params.get("path"), Some("a/b.txt"));
//! ```
//!
//! ## Errors
//!
//! Malformed patterns are rejected by `add` with a [`ParseError`] and leave the
//! matcher unchanged. Lookups never fail on a well-formed URL; no match is
//! `None`.

pub mod cli;
pub mod escape;
pub mod hot_reload;
pub mod logging;
pub mod matcher;
pub mod pattern;
pub mod runtime_config;
pub mod search;
pub mod shared;
pub mod table;
pub mod url_parts;

pub use matcher::{
    ArrayMatcher, Match, Matcher, MatcherKind, OwnedMatch, Params, RouteMatcher, TrieMatcher,
};
pub use pattern::{ParseError, RoutePattern};
pub use shared::SharedMatcher;
pub use table::{RouteEntry, RouteTable};
pub use url_parts::{Part, UrlParts};
