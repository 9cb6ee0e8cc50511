//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the CLI and for services that
//! embed the matchers.
//!
//! ## Environment Variables
//!
//! ### `BRRTPAT_MATCHER`
//!
//! Matching algorithm used when a route table does not choose one:
//! - `trie` (default): prefix tree, cost follows the URL
//! - `array`: linear scan, cost follows the table size
//!
//! ### `BRRTPAT_LOG_LEVEL`, `BRRTPAT_LOG_FORMAT`, `BRRTPAT_LOG_ASYNC`
//!
//! See [`LogConfig`](crate::logging::LogConfig).
//!
//! ## Usage
//!
//! ```rust
//! use brrtpattern::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Matcher: {}", config.matcher.as_str());
//! ```
//!
//! Invalid values fall back to the defaults rather than failing startup.

use std::env;

use crate::logging::LogConfig;
use crate::matcher::MatcherKind;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Default matching algorithm (default: trie)
    pub matcher: MatcherKind,
    pub log: LogConfig,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let matcher = match env::var("BRRTPAT_MATCHER") {
            Ok(val) => MatcherKind::parse(&val),
            Err(_) => MatcherKind::default(),
        };
        RuntimeConfig {
            matcher,
            log: LogConfig::from_env(),
        }
    }
}
