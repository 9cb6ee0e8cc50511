//! # CLI Module
//!
//! Command-line access to route tables and patterns.
//!
//! ## Commands
//!
//! ### `match`
//!
//! Resolve URLs against a route table and print one JSON object per URL:
//!
//! ```bash
//! brrtpattern match --table routes.yaml https://acme.example.com/api/v1/users/42
//! ```
//!
//! Options:
//! - `--table <FILE>` - Route table (YAML, TOML or JSON)
//! - `--matcher <KIND>` - Override the algorithm: trie, array
//! - `--any` - Accept the first match the trie finds instead of the highest
//!   priority one
//!
//! ### `check`
//!
//! Validate every pattern of a table and report its size:
//!
//! ```bash
//! brrtpattern check --table routes.yaml
//! ```
//!
//! ### `explain`
//!
//! Show how one pattern is split, expanded and compiled:
//!
//! ```bash
//! brrtpattern explain 'api/(v:major(.:minor)/)run'
//! ```
//!
//! ### `watch`
//!
//! Read URLs from stdin and match each one against a table that is reloaded
//! whenever the file changes.
//!
//! ## Configuration
//!
//! The default algorithm and logging come from the environment, see
//! [`RuntimeConfig`](crate::runtime_config::RuntimeConfig). Logs go to stderr,
//! results to stdout.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
