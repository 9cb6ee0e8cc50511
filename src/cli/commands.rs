use crate::hot_reload::watch_table;
use crate::logging::init_logging_with_config;
use crate::matcher::{Matcher, MatcherKind, RouteMatcher};
use crate::pattern::compile::{to_regex, variant_regex};
use crate::pattern::RoutePattern;
use crate::runtime_config::RuntimeConfig;
use crate::shared::SharedMatcher;
use crate::table::RouteTable;
use crate::url_parts::{Part, UrlParts};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line interface for brrtpattern
#[derive(Parser, Debug)]
#[command(name = "brrtpattern")]
#[command(about = "URL pattern matching CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match URLs against a route table and print the results as JSON
    Match {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Matching algorithm, overriding the table and environment
        #[arg(short, long, value_enum)]
        matcher: Option<MatcherKind>,

        /// Return the first match found rather than the highest priority one
        #[arg(long, default_value_t = false)]
        any: bool,

        /// Absolute URLs to resolve
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Validate every pattern of a route table
    Check {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Show how a pattern is split, expanded and compiled
    Explain {
        /// The pattern to explain
        pattern: String,
    },
    /// Match URLs read from stdin against a hot-reloaded route table
    Watch {
        /// Route table file (YAML, TOML or JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Matching algorithm, overriding the table and environment
        #[arg(short, long, value_enum)]
        matcher: Option<MatcherKind>,
    },
}

/// Parse arguments, initialize logging and run the selected command.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    init_logging_with_config(&config.log)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    execute(&cli, &config, stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Run `cli` reading from `input` and writing results to `out`.
///
/// # Errors
///
/// Fails when a table cannot be loaded or built, when `check` finds invalid
/// patterns, when `explain` is given an invalid pattern, or on I/O errors.
pub fn execute<R: BufRead, W: Write>(
    cli: &Cli,
    config: &RuntimeConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Match {
            table,
            matcher,
            any,
            urls,
        } => {
            let table = RouteTable::load(table)?;
            let kind = matcher.unwrap_or_else(|| table.kind_or(config.matcher));
            let matcher = table.build_with(kind)?;
            for url in urls {
                writeln!(out, "{}", match_line(&matcher, url, *any))?;
            }
            Ok(())
        }
        Commands::Check { table } => check(table, config, out),
        Commands::Explain { pattern } => explain(pattern, out),
        Commands::Watch { table, matcher } => {
            let loaded = RouteTable::load(table)?;
            let default = matcher.unwrap_or_else(|| loaded.kind_or(config.matcher));
            let shared = Arc::new(SharedMatcher::new(loaded.build_with(default)?));

            let _watcher = watch_table(table, Arc::clone(&shared), default, |_| {})
                .with_context(|| format!("failed to watch {}", table.display()))?;
            info!(path = %table.display(), matcher = default.as_str(), "Watching route table");

            for line in input.lines() {
                let line = line?;
                let url = line.trim();
                if url.is_empty() {
                    continue;
                }
                let result = match shared.match_str(url) {
                    Ok(found) => json!({ "url": url, "match": found }),
                    Err(e) => json!({ "url": url, "error": e.to_string() }),
                };
                writeln!(out, "{result}")?;
                out.flush()?;
            }
            Ok(())
        }
    }
}

fn match_line(matcher: &RouteMatcher<String>, url: &str, any: bool) -> Value {
    let parts: UrlParts = match url.parse() {
        Ok(parts) => parts,
        Err(e) => return json!({ "url": url, "error": e.to_string() }),
    };
    let found = if any {
        matcher.match_any(&parts)
    } else {
        matcher.match_parts(&parts)
    };
    json!({ "url": url, "match": found.map(|m| m.into_owned()) })
}

fn check<W: Write>(path: &Path, config: &RuntimeConfig, out: &mut W) -> anyhow::Result<()> {
    let table = RouteTable::load(path)?;

    let mut invalid = 0;
    let mut variants = 0;
    for (i, route) in table.routes.iter().enumerate() {
        match RoutePattern::parse(&route.pattern) {
            Ok(pattern) => variants += pattern.variant_count(),
            Err(e) => {
                invalid += 1;
                writeln!(out, "❌ route #{} ({}): {e}", i + 1, route.handler)?;
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} of {} routes are invalid", table.routes.len());
    }

    let matcher = table.build(config.matcher)?;
    write!(
        out,
        "✅ {} routes, {} variants, matcher: {}",
        matcher.len(),
        variants,
        matcher.kind().as_str()
    )?;
    if let RouteMatcher::Trie(trie) = &matcher {
        write!(out, ", {} trie nodes", trie.node_count())?;
    }
    writeln!(out)?;
    Ok(())
}

fn explain<W: Write>(source: &str, out: &mut W) -> anyhow::Result<()> {
    let pattern = RoutePattern::parse(source)?;
    writeln!(out, "pattern: {pattern}")?;

    for part in Part::ALL {
        let Some(component) = pattern.component(part) else {
            writeln!(out, "{}: (any)", part.name())?;
            continue;
        };
        writeln!(out, "{}: {}", part.name(), component.source)?;
        writeln!(out, "  regex: {}", to_regex(&component.ast, part.param_regex()))?;
        for variant in component.variants.iter().rev() {
            writeln!(
                out,
                "  variant {:<24} {}",
                variant.key,
                variant_regex(variant, part.param_regex())
            )?;
        }
    }
    if let Some(port) = pattern.port() {
        writeln!(out, "port: {port}")?;
    }
    if let Some(search) = pattern.search() {
        let constraints: Vec<String> = search.iter().map(ToString::to_string).collect();
        writeln!(out, "search: {}", constraints.join(" & "))?;
    }
    let names: Vec<&str> = pattern.param_names().iter().map(AsRef::as_ref).collect();
    writeln!(out, "params: [{}]", names.join(", "))?;
    writeln!(out, "variants: {}", pattern.variant_count())?;
    Ok(())
}
