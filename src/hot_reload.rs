//! # Hot Reload Module
//!
//! Live reloading of route tables without restarting the process.
//!
//! The watcher reloads the table file on every modify/create event, builds a
//! fresh matcher off to the side and publishes it through
//! [`SharedMatcher::update`]. Lookups in flight keep using the matcher they
//! started with.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brrtpattern::hot_reload::watch_table;
//! use brrtpattern::{MatcherKind, RouteTable, SharedMatcher};
//! use std::sync::Arc;
//!
//! let table = RouteTable::load("routes.yaml")?;
//! let shared = Arc::new(SharedMatcher::new(table.build(MatcherKind::Trie)?));
//!
//! let watcher = watch_table("routes.yaml", Arc::clone(&shared), MatcherKind::Trie, |table| {
//!     println!("Reloaded {} routes", table.routes.len());
//! })?;
//!
//! // Keep watcher alive
//! std::mem::forget(watcher);
//! ```
//!
//! ## Error Handling
//!
//! A table that fails to read, parse or compile is logged and the previous
//! matcher keeps serving, so saving a half-edited file never takes routing
//! down.

use crate::matcher::MatcherKind;
use crate::shared::SharedMatcher;
use crate::table::RouteTable;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Load `path`, build its matcher and publish it to `shared`.
///
/// Nothing is published when any step fails.
///
/// # Errors
///
/// Returns the load or build error.
pub fn reload_table(
    path: &Path,
    shared: &SharedMatcher<String>,
    default: MatcherKind,
) -> anyhow::Result<RouteTable> {
    let table = RouteTable::load(path)?;
    let matcher = table.build(default)?;
    shared.update(matcher);
    Ok(table)
}

/// Reload after a file event. A failed reload is logged and leaves `shared`
/// untouched.
fn apply_change<F>(
    path: &Path,
    shared: &SharedMatcher<String>,
    default: MatcherKind,
    on_reload: &mut F,
) where
    F: FnMut(&RouteTable),
{
    match reload_table(path, shared, default) {
        Ok(table) => {
            info!(
                path = %path.display(),
                routes = table.routes.len(),
                "hot-reload: route table applied"
            );
            on_reload(&table);
        }
        Err(e) => warn!(
            path = %path.display(),
            "hot-reload: {e:#}. Keeping current routes."
        ),
    }
}

/// Watch a route table file and swap a rebuilt matcher into `shared` when it
/// changes.
///
/// `on_reload` receives each table that was published successfully.
pub fn watch_table<P, F>(
    table_path: P,
    shared: Arc<SharedMatcher<String>>,
    default: MatcherKind,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&RouteTable) + Send + 'static,
{
    let path: PathBuf = table_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    apply_change(&watch_path, &shared, default, &mut on_reload);
                }
            }
            Err(e) => error!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "Route table watcher started");
    Ok(watcher)
}
