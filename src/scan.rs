//! Client discovery.
//!
//! Stage 1 of the build pipeline. Enumerates the clients root and loads the
//! configuration of every client that should be built.
//!
//! ## Directory Structure
//!
//! ```text
//! clients/
//! ├── _starter/        # Reserved (leading underscore): never built
//! ├── .git/            # Hidden: ignored
//! ├── black-lotus/     # Built
//! │   └── site.json
//! ├── drafts/          # No site.json: skipped
//! └── ink-co/
//!     └── site.json    # { "build": false } skips the client
//! ```
//!
//! ## Rules
//!
//! - Entries are visited in directory-name order, so every later stage (hub
//!   redirect, sitemap, summary) is deterministic.
//! - The raw name a client's defaults derive from is its directory name with
//!   hyphens as spaces.
//! - A `site.json` with `"build": false` is set aside before it is merged
//!   or validated, so a disabled client may be incomplete or outdated.
//! - A configuration whose `slug` differs from its directory name is fatal,
//!   as is any `site.json` that fails to parse or validate.

use crate::config::{self, CONFIG_FILE, ClientConfig, ConfigError};
use crate::naming::display_name;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("{dir}: slug '{slug}' does not match the directory name")]
    SlugMismatch { dir: PathBuf, slug: String },
}

/// A client that passed discovery.
#[derive(Debug, Clone)]
pub struct DiscoveredClient {
    pub config: ClientConfig,
    /// The client's directory (holds `site.json`, assets, page overrides).
    pub source_dir: PathBuf,
}

impl DiscoveredClient {
    pub fn slug(&self) -> &str {
        &self.config.slug
    }
}

/// One client directory with a `site.json`.
#[derive(Debug, Clone)]
pub enum ClientEntry {
    /// Configuration completed and validated.
    Enabled(DiscoveredClient),
    /// `site.json` sets `"build": false`. Nothing else in it is read.
    Disabled { source_dir: PathBuf },
}

impl ClientEntry {
    pub fn source_dir(&self) -> &Path {
        match self {
            ClientEntry::Enabled(client) => &client.source_dir,
            ClientEntry::Disabled { source_dir } => source_dir,
        }
    }
}

/// Whether a directory name is reserved or hidden.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Whether a raw `site.json` opts out of the build.
fn is_build_disabled(raw: &Value) -> bool {
    raw.get("build") == Some(&Value::Bool(false))
}

/// Load and complete the configuration of one client directory.
///
/// Returns `Ok(None)` when the directory has no `site.json`. A client that
/// sets `"build": false` is returned as [`ClientEntry::Disabled`] before any
/// merging, validation or slug check.
pub fn load_client(dir: &Path) -> Result<Option<ClientEntry>, ScanError> {
    let config_path = dir.join(CONFIG_FILE);
    let with_path = |source: ConfigError| ScanError::Config {
        path: config_path.clone(),
        source,
    };
    let Some(raw) = config::load_raw_config(dir).map_err(with_path)? else {
        return Ok(None);
    };
    if is_build_disabled(&raw) {
        return Ok(Some(ClientEntry::Disabled {
            source_dir: dir.to_path_buf(),
        }));
    }
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let config = config::merge_client_config(Some(raw), &display_name(&dir_name))
        .map_err(with_path)?;
    if config.slug != dir_name {
        return Err(ScanError::SlugMismatch {
            dir: dir.to_path_buf(),
            slug: config.slug,
        });
    }
    Ok(Some(ClientEntry::Enabled(DiscoveredClient {
        config,
        source_dir: dir.to_path_buf(),
    })))
}

/// Every client directory with a configuration, build-enabled or not.
///
/// A missing clients root yields an empty list.
pub fn scan_clients(clients_root: &Path) -> Result<Vec<ClientEntry>, ScanError> {
    if !clients_root.is_dir() {
        warn!("Clients directory {} not found", clients_root.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(clients_root)?.map(|entry| entry.map(|e| e.path()));
    let dirs = candidate_dirs(entries)?;

    let mut clients = Vec::new();
    for dir in dirs {
        match load_client(&dir)? {
            Some(entry) => clients.push(entry),
            None => debug!("Skipping {}: no {CONFIG_FILE}", dir.display()),
        }
    }
    Ok(clients)
}

/// Sorted, non-reserved directories among `entries`. The first entry that
/// failed to read aborts the scan.
fn candidate_dirs<I>(entries: I) -> io::Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?;
        let reserved = path
            .file_name()
            .map(|n| is_reserved(&n.to_string_lossy()))
            .unwrap_or(true);
        if !reserved && path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Clients that should be built, in discovery order.
pub fn discover_clients(clients_root: &Path) -> Result<Vec<DiscoveredClient>, ScanError> {
    let clients = scan_clients(clients_root)?
        .into_iter()
        .filter_map(|entry| match entry {
            ClientEntry::Enabled(client) => Some(client),
            ClientEntry::Disabled { source_dir } => {
                debug!("Skipping {}: build disabled", source_dir.display());
                None
            }
        })
        .collect();
    Ok(clients)
}
