//! Client scaffolding (`vitrine add-client`).
//!
//! Creates `clients/<slug>/` for a new client:
//!
//! 1. If `clients/_starter/` exists it is copied as-is, and its `site.json`
//!    (if any) becomes a partial layered under the new client's identity.
//! 2. Otherwise a minimal tree is created:
//!
//! ```text
//! clients/<slug>/
//! ├── site.json
//! ├── assets/
//! │   ├── img/.keep
//! │   ├── hero.webp        # Empty placeholder
//! │   ├── og.jpg           # Empty placeholder
//! │   ├── styles.css
//! │   └── script.js
//! ├── pages/
//! └── partials/
//! ```
//!
//! The written `site.json` is complete: stock defaults, then the starter's
//! values, then the new slug (and title, when one was given).

use crate::assets::{self, AssetError};
use crate::config::{self, CONFIG_FILE, ClientConfig, ConfigError};
use crate::naming::{collapse_whitespace, slugify};
use crate::template::CLIENT_PAGES_DIR;
use log::{debug, info};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template client copied by `add-client` when present.
pub const STARTER_DIR: &str = "_starter";

const STARTER_CSS: &str = include_str!("../static/starter/styles.css");
const STARTER_JS: &str = include_str!("../static/starter/script.js");

/// Empty files created when absent, relative to the client directory.
const PLACEHOLDERS: &[&str] = &["assets/img/.keep", "assets/hero.webp", "assets/og.jpg"];

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("'{0}' does not contain any letter or digit")]
    EmptySlug(String),
    #[error("{0} already exists")]
    AlreadyExists(PathBuf),
}

/// Result of a successful `add-client`.
#[derive(Debug, Clone)]
pub struct AddedClient {
    pub slug: String,
    pub dir: PathBuf,
    pub from_starter: bool,
    pub config: ClientConfig,
}

/// Create a new client directory under `clients_root`.
///
/// `raw_name` may contain spaces and diacritics; the slug is derived from it.
/// A non-blank `title` overrides the derived display name.
pub fn add_client(
    clients_root: &Path,
    raw_name: &str,
    title: Option<&str>,
) -> Result<AddedClient, ScaffoldError> {
    let raw = collapse_whitespace(raw_name);
    let slug = slugify(&raw);
    if slug.is_empty() {
        return Err(ScaffoldError::EmptySlug(raw_name.to_string()));
    }
    let dir = clients_root.join(&slug);
    if dir.exists() {
        return Err(ScaffoldError::AlreadyExists(dir));
    }

    let starter = clients_root.join(STARTER_DIR);
    let from_starter = starter.is_dir();
    let starter_partial = if from_starter {
        config::load_raw_config(&starter).map_err(|source| ScaffoldError::Config {
            path: starter.join(CONFIG_FILE),
            source,
        })?
    } else {
        None
    };

    let mut identity = json!({ "slug": slug });
    if let Some(title) = title.map(collapse_whitespace).filter(|t| !t.is_empty()) {
        identity["title"] = Value::String(title);
    }
    let partial = match starter_partial {
        Some(base) => config::merge_json(base, identity),
        None => identity,
    };
    let site_path = dir.join(CONFIG_FILE);
    let config = config::merge_client_config(Some(partial), &raw).map_err(|source| {
        ScaffoldError::Config {
            path: site_path.clone(),
            source,
        }
    })?;

    if from_starter {
        debug!("Copying {}", starter.display());
        assets::copy_dir_recursive(&starter, &dir)?;
    } else {
        write_minimal_tree(&dir)?;
    }

    let json = serde_json::to_string_pretty(&config).map_err(|e| ScaffoldError::Config {
        path: site_path.clone(),
        source: e.into(),
    })?;
    fs::write(&site_path, json + "\n")?;

    for placeholder in PLACEHOLDERS {
        let path = dir.join(placeholder);
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "")?;
        }
    }

    info!("Created client {slug} in {}", dir.display());
    Ok(AddedClient {
        slug,
        dir,
        from_starter,
        config,
    })
}

fn write_minimal_tree(dir: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(dir.join("assets/img"))?;
    fs::create_dir_all(dir.join(CLIENT_PAGES_DIR))?;
    fs::create_dir_all(dir.join("partials"))?;
    fs::write(dir.join("assets/styles.css"), STARTER_CSS)?;
    fs::write(dir.join("assets/script.js"), STARTER_JS)?;
    Ok(())
}
