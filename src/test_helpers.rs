//! Shared test utilities.
//!
//! Builds throwaway project trees in temporary directories:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = project();
//! write_template(tmp.path(), "page.html", "<h1>{{ page.title }}</h1>");
//! write_client(&tmp.path().join("clients"), "ink-co", r#"{ "title": "Ink" }"#);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Empty project: `template/` and `clients/` under a temp root.
pub fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("template")).unwrap();
    fs::create_dir_all(tmp.path().join("clients")).unwrap();
    tmp
}

/// Write `clients_root/<dir>/site.json` and return the client directory.
pub fn write_client(clients_root: &Path, dir: &str, site_json: &str) -> PathBuf {
    let client_dir = clients_root.join(dir);
    fs::create_dir_all(&client_dir).unwrap();
    fs::write(client_dir.join("site.json"), site_json).unwrap();
    client_dir
}

/// Write a file under `root/template/`, creating parent directories.
pub fn write_template(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join("template").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}
