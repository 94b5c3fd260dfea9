//! Shared utilities for vitrine integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that change where a build thinks it is published.
const BUILD_ENV_VARS: &[&str] = &["PUBLIC_URL", "GITHUB_ACTIONS", "CI", "GITHUB_REPOSITORY"];

/// An isolated project directory with `template/` and `clients/`.
#[allow(dead_code)]
pub struct TestProject {
    root: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("template")).unwrap();
        fs::create_dir_all(root.path().join("clients")).unwrap();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn clients(&self) -> PathBuf {
        self.root().join("clients")
    }

    pub fn dist(&self) -> PathBuf {
        self.root().join("dist")
    }

    /// Write `clients/<dir>/site.json`.
    pub fn client(&self, dir: &str, site_json: &str) -> &Self {
        let client_dir = self.clients().join(dir);
        fs::create_dir_all(&client_dir).unwrap();
        fs::write(client_dir.join("site.json"), site_json).unwrap();
        self
    }

    /// Write any file relative to the project root.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel))
            .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
    }

    /// The `vitrine` binary, run from the project root with a local build
    /// environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vitrine").expect("Failed to locate vitrine binary");
        cmd.current_dir(self.root());
        for var in BUILD_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }
}
