//! Directory role resolution.
//!
//! A project has four well-known directories. Each role accepts a few
//! historical or localized spellings; the first one that exists wins:
//!
//! | Role | Candidates |
//! |------|------------|
//! | Template root | `template/`, `modèle/` |
//! | Clients root | `clients/`, `client/` |
//! | Public assets | `public/`, `publique/` |
//! | Output root | `dist/` |
//!
//! When none exists the first candidate is returned anyway, so later steps
//! fail (or skip) with a path the user recognizes instead of nothing at all.
//!
//! The same "first existing candidate" rule picks templates and stylesheet
//! directories, so it is written once over the [`Probe`] trait.

use std::path::{Path, PathBuf};

pub const TEMPLATE_DIRS: &[&str] = &["template", "modèle"];
pub const CLIENT_DIRS: &[&str] = &["clients", "client"];
pub const PUBLIC_DIRS: &[&str] = &["public", "publique"];
pub const OUTPUT_DIRS: &[&str] = &["dist"];

/// Existence check used by every ordered-fallback lookup.
pub trait Probe {
    fn exists(&self, path: &Path) -> bool;
}

/// [`Probe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl Probe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// First candidate the probe reports as existing.
pub fn first_existing<P, I>(candidates: I, probe: &P) -> Option<PathBuf>
where
    P: Probe + ?Sized,
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|c| probe.exists(c))
}

/// Resolve a directory role under `root`.
///
/// Returns the first existing `root/<name>`, else `root/<first name>`.
pub fn resolve_dir<P: Probe + ?Sized>(root: &Path, names: &[&str], probe: &P) -> PathBuf {
    first_existing(names.iter().map(|n| root.join(n)), probe)
        .unwrap_or_else(|| root.join(names.first().copied().unwrap_or_default()))
}

/// Resolved directories of one project.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub template: PathBuf,
    pub clients: PathBuf,
    pub public: PathBuf,
    pub output: PathBuf,
}

impl ProjectPaths {
    /// Resolve every role under `root`. An explicit `output` skips lookup;
    /// a relative one is taken relative to `root`.
    pub fn resolve<P: Probe + ?Sized>(root: &Path, output: Option<&Path>, probe: &P) -> Self {
        Self {
            root: root.to_path_buf(),
            template: resolve_dir(root, TEMPLATE_DIRS, probe),
            clients: resolve_dir(root, CLIENT_DIRS, probe),
            public: resolve_dir(root, PUBLIC_DIRS, probe),
            output: output
                .map(|o| root.join(o))
                .unwrap_or_else(|| resolve_dir(root, OUTPUT_DIRS, probe)),
        }
    }
}
