//! Asset staging.
//!
//! Each client's output directory is rebuilt from scratch:
//!
//! ```text
//! template/assets/        →  dist/clients/<slug>/assets/
//! template/styles/ (css/) →  dist/clients/<slug>/styles/
//! clients/<slug>/assets/  →  dist/clients/<slug>/assets/   (wins over shared files)
//! ```
//!
//! When the template has no stylesheet directory, a built-in
//! `styles/main.css` is written instead, prefixed with the client's theme
//! colors as CSS custom properties.

use crate::config::ClientConfig;
use crate::paths::{Probe, first_existing};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Shared asset directory under the template root.
pub const SHARED_ASSETS_DIR: &str = "assets";
/// Candidate stylesheet directories under the template root.
pub const STYLE_DIRS: &[&str] = &["styles", "css"];
/// Asset directory inside a client's output directory.
pub const OUT_ASSETS_DIR: &str = "assets";
/// Stylesheet directory inside a client's output directory.
pub const OUT_STYLES_DIR: &str = "styles";
/// Name of the built-in stylesheet.
pub const FALLBACK_STYLESHEET: &str = "main.css";

const CSS_STATIC: &str = include_str!("../static/fallback.css");

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What was staged for one client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedAssets {
    /// Number of files copied.
    pub files: usize,
    /// Whether the built-in stylesheet was written.
    pub fallback_stylesheet: bool,
}

/// Recursively copy `src` into `dst`, creating `dst` as needed.
///
/// Existing files in `dst` are overwritten. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Built-in stylesheet for a client: theme variables, then the base rules.
pub fn fallback_stylesheet(config: &ClientConfig) -> String {
    format!("{}\n\n{}", config.theme.to_css(), CSS_STATIC)
}

/// Stage shared and client assets into a client's output directory.
///
/// `out_dir` is removed first; every build of a client starts clean.
pub fn stage_client_assets<P: Probe + ?Sized>(
    template_root: &Path,
    client_dir: &Path,
    config: &ClientConfig,
    out_dir: &Path,
    probe: &P,
) -> Result<StagedAssets, AssetError> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)?;
    let mut staged = StagedAssets::default();

    let shared = template_root.join(SHARED_ASSETS_DIR);
    if shared.is_dir() {
        staged.files += copy_dir_recursive(&shared, &out_dir.join(OUT_ASSETS_DIR))?;
    }

    let styles: Option<PathBuf> =
        first_existing(STYLE_DIRS.iter().map(|d| template_root.join(d)), probe);
    match styles {
        Some(dir) => {
            staged.files += copy_dir_recursive(&dir, &out_dir.join(OUT_STYLES_DIR))?;
        }
        None => {
            let styles_out = out_dir.join(OUT_STYLES_DIR);
            fs::create_dir_all(&styles_out)?;
            fs::write(
                styles_out.join(FALLBACK_STYLESHEET),
                fallback_stylesheet(config),
            )?;
            staged.fallback_stylesheet = true;
        }
    }

    let own = client_dir.join(&config.assets_dir);
    if own.is_dir() {
        staged.files += copy_dir_recursive(&own, &out_dir.join(OUT_ASSETS_DIR))?;
    }

    Ok(staged)
}

/// Copy the public directory into the output root, if it exists.
pub fn stage_public(public_dir: &Path, output_root: &Path) -> Result<usize, AssetError> {
    if !public_dir.is_dir() {
        return Ok(0);
    }
    copy_dir_recursive(public_dir, output_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge_client_config;
    use crate::paths::FsProbe;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copy_dir_recursive_copies_nested_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src.join("a.txt"), "a");
        write(&src.join("img/b.jpg"), "b");
        let dst = tmp.path().join("dst");

        let copied = copy_dir_recursive(&src, &dst).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("img/b.jpg")).unwrap(), "b");
    }

    #[test]
    fn client_assets_override_shared_assets() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        let client = tmp.path().join("clients/ink-co");
        write(&template.join("assets/logo.svg"), "shared");
        write(&template.join("assets/script.js"), "shared-js");
        write(&template.join("styles/site.css"), "body{}");
        write(&client.join("assets/logo.svg"), "client");
        let out = tmp.path().join("dist/clients/ink-co");
        let config = merge_client_config(None, "ink co").unwrap();

        let staged = stage_client_assets(&template, &client, &config, &out, &FsProbe).unwrap();
        assert!(!staged.fallback_stylesheet);
        assert_eq!(staged.files, 4);
        assert_eq!(fs::read_to_string(out.join("assets/logo.svg")).unwrap(), "client");
        assert_eq!(fs::read_to_string(out.join("assets/script.js")).unwrap(), "shared-js");
        assert!(out.join("styles/site.css").exists());
    }

    #[test]
    fn css_dir_is_an_accepted_alternate() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        write(&template.join("css/site.css"), "body{}");
        let out = tmp.path().join("out");
        let config = merge_client_config(None, "ink").unwrap();

        stage_client_assets(&template, tmp.path(), &config, &out, &FsProbe).unwrap();
        assert!(out.join("styles/site.css").exists());
    }

    #[test]
    fn missing_stylesheet_dir_writes_fallback() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let config = merge_client_config(None, "ink").unwrap();

        let staged =
            stage_client_assets(&tmp.path().join("template"), tmp.path(), &config, &out, &FsProbe)
                .unwrap();
        assert!(staged.fallback_stylesheet);
        let css = fs::read_to_string(out.join("styles/main.css")).unwrap();
        assert!(css.contains("--brand:#e11d48"));
        assert!(css.contains("var(--bg)"));
    }

    #[test]
    fn stale_output_is_cleared() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        write(&out.join("old.html"), "stale");
        let config = merge_client_config(None, "ink").unwrap();

        stage_client_assets(&tmp.path().join("template"), tmp.path(), &config, &out, &FsProbe)
            .unwrap();
        assert!(!out.join("old.html").exists());
    }

    #[test]
    fn custom_assets_dir_is_honored() {
        let tmp = TempDir::new().unwrap();
        let client = tmp.path().join("client");
        write(&client.join("media/hero.webp"), "img");
        let mut config = merge_client_config(None, "ink").unwrap();
        config.assets_dir = "media".to_string();
        let out = tmp.path().join("out");

        stage_client_assets(&tmp.path().join("template"), &client, &config, &out, &FsProbe)
            .unwrap();
        assert!(out.join("assets/hero.webp").exists());
    }

    #[test]
    fn stage_public_without_dir_is_noop() {
        let tmp = TempDir::new().unwrap();
        let copied = stage_public(&tmp.path().join("public"), &tmp.path().join("dist")).unwrap();
        assert_eq!(copied, 0);
    }

    #[test]
    fn stage_public_copies_into_output_root() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("public/favicon.ico"), "ico");
        let dist = tmp.path().join("dist");
        stage_public(&tmp.path().join("public"), &dist).unwrap();
        assert!(dist.join("favicon.ico").exists());
    }
}
