//! Site generation.
//!
//! Stage 2 of the build pipeline: everything after discovery.
//!
//! ```text
//! Init → Clean → Stage(public)
//!      → per client: stage assets → per page: resolve → render → minify → write
//!      → Finalize(hub, 404, sitemap) → Done
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Hub (redirect to the first client)
//! ├── 404.html
//! ├── sitemap.xml
//! ├── favicon.ico                # Copied from public/
//! └── clients/
//!     └── ink-co/
//!         ├── index.html
//!         ├── contact.html
//!         ├── mentions.html
//!         ├── assets/            # Shared assets, then the client's own
//!         └── styles/
//! ```
//!
//! ## Failure Policy
//!
//! The build is written into a sibling staging directory
//! (`.dist.staging` for `dist`). Only when every step succeeded is the
//! previous output removed and the staging directory renamed into place. A
//! failed build removes the staging directory and leaves the previous output
//! exactly as it was.

use crate::assets::{self, AssetError};
use crate::env::BuildEnv;
use crate::minify::minify_html;
use crate::pages;
use crate::paths::{FsProbe, ProjectPaths};
use crate::scan::{self, DiscoveredClient, ScanError};
use crate::sitemap;
use crate::template::{self, PageContext, PageRenderer, RenderError};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory inside the output root holding one directory per client.
pub const CLIENTS_OUT_DIR: &str = "clients";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Scan(#[from] ScanError),
    #[error("Template error: {0}")]
    Render(#[from] RenderError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("Invalid output directory: {0}")]
    InvalidOutput(PathBuf),
}

/// State of one build run.
#[derive(Debug)]
pub struct BuildContext {
    pub paths: ProjectPaths,
    pub base_path: String,
    pub site_url: String,
    pub ci: bool,
    /// Slugs built so far, in build order.
    pub built: Vec<String>,
}

impl BuildContext {
    pub fn new(paths: &ProjectPaths, env: &BuildEnv) -> Self {
        Self {
            paths: paths.clone(),
            base_path: env.base_path(),
            site_url: env.site_url(),
            ci: env.ci,
            built: Vec::new(),
        }
    }
}

/// Summary of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub built: Vec<String>,
    pub base_path: String,
    pub output: PathBuf,
    pub pages: usize,
}

/// Staging directory used while building into `output`.
pub fn staging_dir(output: &Path) -> Result<PathBuf, GenerateError> {
    let name = output
        .file_name()
        .ok_or_else(|| GenerateError::InvalidOutput(output.to_path_buf()))?;
    let parent = output.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(format!(".{}.staging", name.to_string_lossy())))
}

/// `path` made absolute, with symlinks resolved as far as it exists.
fn resolved(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = abs.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }
    abs
}

/// Refuse an output directory whose replacement would delete project sources.
///
/// The output may not be, or contain, the project root, the clients root, the
/// template root or the public directory.
pub fn check_output(paths: &ProjectPaths) -> Result<(), GenerateError> {
    let output = resolved(&paths.output);
    let sources = [&paths.root, &paths.clients, &paths.template, &paths.public];
    if sources.iter().any(|dir| resolved(dir).starts_with(&output)) {
        return Err(GenerateError::InvalidOutput(paths.output.clone()));
    }
    Ok(())
}

/// Build every client into `paths.output`.
pub fn build(paths: &ProjectPaths, env: &BuildEnv) -> Result<BuildReport, GenerateError> {
    check_output(paths)?;
    let staging = staging_dir(&paths.output)?;
    if staging.exists() {
        debug!("Removing leftover {}", staging.display());
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let mut ctx = BuildContext::new(paths, env);
    let result = build_into(&mut ctx, &staging).and_then(|pages| {
        swap_into_place(&staging, &paths.output)?;
        Ok(pages)
    });

    match result {
        Ok(pages) => Ok(BuildReport {
            built: ctx.built,
            base_path: ctx.base_path,
            output: paths.output.clone(),
            pages,
        }),
        Err(err) => {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!("Could not remove {}: {cleanup}", staging.display());
            }
            Err(err)
        }
    }
}

/// Run the whole pipeline into `out`. Returns the number of pages written.
fn build_into(ctx: &mut BuildContext, out: &Path) -> Result<usize, GenerateError> {
    let clients = scan::discover_clients(&ctx.paths.clients)?;
    info!(
        "Building {} client(s) with base path {}",
        clients.len(),
        ctx.base_path
    );

    let copied = assets::stage_public(&ctx.paths.public, out)?;
    if copied > 0 {
        debug!("Copied {copied} public file(s)");
    }

    let renderer = PageRenderer::new(&ctx.paths.template);
    let mut written = 0;
    for client in &clients {
        written += build_client(ctx, &renderer, client, out)?;
        ctx.built.push(client.slug().to_string());
    }

    let configs: Vec<_> = clients.iter().map(|c| &c.config).collect();
    fs::write(out.join("index.html"), minify_html(&pages::hub_page(&configs)))?;
    fs::write(
        out.join("404.html"),
        minify_html(&pages::not_found_page(&ctx.base_path)),
    )?;
    fs::write(
        out.join("sitemap.xml"),
        sitemap::sitemap_xml(&ctx.site_url, &configs),
    )?;
    Ok(written)
}

/// Stage assets and write every page of one client.
fn build_client(
    ctx: &BuildContext,
    renderer: &PageRenderer,
    client: &DiscoveredClient,
    out: &Path,
) -> Result<usize, GenerateError> {
    let slug = client.slug();
    let client_out = out.join(CLIENTS_OUT_DIR).join(slug);
    let staged = assets::stage_client_assets(
        &ctx.paths.template,
        &client.source_dir,
        &client.config,
        &client_out,
        &FsProbe,
    )?;
    if staged.fallback_stylesheet {
        debug!("{slug}: no stylesheet directory, wrote built-in stylesheet");
    }

    for page in &client.config.pages {
        let template = template::resolve_template(
            &ctx.paths.template,
            Some(client.source_dir.as_path()),
            page.name(),
            &FsProbe,
        );
        match &template {
            Some(path) => debug!("{slug}/{} ← {}", page.output_file(), path.display()),
            None => debug!("{slug}/{} ← built-in page", page.output_file()),
        }
        let html = renderer.render(
            template.as_deref(),
            PageContext {
                site: &client.config,
                page,
                base_path: &ctx.base_path,
                ci: ctx.ci,
            },
        )?;
        let target = client_out.join(page.output_file());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, minify_html(&html))?;
    }

    info!("Built {slug} ({} page(s))", client.config.pages.len());
    Ok(client.config.pages.len())
}

/// Replace `output` with the finished staging directory.
fn swap_into_place(staging: &Path, output: &Path) -> Result<(), GenerateError> {
    if output.exists() {
        fs::remove_dir_all(output)?;
    }
    fs::rename(staging, output)?;
    Ok(())
}
