//! # Vitrine
//!
//! A static site generator for many small client sites ("vitrines") sharing
//! one template. Each client is a directory holding a sparse `site.json`;
//! everything it does not say comes from documented defaults.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Discover  clients/   →  Vec<DiscoveredClient>   (site.json → complete config)
//! 2. Generate  configs    →  dist/                   (templates, assets, hub, sitemap)
//! ```
//!
//! Discovery is also run on its own by `vitrine check`, so a broken
//! `site.json` can be caught without touching the output.
//!
//! # Project Layout
//!
//! ```text
//! site/
//! ├── template/                 # Shared templates and assets (alt. modèle/)
//! │   ├── index.html            # Default template for every page
//! │   ├── contact.html          # Page-specific template (optional)
//! │   ├── partials/header.html  # Included with {% include "partials/header.html" %}
//! │   ├── assets/               # → dist/clients/<slug>/assets/
//! │   └── styles/               # → dist/clients/<slug>/styles/ (alt. css/)
//! ├── clients/                  # One directory per client (alt. client/)
//! │   ├── _starter/             # Copied by add-client, never built
//! │   └── ink-co/
//! │       ├── site.json
//! │       ├── assets/
//! │       └── pages/            # Per-client template overrides
//! ├── public/                   # Copied to the output root (alt. publique/)
//! └── dist/                     # Output
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.json` loading, deep merge over stock defaults, validation |
//! | [`paths`] | Directory roles with alternate names, first-existing lookup |
//! | [`env`] | Build environment snapshot: base path and public site URL |
//! | [`scan`] | Stage 1: client discovery |
//! | [`template`] | Template resolution and rendering with minijinja |
//! | [`assets`] | Shared and per-client asset staging |
//! | [`generate`] | Stage 2: the build orchestrator, staged output swap |
//! | [`pages`] | Hub, placeholder and 404 pages (maud) |
//! | [`sitemap`] | `sitemap.xml` |
//! | [`minify`] | Best-effort HTML minification |
//! | [`scaffold`] | `add-client`: new client directories |
//! | [`naming`] | Slugs and display names |
//! | [`types`] | Page declarations shared by config and rendering |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sparse Client Files
//!
//! A client's `site.json` only needs what differs from the defaults. The
//! stock configuration is a typed struct serialized to JSON, the client file
//! is deep-merged on top, and the result is deserialized back, so the typed
//! struct is the single source of truth for both defaults and shape.
//!
//! ## Runtime Templates, Built-in Fallbacks
//!
//! Client sites are designed by people editing HTML, so page templates are
//! Jinja files on disk ([minijinja](https://docs.rs/minijinja)). Pages the
//! tool itself owns (hub, 404, the page shown when no template exists) are
//! [maud](https://maud.lambda.xyz/) markup compiled into the binary.
//!
//! ## All-or-Nothing Output
//!
//! A build writes into a staging directory and swaps it into place only on
//! success. A broken template in one client never leaves a half-written
//! `dist/` behind.
//!
//! ## Explicit Environment
//!
//! `PUBLIC_URL`, CI detection and the repository name are read once into
//! [`env::BuildEnv`] and passed down. Base path computation is a pure
//! function of that value.

pub mod assets;
pub mod config;
pub mod env;
pub mod generate;
pub mod minify;
pub mod naming;
pub mod output;
pub mod pages;
pub mod paths;
pub mod scaffold;
pub mod scan;
pub mod sitemap;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
