//! Template resolution and page rendering.
//!
//! ## Template Lookup
//!
//! For a logical page `contact` the first existing file wins:
//!
//! ```text
//! clients/<slug>/pages/contact.html   # per-client override
//! template/contact.html               # page-specific
//! template/page.html                  # generic single page
//! template/index.html                 # default
//! ```
//!
//! When none exists the page is still produced from a small built-in layout
//! ([`fallback_page`]), so one missing template never aborts a multi-client
//! build.
//!
//! ## Template Language
//!
//! Templates are [MiniJinja](https://docs.rs/minijinja) (Jinja2 syntax) with
//! HTML auto-escaping. Every page sees:
//!
//! | Variable | Content |
//! |----------|---------|
//! | `site` | the merged client configuration |
//! | `page` | `{path, title}` of the page being rendered |
//! | `basePath` | public URL prefix, always ending with `/` |
//! | `slug` | the client slug |
//! | `clientOutDir` | `clients/<slug>/` |
//! | `isCI` | whether the build runs under CI |
//! | `themeCss` | `site.theme` as CSS custom properties, safe to inline |
//!
//! `basePath`, `clientOutDir` and `themeCss` are marked safe and are never
//! escaped; everything under `site` and `page` is.
//!
//! `{% include %}`, `{% extends %}` and `{% import %}` names are looked up
//! next to the including template first, then under the shared template
//! root. A client override can therefore `{% include "partials/footer.html" %}`
//! and get the shared footer unless it ships its own.
//!
//! Syntax errors, missing partials and render errors are fatal: a broken
//! shared template affects every client using it.

use crate::config::ClientConfig;
use crate::paths::{Probe, first_existing};
use crate::types::PageSpec;
use maud::{DOCTYPE, PreEscaped, html};
use minijinja::{Environment, Error, ErrorKind, Value, context};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of template files.
pub const TEMPLATE_EXT: &str = "html";
/// Per-client template override directory, relative to the client directory.
pub const CLIENT_PAGES_DIR: &str = "pages";
/// Generic single-page template name (without extension).
pub const GENERIC_TEMPLATE: &str = "page";
/// Default template name (without extension).
pub const DEFAULT_TEMPLATE: &str = "index";

const FALLBACK_PAGE_CSS: &str = "body{margin:0;font-family:system-ui,sans-serif;\
background:var(--bg);color:var(--text)}main{max-width:48rem;margin:0 auto;padding:2rem}\
h1{color:var(--brand)}p{color:var(--muted)}";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template {template} failed for client '{client}': {source:#}")]
    Template {
        template: PathBuf,
        client: String,
        #[source]
        source: Error,
    },
}

/// Candidate template files for a page, most specific first.
pub fn template_candidates(
    template_root: &Path,
    client_dir: Option<&Path>,
    page_name: &str,
) -> Vec<PathBuf> {
    let file = |name: &str| format!("{name}.{TEMPLATE_EXT}");
    let mut candidates = Vec::with_capacity(4);
    if let Some(dir) = client_dir {
        candidates.push(dir.join(CLIENT_PAGES_DIR).join(file(page_name)));
    }
    candidates.push(template_root.join(file(page_name)));
    candidates.push(template_root.join(file(GENERIC_TEMPLATE)));
    candidates.push(template_root.join(file(DEFAULT_TEMPLATE)));
    candidates
}

/// Most specific existing template for a page, if any.
pub fn resolve_template<P: Probe + ?Sized>(
    template_root: &Path,
    client_dir: Option<&Path>,
    page_name: &str,
    probe: &P,
) -> Option<PathBuf> {
    first_existing(template_candidates(template_root, client_dir, page_name), probe)
}

/// Everything a single page render needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site: &'a ClientConfig,
    pub page: &'a PageSpec,
    pub base_path: &'a str,
    pub ci: bool,
}

impl PageContext<'_> {
    fn to_value(self) -> Value {
        context! {
            site => Value::from_serialize(self.site),
            page => Value::from_serialize(self.page),
            basePath => Value::from_safe_string(self.base_path.to_string()),
            slug => &self.site.slug,
            clientOutDir => Value::from_safe_string(format!("clients/{}/", self.site.slug)),
            isCI => self.ci,
            themeCss => Value::from_safe_string(self.site.theme.to_css()),
        }
    }
}

/// Renders pages from templates on disk.
///
/// One renderer serves a whole build: templates are loaded lazily by
/// absolute path and cached by the environment.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new(template_root: &Path) -> Self {
        let root = template_root.to_path_buf();
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_loader(load_template_file);
        env.set_path_join_callback(move |name, parent| join_include(&root, name, parent));
        Self { env }
    }

    /// Render one page. `None` renders the built-in fallback page.
    pub fn render(&self, template: Option<&Path>, ctx: PageContext) -> Result<String, RenderError> {
        let Some(path) = template else {
            return Ok(fallback_page(ctx.site, ctx.page, ctx.base_path));
        };
        let fail = |source: Error| RenderError::Template {
            template: path.to_path_buf(),
            client: ctx.site.slug.clone(),
            source,
        };
        let name = path.to_string_lossy();
        let template = self.env.get_template(&name).map_err(fail)?;
        template.render(ctx.to_value()).map_err(fail)
    }
}

/// Loader: template names are filesystem paths.
fn load_template_file(name: &str) -> Result<Option<String>, Error> {
    match fs::read_to_string(name) {
        Ok(source) => Ok(Some(source)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(
            Error::new(ErrorKind::InvalidOperation, format!("cannot read template {name}"))
                .with_source(err),
        ),
    }
}

/// Resolve an include name against the including template's directory,
/// then against the shared template root.
fn join_include<'s>(root: &Path, name: &'s str, parent: &'s str) -> Cow<'s, str> {
    let requested = Path::new(name);
    if requested.is_absolute() {
        return Cow::Borrowed(name);
    }
    if let Some(dir) = Path::new(parent).parent() {
        let sibling = dir.join(requested);
        if sibling.is_file() {
            return Cow::Owned(sibling.to_string_lossy().into_owned());
        }
    }
    Cow::Owned(root.join(requested).to_string_lossy().into_owned())
}

/// Minimal standalone page used when no template exists for a page.
pub fn fallback_page(site: &ClientConfig, page: &PageSpec, base_path: &str) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page.title) " – " (site.title) }
                style { (site.theme.to_css()) (PreEscaped(FALLBACK_PAGE_CSS)) }
            }
            body {
                main.fallback-page {
                    h1 { (site.title) }
                    h2 { (page.title) }
                    p { "Page " strong { (page.name()) } " (template par défaut)" }
                    p { a href={ (base_path) "clients/" (site.slug) "/" } { "Accueil" } }
                }
            }
        }
    };
    markup.into_string()
}
