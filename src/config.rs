//! Client configuration module.
//!
//! Handles loading, merging and validating the `site.json` file found in
//! every client directory. A client file is sparse: it only lists what
//! differs from the stock defaults, and everything else is filled in at the
//! leaf level.
//!
//! ## File Location
//!
//! ```text
//! clients/
//! ├── _starter/            # Reserved prefix: never built, copied by add-client
//! ├── ink-co/
//! │   ├── site.json        # Client configuration (required to be built)
//! │   ├── assets/          # Client assets, copied over the shared ones
//! │   └── pages/           # Optional per-client template overrides
//! └── black-lotus/
//!     └── site.json
//! ```
//!
//! ## Partial Configuration
//!
//! ```json
//! {
//!   "title": "Ink & Co",
//!   "theme": { "brand": "#0ea5e9" },
//!   "legal": { "editor": { "siret": "123 456 789 00012" } }
//! }
//! ```
//!
//! Here `theme.bg`, `legal.editor.entity` and every other unspecified field
//! keep their defaults: an explicit value overrides that one leaf, never its
//! siblings. `null` counts as absent. Lists (`pages`, `styles`, `artists`,
//! `gallery`) replace the default list wholesale; an empty `pages` list falls
//! back to the three default pages.
//!
//! Unknown top-level keys are kept as-is and handed to templates, so a
//! client can carry data only its own templates know about.

use crate::naming::{collapse_whitespace, display_name, is_slug, slugify};
use crate::types::PageSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the configuration file inside a client directory.
pub const CONFIG_FILE: &str = "site.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Fully resolved configuration of one client site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Whether the client is built at all.
    #[serde(rename = "build")]
    pub build_enabled: bool,
    /// Whether the client shows up in public listings (hub page, sitemap).
    pub listed: bool,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub description: String,
    pub lang: String,
    pub theme: Theme,
    pub hero: Hero,
    pub contact: Contact,
    pub socials: Socials,
    pub legal: Legal,
    pub seo: Seo,
    pub sections: Sections,
    pub styles: Vec<StyleEntry>,
    pub artists: Vec<Artist>,
    pub gallery: Vec<String>,
    pub pages: Vec<PageSpec>,
    /// Client asset directory, relative to the client directory.
    pub assets_dir: String,
    /// Keys this crate does not know about, passed through to templates.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Named color roles, exposed to templates and as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub brand: String,
    #[serde(rename = "bg")]
    pub background: String,
    pub panel: String,
    pub text: String,
    pub muted: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: "#e11d48".to_string(),
            background: "#0c0c0d".to_string(),
            panel: "#141416".to_string(),
            text: "#f3f3f3".to_string(),
            muted: "#a1a1aa".to_string(),
        }
    }
}

impl Theme {
    /// Render the palette as CSS custom properties on `:root`.
    pub fn to_css(&self) -> String {
        format!(
            ":root{{--brand:{};--bg:{};--panel:{};--text:{};--muted:{}}}",
            self.brand, self.background, self.panel, self.text, self.muted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub heading: String,
    pub subheading: String,
    /// Client-relative image path.
    pub image: String,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            heading: "Créations sur-mesure".to_string(),
            subheading: "Galerie, tarifs et contact en un clic.".to_string(),
            image: "assets/hero.webp".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Socials {
    pub instagram: String,
    pub facebook: String,
    pub tiktok: String,
}

/// Legal notice data (publisher, site provider, host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legal {
    pub editor: LegalEditor,
    pub provider: LegalProvider,
    pub host: LegalHost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalEditor {
    pub entity: String,
    pub representative: String,
    pub status: String,
    pub siret: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalProvider {
    pub entity: String,
    pub siret: String,
    pub email: String,
}

impl Default for LegalProvider {
    fn default() -> Self {
        Self {
            entity: "Les Sites de David – David Bairet".to_string(),
            siret: String::new(),
            email: "contact@lessitesdedavid.fr".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalHost {
    pub provider: String,
    pub company: String,
    pub address: String,
    pub url: String,
}

impl Default for LegalHost {
    fn default() -> Self {
        Self {
            provider: "GitHub Pages".to_string(),
            company: "GitHub, Inc.".to_string(),
            address: "88 Colin P Kelly Jr St, San Francisco, CA 94107, USA".to_string(),
            url: "https://pages.github.com/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub keywords: Vec<String>,
    pub og_image: String,
    pub geo: Geo,
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            keywords: ["tatouage", "fineline", "dotwork", "réalisme"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            og_image: "assets/og.jpg".to_string(),
            geo: Geo::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub lng: f64,
}

/// Toggles for optional page sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    pub styles: bool,
    pub artists: bool,
    pub gallery: bool,
    pub contact: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            styles: true,
            artists: true,
            gallery: true,
            contact: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleEntry {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub name: String,
    pub specialties: String,
    pub image: String,
    pub profile: String,
}

/// The three pages every client gets unless it declares its own list.
pub fn default_pages() -> Vec<PageSpec> {
    vec![
        PageSpec::new("index", "Accueil"),
        PageSpec::new("contact", "Contact"),
        PageSpec::new("mentions", "Mentions légales"),
    ]
}

fn default_styles() -> Vec<StyleEntry> {
    [
        ("Fineline", "Lignes délicates, minimalisme élégant."),
        ("Blackwork", "Noirs profonds, contrastes puissants."),
        ("Réalisme", "Détails précis, effets photographiques."),
        ("Neo-trad", "Couleurs vives, motifs iconiques."),
    ]
    .iter()
    .map(|(name, desc)| StyleEntry {
        name: name.to_string(),
        desc: desc.to_string(),
    })
    .collect()
}

fn default_artists() -> Vec<Artist> {
    vec![
        Artist {
            name: "Alex".to_string(),
            specialties: "Fineline • Blackwork".to_string(),
            image: "assets/img/artist-alex.jpg".to_string(),
            profile: "artist.html".to_string(),
        },
        Artist {
            name: "Maya".to_string(),
            specialties: "Neo-trad • Couleur".to_string(),
            image: "assets/img/artist-maya.jpg".to_string(),
            profile: "artist.html".to_string(),
        },
    ]
}

fn default_gallery() -> Vec<String> {
    (1..=3).map(|n| format!("assets/img/tattoo{n}.jpg")).collect()
}

impl ClientConfig {
    /// Stock configuration for a client.
    ///
    /// `display` is the human name the identity fields derive from (title,
    /// brand, description, legal entity). When it is blank the slug is used
    /// instead.
    pub fn stock(slug: &str, display: &str) -> Self {
        let display = collapse_whitespace(display);
        let (title, brand, name) = if display.is_empty() {
            (
                format!("{slug} – Site vitrine"),
                display_name(slug),
                slug.to_string(),
            )
        } else {
            (display.clone(), display.clone(), display)
        };
        let email = format!("contact@{slug}.fr");

        Self {
            build_enabled: true,
            listed: true,
            slug: slug.to_string(),
            title,
            brand,
            description: format!("Présentation de {name}"),
            lang: "fr".to_string(),
            theme: Theme::default(),
            hero: Hero::default(),
            contact: Contact {
                email: email.clone(),
                phone: "+33 6 00 00 00 00".to_string(),
                city: String::new(),
            },
            socials: Socials::default(),
            legal: Legal {
                editor: LegalEditor {
                    entity: name,
                    representative: String::new(),
                    status: "Entrepreneur individuel (Tatouage)".to_string(),
                    siret: String::new(),
                    email,
                },
                provider: LegalProvider::default(),
                host: LegalHost::default(),
            },
            seo: Seo::default(),
            sections: Sections::default(),
            styles: default_styles(),
            artists: default_artists(),
            gallery: default_gallery(),
            pages: default_pages(),
            assets_dir: "assets".to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_slug(&self.slug) {
            return Err(ConfigError::Validation(format!(
                "slug '{}' is not normalized (expected '{}')",
                self.slug,
                slugify(&self.slug)
            )));
        }
        for page in &self.pages {
            if !is_safe_relative(page.name()) {
                return Err(ConfigError::Validation(format!(
                    "pages: invalid page path '{}'",
                    page.path
                )));
            }
        }
        if !is_safe_relative(&self.assets_dir) {
            return Err(ConfigError::Validation(format!(
                "assetsDir: invalid directory '{}'",
                self.assets_dir
            )));
        }
        Ok(())
    }
}

/// A non-empty relative path that stays inside its parent directory.
fn is_safe_relative(path: &str) -> bool {
    let p = Path::new(path);
    !path.is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Recursively merge `overlay` on top of `base`.
///
/// - Objects are merged key-by-key (overlay keys override base keys).
/// - `null` in the overlay leaves the base value untouched.
/// - Any other overlay value replaces the base value entirely.
/// - Keys in base that are not in overlay are preserved, in their position.
pub fn merge_json(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_val = slot.take();
                        *slot = merge_json(base_val, overlay_val);
                    }
                    None if overlay_val.is_null() => {}
                    None => {
                        base_map.insert(key, overlay_val);
                    }
                }
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Load `site.json` from a client directory as a raw JSON value.
///
/// Returns `Ok(None)` if the directory has no `site.json`.
/// Returns `Err` if the file exists but is not valid JSON.
pub fn load_raw_config(dir: &Path) -> Result<Option<Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a stock configuration, then deserialize,
/// normalize and validate the result.
pub fn resolve_config(
    stock: &ClientConfig,
    overlay: Option<Value>,
) -> Result<ClientConfig, ConfigError> {
    let base = serde_json::to_value(stock)?;
    let merged = match overlay {
        Some(ov) => merge_json(base, ov),
        None => base,
    };
    let mut config: ClientConfig = serde_json::from_value(merged)?;
    if config.pages.is_empty() {
        config.pages = default_pages();
    }
    for page in config.pages.iter_mut().filter(|p| p.title.is_empty()) {
        page.title = page.path.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Complete a partial client configuration.
///
/// The slug defaults to the normalized `raw_name`. The identity fields derive
/// from the partial's own `title` when it has one, else from `raw_name`.
pub fn merge_client_config(
    partial: Option<Value>,
    raw_name: &str,
) -> Result<ClientConfig, ConfigError> {
    let display = partial
        .as_ref()
        .and_then(|p| p.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(raw_name)
        .to_string();
    let stock = ClientConfig::stock(&slugify(raw_name), &display);
    resolve_config(&stock, partial)
}

/// Pretty-printed stock `site.json` for a client name.
///
/// Used by the `defaults` CLI command.
pub fn stock_site_json(raw_name: &str) -> Result<String, ConfigError> {
    let config = merge_client_config(None, raw_name)?;
    Ok(serde_json::to_string_pretty(&config)?)
}
