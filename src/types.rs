//! Shared types used across configuration, rendering and the sitemap.

use serde::{Deserialize, Serialize};

/// A page declared in a client's `site.json`.
///
/// `path` is the logical page name (`index`, `contact`, `mentions`). It also
/// selects the template and names the output file: `index` becomes
/// `clients/<slug>/index.html`, `contact` becomes `clients/<slug>/contact.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub path: String,
    /// Empty when the configuration omits it; completed configurations use
    /// the path instead.
    #[serde(default)]
    pub title: String,
}

impl PageSpec {
    pub fn new(path: &str, title: &str) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
        }
    }

    /// Logical page name with any `.html`/`.htm` suffix removed.
    pub fn name(&self) -> &str {
        let path = self.path.trim_matches('/');
        for suffix in [".html", ".htm", ".HTML", ".HTM"] {
            if let Some(stripped) = path.strip_suffix(suffix) {
                return stripped;
            }
        }
        path
    }

    /// Output file path relative to the client's output directory.
    pub fn output_file(&self) -> String {
        format!("{}.html", self.name())
    }
}
