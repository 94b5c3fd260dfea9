//! HTML minification.
//!
//! Every HTML file the build writes goes through [`minify_html`]. The
//! minifier is best-effort: if it panics or produces something that is not
//! UTF-8, the original markup is written instead and a warning is logged.

use log::warn;
use std::panic::{self, AssertUnwindSafe};

fn minify_cfg() -> minify_html::Cfg {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg
}

/// Minify an HTML document, falling back to the input on failure.
pub fn minify_html(html: &str) -> String {
    let cfg = minify_cfg();
    minify_with(html, |bytes| minify_html::minify(bytes, &cfg))
}

/// Run `minifier` over `html`, keeping `html` when it panics or returns
/// something that is not UTF-8.
fn minify_with<F>(html: &str, minifier: F) -> String
where
    F: FnOnce(&[u8]) -> Vec<u8>,
{
    match try_minify(html, minifier) {
        Ok(minified) => minified,
        Err(reason) => {
            warn!("HTML minification failed ({reason}), keeping unminified output");
            html.to_string()
        }
    }
}

fn try_minify<F>(html: &str, minifier: F) -> Result<String, String>
where
    F: FnOnce(&[u8]) -> Vec<u8>,
{
    let bytes = panic::catch_unwind(AssertUnwindSafe(|| minifier(html.as_bytes())))
        .map_err(|_| "minifier panicked".to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
