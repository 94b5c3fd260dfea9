//! `sitemap.xml` generation.
//!
//! Every listed client contributes its three well-known pages:
//!
//! ```text
//! <site_url>clients/<slug>/
//! <site_url>clients/<slug>/contact.html
//! <site_url>clients/<slug>/mentions.html
//! ```

use crate::config::ClientConfig;
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Pages every client is expected to have, relative to its directory.
pub const WELL_KNOWN_PAGES: &[&str] = &["", "contact.html", "mentions.html"];

/// Sitemap locations for the given clients, in the order given.
///
/// Clients with `listed: false` are still built and reachable by their URL,
/// but they are left out here the same way they are left out of the hub.
/// Disabled clients (`build: false`) never reach this function.
pub fn sitemap_urls(site_url: &str, clients: &[&ClientConfig]) -> Vec<String> {
    let site_url = site_url.trim_end_matches('/');
    clients
        .iter()
        .filter(|c| c.listed)
        .flat_map(|c| {
            WELL_KNOWN_PAGES
                .iter()
                .map(move |page| format!("{site_url}/clients/{}/{page}", c.slug))
        })
        .collect()
}

/// Full `sitemap.xml` document.
pub fn sitemap_xml(site_url: &str, clients: &[&ClientConfig]) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");
    for loc in sitemap_urls(site_url, clients) {
        xml.push_str("  <url><loc>");
        xml.push_str(&escape_xml(&loc));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::merge_client_config;

    fn client(name: &str) -> ClientConfig {
        merge_client_config(None, name).unwrap()
    }

    #[test]
    fn two_clients_give_six_urls() {
        let a = client("black lotus");
        let b = client("ink co");
        let xml = sitemap_xml("https://example.com/", &[&a, &b]);
        assert_eq!(xml.matches("<url>").count(), 6);
        assert!(xml.contains("<loc>https://example.com/clients/black-lotus/</loc>"));
        assert!(xml.contains("<loc>https://example.com/clients/ink-co/mentions.html</loc>"));
    }

    #[test]
    fn urls_follow_client_order() {
        let a = client("b");
        let b = client("a");
        let urls = sitemap_urls("https://x.org/v/", &[&a, &b]);
        assert_eq!(urls[0], "https://x.org/v/clients/b/");
        assert_eq!(urls[3], "https://x.org/v/clients/a/");
    }

    #[test]
    fn unlisted_clients_are_omitted() {
        let a = client("black lotus");
        let mut b = client("ink co");
        b.listed = false;
        let urls = sitemap_urls("https://example.com/", &[&a, &b]);
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| !u.contains(&b.slug)));
    }

    #[test]
    fn empty_sitemap_is_well_formed() {
        let xml = sitemap_xml("https://example.com/", &[]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn locations_are_escaped() {
        assert_eq!(escape_xml("a&b"), "a&amp;b");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
