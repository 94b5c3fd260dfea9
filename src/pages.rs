//! Pages the build writes at the output root.
//!
//! - `index.html`: the hub. Redirects to the first built client and lists
//!   every publicly listed one. With no client at all, a placeholder page.
//! - `404.html`: always written, links back to the base path.
//!
//! The hub sits at the output root, so its links are relative. The 404 page
//! can be served for any URL and links with the absolute base path instead.

use crate::config::ClientConfig;
use maud::{DOCTYPE, Markup, html};

const HUB_CSS: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#0c0c0d;\
color:#f3f3f3}main{max-width:40rem;margin:0 auto;padding:3rem 1.5rem}a{color:#e11d48}\
li{margin:.5rem 0}";

fn base_document(title: &str, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="robots" content="noindex";
                title { (title) }
                (head_extra)
                style { (HUB_CSS) }
            }
            body {
                main { (content) }
            }
        }
    }
}

fn client_href(slug: &str) -> String {
    format!("clients/{slug}/")
}

/// Hub page for the built clients, in build order.
///
/// Falls back to [`no_clients_page`] when nothing was built.
pub fn hub_page(built: &[&ClientConfig]) -> String {
    let Some(first) = built.first() else {
        return no_clients_page();
    };
    let target = client_href(&first.slug);
    let listed: Vec<&&ClientConfig> = built.iter().filter(|c| c.listed).collect();

    let head = html! {
        meta http-equiv="refresh" content={ "0; url=" (target) };
        link rel="canonical" href=(target);
    };
    let content = html! {
        h1 { "Sites vitrines" }
        p { "Redirection vers " a href=(target) { (first.title) } "…" }
        @if !listed.is_empty() {
            ul.clients {
                @for client in &listed {
                    li { a href=(client_href(&client.slug)) { (client.title) } }
                }
            }
        }
    };
    base_document("Sites vitrines", head, content).into_string()
}

/// Placeholder written as `index.html` when no client was built.
pub fn no_clients_page() -> String {
    let content = html! {
        h1 { "Aucun site client" }
        p { "Aucun client n'a été généré. Ajoutez-en un avec "
            code { "vitrine add-client <nom>" } "." }
    };
    base_document("Sites vitrines", html! {}, content).into_string()
}

/// `404.html`, linking back to the base path.
pub fn not_found_page(base_path: &str) -> String {
    let content = html! {
        h1 { "Page introuvable" }
        p { "Cette page n'existe pas ou a été déplacée." }
        p { a href=(base_path) { "Retour à l'accueil" } }
    };
    base_document("Page introuvable", html! {}, content).into_string()
}
