//! Slug normalization and display names.
//!
//! Every client is identified by a slug that doubles as its directory name
//! under `clients/` and as its path segment in the output tree. Slugs are
//! derived from whatever the user typed:
//!
//! - `"Ink & Co"` → `ink-co`
//! - `"Café Rêve!!"` → `cafe-reve`
//! - `"  --Black   Lotus--  "` → `black-lotus`
//!
//! The reverse direction ([`display_name`]) turns hyphens back into spaces,
//! which is what a client gets as its default title when its `site.json`
//! does not provide one.

/// Normalize a raw name into a slug.
///
/// Diacritics and other non-ASCII characters are transliterated, the result
/// is lowercased, and every run of characters outside `[a-z0-9]` collapses
/// into a single `-`. Leading and trailing hyphens are dropped, so a name
/// made only of punctuation yields an empty string.
pub fn slugify(raw: &str) -> String {
    let ascii = deunicode::deunicode(raw).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Whether a string is already in normalized slug form.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty() && slugify(s) == s
}

/// Human-readable name for a slug: hyphens become spaces.
pub fn display_name(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersand_and_spaces_collapse() {
        assert_eq!(slugify("Ink & Co"), "ink-co");
    }

    #[test]
    fn diacritics_are_stripped() {
        assert_eq!(slugify("Café Rêve!!"), "cafe-reve");
    }

    #[test]
    fn no_leading_or_trailing_hyphen() {
        assert_eq!(slugify("  --Black   Lotus--  "), "black-lotus");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(slugify("Studio 13"), "studio-13");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert!(!is_slug(""));
    }

    #[test]
    fn already_normalized() {
        assert!(is_slug("ink-co"));
        assert!(!is_slug("Ink-Co"));
        assert!(!is_slug("ink--co"));
    }

    #[test]
    fn slugify_is_idempotent() {
        let once = slugify("Éclat d'Encre — Lyon");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn display_name_turns_hyphens_into_spaces() {
        assert_eq!(display_name("black-lotus"), "black lotus");
    }

    #[test]
    fn collapse_whitespace_trims() {
        assert_eq!(collapse_whitespace("  Ink \t &   Co "), "Ink & Co");
    }
}
