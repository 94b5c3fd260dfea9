//! Build environment capture and public URL derivation.
//!
//! Everything the build reads from the process environment is captured once
//! into a [`BuildEnv`] at startup and passed down explicitly. Nothing else in
//! the crate calls `std::env::var`, which keeps base path and sitemap URL
//! computation pure and testable.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PUBLIC_URL` | Explicit public URL or path prefix (highest priority) |
//! | `GITHUB_ACTIONS`, `CI` | CI detection |
//! | `GITHUB_REPOSITORY` | `owner/name`, used for the project-pages prefix and host |

use url::Url;

/// Host used in the sitemap when nothing better is known.
pub const PLACEHOLDER_ORIGIN: &str = "https://example.com";

/// Immutable snapshot of the environment inputs of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildEnv {
    pub public_url: Option<String>,
    pub ci: bool,
    pub repository: Option<String>,
}

impl BuildEnv {
    /// Capture from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Capture through an arbitrary lookup function. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let ci = ["GITHUB_ACTIONS", "CI"]
            .iter()
            .filter_map(|key| get(*key))
            .any(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "0"));
        Self {
            public_url: get("PUBLIC_URL"),
            ci,
            repository: get("GITHUB_REPOSITORY"),
        }
    }

    fn repository_parts(&self) -> Option<(&str, &str)> {
        let (owner, name) = self.repository.as_deref()?.split_once('/')?;
        let name = name.trim_matches('/');
        (!owner.is_empty() && !name.is_empty()).then_some((owner, name))
    }

    /// URL path prefix every generated link is rooted at.
    ///
    /// 1. `PUBLIC_URL`, always ending with `/`
    /// 2. under CI with a repository: `/<name>/`
    /// 3. `/`
    pub fn base_path(&self) -> String {
        if let Some(public) = &self.public_url {
            return with_trailing_slash(public);
        }
        match self.repository_parts() {
            Some((_, name)) if self.ci => format!("/{name}/"),
            _ => "/".to_string(),
        }
    }

    /// Absolute URL of the output root, used for sitemap entries.
    ///
    /// An absolute `PUBLIC_URL` is used directly. Otherwise the GitHub Pages
    /// host of the repository owner (or [`PLACEHOLDER_ORIGIN`]) is joined with
    /// [`base_path`](Self::base_path).
    pub fn site_url(&self) -> String {
        let absolute = self
            .public_url
            .as_deref()
            .and_then(|public| Url::parse(public).ok())
            .filter(Url::has_host);
        if let Some(url) = absolute {
            return with_trailing_slash(url.as_str());
        }
        let origin = match self.repository_parts() {
            Some((owner, _)) => format!("https://{}.github.io", owner.to_ascii_lowercase()),
            None => PLACEHOLDER_ORIGIN.to_string(),
        };
        let base = self.base_path();
        let base = base.trim_start_matches('/');
        format!("{origin}/{base}")
    }
}

fn with_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> BuildEnv {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BuildEnv::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn local_default_is_root() {
        assert_eq!(env(&[]).base_path(), "/");
    }

    #[test]
    fn override_beats_ci_and_repository() {
        let e = env(&[
            ("PUBLIC_URL", "/custom"),
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_REPOSITORY", "owner/vitrines"),
        ]);
        assert_eq!(e.base_path(), "/custom/");
    }

    #[test]
    fn override_keeps_existing_trailing_slash() {
        let e = env(&[("PUBLIC_URL", "https://owner.github.io/vitrines/")]);
        assert_eq!(e.base_path(), "https://owner.github.io/vitrines/");
    }

    #[test]
    fn ci_with_repository_uses_repo_name() {
        let e = env(&[("GITHUB_ACTIONS", "true"), ("GITHUB_REPOSITORY", "owner/vitrines")]);
        assert_eq!(e.base_path(), "/vitrines/");
    }

    #[test]
    fn generic_ci_flag_is_recognized() {
        let e = env(&[("CI", "1"), ("GITHUB_REPOSITORY", "owner/vitrines")]);
        assert!(e.ci);
        assert_eq!(e.base_path(), "/vitrines/");
    }

    #[test]
    fn ci_without_repository_is_root() {
        assert_eq!(env(&[("GITHUB_ACTIONS", "true")]).base_path(), "/");
    }

    #[test]
    fn repository_outside_ci_is_ignored() {
        let e = env(&[("GITHUB_REPOSITORY", "owner/vitrines")]);
        assert_eq!(e.base_path(), "/");
    }

    #[test]
    fn false_and_blank_values_do_not_count() {
        let e = env(&[("CI", "false"), ("PUBLIC_URL", "  "), ("GITHUB_REPOSITORY", "owner/x")]);
        assert!(!e.ci);
        assert_eq!(e.public_url, None);
        assert_eq!(e.base_path(), "/");
    }

    #[test]
    fn malformed_repository_falls_through() {
        let e = env(&[("GITHUB_ACTIONS", "true"), ("GITHUB_REPOSITORY", "no-slash")]);
        assert_eq!(e.base_path(), "/");
    }

    #[test]
    fn site_url_from_absolute_public_url() {
        let e = env(&[("PUBLIC_URL", "https://studios.example.org/v")]);
        assert_eq!(e.site_url(), "https://studios.example.org/v/");
    }

    #[test]
    fn site_url_from_repository_under_ci() {
        let e = env(&[("GITHUB_ACTIONS", "true"), ("GITHUB_REPOSITORY", "DavidB/vitrines")]);
        assert_eq!(e.site_url(), "https://davidb.github.io/vitrines/");
    }

    #[test]
    fn site_url_relative_override_uses_placeholder_host() {
        let e = env(&[("PUBLIC_URL", "/sites/")]);
        assert_eq!(e.site_url(), "https://example.com/sites/");
    }

    #[test]
    fn site_url_placeholder_locally() {
        assert_eq!(env(&[]).site_url(), "https://example.com/");
    }
}
