// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror selection and URL normalization.
//!
//! ```text
//! Repository { clone_url, mirror }
//!        |
//!   mirror == false --> skipped
//!        |
//!        v
//! strip_git_suffix(clone_url)
//!        |
//!        v
//! RewriteRule { old_url, new_url }
//!   config_key()     url.<new_url>.insteadOf
//!   include_block()  [url "<new_url>"]\n\tinsteadOf = <old_url>
//! ```

use crate::forge::Repository;

const GIT_SUFFIX: &str = ".git";

/// Remove one trailing literal `.git`, if present.
///
/// This is a plain suffix match; the URL is not parsed.
#[must_use]
pub fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(GIT_SUFFIX).unwrap_or(url)
}

/// A `url.<new_url>.insteadOf = <old_url>` rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub old_url: String,
    pub new_url: String,
}

impl RewriteRule {
    /// Rule for a mirror repository, `None` for anything else.
    ///
    /// Both sides are the normalized clone URL; the hosting API exposes no
    /// separate upstream URL for mirrors.
    #[must_use]
    pub fn for_repository(repo: &Repository) -> Option<Self> {
        if !repo.mirror {
            return None;
        }
        let url = strip_git_suffix(&repo.clone_url);
        Some(Self {
            old_url: url.to_string(),
            new_url: url.to_string(),
        })
    }

    /// Global config key holding this rule.
    #[must_use]
    pub fn config_key(&self) -> String {
        format!("url.{}.insteadOf", self.new_url)
    }

    /// Text block appended to the include file.
    #[must_use]
    pub fn include_block(&self) -> String {
        format!(
            "\n[url \"{}\"]\n\tinsteadOf = {}\n",
            self.new_url, self.old_url
        )
    }
}

/// Mirror repositories with their rules, in input order.
pub fn mirrors(repos: &[Repository]) -> impl Iterator<Item = (&Repository, RewriteRule)> {
    repos
        .iter()
        .filter_map(|repo| RewriteRule::for_repository(repo).map(|rule| (repo, rule)))
}

#[cfg(test)]
mod tests {
    use super::{RewriteRule, mirrors, strip_git_suffix};
    use crate::forge::Repository;

    fn repo(name: &str, url: &str, mirror: bool) -> Repository {
        Repository {
            full_name: name.to_string(),
            clone_url: url.to_string(),
            mirror,
        }
    }

    #[test]
    fn test_strip_git_suffix() {
        let cases = [
            ("https://git.example.com/acme/up.git", "https://git.example.com/acme/up"),
            ("https://git.example.com/acme/up", "https://git.example.com/acme/up"),
            ("https://git.example.com/acme/up.git.git", "https://git.example.com/acme/up.git"),
            ("https://git.example.com/acme/up.GIT", "https://git.example.com/acme/up.GIT"),
            ("https://git.example.com/acme/up.git/", "https://git.example.com/acme/up.git/"),
            (".git", ""),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(strip_git_suffix(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_rule_for_non_mirror_is_none() {
        assert!(RewriteRule::for_repository(&repo("acme/a", "https://x/acme/a.git", false)).is_none());
    }

    #[test]
    fn test_rule_maps_url_to_itself() {
        let rule =
            RewriteRule::for_repository(&repo("acme/up", "https://git.example.com/acme/up.git", true))
                .unwrap();
        assert_eq!(rule.old_url, "https://git.example.com/acme/up");
        assert_eq!(rule.new_url, rule.old_url);
        assert_eq!(rule.config_key(), "url.https://git.example.com/acme/up.insteadOf");
    }

    #[test]
    fn test_include_block() {
        let rule = RewriteRule {
            old_url: "https://git.example.com/acme/up".to_string(),
            new_url: "https://git.example.com/acme/up".to_string(),
        };
        assert_eq!(
            rule.include_block(),
            "\n[url \"https://git.example.com/acme/up\"]\n\tinsteadOf = https://git.example.com/acme/up\n"
        );
    }

    #[test]
    fn test_mirrors_keeps_order_and_skips_non_mirrors() {
        let repos = [
            repo("acme/b", "https://x/acme/b.git", true),
            repo("acme/plain", "https://x/acme/plain.git", false),
            repo("acme/a", "https://x/acme/a", true),
        ];
        let names: Vec<_> = mirrors(&repos).map(|(r, _)| r.full_name.as_str()).collect();
        assert_eq!(names, ["acme/b", "acme/a"]);
    }
}
