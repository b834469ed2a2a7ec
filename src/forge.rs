// mirror-rewrite: Git mirror URL rewriting for CI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository listing from a Gitea/Forgejo-style hosting API.
//!
//! ```text
//! RepoLister::new(server, org)
//!   .token()
//!        |
//!        v
//!   pages()  GET /api/v1/orgs/{org}/repos?page=N&limit=50
//!     page 1 -> page 2 -> ... -> []  (end)
//!                 |
//!                 +-> non-2xx: Err, stream ends
//!        |
//!        v
//!   list_all()  pages concatenated in request order
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```

use crate::error::{MirrorError, MirrorResult, NetworkError};
use futures_util::{Stream, TryStreamExt, stream};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Deserializer};
use std::sync::OnceLock;
use tracing::debug;

/// Records requested per page.
pub const PAGE_SIZE: u32 = 50;

/// Global HTTP client - initialized once, reused across all requests.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("mirror-rewrite/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// A repository as returned by the hosting API.
///
/// Only the fields needed for rewriting are kept; the rest of the payload is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub clone_url: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub mirror: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Lists the repositories of one organization.
#[derive(Debug, Clone)]
pub struct RepoLister {
    client: Client,
    server: String,
    org: String,
    token: Option<String>,
}

impl RepoLister {
    /// Create a lister for `org` on `server` (e.g. `https://git.example.com`).
    #[must_use]
    pub fn new(server: impl Into<String>, org: impl Into<String>) -> Self {
        let server: String = server.into();
        Self {
            client: global_client().clone(),
            server: server.trim_end_matches('/').to_string(),
            org: org.into(),
            token: None,
        }
    }

    /// Authenticate with `Authorization: token <value>`. Empty tokens are ignored.
    #[must_use]
    pub fn token(mut self, token: Option<impl Into<String>>) -> Self {
        self.token = token.map(Into::into).filter(|t: &String| !t.is_empty());
        self
    }

    /// URL of one page of the organization's repository list.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/api/v1/orgs/{}/repos?page={page}&limit={PAGE_SIZE}",
            self.server, self.org
        )
    }

    /// Pages of repositories, requested one at a time starting at page 1.
    ///
    /// The stream ends at the first empty page, or right after yielding the
    /// first error. Dropping it stops further requests.
    pub fn pages(&self) -> impl Stream<Item = MirrorResult<Vec<Repository>>> + '_ {
        stream::try_unfold(1_u32, move |page| async move {
            let repos = self.fetch_page(page).await?;
            if repos.is_empty() {
                debug!(page, "empty page, listing complete");
                return Ok::<_, MirrorError>(None);
            }
            Ok(Some((repos, page + 1)))
        })
    }

    /// All repositories of the organization, pages concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` for the first failed request; repositories
    /// from earlier pages are discarded.
    pub async fn list_all(&self) -> MirrorResult<Vec<Repository>> {
        self.pages().try_concat().await
    }

    async fn fetch_page(&self, page: u32) -> MirrorResult<Vec<Repository>> {
        let url = self.page_url(page);
        debug!(%url, authenticated = self.token.is_some(), "fetching repository page");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(NetworkError::Reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url,
                body,
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(NetworkError::Reqwest)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            NetworkError::Decode {
                url,
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PAGE_SIZE, RepoLister, Repository};

    #[test]
    fn test_page_url() {
        let lister = RepoLister::new("https://git.example.com/", "acme");
        assert_eq!(
            lister.page_url(3),
            format!("https://git.example.com/api/v1/orgs/acme/repos?page=3&limit={PAGE_SIZE}")
        );
    }

    #[test]
    fn test_empty_token_is_unauthenticated() {
        let lister = RepoLister::new("https://x", "acme").token(Some(""));
        assert!(lister.token.is_none());
        let lister = RepoLister::new("https://x", "acme").token(Some("abc"));
        assert_eq!(lister.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_repository_mirror_flag_defaults() {
        let repos: Vec<Repository> = serde_json::from_str(
            r#"[
                {"full_name": "acme/a", "clone_url": "https://x/acme/a.git", "mirror": true, "id": 1},
                {"full_name": "acme/b", "clone_url": "https://x/acme/b.git"},
                {"full_name": "acme/c", "clone_url": "https://x/acme/c.git", "mirror": null}
            ]"#,
        )
        .unwrap();
        let flags: Vec<_> = repos.iter().map(|r| r.mirror).collect();
        assert_eq!(flags, [true, false, false]);
    }
}
