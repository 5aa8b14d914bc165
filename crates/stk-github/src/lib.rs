//! # stk-github
//!
//! Read-only GitHub REST client for the audit pipeline:
//! - repository enumeration for a user or organization (paginated)
//! - the per-repository metadata snapshot ([`stk_core::repo::RepoDescriptor`])
//! - well-known file probes and contents listings
//! - open issue / pull request counts, label and tag listings
//! - language breakdown
//! - worklist-based recursive tree listing
//!
//! One [`GithubClient`] is built per process and shared read-only for the
//! duration of a run. Every request carries the GitHub JSON media type
//! and, when configured, a bearer token.

pub mod contents;
pub mod issues;
pub mod repos;
pub mod tree;

mod error;
mod http;

pub use error::GithubError;

/// Public GitHub API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Page size used for repository enumeration.
pub const REPOS_PAGE_SIZE: u32 = 100;

/// HTTP client for the GitHub read API.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a different API root (GitHub Enterprise,
    /// or a local server in tests).
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("stocktake/", env!("CARGO_PKG_VERSION")))
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Build a GET request for a path relative to the API root.
    pub(crate) fn get(&self, path_and_query: &str) -> reqwest::RequestBuilder {
        self.get_absolute(&format!("{}{path_and_query}", self.base_url))
    }

    /// Build a GET request for an absolute URL the API handed back (e.g.
    /// a descriptor's `languages_url`).
    pub(crate) fn get_absolute(&self, url: &str) -> reqwest::RequestBuilder {
        tracing::debug!(url, "GET");
        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = GithubClient::with_base_url(None, "http://127.0.0.1:9/");
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn blank_token_is_dropped() {
        let client = GithubClient::with_base_url(Some("  ".to_string()), DEFAULT_BASE_URL);
        assert!(client.token.is_none());
    }
}
