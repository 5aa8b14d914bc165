//! Open issue / pull request counts and label / tag listings.

use crate::{GithubClient, error::GithubError, http::check_response};

#[derive(serde::Deserialize)]
struct IssueItem {
    /// The issues endpoint conflates issues and pull requests; this
    /// marker is present exactly on the pull-request entries.
    pull_request: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct NamedItem {
    name: String,
}

impl GithubClient {
    /// Count open issues, excluding the pull requests the issues
    /// endpoint mixes in. Reads a single page of up to 100 items.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails or the response
    /// cannot be parsed.
    pub async fn count_open_issues(&self, owner: &str, repo: &str) -> Result<usize, GithubError> {
        let items: Vec<IssueItem> = self
            .fetch_json(owner, repo, "issues?state=open&per_page=100")
            .await?;
        Ok(items
            .iter()
            .filter(|item| item.pull_request.is_none())
            .count())
    }

    /// Count open pull requests. Reads a single page of up to 100 items.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails or the response
    /// cannot be parsed.
    pub async fn count_open_pulls(&self, owner: &str, repo: &str) -> Result<usize, GithubError> {
        let items: Vec<serde_json::Value> = self
            .fetch_json(owner, repo, "pulls?state=open&per_page=100")
            .await?;
        Ok(items.len())
    }

    /// Label names in API order.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails or the response
    /// cannot be parsed.
    pub async fn label_names(&self, owner: &str, repo: &str) -> Result<Vec<String>, GithubError> {
        let items: Vec<NamedItem> = self.fetch_json(owner, repo, "labels?per_page=100").await?;
        Ok(items.into_iter().map(|item| item.name).collect())
    }

    /// Tag names in API order.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails or the response
    /// cannot be parsed.
    pub async fn tag_names(&self, owner: &str, repo: &str) -> Result<Vec<String>, GithubError> {
        let items: Vec<NamedItem> = self.fetch_json(owner, repo, "tags?per_page=100").await?;
        Ok(items.into_iter().map(|item| item.name).collect())
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        tail: &str,
    ) -> Result<T, GithubError> {
        let path = format!(
            "/repos/{}/{}/{tail}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        Ok(resp.json().await?)
    }
}
