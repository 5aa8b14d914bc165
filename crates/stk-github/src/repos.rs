//! Repository enumeration, the metadata snapshot, and the language
//! breakdown.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use stk_core::repo::RepoDescriptor;

use crate::{GithubClient, REPOS_PAGE_SIZE, error::GithubError, http::check_response};

#[derive(serde::Deserialize)]
struct RepoResponse {
    name: String,
    created_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
    html_url: String,
    homepage: Option<String>,
    private: bool,
    license: Option<LicenseInfo>,
    default_branch: Option<String>,
    languages_url: String,
}

#[derive(serde::Deserialize)]
struct LicenseInfo {
    spdx_id: Option<String>,
    name: Option<String>,
}

impl LicenseInfo {
    /// Machine-readable identifier first, display name second.
    fn resolve(self) -> Option<String> {
        self.spdx_id.filter(|id| !id.is_empty()).or(self.name)
    }
}

#[derive(serde::Deserialize)]
struct RepoName {
    name: String,
}

impl GithubClient {
    /// Fetch the metadata snapshot for one repository.
    ///
    /// Any failure here is a hard skip for the repository's audit: the
    /// caller must not build a partially-filled record from it.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails, the repository does
    /// not exist, or the response cannot be parsed.
    pub async fn get_repo(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoDescriptor, GithubError> {
        let path = format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        let data: RepoResponse = resp.json().await?;

        Ok(RepoDescriptor {
            name: data.name,
            created_at: data.created_at,
            pushed_at: data.pushed_at,
            html_url: data.html_url,
            homepage: data.homepage,
            private: data.private,
            license: data.license.and_then(LicenseInfo::resolve),
            default_branch: data.default_branch.unwrap_or_default(),
            languages_url: data.languages_url,
        })
    }

    /// Enumerate all repository names owned by a user or organization.
    ///
    /// Pages of [`REPOS_PAGE_SIZE`] starting at page 1, stopping on the
    /// first empty page. A failed page fetch stops the enumeration and
    /// returns what was accumulated so far: partial results, not an
    /// error. Order follows the upstream API.
    pub async fn list_all_repos(&self, owner: &str, is_org: bool) -> Vec<String> {
        let kind = if is_org { "orgs" } else { "users" };
        let owner = urlencoding::encode(owner);

        let mut names = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!("/{kind}/{owner}/repos?per_page={REPOS_PAGE_SIZE}&page={page}");
            let batch: Vec<RepoName> = match self.fetch_page(&path).await {
                Ok(batch) => batch,
                Err(error) => {
                    tracing::warn!(%error, page, "repository enumeration stopped early");
                    break;
                }
            };
            if batch.is_empty() {
                break;
            }
            names.extend(batch.into_iter().map(|repo| repo.name));
            page += 1;
        }
        names
    }

    async fn fetch_page(&self, path: &str) -> Result<Vec<RepoName>, GithubError> {
        let resp = check_response(self.get(path).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the language breakdown behind a descriptor's
    /// `languages_url`. Names come back in deterministic (alphabetical)
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails or the response
    /// cannot be parsed.
    pub async fn languages(
        &self,
        descriptor: &RepoDescriptor,
    ) -> Result<Vec<String>, GithubError> {
        let resp = check_response(self.get_absolute(&descriptor.languages_url).send().await?)
            .await?;
        let breakdown: BTreeMap<String, u64> = resp.json().await?;
        Ok(breakdown.into_keys().collect())
    }
}
