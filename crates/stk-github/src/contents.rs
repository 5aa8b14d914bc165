//! Well-known file probes and directory listings via the contents API.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use stk_core::repo::ContentEntry;

use crate::{GithubClient, error::GithubError, http::check_response};

/// The contents endpoint returns an array for directories and an object
/// for single files.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ContentsPayload {
    Listing(Vec<ContentEntry>),
    File(FileBody),
}

#[derive(serde::Deserialize)]
struct FileBody {
    content: Option<String>,
    encoding: Option<String>,
}

impl GithubClient {
    /// Fetch and decode the text of a single file.
    ///
    /// `Ok(None)` means the path does not exist, a normal outcome for
    /// optional files like `CONTRIBUTING.md`, distinct from a failed
    /// fetch. A directory at the path counts as present with empty text.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport/API failure or if the content
    /// cannot be decoded.
    pub async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, GithubError> {
        let resp = match self.fetch_contents(owner, repo, path).await {
            Ok(resp) => resp,
            Err(GithubError::NotFound) => return Ok(None),
            Err(error) => return Err(error),
        };

        match resp.json::<ContentsPayload>().await? {
            ContentsPayload::File(body) => Ok(Some(decode_body(body)?)),
            ContentsPayload::Listing(_) => Ok(Some(String::new())),
        }
    }

    /// List the entries of a directory. A missing path or a file at the
    /// path yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport/API failure or an
    /// unparseable response.
    pub async fn dir_entries(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, GithubError> {
        let resp = match self.fetch_contents(owner, repo, path).await {
            Ok(resp) => resp,
            Err(GithubError::NotFound) => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        match resp.json::<ContentsPayload>().await? {
            ContentsPayload::Listing(entries) => Ok(entries),
            ContentsPayload::File(_) => Ok(Vec::new()),
        }
    }

    async fn fetch_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<reqwest::Response, GithubError> {
        let mut url = format!(
            "/repos/{}/{}/contents",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        if !path.is_empty() {
            url.push('/');
            url.push_str(&encode_path(path));
        }
        check_response(self.get(&url).send().await?).await
    }
}

/// Percent-encode each path segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode a file payload. GitHub wraps file bodies in base64 with
/// embedded newlines; anything else is passed through raw.
fn decode_body(body: FileBody) -> Result<String, GithubError> {
    let Some(content) = body.content else {
        return Ok(String::new());
    };
    if body.encoding.as_deref() != Some("base64") {
        return Ok(content);
    }

    let compact: String = content.split_whitespace().collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| GithubError::Decode(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes).map_err(|e| GithubError::Decode(format!("non-UTF-8 content: {e}")))
}
