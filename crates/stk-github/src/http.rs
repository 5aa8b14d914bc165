//! Shared HTTP response helpers for the GitHub client.
//!
//! Centralizes status-code checks (404 → [`GithubError::NotFound`],
//! 429/403 rate limiting with `Retry-After` parsing, other non-success →
//! [`GithubError::Api`]) so the endpoint modules stay focused on request
//! construction and response mapping.

use crate::error::GithubError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **404 Not Found** → [`GithubError::NotFound`]. Callers probing for
///   optional files treat this as "absent", not as a failure.
/// - **429 Too Many Requests**, or **403** with an exhausted quota
///   header → [`GithubError::RateLimited`] with `Retry-After` header
///   parsing (falls back to 60 s if absent or unparseable).
/// - **Other non-success status** → [`GithubError::Api`] with status code
///   and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    if resp.status() == 404 {
        return Err(GithubError::NotFound);
    }
    if resp.status() == 429 || (resp.status() == 403 && rate_limit_exhausted(&resp)) {
        let retry_after = parse_retry_after(&resp);
        return Err(GithubError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(GithubError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// GitHub signals primary rate limiting as a 403 with an exhausted quota
/// header rather than a 429.
fn rate_limit_exhausted(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
