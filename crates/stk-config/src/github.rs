//! GitHub API access configuration.

use serde::{Deserialize, Serialize};

/// Credentials for the source-hosting read API.
///
/// Unauthenticated runs work but hit GitHub's anonymous rate limits
/// quickly; a token is strongly recommended for anything beyond a handful
/// of repositories.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token. `STOCKTAKE_GITHUB__TOKEN` in the
    /// environment.
    #[serde(default)]
    pub token: String,
}

impl GithubConfig {
    /// Whether a token has been supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Token as an `Option`, `None` when blank.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_unconfigured() {
        let config = GithubConfig::default();
        assert!(!config.is_configured());
        assert!(config.token().is_none());
    }

    #[test]
    fn whitespace_token_is_unconfigured() {
        let config = GithubConfig {
            token: "   ".to_string(),
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn token_is_trimmed() {
        let config = GithubConfig {
            token: " ghp_abc123 ".to_string(),
        };
        assert_eq!(config.token(), Some("ghp_abc123"));
    }
}
