//! Spreadsheet sink configuration.

use serde::{Deserialize, Serialize};

/// Destination for published audit rows.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// POST endpoint of the spreadsheet API.
    /// `STOCKTAKE_SHEETS__ENDPOINT` in the environment.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token, required only for private sheets.
    /// `STOCKTAKE_SHEETS__TOKEN` in the environment.
    #[serde(default)]
    pub token: String,
}

impl SheetsConfig {
    /// Whether an endpoint has been supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }

    /// Bearer token as an `Option`, `None` when blank.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}
