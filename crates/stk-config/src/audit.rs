//! Audit run configuration.

use serde::{Deserialize, Serialize};

/// Default pause between repositories.
const fn default_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Fixed pause between repositories, in milliseconds. A throttle to
    /// stay under upstream rate limits, not a scheduling guarantee.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Default chapter (university) label when the flag is omitted.
    #[serde(default)]
    pub chapter: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            chapter: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AuditConfig::default();
        assert_eq!(config.delay_ms, 1000);
        assert!(config.chapter.is_empty());
    }
}
