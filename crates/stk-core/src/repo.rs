//! Repository snapshot and contents-listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized repository metadata, fetched once per repository per run.
///
/// Only the fields the audit reads; everything else the API returns is
/// dropped at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    /// Repository name (e.g., `habit-tracker`).
    pub name: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-push timestamp.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Browser URL of the repository.
    pub html_url: String,
    /// Homepage URL, if the owner set one.
    pub homepage: Option<String>,
    /// Whether the repository is private.
    pub private: bool,
    /// SPDX identifier, falling back to the license display name.
    pub license: Option<String>,
    /// Default branch name (e.g., `main`).
    pub default_branch: String,
    /// URL of the language-breakdown resource.
    pub languages_url: String,
}

/// Kind of a contents-listing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    Other,
}

impl<'de> Deserialize<'de> for EntryKind {
    /// The API grows node types over time; anything unrecognized maps to
    /// [`EntryKind::Other`] instead of failing the whole listing.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(match kind.as_str() {
            "file" => Self::File,
            "dir" => Self::Dir,
            "symlink" => Self::Symlink,
            "submodule" => Self::Submodule,
            _ => Self::Other,
        })
    }
}

/// One file-or-directory node from a repository contents listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw content for file nodes, when the listing inlines it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Declared content encoding (`base64` in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl ContentEntry {
    /// Whether this entry is a directory node.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}
