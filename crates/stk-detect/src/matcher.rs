//! Matching of dependency sets and file listings against signature
//! tables.
//!
//! Every public matcher returns a deduplicated list in first-seen order,
//! or the single sentinel element when nothing matched.

use std::collections::BTreeSet;

use stk_core::NA;
use stk_core::repo::ContentEntry;

use crate::tables::{DetectionTables, LICENSE_NAMES, SignatureTable};

impl SignatureTable {
    /// Match a dependency set by lowercase substring containment.
    ///
    /// Returns the mapped labels in first-seen order, or `["N/A"]` when
    /// no dependency contains any keyword.
    #[must_use]
    pub fn match_dependencies(&self, dependencies: &BTreeSet<String>) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_dependency_matches(dependencies, &mut found);
        finish(found)
    }

    /// Match directory entries by exact lowercase filename.
    ///
    /// Returns the mapped labels in first-seen order, or `["N/A"]` when
    /// no entry name equals any keyword.
    #[must_use]
    pub fn match_filenames(&self, entries: &[ContentEntry]) -> Vec<String> {
        let mut found = Vec::new();
        for entry in entries {
            let name = entry.name.to_lowercase();
            for (keyword, label) in self.iter() {
                if name == keyword {
                    push_unique(&mut found, label);
                }
            }
        }
        finish(found)
    }

    fn collect_dependency_matches(
        &self,
        dependencies: &BTreeSet<String>,
        found: &mut Vec<String>,
    ) {
        for dependency in dependencies {
            let dependency = dependency.to_lowercase();
            for (keyword, label) in self.iter() {
                if dependency.contains(keyword) {
                    push_unique(found, label);
                }
            }
        }
    }

    fn collect_prefix_matches<'a>(
        &self,
        names: impl Iterator<Item = &'a str>,
        found: &mut Vec<String>,
    ) {
        for name in names {
            let name = name.to_lowercase();
            for (prefix, label) in self.iter() {
                if name.starts_with(prefix) {
                    push_unique(found, label);
                }
            }
        }
    }
}

/// The top-level `test`/`tests` directory entry, if the listing has one.
#[must_use]
pub fn test_directory(top_level: &[ContentEntry]) -> Option<&ContentEntry> {
    top_level.iter().find(|entry| {
        entry.is_dir() && matches!(entry.name.to_lowercase().as_str(), "test" | "tests")
    })
}

/// Testing detection across all three signal sources: dependency names,
/// test-runner config files inside the recursively-listed test folder,
/// and the presence of the folder itself (the `Test Folder` label).
#[must_use]
pub fn detect_testing(
    tables: &DetectionTables,
    dependencies: &BTreeSet<String>,
    top_level: &[ContentEntry],
    test_tree: &[ContentEntry],
) -> Vec<String> {
    let mut found = Vec::new();
    tables
        .testing
        .collect_dependency_matches(dependencies, &mut found);
    tables
        .test_config_prefixes
        .collect_prefix_matches(test_tree.iter().map(|entry| entry.name.as_str()), &mut found);
    if test_directory(top_level).is_some() {
        push_unique(&mut found, "Test Folder");
    }
    finish(found)
}

/// Heuristic license scan of README text. First hit in table order wins,
/// regardless of position in the text.
#[must_use]
pub fn readme_license(readme: &str) -> Option<&'static str> {
    let lower = readme.to_lowercase();
    LICENSE_NAMES
        .into_iter()
        .find(|name| lower.contains(&name.to_lowercase()))
}

fn push_unique(found: &mut Vec<String>, label: &str) {
    if !found.iter().any(|existing| existing == label) {
        found.push(label.to_string());
    }
}

fn finish(found: Vec<String>) -> Vec<String> {
    if found.is_empty() {
        vec![NA.to_string()]
    } else {
        found
    }
}
