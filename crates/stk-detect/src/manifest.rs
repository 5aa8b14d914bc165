//! Manifest parsing: dependency-name extraction from the two manifest
//! formats the audit understands.
//!
//! Parsing never fails the pipeline: a malformed manifest contributes an
//! empty set.

use std::collections::BTreeSet;

/// The manifest dialects the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// Line-oriented `requirements.txt`: one dependency per line, `#`
    /// comments, `==`/`>=`/`=` version pins.
    RequirementsTxt,
    /// `package.json`: runtime and development dependency sections.
    PackageJson,
}

/// Extract dependency names from a decoded manifest body.
#[must_use]
pub fn parse_manifest(kind: ManifestKind, raw: &str) -> BTreeSet<String> {
    match kind {
        ManifestKind::RequirementsTxt => parse_requirements(raw),
        ManifestKind::PackageJson => parse_package_json(raw),
    }
}

fn parse_requirements(raw: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cut = ["==", ">=", "="]
            .iter()
            .filter_map(|pin| line.find(pin))
            .min()
            .unwrap_or(line.len());
        let name = line[..cut].trim();
        if !name.is_empty() {
            names.insert(name.to_string());
        }
    }
    names
}

fn parse_package_json(raw: &str) -> BTreeSet<String> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "unparseable package.json, contributing no dependencies");
            return BTreeSet::new();
        }
    };

    let mut names = BTreeSet::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = value.get(section).and_then(|v| v.as_object()) {
            names.extend(deps.keys().cloned());
        }
    }
    names
}
