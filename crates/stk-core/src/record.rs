//! The fixed-schema audit row and its assembly.
//!
//! [`AuditRecord`] is the exact shape the spreadsheet sink expects: 25
//! fields, camelCase keys, every field always present. Missing data is a
//! sentinel value, never a missing key. [`AuditSignals`] carries the raw
//! fetch/detection outcomes; [`AuditRecord::from_signals`] is the only
//! place sentinel substitution happens, and it does no I/O.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::repo::RepoDescriptor;
use crate::{ABSENT, NA, PRESENT};

/// One audit row, serialized with the sink's column keys in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub chapter_university: String,
    pub project_name: String,
    pub creation_date: String,
    pub date_of_last_activity: String,
    pub project_type: String,
    pub repository_link: String,
    pub live_link: String,
    pub visibility: String,
    pub readme: String,
    pub license_mit_gplv2_etc: String,
    pub contributing_md: String,
    pub open_issues: String,
    pub open_prs: String,
    pub issue_templates: String,
    pub labeling_system_describe: String,
    pub tag_system_describe: String,
    pub associated_project_board_link: String,
    pub languages: String,
    pub frameworks: String,
    pub database: String,
    pub deployment: String,
    pub testing: String,
    pub dependencies: String,
    pub authentication: String,
    pub documentation_link: String,
}

/// Raw per-repository outcomes feeding one [`AuditRecord`].
///
/// `Option` distinguishes "fetch failed" (`None`) from a successful fetch
/// that found nothing (`Some` of an empty value). Detection fields carry
/// the matcher output verbatim, sentinel element included.
#[derive(Debug, Clone, Default)]
pub struct AuditSignals {
    pub chapter: Option<String>,
    pub repo: Option<RepoDescriptor>,
    pub has_readme: bool,
    pub has_contributing: bool,
    /// License resolved upstream: machine-readable id first, README scan
    /// fallback second.
    pub license: Option<String>,
    pub open_issues: Option<usize>,
    pub open_pulls: Option<usize>,
    pub has_issue_templates: bool,
    pub labels: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub dependencies: BTreeSet<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub deployment: Vec<String>,
    pub testing: Vec<String>,
    pub authentication: Vec<String>,
}

impl AuditRecord {
    /// Assemble one row from the collected signals. Pure; sentinel rules
    /// live here and nowhere else.
    #[must_use]
    pub fn from_signals(signals: AuditSignals) -> Self {
        let repo = signals.repo.unwrap_or_else(placeholder_descriptor);

        Self {
            chapter_university: non_empty_or_na(signals.chapter),
            project_name: non_empty_or_na(Some(repo.name)),
            creation_date: timestamp_or_na(repo.created_at),
            date_of_last_activity: timestamp_or_na(repo.pushed_at),
            project_type: NA.to_string(),
            repository_link: non_empty_or_na(Some(repo.html_url)),
            live_link: non_empty_or_na(repo.homepage),
            visibility: if repo.private { "Private" } else { "Public" }.to_string(),
            readme: glyph(signals.has_readme),
            license_mit_gplv2_etc: non_empty_or_na(signals.license),
            contributing_md: glyph(signals.has_contributing),
            open_issues: count_or_na(signals.open_issues),
            open_prs: count_or_na(signals.open_pulls),
            issue_templates: glyph(signals.has_issue_templates),
            labeling_system_describe: names_or_na(signals.labels),
            tag_system_describe: names_or_na(signals.tags),
            associated_project_board_link: NA.to_string(),
            languages: names_or_na(signals.languages),
            frameworks: labels_or_na(&signals.frameworks),
            database: labels_or_na(&signals.databases),
            deployment: labels_or_na(&signals.deployment),
            testing: labels_or_na(&signals.testing),
            dependencies: deps_or_na(&signals.dependencies),
            authentication: labels_or_na(&signals.authentication),
            documentation_link: NA.to_string(),
        }
    }
}

fn placeholder_descriptor() -> RepoDescriptor {
    RepoDescriptor {
        name: String::new(),
        created_at: None,
        pushed_at: None,
        html_url: String::new(),
        homepage: None,
        private: false,
        license: None,
        default_branch: String::new(),
        languages_url: String::new(),
    }
}

fn glyph(present: bool) -> String {
    if present { PRESENT } else { ABSENT }.to_string()
}

fn non_empty_or_na(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => NA.to_string(),
    }
}

/// A successful fetch renders its count, zero included. Only a failed
/// fetch degrades to the sentinel.
fn count_or_na(count: Option<usize>) -> String {
    count.map_or_else(|| NA.to_string(), |n| n.to_string())
}

fn timestamp_or_na(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || NA.to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

fn names_or_na(names: Option<Vec<String>>) -> String {
    match names {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => NA.to_string(),
    }
}

fn labels_or_na(labels: &[String]) -> String {
    if labels.is_empty() {
        NA.to_string()
    } else {
        labels.join(", ")
    }
}

fn deps_or_na(deps: &BTreeSet<String>) -> String {
    if deps.is_empty() {
        NA.to_string()
    } else {
        deps.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
