//! The sequential audit loop: enumerate the owner's repositories, then
//! fully process one repository at a time (fetch, detect, build,
//! publish) with a fixed pause in between.
//!
//! Error policy per repository: a failed metadata snapshot is a hard
//! skip; every other fetch degrades the fields it feeds and nothing
//! else. No error escapes the loop body.

use std::collections::BTreeSet;
use std::time::Duration;

use stk_config::{ConfigError, StocktakeConfig};
use stk_core::record::{AuditRecord, AuditSignals};
use stk_detect::{DetectionTables, ManifestKind, parse_manifest, readme_license, test_directory};
use stk_github::{GithubClient, GithubError};
use stk_sheets::SheetsClient;

use crate::cli::Cli;

/// Everything one run needs, resolved from CLI flags and configuration.
pub struct RunSettings {
    pub owner: String,
    pub is_org: bool,
    pub chapter: Option<String>,
    pub sheet_url: String,
    pub sheet_token: Option<String>,
    pub github_token: Option<String>,
    pub delay: Duration,
}

impl RunSettings {
    /// Merge CLI flags over configuration. Flags win; the sink endpoint
    /// is the only value that must come from somewhere.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no sink endpoint was
    /// supplied by either source.
    pub fn resolve(cli: &Cli, config: &StocktakeConfig) -> Result<Self, ConfigError> {
        let sheet_url = cli
            .sheet_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                config
                    .sheets
                    .is_configured()
                    .then(|| config.sheets.endpoint.trim().to_string())
            })
            .ok_or_else(|| ConfigError::Missing {
                field: "sheets.endpoint".to_string(),
                env_hint: "STOCKTAKE_SHEETS__ENDPOINT".to_string(),
            })?;

        let chapter = cli
            .chapter
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                let chapter = config.audit.chapter.trim();
                (!chapter.is_empty()).then(|| chapter.to_string())
            });

        let sheet_token = cli
            .sheet_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| config.sheets.token().map(String::from));

        Ok(Self {
            owner: cli.owner.clone(),
            is_org: cli.org,
            chapter,
            sheet_url,
            sheet_token,
            github_token: config.github.token().map(String::from),
            delay: Duration::from_millis(cli.delay_ms.unwrap_or(config.audit.delay_ms)),
        })
    }
}

/// Run the full audit: one pass over every repository of the owner.
///
/// # Errors
///
/// Only startup can fail; once the loop is running, per-repository
/// failures are logged and skipped.
pub async fn run(settings: &RunSettings) -> anyhow::Result<()> {
    let github = GithubClient::new(settings.github_token.clone());
    let sheets = SheetsClient::new();
    let tables = DetectionTables::builtin();

    let repos = github.list_all_repos(&settings.owner, settings.is_org).await;
    println!("Found {} repos for '{}'.", repos.len(), settings.owner);

    for (index, repo) in repos.iter().enumerate() {
        if let Some(record) = audit_repo(&github, &tables, settings, repo).await {
            match sheets
                .publish(&settings.sheet_url, settings.sheet_token.as_deref(), &record)
                .await
            {
                Ok(()) => println!("✓ Added row for repo '{repo}'"),
                Err(error) => println!("✗ Failed row for '{repo}': {error}"),
            }
        } else {
            println!("✗ Skipped '{repo}': repository metadata unavailable");
        }

        if index + 1 < repos.len() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    println!("Done!");
    Ok(())
}

/// Audit a single repository. `None` means hard skip: the metadata
/// snapshot could not be fetched and no record must be published.
async fn audit_repo(
    github: &GithubClient,
    tables: &DetectionTables,
    settings: &RunSettings,
    repo: &str,
) -> Option<AuditRecord> {
    let owner = settings.owner.as_str();

    let descriptor = match github.get_repo(owner, repo).await {
        Ok(descriptor) => descriptor,
        Err(error) => {
            tracing::warn!(%error, repo, "metadata fetch failed, skipping repository");
            return None;
        }
    };

    // README is fetched once and reused for the license fallback scan.
    let readme = soft(github.file_content(owner, repo, "README.md").await, repo, "readme")
        .flatten();
    let license = descriptor.license.clone().or_else(|| {
        readme
            .as_deref()
            .and_then(readme_license)
            .map(String::from)
    });

    let has_contributing = soft(
        github.file_content(owner, repo, "CONTRIBUTING.md").await,
        repo,
        "contributing",
    )
    .flatten()
    .is_some();

    let open_issues = soft(github.count_open_issues(owner, repo).await, repo, "issues");
    let open_pulls = soft(github.count_open_pulls(owner, repo).await, repo, "pulls");

    let has_issue_templates = soft(
        github.dir_entries(owner, repo, ".github/ISSUE_TEMPLATE").await,
        repo,
        "issue templates",
    )
    .is_some_and(|entries| !entries.is_empty());

    let labels = soft(github.label_names(owner, repo).await, repo, "labels");
    let tags = soft(github.tag_names(owner, repo).await, repo, "tags");
    let languages = soft(github.languages(&descriptor).await, repo, "languages");

    let top_level = soft(github.dir_entries(owner, repo, "").await, repo, "contents")
        .unwrap_or_default();

    let mut dependencies = BTreeSet::new();
    if let Some(text) = soft(
        github.file_content(owner, repo, "requirements.txt").await,
        repo,
        "requirements.txt",
    )
    .flatten()
    {
        dependencies.extend(parse_manifest(ManifestKind::RequirementsTxt, &text));
    }
    if let Some(text) = soft(
        github.file_content(owner, repo, "package.json").await,
        repo,
        "package.json",
    )
    .flatten()
    {
        dependencies.extend(parse_manifest(ManifestKind::PackageJson, &text));
    }

    let test_tree = match test_directory(&top_level) {
        Some(dir) => github.list_tree(owner, repo, &dir.path).await,
        None => Vec::new(),
    };

    let signals = AuditSignals {
        chapter: settings.chapter.clone(),
        has_readme: readme.is_some(),
        has_contributing,
        license,
        open_issues,
        open_pulls,
        has_issue_templates,
        labels,
        tags,
        languages,
        frameworks: tables.frameworks.match_dependencies(&dependencies),
        databases: tables.databases.match_dependencies(&dependencies),
        deployment: tables.deployment_files.match_filenames(&top_level),
        testing: stk_detect::detect_testing(tables, &dependencies, &top_level, &test_tree),
        authentication: tables.authentication.match_dependencies(&dependencies),
        dependencies,
        repo: Some(descriptor),
    };

    Some(AuditRecord::from_signals(signals))
}

/// Soft-degrade helper: a failed sub-fetch is logged and collapses to
/// `None`, leaving sentinel substitution to the record builder.
fn soft<T>(result: Result<T, GithubError>, repo: &str, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, repo, what, "sub-fetch degraded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Serve a fixed route table on a local port; unrouted URLs get 404.
    fn serve(routes: Vec<(String, u16, String)>) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind local server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let base = format!("http://{addr}");

        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(path, _, _)| *path == url)
                    .map_or_else(
                        || (404, r#"{"message": "Not Found"}"#.to_string()),
                        |(_, status, body)| (*status, body.clone()),
                    );
                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/json"[..],
                )
                .expect("static header");
                let _ = request.respond(
                    tiny_http::Response::from_string(body)
                        .with_status_code(status)
                        .with_header(header),
                );
            }
        });

        base
    }

    fn settings(owner: &str) -> RunSettings {
        RunSettings {
            owner: owner.to_string(),
            is_org: false,
            chapter: Some("State University".to_string()),
            sheet_url: "https://example.com/rows".to_string(),
            sheet_token: None,
            github_token: None,
            delay: Duration::from_millis(0),
        }
    }

    #[tokio::test]
    async fn failed_metadata_fetch_is_a_hard_skip() {
        let base = serve(Vec::new());
        let github = GithubClient::with_base_url(None, base);
        let tables = DetectionTables::builtin();

        let record = audit_repo(&github, &tables, &settings("octo"), "gone").await;
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn full_audit_assembles_one_record() {
        let repo_body = |base: &str| {
            format!(
                r#"{{
                    "name": "demo",
                    "private": true,
                    "html_url": "https://github.com/octo/demo",
                    "created_at": "2023-04-02T10:00:00Z",
                    "pushed_at": "2024-01-15T08:30:00Z",
                    "homepage": null,
                    "license": {{ "key": "mit", "name": "MIT License", "spdx_id": "MIT" }},
                    "default_branch": "main",
                    "languages_url": "{base}/repos/octo/demo/languages"
                }}"#
            )
        };

        let routes = |base: &str| {
            vec![
                ("/repos/octo/demo".to_string(), 200, repo_body(base)),
                (
                    "/repos/octo/demo/contents/README.md".to_string(),
                    200,
                    r#"{"name": "README.md", "path": "README.md", "type": "file",
                        "content": "IyBkZW1v\nCg==", "encoding": "base64"}"#
                        .to_string(),
                ),
                (
                    "/repos/octo/demo/issues?state=open&per_page=100".to_string(),
                    200,
                    r#"[
                        {"number": 1},
                        {"number": 2, "pull_request": {"url": "x"}},
                        {"number": 3},
                        {"number": 4, "pull_request": {"url": "y"}},
                        {"number": 5}
                    ]"#
                    .to_string(),
                ),
                (
                    "/repos/octo/demo/pulls?state=open&per_page=100".to_string(),
                    200,
                    "[]".to_string(),
                ),
                (
                    "/repos/octo/demo/labels?per_page=100".to_string(),
                    200,
                    r#"[{"name": "bug"}]"#.to_string(),
                ),
                (
                    "/repos/octo/demo/tags?per_page=100".to_string(),
                    200,
                    "[]".to_string(),
                ),
                (
                    "/repos/octo/demo/languages".to_string(),
                    200,
                    r#"{"Python": 52431}"#.to_string(),
                ),
                (
                    "/repos/octo/demo/contents".to_string(),
                    200,
                    r#"[
                        {"name": "Dockerfile", "path": "Dockerfile", "type": "file"},
                        {"name": "requirements.txt", "path": "requirements.txt", "type": "file"},
                        {"name": "tests", "path": "tests", "type": "dir"}
                    ]"#
                    .to_string(),
                ),
                (
                    "/repos/octo/demo/contents/requirements.txt".to_string(),
                    200,
                    r#"{"name": "requirements.txt", "path": "requirements.txt",
                        "type": "file", "content": "flask==2.3\npytest\n"}"#
                        .to_string(),
                ),
                (
                    "/repos/octo/demo/contents/tests".to_string(),
                    200,
                    r#"[{"name": "jest.config.js", "path": "tests/jest.config.js", "type": "file"}]"#
                        .to_string(),
                ),
            ]
        };

        // Bind a fresh server whose routes embed its own address.
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind local server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let base = format!("http://{addr}");
        let table = routes(&base);
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                let (status, body) = table
                    .iter()
                    .find(|(path, _, _)| *path == url)
                    .map_or_else(
                        || (404, r#"{"message": "Not Found"}"#.to_string()),
                        |(_, status, body)| (*status, body.clone()),
                    );
                let _ = request.respond(
                    tiny_http::Response::from_string(body).with_status_code(status),
                );
            }
        });

        let github = GithubClient::with_base_url(None, base);
        let tables = DetectionTables::builtin();

        let record = audit_repo(&github, &tables, &settings("octo"), "demo")
            .await
            .expect("record");

        assert_eq!(record.chapter_university, "State University");
        assert_eq!(record.project_name, "demo");
        assert_eq!(record.visibility, "Private");
        assert_eq!(record.readme, "✅");
        assert_eq!(record.contributing_md, "❌");
        assert_eq!(record.license_mit_gplv2_etc, "MIT");
        assert_eq!(record.open_issues, "3");
        assert_eq!(record.open_prs, "0");
        assert_eq!(record.issue_templates, "❌");
        assert_eq!(record.labeling_system_describe, "bug");
        assert_eq!(record.tag_system_describe, "N/A");
        assert_eq!(record.languages, "Python");
        assert_eq!(record.frameworks, "Flask");
        assert_eq!(record.database, "N/A");
        assert_eq!(record.deployment, "Docker");
        assert_eq!(record.testing, "pytest, Jest, Test Folder");
        assert_eq!(record.dependencies, "flask, pytest");
        assert_eq!(record.authentication, "N/A");
    }

    fn config_with_sink() -> StocktakeConfig {
        let mut config = StocktakeConfig::default();
        config.sheets.endpoint = "https://api.sheety.co/abc/audit/sheet1".to_string();
        config
    }

    #[test]
    fn missing_sink_endpoint_is_a_config_error() {
        let cli = Cli::try_parse_from(["stk", "octo"]).unwrap();
        let err = RunSettings::resolve(&cli, &StocktakeConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn cli_flags_win_over_config() {
        let cli = Cli::try_parse_from([
            "stk",
            "octo",
            "--sheet-url",
            "https://example.com/rows",
            "--delay-ms",
            "50",
        ])
        .unwrap();

        let mut config = config_with_sink();
        config.audit.delay_ms = 2000;

        let settings = RunSettings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.sheet_url, "https://example.com/rows");
        assert_eq!(settings.delay, Duration::from_millis(50));
    }

    #[test]
    fn config_fills_in_what_flags_omit() {
        let cli = Cli::try_parse_from(["stk", "octo"]).unwrap();

        let mut config = config_with_sink();
        config.audit.chapter = "State University".to_string();
        config.sheets.token = "s3cr3t".to_string();
        config.github.token = "ghp_abc".to_string();

        let settings = RunSettings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.sheet_url, "https://api.sheety.co/abc/audit/sheet1");
        assert_eq!(settings.chapter.as_deref(), Some("State University"));
        assert_eq!(settings.sheet_token.as_deref(), Some("s3cr3t"));
        assert_eq!(settings.github_token.as_deref(), Some("ghp_abc"));
        assert_eq!(settings.delay, Duration::from_millis(1000));
    }

    #[test]
    fn blank_chapter_flag_falls_through_to_none() {
        let cli = Cli::try_parse_from(["stk", "octo", "--chapter", "  "]).unwrap();
        let settings = RunSettings::resolve(&cli, &config_with_sink()).unwrap();
        assert!(settings.chapter.is_none());
    }
}
