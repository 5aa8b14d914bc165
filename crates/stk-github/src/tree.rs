//! Recursive contents traversal.

use stk_core::repo::ContentEntry;

use crate::GithubClient;

impl GithubClient {
    /// List every entry under `path`, depth-first, directory nodes
    /// included.
    ///
    /// Runs on an explicit worklist rather than call-stack recursion, so
    /// traversal depth is bounded by heap and a failed fetch truncates
    /// only that branch: entries accumulated so far are kept and the
    /// failure is logged, never surfaced to the caller.
    pub async fn list_tree(&self, owner: &str, repo: &str, path: &str) -> Vec<ContentEntry> {
        let mut accumulated = Vec::new();
        let mut worklist = vec![path.to_string()];

        while let Some(dir) = worklist.pop() {
            let entries = match self.dir_entries(owner, repo, &dir).await {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(%error, path = %dir, "tree listing truncated at branch");
                    continue;
                }
            };
            for entry in entries {
                if entry.is_dir() {
                    worklist.push(entry.path.clone());
                }
                accumulated.push(entry);
            }
        }

        accumulated
    }
}
