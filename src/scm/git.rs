use super::{prefix_below, restrict_to_prefix, ScmProvider};
use crate::error::{Result, ScmStatsError};
use crate::model::{ChangeLogResult, ChangeSet, DateRange, FileChange, ScmFileStatus};
use chrono::{DateTime, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use tracing::debug;

/// Reads the change log in-process by walking history from HEAD.
#[derive(Debug, Default, Clone, Copy)]
pub struct GixProvider;

impl GixProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ScmProvider for GixProvider {
    fn change_log(
        &self,
        root: &Path,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChangeLogResult> {
        let repo = discover(root)?;
        debug!("Opened git repository at {}", repo.path().display());

        let head = repo.head()?;
        if head.is_unborn() {
            return Ok(ChangeLogResult::failure(
                "Repository has no commits",
                format!("HEAD of {} is unborn", repo.path().display()),
            ));
        }

        let prefix = repo
            .workdir()
            .map(|top| prefix_below(top, root))
            .unwrap_or_default();
        debug!("Restricting change log to '{}'", prefix);

        let walker = HistoryWalker { repo: &repo };
        let change_sets = walker.collect_change_sets(&DateRange::new(from, to))?;
        Ok(ChangeLogResult::Success(restrict_to_prefix(change_sets, &prefix)))
    }
}

struct HistoryWalker<'r> {
    repo: &'r Repository,
}

impl HistoryWalker<'_> {
    fn collect_change_sets(&self, range: &DateRange) -> Result<Vec<ChangeSet>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut change_sets = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading change log...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| ScmStatsError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if range.contains(&timestamp) {
                let author = commit.author()?.name.to_string();
                // merges list no files, as with `git log --name-status`
                let files = if parents.len() > 1 {
                    Vec::new()
                } else {
                    self.changed_files(commit_id, parents.first().copied())?
                };
                change_sets.push(ChangeSet {
                    revision: Some(commit_id.to_string()),
                    author: (!author.trim().is_empty()).then_some(author),
                    date: Some(timestamp),
                    files,
                });
                pb.inc(1);
            }

            stack.extend(parents);
        }

        pb.finish_and_clear();
        change_sets.sort_by_key(|cs| cs.date);
        Ok(change_sets)
    }

    /// Diffs a commit against its parent, or the empty tree for a root commit.
    fn changed_files(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<Vec<FileChange>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let parent_tree = match parent_id {
            Some(id) => Some(self.repo.find_commit(id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        Ok(changes.into_iter().filter_map(file_change).collect())
    }
}

fn file_change(change: ChangeDetached) -> Option<FileChange> {
    let (location, entry_mode, status) = match change {
        ChangeDetached::Addition {
            location,
            entry_mode,
            ..
        } => (location, entry_mode, ScmFileStatus::Added),
        ChangeDetached::Deletion {
            location,
            entry_mode,
            ..
        } => (location, entry_mode, ScmFileStatus::Deleted),
        ChangeDetached::Modification {
            location,
            entry_mode,
            ..
        } => (location, entry_mode, ScmFileStatus::Modified),
        ChangeDetached::Rewrite {
            location,
            entry_mode,
            copy,
            ..
        } => {
            let status = if copy {
                ScmFileStatus::Copied
            } else {
                ScmFileStatus::Renamed
            };
            (location, entry_mode, status)
        }
    };
    if entry_mode.is_tree() {
        return None;
    }
    Some(FileChange::new(location.to_string(), status))
}
