pub mod command;
pub mod git;

pub use self::command::GitCommandProvider;
pub use self::git::GixProvider;

use crate::config::ProviderKind;
use crate::error::Result;
use crate::model::{ChangeLogResult, ChangeSet};
use chrono::{DateTime, Utc};
use std::path::{Component, Path};

/// A change log query against some SCM. `Ok(Failure)` is a query that ran
/// and reported a problem, `Err` is a query that could not run.
pub trait ScmProvider {
    fn change_log(
        &self,
        root: &Path,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChangeLogResult>;
}

impl<P: ScmProvider + ?Sized> ScmProvider for Box<P> {
    fn change_log(
        &self,
        root: &Path,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChangeLogResult> {
        (**self).change_log(root, from, to)
    }
}

pub fn provider_for(kind: ProviderKind) -> Box<dyn ScmProvider> {
    match kind {
        ProviderKind::Gix => Box::new(GixProvider::new()),
        ProviderKind::Command => Box::new(GitCommandProvider::new()),
    }
}

const MARKERS: [(&str, &str); 3] = [(".git", "git"), (".hg", "hg"), (".svn", "svn")];

/// Guesses the SCM type from metadata directories in `root` or its ancestors.
pub fn detect_scm_type(root: &Path) -> Option<&'static str> {
    root.ancestors().find_map(|dir| {
        MARKERS
            .iter()
            .find(|(marker, _)| dir.join(marker).exists())
            .map(|(_, scm)| *scm)
    })
}

/// Location of `root` below `top`, as a `/`-separated path. Empty when
/// `root` is `top` itself or lies outside it.
pub fn prefix_below(top: &Path, root: &Path) -> String {
    let top = std::fs::canonicalize(top).unwrap_or_else(|_| top.to_path_buf());
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    match root.strip_prefix(&top) {
        Ok(relative) => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => String::new(),
    }
}

/// Keeps the files of each change set that lie below `prefix` (relative to
/// the repository top level) and drops change sets left without files.
/// An empty prefix keeps everything, merges without files included.
pub fn restrict_to_prefix(change_sets: Vec<ChangeSet>, prefix: &str) -> Vec<ChangeSet> {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return change_sets;
    }
    change_sets
        .into_iter()
        .filter_map(|mut cs| {
            cs.files.retain(|f| {
                f.path == prefix
                    || f.path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            });
            (!cs.files.is_empty()).then_some(cs)
        })
        .collect()
}
