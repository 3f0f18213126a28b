//! SCM adapters: pick the adapter responsible for a repository type, then
//! fold the change log it queries into a [`ChangeLog`].

use crate::changelog::{ActivityCounts, ChangeLog};
use crate::config::ScmConfiguration;
use crate::exclusions::FileExclusions;
use crate::model::{Activity, ChangeLogResult, ChangeSet, DateRange};
use crate::scm::ScmProvider;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub trait ScmAdapter {
    /// Whether this adapter handles repositories of `scm_type` ("git", "svn", ...).
    fn is_responsible(&self, scm_type: &str) -> bool;

    /// Collects the change log of `root` over `range` into `log`.
    fn collect_into(&self, log: ChangeLog, root: &Path, range: &DateRange) -> ChangeLog;

    fn change_log(&self, root: &Path, range: &DateRange) -> ChangeLog {
        self.collect_into(ChangeLog::new(), root, range)
    }
}

/// Returns the first adapter that accepts `scm_type`.
pub fn find_responsible<'a>(
    adapters: &'a [Box<dyn ScmAdapter>],
    scm_type: &str,
) -> Option<&'a dyn ScmAdapter> {
    adapters
        .iter()
        .find(|adapter| adapter.is_responsible(scm_type))
        .map(|adapter| adapter.as_ref())
}

/// Adapter for every SCM type except Mercurial.
pub struct GenericScmAdapter<P> {
    provider: P,
    configuration: ScmConfiguration,
    exclusions: FileExclusions,
}

impl<P: ScmProvider> GenericScmAdapter<P> {
    pub fn new(provider: P, configuration: ScmConfiguration) -> Self {
        Self {
            provider,
            configuration,
            exclusions: FileExclusions::none(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: FileExclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// The (author, date, activity) a change set adds to the aggregation, if any.
    pub fn contribution<'c>(
        &self,
        change_set: &'c ChangeSet,
    ) -> Option<(&'c str, DateTime<Utc>, ActivityCounts)> {
        let author = change_set.author.as_deref()?;
        let date = change_set.date?;
        if self.configuration.is_ignored_author(author) {
            return None;
        }
        Some((author, date, self.activity_counts(change_set)))
    }

    fn activity_counts(&self, change_set: &ChangeSet) -> ActivityCounts {
        let mut counts = ActivityCounts::new();
        for file in &change_set.files {
            if let Some(activity) = Activity::classify(file.status) {
                if !self.exclusions.is_excluded(&file.path) {
                    counts.record(activity, &file.path);
                }
            }
        }
        counts
    }
}

impl<P: ScmProvider> ScmAdapter for GenericScmAdapter<P> {
    fn is_responsible(&self, scm_type: &str) -> bool {
        scm_type != "hg"
    }

    fn collect_into(&self, mut log: ChangeLog, root: &Path, range: &DateRange) -> ChangeLog {
        info!("Getting change log information for {}", absolute(root).display());

        match self.provider.change_log(root, range.from, range.to) {
            Ok(ChangeLogResult::Success(change_sets)) => {
                for change_set in &change_sets {
                    if let Some((author, date, counts)) = self.contribution(change_set) {
                        log.add_change_log(author, date, counts);
                    }
                }
            }
            Ok(ChangeLogResult::Failure {
                provider_message,
                command_output,
            }) => {
                warn!(
                    "Fail to retrieve SCM info. Reason: {}\n{}",
                    provider_message, command_output
                );
            }
            Err(e) => {
                warn!("Fail to retrieve SCM info. Reason: {}", e);
            }
        }
        log
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
