use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Action recorded by the SCM for one file of a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScmFileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unknown,
}

/// The three file activities that are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Added,
    Modified,
    Deleted,
}

impl Activity {
    pub const ALL: [Activity; 3] = [Activity::Added, Activity::Modified, Activity::Deleted];

    /// Maps an SCM action to a tracked activity, `None` for untracked actions.
    pub fn classify(status: ScmFileStatus) -> Option<Self> {
        match status {
            ScmFileStatus::Added => Some(Activity::Added),
            ScmFileStatus::Modified => Some(Activity::Modified),
            ScmFileStatus::Deleted => Some(Activity::Deleted),
            ScmFileStatus::Renamed
            | ScmFileStatus::Copied
            | ScmFileStatus::TypeChanged
            | ScmFileStatus::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: ScmFileStatus,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: ScmFileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub revision: Option<String>,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub files: Vec<FileChange>,
}

/// Outcome of a change log query that did not raise an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeLogResult {
    Success(Vec<ChangeSet>),
    Failure {
        provider_message: String,
        command_output: String,
    },
}

impl ChangeLogResult {
    pub fn failure(provider_message: impl Into<String>, command_output: impl Into<String>) -> Self {
        ChangeLogResult::Failure {
            provider_message: provider_message.into(),
            command_output: command_output.into(),
        }
    }
}

/// Inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        timestamp >= &self.from && timestamp <= &self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub author: String,
    pub date: NaiveDate,
    pub commits: u32,
    pub added: u32,
    pub modified: u32,
    pub deleted: u32,
    pub files: BTreeMap<Activity, BTreeMap<String, u32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub author: String,
    pub commits: u32,
    pub active_days: u32,
    pub added: u32,
    pub modified: u32,
    pub deleted: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub authors: Vec<AuthorSummary>,
    pub commits_per_weekday: [u32; 7],
    pub commits_per_month: [u32; 12],
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn only_add_modify_delete_are_tracked() {
        assert_eq!(Activity::classify(ScmFileStatus::Added), Some(Activity::Added));
        assert_eq!(Activity::classify(ScmFileStatus::Modified), Some(Activity::Modified));
        assert_eq!(Activity::classify(ScmFileStatus::Deleted), Some(Activity::Deleted));
        assert_eq!(Activity::classify(ScmFileStatus::Renamed), None);
        assert_eq!(Activity::classify(ScmFileStatus::Copied), None);
        assert_eq!(Activity::classify(ScmFileStatus::TypeChanged), None);
        assert_eq!(Activity::classify(ScmFileStatus::Unknown), None);
    }

    #[test]
    fn date_range_is_inclusive() {
        let from = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2012, 1, 31, 0, 0, 0).unwrap();
        let range = DateRange::new(from, to);
        assert!(range.contains(&from));
        assert!(range.contains(&to));
        assert!(!range.contains(&(to + chrono::Duration::seconds(1))));
    }
}
