//! Per-author, per-day file activity aggregation.

use crate::model::{Activity, AuthorSummary, LogEntry};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File activity of a single change set, or the accumulated activity of
/// several change sets: activity -> file path -> count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounts {
    counts: BTreeMap<Activity, BTreeMap<String, u32>>,
}

impl ActivityCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, activity: Activity, path: &str) {
        *self
            .counts
            .entry(activity)
            .or_default()
            .entry(path.to_string())
            .or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: ActivityCounts) {
        for (activity, files) in other.counts {
            let target = self.counts.entry(activity).or_default();
            for (path, n) in files {
                *target.entry(path).or_insert(0) += n;
            }
        }
    }

    pub fn count(&self, activity: Activity, path: &str) -> u32 {
        self.counts
            .get(&activity)
            .and_then(|files| files.get(path))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all counts recorded for `activity`.
    pub fn total(&self, activity: Activity) -> u32 {
        self.counts
            .get(&activity)
            .map(|files| files.values().sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|files| files.is_empty())
    }

    pub fn as_map(&self) -> &BTreeMap<Activity, BTreeMap<String, u32>> {
        &self.counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub commits: u32,
    pub activity: ActivityCounts,
}

/// The aggregation produced by a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLog {
    authors: BTreeMap<String, BTreeMap<NaiveDate, DailyActivity>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates one change set's activity under its author and UTC day.
    pub fn add_change_log(&mut self, author: &str, date: DateTime<Utc>, activity: ActivityCounts) {
        let day = self
            .authors
            .entry(author.to_string())
            .or_default()
            .entry(date.date_naive())
            .or_default();
        day.commits += 1;
        day.activity.merge(activity);
    }

    pub fn merge(&mut self, other: ChangeLog) {
        for (author, days) in other.authors {
            let target = self.authors.entry(author).or_default();
            for (date, daily) in days {
                let entry = target.entry(date).or_default();
                entry.commits += daily.commits;
                entry.activity.merge(daily.activity);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    pub fn get(&self, author: &str, date: NaiveDate) -> Option<&DailyActivity> {
        self.authors.get(author).and_then(|days| days.get(&date))
    }

    /// Flattened author/day rows, ordered by author then date.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.authors
            .iter()
            .flat_map(|(author, days)| {
                days.iter().map(move |(date, daily)| LogEntry {
                    author: author.clone(),
                    date: *date,
                    commits: daily.commits,
                    added: daily.activity.total(Activity::Added),
                    modified: daily.activity.total(Activity::Modified),
                    deleted: daily.activity.total(Activity::Deleted),
                    files: daily.activity.as_map().clone(),
                })
            })
            .collect()
    }

    /// Totals per author, busiest first.
    pub fn summaries(&self) -> Vec<AuthorSummary> {
        let mut summaries: Vec<AuthorSummary> = self
            .authors
            .iter()
            .map(|(author, days)| {
                let mut summary = AuthorSummary {
                    author: author.clone(),
                    commits: 0,
                    active_days: days.len() as u32,
                    added: 0,
                    modified: 0,
                    deleted: 0,
                };
                for daily in days.values() {
                    summary.commits += daily.commits;
                    summary.added += daily.activity.total(Activity::Added);
                    summary.modified += daily.activity.total(Activity::Modified);
                    summary.deleted += daily.activity.total(Activity::Deleted);
                }
                summary
            })
            .collect();
        summaries.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));
        summaries
    }

    /// Commit counts bucketed by weekday, Monday first.
    pub fn commits_per_weekday(&self) -> [u32; 7] {
        let mut buckets = [0u32; 7];
        for (date, daily) in self.days() {
            buckets[date.weekday().num_days_from_monday() as usize] += daily.commits;
        }
        buckets
    }

    /// Commit counts bucketed by calendar month, January first.
    pub fn commits_per_month(&self) -> [u32; 12] {
        let mut buckets = [0u32; 12];
        for (date, daily) in self.days() {
            buckets[date.month0() as usize] += daily.commits;
        }
        buckets
    }

    fn days(&self) -> impl Iterator<Item = (&NaiveDate, &DailyActivity)> {
        self.authors.values().flat_map(|days| days.iter())
    }
}
