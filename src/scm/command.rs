use super::{restrict_to_prefix, ScmProvider};
use crate::error::Result;
use crate::model::{ChangeLogResult, ChangeSet, FileChange, ScmFileStatus};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::Command;
use tracing::debug;

const RECORD_SEP: char = '\u{1e}';
const FIELD_SEP: char = '\u{1f}';
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Reads the change log by running `git log -z --name-status`.
#[derive(Debug, Clone)]
pub struct GitCommandProvider {
    program: String,
}

impl GitCommandProvider {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn log_args(from: DateTime<Utc>, to: DateTime<Utc>, prefix: &str) -> Vec<String> {
        let mut args = vec![
            "-c".to_string(),
            "core.quotepath=false".to_string(),
            "--no-pager".to_string(),
            "log".to_string(),
            "-z".to_string(),
            "--name-status".to_string(),
            "--pretty=format:%x1e%H%x1f%an%x1f%cI".to_string(),
            format!("--since={}", from.format(GIT_DATE_FORMAT)),
            format!("--until={}", to.format(GIT_DATE_FORMAT)),
        ];
        if !prefix.is_empty() {
            args.extend(["--".to_string(), ".".to_string()]);
        }
        args
    }

    /// Runs git in `root`, handing back stdout, or the failure it reported.
    fn run(
        &self,
        root: &Path,
        args: &[String],
    ) -> Result<std::result::Result<String, ChangeLogResult>> {
        debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .current_dir(root)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Ok(Err(ChangeLogResult::failure(
                format!("{} {} exited with {}", self.program, args.join(" "), output.status),
                String::from_utf8_lossy(&output.stderr),
            )));
        }
        Ok(Ok(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl Default for GitCommandProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ScmProvider for GitCommandProvider {
    fn change_log(
        &self,
        root: &Path,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ChangeLogResult> {
        let prefix = match self.run(root, &["rev-parse".to_string(), "--show-prefix".to_string()])? {
            Ok(stdout) => stdout.trim().trim_end_matches('/').to_string(),
            Err(failure) => return Ok(failure),
        };

        let stdout = match self.run(root, &Self::log_args(from, to, &prefix))? {
            Ok(stdout) => stdout,
            Err(failure) => return Ok(failure),
        };

        let mut change_sets = restrict_to_prefix(parse_log(&stdout), &prefix);
        // git prints newest first
        change_sets.reverse();
        Ok(ChangeLogResult::Success(change_sets))
    }
}

/// Parses the output of `git log -z --name-status` with the record format
/// used by [`GitCommandProvider`]. Unparseable dates come back as `None`.
pub fn parse_log(output: &str) -> Vec<ChangeSet> {
    output
        .split(RECORD_SEP)
        .filter(|record| !record.trim_matches(|c: char| c == '\0' || c.is_whitespace()).is_empty())
        .map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> ChangeSet {
    // the header ends at a newline, or at a NUL for merges which list no files
    let (header, body) = record
        .split_once(['\n', '\0'])
        .unwrap_or((record, ""));
    let mut fields = header.split(FIELD_SEP);

    let revision = non_empty(fields.next());
    let author = non_empty(fields.next());
    let date = fields
        .next()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc));

    ChangeSet {
        revision,
        author,
        date,
        files: parse_name_status(body),
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads NUL-terminated `status path` entries; renames and copies carry a
/// source and a destination path.
fn parse_name_status(body: &str) -> Vec<FileChange> {
    let mut tokens = body.split('\0').filter(|t| !t.is_empty());

    let mut files = Vec::new();
    while let Some(code) = tokens.next() {
        let status = match code.chars().next() {
            Some('A') => ScmFileStatus::Added,
            Some('M') => ScmFileStatus::Modified,
            Some('D') => ScmFileStatus::Deleted,
            Some('R') => ScmFileStatus::Renamed,
            Some('C') => ScmFileStatus::Copied,
            Some('T') => ScmFileStatus::TypeChanged,
            _ => ScmFileStatus::Unknown,
        };
        let path = match status {
            ScmFileStatus::Renamed | ScmFileStatus::Copied => tokens.nth(1),
            _ => tokens.next(),
        };
        match path {
            Some(path) => files.push(FileChange::new(path, status)),
            None => break,
        }
    }
    files
}
