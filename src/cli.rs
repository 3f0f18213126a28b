use crate::adapter::{find_responsible, GenericScmAdapter, ScmAdapter};
use crate::changelog::ChangeLog;
use crate::config::{load_config, load_config_file, ProviderKind, ScmConfiguration};
use crate::error::ScmStatsError;
use crate::exclusions::FileExclusions;
use crate::model::{AuthorsOutput, DateRange, LogOutput, SCHEMA_VERSION};
use crate::range::resolve_range;
use crate::scm::{detect_scm_type, provider_for};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scmstats")]
#[command(about = "Per-author, per-day file activity from an SCM change log")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the project root (defaults to current dir)")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Path to a scmstats.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Start of range (RFC3339, YYYY-MM-DD, or a duration like 90d)")]
    pub since: Option<String>,

    #[arg(long, help = "End of range (RFC3339, YYYY-MM-DD, or a duration like 1week)")]
    pub until: Option<String>,

    #[arg(long = "ignore-author", help = "Author to leave out (repeatable)")]
    pub ignore_authors: Vec<String>,

    #[arg(long, value_enum, help = "Change log provider")]
    pub provider: Option<ProviderKind>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activity per author and day
    Log {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Totals per author with weekday and month distributions
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let run = Run::prepare(&self.common)?;
        let log = run.collect()?;

        match self.command {
            Commands::Log { json, ndjson } => {
                let entries = log.entries();
                if json {
                    crate::output::log_json(&LogOutput {
                        version: SCHEMA_VERSION,
                        generated_at: Utc::now(),
                        repository_path: run.root.to_string_lossy().to_string(),
                        since: run.range.from,
                        until: run.range.to,
                        entries,
                    })
                } else if ndjson {
                    crate::output::log_ndjson(&entries)
                } else {
                    crate::output::log_table(&entries)
                }
            }
            Commands::Authors { json } => {
                let output = AuthorsOutput {
                    version: SCHEMA_VERSION,
                    generated_at: Utc::now(),
                    repository_path: run.root.to_string_lossy().to_string(),
                    since: run.range.from,
                    until: run.range.to,
                    authors: log.summaries(),
                    commits_per_weekday: log.commits_per_weekday(),
                    commits_per_month: log.commits_per_month(),
                };
                if json {
                    crate::output::authors_json(&output)
                } else {
                    crate::output::authors_table(&output)
                }
            }
        }
    }
}

/// Everything resolved from the command line before the query runs.
struct Run {
    root: PathBuf,
    range: DateRange,
    config: ScmConfiguration,
}

impl Run {
    fn prepare(common: &CommonArgs) -> Result<Self> {
        let root = match &common.repo {
            Some(path) => path.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        let config = match &common.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_config(&root),
        };
        let mut config = config.with_ignored_authors(common.ignore_authors.iter().cloned());
        if let Some(provider) = common.provider {
            config.provider = provider;
        }

        let range = resolve_range(common.since.as_deref(), common.until.as_deref(), Utc::now())
            .context("Failed to resolve date range")?;

        Ok(Self { root, range, config })
    }

    fn collect(&self) -> Result<ChangeLog> {
        let scm_type = self
            .config
            .scm_type
            .clone()
            .or_else(|| detect_scm_type(&self.root).map(str::to_string))
            .ok_or_else(|| ScmStatsError::NoScm(self.root.clone()))?;

        let exclusions = FileExclusions::new(&self.root, self.config.exclusions.as_slice())
            .context("Failed to build file exclusions")?;
        let adapters: Vec<Box<dyn ScmAdapter>> = vec![Box::new(
            GenericScmAdapter::new(provider_for(self.config.provider), self.config.clone())
                .with_exclusions(exclusions),
        )];

        let adapter = find_responsible(&adapters, &scm_type).ok_or(ScmStatsError::NoAdapter(scm_type))?;
        Ok(adapter.change_log(&self.root, &self.range))
    }
}
