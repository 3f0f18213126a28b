//! Project configuration, read from `scmstats.toml` in the repository root.
//!
//! ```toml
//! ignore_authors = ["bot", "release-manager"]
//! exclusions = ["target/", "*.lock"]
//! provider = "gix"    # or "command"
//! scm_type = "git"    # skip detection
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "scmstats.toml";

/// Which change log query backs the git adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// In-process history walk
    #[default]
    Gix,
    /// `git log` subprocess
    Command,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScmConfiguration {
    pub ignore_authors: BTreeSet<String>,
    pub exclusions: Vec<String>,
    pub provider: ProviderKind,
    pub scm_type: Option<String>,
}

impl ScmConfiguration {
    pub fn is_ignored_author(&self, author: &str) -> bool {
        self.ignore_authors.contains(author)
    }

    pub fn with_ignored_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_authors.extend(authors.into_iter().map(Into::into));
        self
    }
}

/// Loads `scmstats.toml` from `repo_path`. A missing or broken file yields
/// the defaults.
pub fn load_config(repo_path: &Path) -> ScmConfiguration {
    let path = repo_path.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        return ScmConfiguration::default();
    }
    match load_config_file(&path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            ScmConfiguration::default()
        }
    }
}

/// Loads an explicitly named config file; errors propagate.
pub fn load_config_file(path: &Path) -> Result<ScmConfiguration> {
    let content = std::fs::read_to_string(path)?;
    let config: ScmConfiguration = toml::from_str(&content)?;
    Ok(config)
}
