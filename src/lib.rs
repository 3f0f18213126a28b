//! Change log statistics for source-controlled projects.
//!
//! An [`adapter::ScmAdapter`] queries an [`scm::ScmProvider`] for the change
//! sets of a project over a [`model::DateRange`] and folds them into a
//! [`changelog::ChangeLog`]: author -> day -> file activity counts.

pub mod adapter;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod exclusions;
pub mod model;
pub mod output;
pub mod range;
pub mod scm;

pub use adapter::{find_responsible, GenericScmAdapter, ScmAdapter};
pub use changelog::{ActivityCounts, ChangeLog, DailyActivity};
pub use error::{Result, ScmStatsError};
