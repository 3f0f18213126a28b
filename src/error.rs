use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScmStatsError>;

#[derive(Error, Debug)]
pub enum ScmStatsError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Exclusion pattern error: {0}")]
    Pattern(#[from] ignore::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("No adapter is responsible for SCM type '{0}'")]
    NoAdapter(String),
    #[error("No SCM metadata found at {}", .0.display())]
    NoScm(PathBuf),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large, keep them boxed
impl From<gix::object::find::existing::Error> for ScmStatsError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        ScmStatsError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for ScmStatsError {
    fn from(err: gix::object::commit::Error) -> Self {
        ScmStatsError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for ScmStatsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        ScmStatsError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for ScmStatsError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        ScmStatsError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for ScmStatsError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        ScmStatsError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for ScmStatsError {
    fn from(err: gix::objs::decode::Error) -> Self {
        ScmStatsError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for ScmStatsError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        ScmStatsError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for ScmStatsError {
    fn from(err: gix::discover::Error) -> Self {
        ScmStatsError::GitDiscover(Box::new(err))
    }
}
