use crate::error::Result;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Gitignore-style patterns for files that never count as activity.
pub struct FileExclusions {
    matcher: Gitignore,
}

impl FileExclusions {
    pub fn new<P: AsRef<Path>, S: AsRef<str>>(root: P, patterns: &[S]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root.as_ref());
        for pattern in patterns {
            builder.add_line(None, pattern.as_ref())?;
        }
        Ok(Self {
            matcher: builder.build()?,
        })
    }

    pub fn none() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// `path` is relative to the repository root.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }
}

impl Default for FileExclusions {
    fn default() -> Self {
        Self::none()
    }
}
