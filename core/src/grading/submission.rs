use std::path::{Path, PathBuf};

use serde::Serialize;

/// One student's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub dir: PathBuf,
}

impl Submission {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Every subdirectory of `root` is a submission named after it. Sorted by name.
    pub fn enumerate(root: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        let res = fsutil::list_subdirs(root)?
            .into_iter()
            .map(|dir| {
                let name = dir
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::new(name, dir)
            })
            .collect();
        Ok(res)
    }

    pub fn find_source(&self, pattern: &::glob::Pattern) -> fsutil::Result<Option<PathBuf>> {
        fsutil::find_first_file_matching(&self.dir, pattern)
    }
}
