use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Per-submission directory holding the compiled executable and the capture file.
/// Removed with everything inside it when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    const PREFIX: &str = "autograde-";
    const EXECUTABLE_NAME: &str = "student.out";
    const CAPTURE_NAME: &str = "output.txt";

    /// Creates a fresh directory under `base`, or under the system temp dir if `None`.
    pub fn create(base: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(Self::PREFIX);
        let dir = match base {
            Some(base) => builder.tempdir_in(base),
            None => builder.tempdir(),
        }
        .context("Cannot create scratch dir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn executable(&self) -> PathBuf {
        self.path().join(Self::EXECUTABLE_NAME)
    }

    pub fn capture(&self) -> PathBuf {
        self.path().join(Self::CAPTURE_NAME)
    }

    pub fn close(self) -> anyhow::Result<()> {
        let path = self.path().to_owned();
        self.dir
            .close()
            .with_context(|| format!("Cannot remove scratch dir '{}'", path.to_string_lossy()))
    }
}
