use std::{
    fs::File,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use super::grade::Grade;

/// Append-only `name,score,reason` grade sheet.
#[derive(Debug)]
pub struct GradeReport {
    path: PathBuf,
    file: File,
}

impl GradeReport {
    pub const DEFAULT_FILENAME: &str = "results.csv";

    pub fn open(path: impl Into<PathBuf>) -> fsutil::Result<Self> {
        let path = path.into();
        let file = fsutil::open_append(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, grade: &Grade) -> anyhow::Result<()> {
        self.file
            .write_all(grade.to_csv_line().as_bytes())
            .with_context(|| format!("Cannot write grade to '{}'", self.path.to_string_lossy()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grading::GradeReason;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GradeReport::DEFAULT_FILENAME);
        fsutil::write(&path, "old,100,EXCELLENT\n").unwrap();

        let mut report = GradeReport::open(&path).unwrap();
        report
            .append(&Grade::new("alice", GradeReason::Similar))
            .unwrap();
        report
            .append(&Grade::new("bob", GradeReason::Timeout))
            .unwrap();
        drop(report);

        assert_eq!(
            fsutil::read_to_string(&path).unwrap(),
            "old,100,EXCELLENT\nalice,75,SIMILAR\nbob,20,TIMEOUT\n"
        );
    }
}
