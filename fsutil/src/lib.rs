use std::{
    fs::{self, File, OpenOptions, ReadDir},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Not a directory: '{0}'")]
        NotADirectory(PathBuf),
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    fs::remove_file(&filepath)
        .map_err(|e| Error::SingleIO("Cannot remove file", filepath.as_ref().to_owned(), e))
}

/// Open a file read-only.
#[must_use]
pub fn open_read(filepath: impl AsRef<Path>) -> Result<File> {
    File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot open file", filepath.as_ref().to_owned(), e))
}

/// Open a file for appending, creating it (mode 0644) if missing.
#[must_use]
pub fn open_append(filepath: impl AsRef<Path>) -> Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(&filepath).map_err(|e| {
        Error::SingleIO(
            "Cannot open file for append",
            filepath.as_ref().to_owned(),
            e,
        )
    })
}

#[must_use]
pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

/// Lists the direct subdirectories of `dir`, sorted by path.
pub fn list_subdirs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_owned()));
    }

    let mut res = Vec::new();
    for entry in self::read_dir(dir)? {
        let entry = entry.map_err(|e| Error::SingleIO("Cannot access dir entry", dir.to_owned(), e))?;
        let Ok(ft) = entry.file_type() else {
            continue
        };
        if ft.is_dir() {
            res.push(entry.path());
        }
    }
    res.sort();
    Ok(res)
}

/// Finds the first regular file in `dir` (by name order) whose name matches `filename_pattern`.
/// Hidden files never match.
pub fn find_first_file_matching(
    dir: impl AsRef<Path>,
    filename_pattern: &::glob::Pattern,
) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    let opts = ::glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut candidates = Vec::new();
    for entry in self::read_dir(dir)? {
        let entry = entry.map_err(|e| Error::SingleIO("Cannot access dir entry", dir.to_owned(), e))?;
        let Ok(ft) = entry.file_type() else {
            continue
        };
        if !ft.is_file() {
            continue;
        }
        let filename = entry.file_name();
        // `*.c` would otherwise match a bare `.c`
        if filename.to_string_lossy().starts_with('.') {
            continue;
        }
        if filename_pattern.matches_with(filename.to_string_lossy().as_ref(), opts) {
            candidates.push(entry.path());
        }
    }
    candidates.sort();
    log::trace!("Source candidates in {:?}: {:?}", dir, candidates);
    Ok(candidates.into_iter().next())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_first_file_matching_ok() {
        let dir = tempfile::tempdir().unwrap();
        let pat = ::glob::Pattern::new("*.c").unwrap();

        assert_eq!(find_first_file_matching(dir.path(), &pat).unwrap(), None);

        write(dir.path().join("README.md"), "hi").unwrap();
        write(dir.path().join(".c"), "").unwrap();
        write(dir.path().join(".hidden.c"), "").unwrap();
        mkdir_all(dir.path().join("sub.c")).unwrap();
        assert_eq!(find_first_file_matching(dir.path(), &pat).unwrap(), None);

        write(dir.path().join("zeta.c"), "").unwrap();
        write(dir.path().join("main.c"), "").unwrap();
        assert_eq!(
            find_first_file_matching(dir.path(), &pat).unwrap(),
            Some(dir.path().join("main.c"))
        );
    }

    #[test]
    fn list_subdirs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        mkdir_all(dir.path().join("bob")).unwrap();
        mkdir_all(dir.path().join("alice")).unwrap();
        write(dir.path().join("notes.txt"), "").unwrap();

        let subdirs = list_subdirs(dir.path()).unwrap();
        assert_eq!(
            subdirs,
            vec![dir.path().join("alice"), dir.path().join("bob")]
        );
    }

    #[test]
    fn list_subdirs_of_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        write(&file, "").unwrap();
        assert!(matches!(list_subdirs(&file), Err(Error::NotADirectory(_))));
    }

    #[test]
    fn open_append_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        {
            use std::io::Write;
            let mut f = open_append(&path).unwrap();
            f.write_all(b"a\n").unwrap();
            let mut f = open_append(&path).unwrap();
            f.write_all(b"b\n").unwrap();
        }
        assert_eq!(read_to_string(&path).unwrap(), "a\nb\n");
    }
}
