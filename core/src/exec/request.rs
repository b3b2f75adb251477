use std::{
    ffi::{OsStr, OsString},
    fs::File,
    path::PathBuf,
    time::Duration,
};

/// One child process launch.
///
/// `argv[0]` is the name the child sees as its own; [`ExecRequest::new`] sets it to the program path.
/// Absent `stdin`/`stdout` are inherited from the caller.
#[derive(Debug)]
pub struct ExecRequest {
    pub program: PathBuf,
    pub argv: Vec<OsString>,
    pub stdin: Option<File>,
    pub stdout: Option<File>,
    pub timeout: Option<Duration>,
}

impl ExecRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let argv0 = program.clone().into_os_string();
        Self {
            program,
            argv: vec![argv0],
            stdin: None,
            stdout: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.argv.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.argv
            .extend(args.into_iter().map(|s| s.as_ref().to_owned()));
        self
    }

    pub fn stdin(mut self, file: File) -> Self {
        self.stdin = Some(file);
        self
    }

    pub fn stdout(mut self, file: File) -> Self {
        self.stdout = Some(file);
        self
    }

    pub fn timeout(mut self, limit: impl Into<Option<Duration>>) -> Self {
        self.timeout = limit.into();
        self
    }

    /// Space-joined argv, for logs.
    pub fn command_line(&self) -> String {
        self.argv
            .iter()
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
