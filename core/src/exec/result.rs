use std::{fmt, process::ExitStatus, time::Duration};

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Normal exit with the given status.
    Exited(i32),
    /// Killed by a signal it did not handle.
    Signaled(i32),
    /// Killed by the runner because the time limit elapsed.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    pub termination: Termination,
    pub elapsed: Duration,
}

impl Termination {
    pub(crate) fn from_exit_status(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt as _;
        match status.code() {
            Some(code) => Self::Exited(code),
            None => Self::Signaled(status.signal().unwrap_or_default()),
        }
    }
}

impl ExecResult {
    /// Exit status, meaningful only after a normal exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self.termination {
            Termination::Exited(code) => Some(code),
            _ => None,
        }
    }

    /// Whether the child died from a signal, the runner's own kill included.
    pub fn is_abnormal(&self) -> bool {
        !matches!(self.termination, Termination::Exited(_))
    }

    pub fn success(&self) -> bool {
        self.termination == Termination::Exited(0)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Termination::*;
        match self {
            Exited(code) => write!(f, "exited with status {}", code),
            Signaled(sig) => write!(f, "killed by signal {}", sig),
            TimedOut => write!(f, "timed out"),
        }
    }
}
