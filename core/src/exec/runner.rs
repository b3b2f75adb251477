use std::{
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::{process::Command, time::Instant};

use super::{request::*, result::*};

pub type Result<T> = std::result::Result<T, Error>;

/// Host-level failures. Any of these makes further grading pointless.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open error log: {0}")]
    ErrorLog(#[source] fsutil::Error),

    #[error("Failed to spawn '{}': {}", .0.to_string_lossy(), .1)]
    Spawn(PathBuf, #[source] io::Error),

    #[error("Failed to wait for child process: {0}")]
    Wait(#[source] io::Error),
}

/// Launches child processes. Every child's stderr is appended to `error_log`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    error_log: PathBuf,
}

impl ProcessRunner {
    pub const DEFAULT_ERROR_LOG: &str = "errors.txt";

    pub fn new(error_log: impl Into<PathBuf>) -> Self {
        Self {
            error_log: error_log.into(),
        }
    }

    pub fn error_log(&self) -> &Path {
        &self.error_log
    }

    /// Runs `req` to completion, or until its timeout elapses and the child is killed.
    pub async fn run(&self, req: ExecRequest) -> Result<ExecResult> {
        let cmdline = req.command_line();
        let ExecRequest {
            program,
            argv,
            stdin,
            stdout,
            timeout,
        } = req;

        let stderr = fsutil::open_append(&self.error_log).map_err(Error::ErrorLog)?;

        let mut cmd = Command::new(&program);
        if let Some((argv0, rest)) = argv.split_first() {
            cmd.arg0(argv0).args(rest);
        }
        cmd.stdin(stdin.map_or_else(Stdio::inherit, Stdio::from))
            .stdout(stdout.map_or_else(Stdio::inherit, Stdio::from))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true);

        log::debug!("Spawning: {} (timeout={:?})", cmdline, timeout);
        let mut child = cmd.spawn().map_err(|e| Error::Spawn(program, e))?;
        let start_at = Instant::now();

        let status = match timeout {
            None => Some(child.wait().await.map_err(Error::Wait)?),
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => Some(status.map_err(Error::Wait)?),
                Err(_elapsed) => None,
            },
        };

        let termination = match status {
            Some(status) => Termination::from_exit_status(status),
            None => {
                child
                    .kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill timed-out process: {:#}", e));
                Termination::TimedOut
            }
        };
        let elapsed = Instant::now().duration_since(start_at);

        log::debug!("'{}' {} [{}ms]", cmdline, termination, elapsed.as_millis());
        Ok(ExecResult {
            termination,
            elapsed,
        })
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ERROR_LOG)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    struct X {
        script: &'static str,
        input: Option<&'static str>,
        timeout: Option<Duration>,
        want: Termination,
        want_stdout: &'static str,
        want_stderr: &'static str,
    }

    async fn run_test(x: X) {
        let dir = tempfile::tempdir().unwrap();
        let capture = dir.path().join("stdout.txt");
        let error_log = dir.path().join("errors.txt");

        let mut req = ExecRequest::new("sh")
            .args(["-c", x.script])
            .stdout(fsutil::open_append(&capture).unwrap())
            .timeout(x.timeout);
        if let Some(input) = x.input {
            let input_path = dir.path().join("input.txt");
            fsutil::write(&input_path, input).unwrap();
            req = req.stdin(fsutil::open_read(&input_path).unwrap());
        }

        let res = dbg!(ProcessRunner::new(&error_log).run(req).await).unwrap();
        assert_eq!(res.termination, x.want);
        assert_eq!(fsutil::read_to_string(&capture).unwrap(), x.want_stdout);
        assert_eq!(fsutil::read_to_string(&error_log).unwrap(), x.want_stderr);
    }

    #[tokio::test]
    async fn should_exit_normally_with_status() {
        run_test(X {
            script: "echo hello; exit 3",
            input: None,
            timeout: None,
            want: Termination::Exited(3),
            want_stdout: "hello\n",
            want_stderr: "",
        })
        .await;
    }

    #[tokio::test]
    async fn should_redirect_stdin_and_stdout() {
        run_test(X {
            script: "read x; echo \"hello_$x\"",
            input: Some("123\n"),
            timeout: Some(Duration::from_secs(5)),
            want: Termination::Exited(0),
            want_stdout: "hello_123\n",
            want_stderr: "",
        })
        .await;
    }

    #[tokio::test]
    async fn should_append_stderr_to_error_log() {
        run_test(X {
            script: "echo oops >&2; echo fine",
            input: None,
            timeout: None,
            want: Termination::Exited(0),
            want_stdout: "fine\n",
            want_stderr: "oops\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_timed_out() {
        run_test(X {
            script: "echo partial; sleep 5",
            input: None,
            timeout: Some(Duration::from_millis(300)),
            want: Termination::TimedOut,
            want_stdout: "partial\n",
            want_stderr: "",
        })
        .await;
    }

    #[tokio::test]
    async fn should_complete_when_time_limit_is_longer() {
        run_test(X {
            script: "sleep 0.1; exit 7",
            input: None,
            timeout: Some(Duration::from_secs(5)),
            want: Termination::Exited(7),
            want_stdout: "",
            want_stderr: "",
        })
        .await;
    }

    #[tokio::test]
    async fn should_report_signal() {
        run_test(X {
            script: "kill -KILL $$",
            input: None,
            timeout: Some(Duration::from_secs(5)),
            want: Termination::Signaled(9),
            want_stdout: "",
            want_stderr: "",
        })
        .await;
    }

    #[tokio::test]
    async fn timeout_should_not_wait_for_natural_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path().join("errors.txt"));
        let req = ExecRequest::new("sleep")
            .arg("10")
            .timeout(Duration::from_millis(200));

        let res = runner.run(req).await.unwrap();
        assert_eq!(res.termination, Termination::TimedOut);
        assert!(res.is_abnormal());
        assert!(res.elapsed < Duration::from_secs(5), "{:?}", res.elapsed);
    }

    #[tokio::test]
    async fn spawn_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path().join("errors.txt"));
        let req = ExecRequest::new(dir.path().join("no-such-program"));

        let err = runner.run(req).await.unwrap_err();
        assert!(matches!(err, Error::Spawn(..)), "{:?}", err);
    }

    #[tokio::test]
    async fn unopenable_error_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path().join("missing-dir").join("errors.txt"));

        let err = runner.run(ExecRequest::new("true")).await.unwrap_err();
        assert!(matches!(err, Error::ErrorLog(_)), "{:?}", err);
    }
}
