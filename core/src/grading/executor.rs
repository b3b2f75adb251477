use std::{path::Path, time::Duration};

use crate::error::*;
use crate::exec::{ExecRequest, ExecResult, ProcessRunner};

/// Runs a compiled submission once against the grading input.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    runner: &'a ProcessRunner,
    time_limit: Duration,
}

impl<'a> Executor<'a> {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(5);

    pub fn new(runner: &'a ProcessRunner) -> Self {
        Self {
            runner,
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Runs `exe` with stdin from `input` and stdout appended to `capture`.
    ///
    /// Returns `false` if the run was cut short (time limit or signal).
    /// `exe` is deleted afterwards in every case, errors included; `capture` is left for the caller.
    pub async fn execute(&self, exe: &Path, input: &Path, capture: &Path) -> Result<bool> {
        let res = self.run_once(exe, input, capture).await;
        let removed = fsutil::remove_file(exe).context("Cannot remove compiled executable");
        let res = res?;
        removed?;

        if res.is_abnormal() {
            log::info!(
                "'{}' {} [{}ms]",
                exe.to_string_lossy(),
                res.termination,
                res.elapsed.as_millis()
            );
            return Ok(false);
        }
        if let Some(code) = res.exit_code().filter(|&c| c != 0) {
            log::info!("'{}' exited with status {}", exe.to_string_lossy(), code);
        }
        Ok(true)
    }

    async fn run_once(&self, exe: &Path, input: &Path, capture: &Path) -> Result<ExecResult> {
        let stdin = fsutil::open_read(input).context("Cannot open grading input")?;
        let stdout = fsutil::open_append(capture).context("Cannot open capture file")?;

        let req = ExecRequest::new(exe)
            .stdin(stdin)
            .stdout(stdout)
            .timeout(self.time_limit);
        Ok(self.runner.run(req).await?)
    }
}
