use std::{ffi::OsString, path::PathBuf, time::Duration};

use anyhow::Context as _;
use autograde_core::exec::{ExecRequest, ProcessRunner};

use super::{GlobalArgs, SubcmdResult, EXIT_FAILURE};

/// Runs one program the way submissions are run, and exits with its status.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// File to feed to stdin. Inherited if omitted.
    #[arg(long)]
    pub stdin: Option<PathBuf>,

    /// File to append stdout to. Inherited if omitted.
    #[arg(long)]
    pub stdout: Option<PathBuf>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// File to append stderr to.
    #[arg(long, default_value = ProcessRunner::DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Program followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

impl Args {
    fn to_request(&self) -> anyhow::Result<ExecRequest> {
        let (program, rest) = self.command.split_first().context("No program given")?;
        let mut req = ExecRequest::new(program)
            .args(rest)
            .timeout(self.timeout_ms.map(Duration::from_millis));
        if let Some(path) = &self.stdin {
            req = req.stdin(fsutil::open_read(path)?);
        }
        if let Some(path) = &self.stdout {
            req = req.stdout(fsutil::open_append(path)?);
        }
        Ok(req)
    }
}

pub async fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let req = args.to_request()?;
    log::debug!("{}", req.command_line());

    let res = ProcessRunner::new(&args.error_log)
        .run(req)
        .await
        .context("Failed to run program")?;

    eprintln!("{} [{}ms]", res.termination, res.elapsed.as_millis());
    std::process::exit(res.exit_code().unwrap_or(EXIT_FAILURE));
}
