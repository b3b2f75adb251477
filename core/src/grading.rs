//! Compile, run and classify one submission at a time.
//!
//! Stages gate on each other: a missing source, a failed compile or a cut-short run
//! each end the submission's grading without touching later stages.

pub mod compare;
pub mod compiler;
pub mod executor;
pub mod grade;
pub mod report;
pub mod scratch;
pub mod submission;

pub use compare::{classify, classify_files, Similarity};
pub use compiler::{CompileCommand, Compiler, TemplateError};
pub use executor::Executor;
pub use grade::{Grade, GradeReason};
pub use report::GradeReport;
pub use scratch::ScratchDir;
pub use submission::Submission;

use crate::config::{Config, GradingConfig};
use crate::error::*;
use crate::exec::ProcessRunner;

#[derive(Debug, Clone)]
pub struct Grader {
    grading: GradingConfig,
    compile: CompileCommand,
    runner: ProcessRunner,
}

impl Grader {
    pub fn new(cfg: &Config) -> Self {
        Self {
            grading: cfg.grading.clone(),
            compile: cfg.compile.clone(),
            runner: ProcessRunner::new(&cfg.grading.error_log),
        }
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    /// Grades one submission. Errors are host-level failures that should stop the whole run.
    pub async fn grade(&self, submission: &Submission) -> Result<Grade> {
        let reason = self.grade_reason(submission).await?;
        log::info!("{}: {}", submission.name, reason);
        Ok(Grade::new(&submission.name, reason))
    }

    async fn grade_reason(&self, submission: &Submission) -> Result<GradeReason> {
        let cfg = &self.grading;

        let Some(source) = submission.find_source(&cfg.source_pattern)? else {
            return Ok(GradeReason::NoCFile)
        };
        let Some(source_name) = source.file_name() else {
            return Ok(GradeReason::NoCFile)
        };

        let scratch = ScratchDir::create(cfg.scratch_dir.as_deref())?;
        let exe = scratch.executable();
        let capture = scratch.capture();

        let compiled = Compiler::new(&self.runner, &self.compile)
            .compile(&submission.dir, source_name, &exe)
            .await?;
        if !compiled {
            scratch.close()?;
            return Ok(GradeReason::CompilationError);
        }

        let completed = Executor::new(&self.runner)
            .time_limit(cfg.time_limit())
            .execute(&exe, &cfg.input, &capture)
            .await?;
        if !completed {
            // partial output of a cut-short run is never compared
            fsutil::remove_file(&capture)?;
            scratch.close()?;
            return Ok(GradeReason::Timeout);
        }

        let similarity = compare::classify_files(&capture, &cfg.expected_output)
            .context("Failed to compare outputs")?;
        fsutil::remove_file(&capture)?;
        scratch.close()?;

        Ok(similarity.into())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::{
        path::{Path, PathBuf},
        process::Command,
    };

    use super::CompileCommand;

    /// A "compiler" that copies the source to the executable path, so sources can be shell scripts.
    pub fn copying_compiler() -> CompileCommand {
        CompileCommand {
            program: "cp".to_owned(),
            args: vec!["#{sourcePath}".to_owned(), "#{exePath}".to_owned()],
        }
    }

    pub fn write_script(path: impl AsRef<Path>, body: &str) {
        use std::os::unix::fs::PermissionsExt as _;
        let path = path.as_ref();
        fsutil::write(path, body).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Puts an executable script at `dir/name`.
    pub fn install_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
        let src = dir.join(format!("{}.src", name));
        let dst = dir.join(name);
        write_script(&src, body);
        // written by a separate process so no writable fd of ours can make exec fail with ETXTBSY
        let status = Command::new("cp").arg(&src).arg(&dst).status().unwrap();
        assert!(status.success());
        dst
    }

    pub fn has_program(name: &str) -> bool {
        Command::new("sh")
            .args(["-c", &format!("command -v {} >/dev/null", name)])
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
