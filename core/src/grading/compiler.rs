use std::{
    collections::HashMap,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use maplit::hashmap;
use serde::Deserialize;

use crate::error::*;
use crate::exec::{ExecRequest, ProcessRunner};
use crate::str_interp::{interp, InterpError};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Interp(#[from] InterpError),

    #[error("No compile argument contains #{{exePath}}")]
    NoExePath,
}

/// Compiler program and argument templates.
///
/// Arguments may refer to `#{sourcePath}`, `#{sourceDir}`, `#{sourceName}` and `#{exePath}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompileCommand {
    #[serde(default = "CompileCommand::default_program")]
    pub program: String,

    #[serde(default = "CompileCommand::default_args")]
    pub args: Vec<String>,
}

impl Default for CompileCommand {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            args: Self::default_args(),
        }
    }
}

impl CompileCommand {
    fn default_program() -> String {
        "gcc".to_owned()
    }

    fn default_args() -> Vec<String> {
        ["#{sourcePath}", "-o", "#{exePath}"]
            .map(str::to_owned)
            .to_vec()
    }

    fn make_interp_vars<'a>(source_path: &'a Path, exe_path: &'a Path) -> HashMap<&'static str, &'a OsStr> {
        hashmap! {
            "sourcePath" => source_path.as_os_str(),
            "sourceDir" => source_path.parent().unwrap_or(Path::new(".")).as_os_str(),
            "sourceName" => source_path.file_name().unwrap_or_default(),
            "exePath" => exe_path.as_os_str(),
        }
    }

    pub fn interpolate(
        &self,
        source_path: &Path,
        exe_path: &Path,
    ) -> std::result::Result<Vec<String>, InterpError> {
        let vars = Self::make_interp_vars(source_path, exe_path);
        self.args
            .iter()
            .map(|template| interp(template, |name| vars.get(name).copied()))
            .collect()
    }

    /// Checks every template against the known variables, and that the compiler is told
    /// where to put the executable.
    pub fn validate(&self) -> std::result::Result<(), TemplateError> {
        const EXE_MARK: &str = "\u{1}exe\u{1}";
        let args = self.interpolate(Path::new("main.c"), Path::new(EXE_MARK))?;
        if !args.iter().any(|arg| arg.contains(EXE_MARK)) {
            return Err(TemplateError::NoExePath);
        }
        Ok(())
    }
}

/// Turns a submission's source file into an executable.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    runner: &'a ProcessRunner,
    cmd: &'a CompileCommand,
}

impl<'a> Compiler<'a> {
    pub fn new(runner: &'a ProcessRunner, cmd: &'a CompileCommand) -> Self {
        Self { runner, cmd }
    }

    /// Returns whether the compiler exited with status 0 and left `exe_path` behind.
    /// Only host-level failures are errors.
    pub async fn compile(
        &self,
        source_dir: &Path,
        source_name: &OsStr,
        exe_path: &Path,
    ) -> Result<bool> {
        let source_path: PathBuf = source_dir.join(source_name);
        let args = self.cmd.interpolate(&source_path, exe_path)?;
        let req = ExecRequest::new(&self.cmd.program).args(&args);

        log::info!("Compiling {}", source_path.to_string_lossy());
        log::info!("{}", req.command_line());

        let res = self
            .runner
            .run(req)
            .await
            .with_context(|| format!("Failed to run compiler '{}'", self.cmd.program))?;

        if !res.success() {
            log::info!("Compile error: compiler {}", res.termination);
            return Ok(false);
        }
        if !exe_path.is_file() {
            log::warn!(
                "Compiler succeeded but produced no executable at '{}'",
                exe_path.to_string_lossy()
            );
            return Ok(false);
        }
        Ok(true)
    }
}
