use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::*;
use crate::exec::ProcessRunner;
use crate::grading::{CompileCommand, Executor, GradeReport};
use crate::serdable::SourcePattern;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub grading: GradingConfig,
    #[serde(default)]
    pub compile: CompileCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GradingConfig {
    pub submissions_dir: PathBuf,
    pub input: PathBuf,
    pub expected_output: PathBuf,

    #[serde(default = "GradingConfig::default_results")]
    pub results: PathBuf,

    #[serde(default = "GradingConfig::default_error_log")]
    pub error_log: PathBuf,

    #[serde(default = "GradingConfig::default_time_limit_ms")]
    pub time_limit_ms: u64,

    #[serde(default)]
    pub source_pattern: SourcePattern,

    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl GradingConfig {
    pub fn new(
        submissions_dir: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        expected_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            submissions_dir: submissions_dir.into(),
            input: input.into(),
            expected_output: expected_output.into(),
            results: Self::default_results(),
            error_log: Self::default_error_log(),
            time_limit_ms: Self::default_time_limit_ms(),
            source_pattern: SourcePattern::default(),
            scratch_dir: None,
        }
    }

    fn default_results() -> PathBuf {
        GradeReport::DEFAULT_FILENAME.into()
    }

    fn default_error_log() -> PathBuf {
        ProcessRunner::DEFAULT_ERROR_LOG.into()
    }

    fn default_time_limit_ms() -> u64 {
        Executor::DEFAULT_TIME_LIMIT.as_millis() as u64
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.submissions_dir);
        resolve(&mut self.input);
        resolve(&mut self.expected_output);
        resolve(&mut self.results);
        resolve(&mut self.error_log);
        if let Some(dir) = self.scratch_dir.as_mut() {
            resolve(dir);
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "autograde.toml";

    pub fn new(grading: GradingConfig) -> Self {
        Self {
            source_config_file: None,
            grading,
            compile: CompileCommand::default(),
        }
    }

    pub fn example_toml() -> String {
        Asset::get(Self::FILENAME)
            .map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
            .unwrap_or_default()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads the line-oriented format: submissions dir, input file and expected output file,
    /// one per line. Blank lines are skipped and everything else takes its default.
    pub fn from_lines(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
        let mut next = |what: &str| {
            lines
                .next()
                .map(PathBuf::from)
                .with_context(|| format!("Missing {} path", what))
        };
        let submissions_dir = next("submissions dir")?;
        let input = next("input file")?;
        let expected_output = next("expected output file")?;
        Ok(Self::new(GradingConfig::new(
            submissions_dir,
            input,
            expected_output,
        )))
    }

    /// `*.toml` files are TOML with paths relative to the file's dir; anything else is
    /// read by [`Config::from_lines`].
    pub fn from_file(filepath: impl Into<PathBuf>) -> Result<Self> {
        let filepath = filepath.into();
        let text = fsutil::read_to_string(&filepath).context("Cannot read a config file")?;

        let is_toml = filepath.extension().map_or(false, |ext| ext == "toml");
        let mut cfg = if is_toml {
            let mut cfg = Self::from_toml(&text)
                .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
            let base = filepath.parent().unwrap_or(Path::new("."));
            cfg.grading.resolve_relative_paths(base);
            cfg
        } else {
            Self::from_lines(&text).with_context(|| format!("Invalid config: {:?}", filepath))?
        };

        cfg.compile
            .validate()
            .with_context(|| format!("Invalid compile.args in {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| format!("Cannot find '{}' in current or parent dirs", Self::FILENAME))
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_file(config_filepath)
    }
}
