use std::path::PathBuf;

use anyhow::Context as _;
use autograde_core::{
    action,
    config::{Config, GradingConfig},
    print_success,
};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// `autograde.toml`, or a three-line file listing the submissions dir, input and
    /// expected output. Searched for in the current and parent dirs if omitted.
    #[arg()] // positional argument
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub submissions: Option<PathBuf>,

    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub expected: Option<PathBuf>,

    #[arg(long)]
    pub results: Option<PathBuf>,

    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Print all grades as JSON on stdout instead of progress output.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Without a config file, the three required paths given as flags are enough.
    fn load_config(&self) -> anyhow::Result<Config> {
        let cfg = match (&self.config, &self.submissions, &self.input, &self.expected) {
            (Some(path), ..) => Config::from_file(path)?,
            (None, Some(subs), Some(input), Some(expected)) => {
                Config::new(GradingConfig::new(subs, input, expected))
            }
            (None, ..) => Config::from_file_finding_in_ancestors(util::current_dir())?,
        };
        Ok(self.apply_overrides(cfg))
    }

    fn apply_overrides(&self, mut cfg: Config) -> Config {
        let g = &mut cfg.grading;
        if let Some(p) = &self.submissions {
            g.submissions_dir = p.clone();
        }
        if let Some(p) = &self.input {
            g.input = p.clone();
        }
        if let Some(p) = &self.expected {
            g.expected_output = p.clone();
        }
        if let Some(p) = &self.results {
            g.results = p.clone();
        }
        if let Some(ms) = self.time_limit_ms {
            g.time_limit_ms = ms;
        }
        cfg
    }
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = args.load_config()?;
    if let Some(path) = &cfg.source_config_file {
        log::info!(
            "Using config {}",
            util::replace_homedir_to_tilde(path).to_string_lossy()
        );
    }

    let grades = action::grade_all(&cfg, args.json).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&grades).context("Failed to serialize grades")?;
        println!("{}", json);
    } else {
        print_success!(
            "Appended {} grades to {}",
            grades.len(),
            util::replace_homedir_to_tilde(&cfg.grading.results).to_string_lossy()
        );
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use clap::Parser as _;

    use super::super::Subcommand;
    use super::*;

    fn grade_args(argv: &[&str]) -> Args {
        let argv = ["autograde", "grade"].iter().chain(argv);
        match GlobalArgs::parse_from(argv).subcmd {
            Subcommand::Grade(args) => args,
            _ => panic!("not a grade command"),
        }
    }

    #[test]
    fn flags_alone_make_a_config() {
        let args = grade_args(&[
            "--submissions",
            "subs",
            "--input",
            "in.txt",
            "--expected",
            "out.txt",
            "--time-limit-ms",
            "800",
        ]);
        let cfg = args.load_config().unwrap();
        assert_eq!(cfg.source_config_file, None);
        assert_eq!(cfg.grading.submissions_dir, Path::new("subs"));
        assert_eq!(cfg.grading.expected_output, Path::new("out.txt"));
        assert_eq!(cfg.grading.time_limit_ms, 800);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocheck.conf");
        fsutil::write(&path, "subs\nin.txt\nout.txt\n").unwrap();
        let path_str = path.to_string_lossy().into_owned();

        let args = grade_args(&[&path_str, "--results", "/tmp/grades.csv"]);
        let cfg = args.load_config().unwrap();
        assert_eq!(cfg.grading.submissions_dir, Path::new("subs"));
        assert_eq!(cfg.grading.results, Path::new("/tmp/grades.csv"));
    }
}
