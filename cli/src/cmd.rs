pub mod compare;
pub mod grade;
pub mod init;
pub mod run;

use log::LevelFilter;

/// Exit status for fatal errors. Kept clear of the `compare` statuses (1, 2, 3).
pub const EXIT_FAILURE: i32 = 255;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("g"))]
    Grade(grade::Args),

    Compare(compare::Args),
    Run(run::Args),
    Init(init::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level())
            .parse_env("RUST_LOG")
            .init();
    }

    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Grade(args) => grade::exec(args, self).await,
            Compare(args) => compare::exec(args, self),
            Run(args) => run::exec(args, self).await,
            Init(args) => init::exec(args, self),
        }
    }
}

#[cfg(test)]
mod test {
    use clap::{CommandFactory as _, Parser as _};

    use super::*;

    #[test]
    fn verify_cli() {
        GlobalArgs::command().debug_assert();
    }

    #[test]
    fn verbosity() {
        let args = GlobalArgs::parse_from(["autograde", "-vv", "init"]);
        assert_eq!(args.log_level(), LevelFilter::Debug);
        let args = GlobalArgs::parse_from(["autograde", "init"]);
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn grade_alias() {
        let args = GlobalArgs::parse_from(["autograde", "g", "--json"]);
        assert!(matches!(args.subcmd, Subcommand::Grade(_)));
    }
}
