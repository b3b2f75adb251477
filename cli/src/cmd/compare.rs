use std::path::PathBuf;

use anyhow::Context as _;
use autograde_core::{grading, style};

use super::{GlobalArgs, SubcmdResult};

/// Exit status: 1 = identical, 3 = similar, 2 = different.
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Output produced by a submission.
    pub produced: PathBuf,

    /// Reference output.
    pub expected: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let similarity = grading::classify_files(&args.produced, &args.expected)
        .context("Failed to compare files")?;
    println!("{}", style::similarity_icon(similarity));
    std::process::exit(similarity.status_code());
}
