use autograde_core::{action, print_success};
use std::path::PathBuf;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,

    /// Overwrite an existing config without asking.
    #[arg(short, long)]
    force: bool,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    match action::init_config(&args.dir, args.force)? {
        Some(path) => print_success!(
            "Wrote example config. (path: {})",
            util::replace_homedir_to_tilde(path).to_string_lossy()
        ),
        None => println!("Kept the existing config."),
    }
    Ok(())
}
