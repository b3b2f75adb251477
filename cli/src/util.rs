use std::{
    path::{Path, PathBuf},
    process::exit,
};

use crate::cmd::EXIT_FAILURE;

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(EXIT_FAILURE);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tilde_only_under_home() {
        assert_eq!(
            replace_homedir_to_tilde("/definitely/not/home"),
            Path::new("/definitely/not/home")
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                replace_homedir_to_tilde(home.join("subs")),
                Path::new("~/subs")
            );
        }
    }
}
