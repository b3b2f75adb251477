pub mod action;
pub mod config;
pub mod exec;
pub mod grading;
pub mod interactive;
pub mod serdable;
pub mod str_interp;
pub mod style;

pub use crate::config::Config;

pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
