//! Child process execution with stdio redirection and a wall-clock time limit.

pub mod request;
pub mod result;
pub mod runner;

pub use request::*;
pub use result::*;
pub use runner::*;
