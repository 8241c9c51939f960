//! ci-prepare - run CI setup scripts in order
//!
//! Each script may emit agent log commands (`##vso[...]`) that prepend to
//! `PATH` or set variables. The runner applies them to the environment the
//! following scripts are started with.

pub mod common;
pub mod runner;

pub use common::{Error, Result};
pub use runner::env::Environment;
pub use runner::log_command::LogLine;
pub use runner::steps::{Step, STEPS};
pub use runner::{Runner, State};
